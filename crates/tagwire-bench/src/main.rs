//! Benchmark for tagwire encode/decode throughput.
//!
//! Builds a telemetry-style schema, synthesizes a batch of records, and
//! times the encode and decode paths.

use std::time::Instant;

use tagwire::{Cardinality, Record, Schema, SchemaBuilder, Value, decode_message, encode_message};

const RECORDS: usize = 100_000;

fn build_schema() -> Schema {
    SchemaBuilder::new()
        .message("Sample", |m| {
            m.field("sensor", "string", Cardinality::Required, 1)
                .field("sequence", "uint64", Cardinality::Required, 2)
                .field("delta_us", "sint64", Cardinality::Optional, 3)
                .field("reading", "double", Cardinality::Optional, 4)
                .field("flags", "fixed32", Cardinality::Optional, 5)
                .field("window", "Window", Cardinality::Optional, 6)
                .field("annotations", "string", Cardinality::Repeated, 7)
        })
        .message("Window", |m| {
            m.field("lo", "sfixed64", Cardinality::Required, 1)
                .field("hi", "sfixed64", Cardinality::Required, 2)
        })
        .build()
        .expect("benchmark schema is valid")
}

/// Deterministic pseudo-random stream, xorshift64.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

fn make_record(rng: &mut Rng, index: usize) -> Record {
    let window = Record::new()
        .with("lo", (rng.next() as i64) % 1_000_000)
        .with("hi", (rng.next() as i64) % 1_000_000 + 1_000_000);

    let mut record = Record::new()
        .with("sensor", format!("sensor-{:03}", index % 512))
        .with("sequence", index as u64)
        .with("delta_us", (rng.next() as i64) % 10_000 - 5_000)
        .with("reading", (rng.next() % 10_000) as f64 / 100.0)
        .with("flags", (rng.next() & 0xFFFF) as u32)
        .with("window", window);

    if index % 4 == 0 {
        record.set(
            "annotations",
            Value::Repeated(vec![
                Value::Str("calibrated".into()),
                Value::Str("batch".into()),
            ]),
        );
    }
    record
}

fn main() {
    let schema = build_schema();

    println!("Generating {} records...", RECORDS);
    let mut rng = Rng(0x1234_5678_9ABC_DEF0);
    let records: Vec<Record> = (0..RECORDS).map(|i| make_record(&mut rng, i)).collect();

    println!("Encoding...");
    let start = Instant::now();
    let mut encoded = Vec::with_capacity(RECORDS);
    let mut total_bytes = 0usize;
    for record in &records {
        let bytes = encode_message(&schema, "Sample", record).expect("encode");
        total_bytes += bytes.len();
        encoded.push(bytes);
    }
    let encode_time = start.elapsed();

    println!("Decoding...");
    let start = Instant::now();
    let mut decoded = Vec::with_capacity(RECORDS);
    for bytes in &encoded {
        decoded.push(decode_message(&schema, "Sample", bytes).expect("decode"));
    }
    let decode_time = start.elapsed();

    assert_eq!(decoded.len(), records.len());
    assert_eq!(decoded[0], records[0]);
    assert_eq!(decoded[RECORDS - 1], records[RECORDS - 1]);

    let secs_enc = encode_time.as_secs_f64();
    let secs_dec = decode_time.as_secs_f64();
    println!();
    println!("records:       {}", RECORDS);
    println!(
        "wire size:     {} bytes ({:.1} bytes/record)",
        total_bytes,
        total_bytes as f64 / RECORDS as f64
    );
    println!(
        "encode:        {:?} ({:.0} records/s, {:.1} MB/s)",
        encode_time,
        RECORDS as f64 / secs_enc,
        total_bytes as f64 / secs_enc / 1e6
    );
    println!(
        "decode:        {:?} ({:.0} records/s, {:.1} MB/s)",
        decode_time,
        RECORDS as f64 / secs_dec,
        total_bytes as f64 / secs_dec / 1e6
    );
}
