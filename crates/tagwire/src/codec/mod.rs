//! Wire-format encoding and decoding.
//!
//! `primitives` holds the varint/zigzag/fixed-width layer, `scalar` the
//! per-type conversions, and `message` the schema-driven dispatch loop.

pub mod message;
pub mod primitives;
mod scalar;

pub use message::{
    DecodeOptions, UnknownFieldPolicy, decode_message, decode_message_with_options, encode_message,
    encoded_len,
};
pub use primitives::{
    Reader, Writer, varint_len, zigzag_decode32, zigzag_decode64, zigzag_encode32, zigzag_encode64,
};
