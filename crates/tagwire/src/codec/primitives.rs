//! Primitive wire encoding/decoding.
//!
//! Implements varints over the 32- and 64-bit domains, the zigzag
//! transform for signed values, and fixed-width little-endian reads and
//! writes.

use crate::error::DecodeError;
use crate::limits::MAX_VARINT_BYTES;

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding binary data.
///
/// Wraps a byte slice and provides methods for reading primitives with
/// bounds checking and error handling.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        if self.pos >= self.data.len() {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let byte = self.data[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if n > self.data.len() - self.pos {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads an unsigned varint over the 64-bit domain.
    ///
    /// Accepts any continuation-terminated sequence up to 10 bytes,
    /// including non-minimal encodings with redundant zero groups.
    #[inline]
    pub fn read_varint64(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        let mut result: u64 = 0;
        let mut shift = 0;

        for i in 0..MAX_VARINT_BYTES {
            let byte = self.read_byte(context)?;
            let value = (byte & 0x7F) as u64;

            // The 10th group holds only the top bit of a 64-bit value.
            if shift == 63 && value > 1 {
                return Err(DecodeError::VarintOverflow { context });
            }

            result |= value << shift;

            if byte & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;

            if i == MAX_VARINT_BYTES - 1 {
                return Err(DecodeError::VarintTooLong);
            }
        }

        Err(DecodeError::VarintTooLong)
    }

    /// Reads an unsigned varint over the 32-bit domain.
    #[inline]
    pub fn read_varint32(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        let value = self.read_varint64(context)?;
        u32::try_from(value).map_err(|_| DecodeError::VarintOverflow { context })
    }

    /// Reads 4 raw bytes, little-endian.
    #[inline]
    pub fn read_fixed32(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(self.read_bytes(4, context)?);
        Ok(u32::from_le_bytes(bytes))
    }

    /// Reads 8 raw bytes, little-endian.
    #[inline]
    pub fn read_fixed64(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(self.read_bytes(8, context)?);
        Ok(u64::from_le_bytes(bytes))
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding binary data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes an unsigned varint in minimal form.
    #[inline]
    pub fn write_varint64(&mut self, mut value: u64) {
        // Stack buffer batches the writes (faster than per-byte push)
        let mut buf = [0u8; MAX_VARINT_BYTES];
        let mut len = 0;
        loop {
            let mut byte = (value & 0x7F) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            buf[len] = byte;
            len += 1;
            if value == 0 {
                break;
            }
        }
        self.buf.extend_from_slice(&buf[..len]);
    }

    /// Writes an unsigned 32-bit varint in minimal form.
    #[inline]
    pub fn write_varint32(&mut self, value: u32) {
        self.write_varint64(value as u64);
    }

    /// Writes 4 little-endian bytes.
    #[inline]
    pub fn write_fixed32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes 8 little-endian bytes.
    #[inline]
    pub fn write_fixed64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }
}

/// Exact byte count of the minimal varint encoding of `value`.
///
/// Used by the encoder's sizing pass: `ceil(bitlength / 7)`, one byte
/// minimum for zero.
#[inline]
pub fn varint_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

// =============================================================================
// ZIGZAG ENCODING
// =============================================================================

/// Encodes a signed 32-bit integer using zigzag encoding.
///
/// Maps negative numbers to odd positive numbers:
/// 0 -> 0, -1 -> 1, 1 -> 2, -2 -> 3, 2 -> 4, ...
#[inline]
pub fn zigzag_encode32(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

/// Decodes a zigzag-encoded 32-bit unsigned integer back to signed.
#[inline]
pub fn zigzag_decode32(n: u32) -> i32 {
    ((n >> 1) as i32) ^ (-((n & 1) as i32))
}

/// Encodes a signed 64-bit integer using zigzag encoding.
#[inline]
pub fn zigzag_encode64(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Decodes a zigzag-encoded 64-bit unsigned integer back to signed.
#[inline]
pub fn zigzag_decode64(n: u64) -> i64 {
    ((n >> 1) as i64) ^ (-((n & 1) as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zigzag32_roundtrip() {
        for v in [0i32, 1, -1, 127, -128, i32::MAX, i32::MIN] {
            assert_eq!(zigzag_decode32(zigzag_encode32(v)), v);
        }
    }

    #[test]
    fn test_zigzag64_roundtrip() {
        for v in [0i64, 1, -1, 127, -128, i64::MAX, i64::MIN] {
            assert_eq!(zigzag_decode64(zigzag_encode64(v)), v);
        }
    }

    #[test]
    fn test_zigzag_values() {
        assert_eq!(zigzag_encode32(0), 0);
        assert_eq!(zigzag_encode32(-1), 1);
        assert_eq!(zigzag_encode32(1), 2);
        assert_eq!(zigzag_encode32(-2), 3);
        assert_eq!(zigzag_encode32(2), 4);
        assert_eq!(zigzag_encode32(i32::MIN), u32::MAX);
        assert_eq!(zigzag_encode64(i64::MIN), u64::MAX);
    }

    #[test]
    fn test_varint64_roundtrip() {
        let test_values = [0u64, 1, 127, 128, 255, 256, 16383, 16384, 1 << 35, u64::MAX];

        for v in test_values {
            let mut writer = Writer::new();
            writer.write_varint64(v);

            let mut reader = Reader::new(writer.as_bytes());
            let decoded = reader.read_varint64("test").unwrap();
            assert_eq!(v, decoded, "failed for {}", v);
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn test_varint_minimal_length() {
        let cases = [
            (0u64, 1usize),
            (1, 1),
            (127, 1),
            (128, 2),
            (150, 2),
            (16383, 2),
            (16384, 3),
            ((1 << 28) - 1, 4),
            (1 << 28, 5),
            (u32::MAX as u64, 5),
            (u64::MAX, 10),
        ];
        for (value, expected) in cases {
            assert_eq!(varint_len(value), expected, "len for {}", value);

            let mut writer = Writer::new();
            writer.write_varint64(value);
            assert_eq!(writer.len(), expected, "encoded len for {}", value);
        }
    }

    #[test]
    fn test_reader_position_tracking() {
        let mut reader = Reader::new(&[0x96, 0x01, 0xAA]);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.remaining_len(), 3);

        assert_eq!(reader.read_varint64("test").unwrap(), 150);
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.remaining_len(), 1);
        assert!(!reader.is_empty());

        reader.read_byte("test").unwrap();
        assert!(reader.is_empty());
        assert_eq!(reader.remaining_len(), 0);
    }

    #[test]
    fn test_varint_accepts_non_minimal() {
        // 0 encoded with a redundant continuation group
        let mut reader = Reader::new(&[0x80, 0x00]);
        assert_eq!(reader.read_varint64("test").unwrap(), 0);
        assert!(reader.is_empty());

        // 1 padded out to three groups
        let mut reader = Reader::new(&[0x81, 0x80, 0x00]);
        assert_eq!(reader.read_varint64("test").unwrap(), 1);
    }

    #[test]
    fn test_varint_truncated() {
        let mut reader = Reader::new(&[0x96]);
        assert!(matches!(
            reader.read_varint64("test"),
            Err(DecodeError::UnexpectedEof { .. })
        ));

        let mut reader = Reader::new(&[]);
        assert!(matches!(
            reader.read_varint32("test"),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_varint_too_long() {
        // 11 continuation bytes should fail
        let data = [0x80u8; 11];
        let mut reader = Reader::new(&data);
        assert!(matches!(
            reader.read_varint64("test"),
            Err(DecodeError::VarintTooLong)
        ));
    }

    #[test]
    fn test_varint64_overflow() {
        // 10 bytes whose final group exceeds the single remaining bit
        let data = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x02];
        let mut reader = Reader::new(&data);
        assert!(matches!(
            reader.read_varint64("test"),
            Err(DecodeError::VarintOverflow { .. })
        ));
    }

    #[test]
    fn test_varint32_rejects_wide_values() {
        let mut writer = Writer::new();
        writer.write_varint64(u32::MAX as u64 + 1);
        let mut reader = Reader::new(writer.as_bytes());
        assert!(matches!(
            reader.read_varint32("test"),
            Err(DecodeError::VarintOverflow { .. })
        ));

        let mut writer = Writer::new();
        writer.write_varint64(u32::MAX as u64);
        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(reader.read_varint32("test").unwrap(), u32::MAX);
    }

    #[test]
    fn test_fixed_roundtrip() {
        let mut writer = Writer::new();
        writer.write_fixed32(0xDEAD_BEEF);
        writer.write_fixed64(0x0123_4567_89AB_CDEF);

        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(reader.read_fixed32("test").unwrap(), 0xDEAD_BEEF);
        assert_eq!(reader.read_fixed64("test").unwrap(), 0x0123_4567_89AB_CDEF);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_fixed_little_endian() {
        let mut writer = Writer::new();
        writer.write_fixed32(1);
        assert_eq!(writer.as_bytes(), &[0x01, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_fixed_truncated() {
        let mut reader = Reader::new(&[0x01, 0x02, 0x03]);
        assert!(matches!(
            reader.read_fixed32("test"),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_read_bytes_eof() {
        let data = [0u8; 5];
        let mut reader = Reader::new(&data);
        assert!(matches!(
            reader.read_bytes(10, "test"),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }
}
