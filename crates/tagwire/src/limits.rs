//! Security limits for decoding and encoding.

/// Maximum number of bytes a single varint may occupy on the wire.
///
/// A 64-bit value needs at most `ceil(64 / 7) = 10` bytes. Longer
/// sequences are rejected even when the redundant groups are zero.
pub const MAX_VARINT_BYTES: usize = 10;

/// Largest valid field tag.
///
/// Tag keys pack `(tag << 3) | wire_kind` into a 32-bit varint, which
/// leaves 29 bits for the tag itself.
pub const MAX_TAG: u32 = (1 << 29) - 1;

/// Maximum nesting depth for embedded messages.
///
/// Bounds recursion on adversarial deeply-nested length-delimited
/// payloads (and on caller-constructed record trees when encoding).
pub const MAX_NESTING_DEPTH: usize = 64;
