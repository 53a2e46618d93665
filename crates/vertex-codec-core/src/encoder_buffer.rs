use byteorder::{ByteOrder, LittleEndian};

use crate::status::StatusResult;

/// Growable output buffer for record serialization.
///
/// Multi-byte integers are written little endian. Varints use 7 data bits
/// per byte with the high bit marking continuation; signed values are
/// zigzag-folded first so small magnitudes of either sign stay short.
#[derive(Debug, Clone, Default)]
pub struct EncoderBuffer {
    buffer: Vec<u8>,
}

impl EncoderBuffer {
    /// Create a new empty encoder buffer
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Create a buffer with initial capacity, failing instead of aborting
    /// when the allocation cannot be satisfied.
    pub fn try_with_capacity(capacity: usize) -> StatusResult<Self> {
        let mut buffer = Vec::new();
        buffer.try_reserve(capacity)?;
        Ok(Self { buffer })
    }

    /// Reserve room for at least `additional` more bytes.
    pub fn try_reserve(&mut self, additional: usize) -> StatusResult<()> {
        self.buffer.try_reserve(additional)?;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Get the current buffer data
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Get the current buffer size
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Encode raw bytes
    pub fn encode(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    pub fn encode_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn encode_u32(&mut self, value: u32) {
        let mut bytes = [0u8; 4];
        LittleEndian::write_u32(&mut bytes, value);
        self.buffer.extend_from_slice(&bytes);
    }

    /// Encode an unsigned LEB128-style varint.
    pub fn encode_varint(&mut self, mut value: u64) {
        loop {
            let byte = (value & 0x7F) as u8;
            value >>= 7;
            if value == 0 {
                self.buffer.push(byte);
                break;
            }
            self.buffer.push(byte | 0x80);
        }
    }

    /// Encode a signed value as a zigzag varint.
    pub fn encode_varint_signed_i32(&mut self, value: i32) {
        self.encode_varint(u64::from(convert_signed_int_to_symbol(value)));
    }
}

/// Folds a signed integer onto the unsigned range: non-negative values map
/// to even symbols, negative values to odd ones.
pub fn convert_signed_int_to_symbol(value: i32) -> u32 {
    if value >= 0 {
        (value as u32) << 1
    } else {
        (((-(value + 1)) as u32) << 1) | 1
    }
}

/// Returns the encoded size of `value` as an unsigned varint.
pub fn varint_size(mut value: u64) -> usize {
    let mut size = 1;
    while value >= 0x80 {
        value >>= 7;
        size += 1;
    }
    size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoder_buffer_creation() {
        let buf = EncoderBuffer::new();
        assert_eq!(buf.size(), 0);
    }

    #[test]
    fn test_encoder_buffer_with_capacity() {
        let buf = EncoderBuffer::try_with_capacity(1024).unwrap();
        assert_eq!(buf.size(), 0);
        assert!(buf.capacity() >= 1024);
    }

    #[test]
    fn test_encoder_buffer_capacity_overflow() {
        assert!(EncoderBuffer::try_with_capacity(usize::MAX).is_err());
    }

    #[test]
    fn test_u32_little_endian() {
        let mut buf = EncoderBuffer::new();
        buf.encode_u32(0x12345678);
        assert_eq!(buf.data(), &[0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn test_raw_byte_encoding() {
        let mut buf = EncoderBuffer::new();
        buf.encode(b"VTXR");
        buf.encode_u8(1);
        assert_eq!(buf.data(), b"VTXR\x01");

        buf.clear();
        assert_eq!(buf.size(), 0);
    }

    #[test]
    fn test_varint_encoding() {
        let mut buf = EncoderBuffer::new();
        buf.encode_varint(0);
        buf.encode_varint(127);
        buf.encode_varint(128);
        buf.encode_varint(300);
        assert_eq!(buf.data(), &[0x00, 0x7F, 0x80, 0x01, 0xAC, 0x02]);
    }

    #[test]
    fn test_signed_symbols() {
        assert_eq!(convert_signed_int_to_symbol(0), 0);
        assert_eq!(convert_signed_int_to_symbol(-1), 1);
        assert_eq!(convert_signed_int_to_symbol(1), 2);
        assert_eq!(convert_signed_int_to_symbol(-2), 3);
        assert_eq!(convert_signed_int_to_symbol(i32::MAX), u32::MAX - 1);
        assert_eq!(convert_signed_int_to_symbol(i32::MIN), u32::MAX);
    }

    #[test]
    fn test_varint_size() {
        assert_eq!(varint_size(0), 1);
        assert_eq!(varint_size(127), 1);
        assert_eq!(varint_size(128), 2);
        assert_eq!(varint_size(u64::from(u32::MAX)), 5);
        assert_eq!(varint_size(u64::MAX), 10);
    }
}
