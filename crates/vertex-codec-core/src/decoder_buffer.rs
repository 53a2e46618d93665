use byteorder::{ByteOrder, LittleEndian};

use crate::status::{malformed_record, CodecError};

/// Input buffer for reading serialized records.
///
/// `DecoderBuffer` provides sequential byte access over a borrowed slice.
/// Every read checks the remaining length first, so truncated input ends in
/// a `MalformedRecord` error rather than a panic.
///
/// # Example
///
/// ```
/// use vertex_codec_core::DecoderBuffer;
///
/// let data = &[0x56, 0x54, 0x58, 0x52, 0xAC, 0x02];
/// let mut buffer = DecoderBuffer::new(data);
///
/// assert_eq!(buffer.decode_slice(4).unwrap(), b"VTXR");
/// assert_eq!(buffer.decode_varint().unwrap(), 300);
/// assert_eq!(buffer.remaining_size(), 0);
/// ```
pub struct DecoderBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> DecoderBuffer<'a> {
    /// Creates a new `DecoderBuffer` from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current read position in bytes.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes remaining in the buffer.
    pub fn remaining_size(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns a slice of the remaining data without advancing.
    pub fn remaining_data(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Decodes a single byte.
    pub fn decode_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.decode_slice(1)?[0])
    }

    /// Decodes a little-endian u32.
    pub fn decode_u32(&mut self) -> Result<u32, CodecError> {
        Ok(LittleEndian::read_u32(self.decode_slice(4)?))
    }

    /// Decodes a variable-length unsigned integer (varint).
    pub fn decode_varint(&mut self) -> Result<u64, CodecError> {
        let mut val = 0u64;
        let mut shift = 0;
        loop {
            let b = self.decode_u8()?;
            if shift == 63 && (b & 0x7E) != 0 {
                return Err(malformed_record("Varint exceeds 64 bits"));
            }
            val |= u64::from(b & 0x7F) << shift;
            if (b & 0x80) == 0 {
                break;
            }
            shift += 7;
            if shift > 63 {
                return Err(malformed_record("Varint exceeds 64 bits"));
            }
        }
        Ok(val)
    }

    /// Decodes a zigzag-folded signed varint into an `i32`.
    pub fn decode_varint_signed_i32(&mut self) -> Result<i32, CodecError> {
        let symbol = self.decode_varint()?;
        let symbol = u32::try_from(symbol)
            .map_err(|_| malformed_record(format!("Varint {} overflows i32", symbol)))?;
        Ok(convert_symbol_to_signed_int(symbol))
    }

    /// Decodes and returns a slice of the specified size.
    pub fn decode_slice(&mut self, size: usize) -> Result<&'a [u8], CodecError> {
        if size > self.remaining_size() {
            return Err(malformed_record(format!(
                "Unexpected end of buffer: need {} bytes, have {}",
                size,
                self.remaining_size()
            )));
        }
        let slice = &self.data[self.pos..self.pos + size];
        self.pos += size;
        Ok(slice)
    }

    /// Consumes the rest of the buffer.
    pub fn decode_remaining(&mut self) -> &'a [u8] {
        let rest = self.remaining_data();
        self.pos = self.data.len();
        rest
    }
}

/// Inverse of [`convert_signed_int_to_symbol`](crate::encoder_buffer::convert_signed_int_to_symbol).
pub fn convert_symbol_to_signed_int(symbol: u32) -> i32 {
    let v = (symbol >> 1) as i32;
    if symbol & 1 == 0 {
        v
    } else {
        -v - 1
    }
}
