//! zlib compression of serialized records.
//!
//! The compressed form is a zlib stream followed by a little-endian CRC-32
//! of that stream. zlib's own Adler-32 only covers the uncompressed data,
//! which leaves the padding bits after the final deflate block unprotected;
//! the outer CRC catches any burst of up to 32 flipped bits anywhere in the
//! compressed bytes. Neither layer carries a timestamp, so equal input gives
//! equal output.
//!
//! Compression does not always shrink the input: small or high-entropy
//! records can come out larger.

use std::io::Write;

use byteorder::{ByteOrder, LittleEndian};
use flate2::write::ZlibEncoder;
use flate2::{Compression, Crc, Decompress, FlushDecompress, Status};

use crate::encoder_options::MAX_COMPRESSION_LEVEL;
use crate::status::{CodecError, StatusResult};

/// Output growth step while inflating.
const INFLATE_CHUNK: usize = 16 * 1024;

/// Size of the CRC-32 trailer.
const STREAM_CHECKSUM_SIZE: usize = 4;

/// Compresses `data` into a checksummed zlib stream at `level`
/// (0 = store, 9 = best).
pub fn compress(data: &[u8], level: u32) -> StatusResult<Vec<u8>> {
    let mut output = Vec::new();
    // Deflate rarely expands by more than a few bytes per 16K block.
    output.try_reserve(data.len() / 2 + 64)?;

    let mut encoder = ZlibEncoder::new(output, Compression::new(level.min(MAX_COMPRESSION_LEVEL)));
    encoder.write_all(data).map_err(compression_failed)?;
    let mut compressed = encoder.finish().map_err(compression_failed)?;

    let mut trailer = [0u8; STREAM_CHECKSUM_SIZE];
    LittleEndian::write_u32(&mut trailer, stream_checksum(&compressed));
    compressed.try_reserve_exact(STREAM_CHECKSUM_SIZE)?;
    compressed.extend_from_slice(&trailer);

    tracing::trace!(
        input = data.len(),
        output = compressed.len(),
        level,
        "compressed vertex record"
    );
    Ok(compressed)
}

fn stream_checksum(stream: &[u8]) -> u32 {
    let mut crc = Crc::new();
    crc.update(stream);
    crc.sum()
}

// Writing into a Vec only fails when it cannot grow.
fn compression_failed(err: std::io::Error) -> CodecError {
    CodecError::OutOfMemory(format!("zlib compression failed: {}", err))
}

/// Inflates a stream produced by [`compress`].
///
/// Fails with `CorruptStream` if the CRC-32 trailer is missing or does not
/// match, the zlib header is invalid, the deflate data is damaged, the
/// Adler-32 does not match, the stream ends early, or bytes follow the end
/// of the zlib stream.
pub fn decompress(input: &[u8]) -> StatusResult<Vec<u8>> {
    if input.len() < STREAM_CHECKSUM_SIZE {
        return Err(CodecError::CorruptStream(format!(
            "{} bytes is too short for a compressed stream",
            input.len()
        )));
    }
    let (data, trailer) = input.split_at(input.len() - STREAM_CHECKSUM_SIZE);
    let expected = LittleEndian::read_u32(trailer);
    let actual = stream_checksum(data);
    if expected != actual {
        return Err(CodecError::CorruptStream(format!(
            "Stream checksum mismatch: expected {:08x}, computed {:08x}",
            expected, actual
        )));
    }

    let mut inflater = Decompress::new(true);
    let mut output: Vec<u8> = Vec::new();
    output.try_reserve(data.len().saturating_mul(4).clamp(64, INFLATE_CHUNK))?;

    loop {
        if output.len() == output.capacity() {
            output.try_reserve(INFLATE_CHUNK)?;
        }

        let before_in = inflater.total_in();
        let before_out = inflater.total_out();
        let status = inflater.decompress_vec(&data[before_in as usize..], &mut output, FlushDecompress::None)?;

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                let progressed = inflater.total_in() != before_in || inflater.total_out() != before_out;
                let output_full = output.len() == output.capacity();
                if !progressed && !output_full {
                    let consumed = inflater.total_in() as usize;
                    return Err(CodecError::CorruptStream(if consumed < data.len() {
                        format!("zlib stream stalled at byte {}", consumed)
                    } else {
                        format!("zlib stream truncated after {} bytes", data.len())
                    }));
                }
            }
        }
    }

    let consumed = inflater.total_in() as usize;
    if consumed != data.len() {
        return Err(CodecError::CorruptStream(format!(
            "{} trailing bytes after zlib stream",
            data.len() - consumed
        )));
    }

    tracing::trace!(input = data.len(), output = output.len(), "decompressed vertex record");
    Ok(output)
}
