//! Parsing of serialized records. See [`record_encoder`](crate::record_encoder)
//! for the layout.

use serde::Deserialize;

use crate::decoder_buffer::DecoderBuffer;
use crate::encoder_options::RecordFormat;
use crate::status::{malformed_record, StatusResult};
use crate::structured_record::StructuredRecord;
use crate::version::{is_supported_version, RECORD_MAGIC};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonAxes {
    x: Vec<i32>,
    y: Vec<i32>,
    z: Vec<i32>,
}

/// Header fields preceding the record body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub version_major: u8,
    pub version_minor: u8,
    pub format: RecordFormat,
    pub scale: u32,
    pub point_count: u64,
}

/// Parses a record produced by [`serialize`](crate::record_encoder::serialize).
///
/// Every inconsistency (bad magic, unknown version or format, truncation,
/// integer overflow, lengths that disagree, trailing bytes) is reported as
/// `MalformedRecord`. Nothing is returned unless the whole input parsed.
pub fn deserialize(bytes: &[u8]) -> StatusResult<StructuredRecord> {
    let mut buffer = DecoderBuffer::new(bytes);
    let header = decode_header(&mut buffer)?;

    let record = match header.format {
        RecordFormat::Varint => decode_varint_body(&mut buffer, &header)?,
        RecordFormat::Json => decode_json_body(&mut buffer, &header)?,
    };

    if buffer.remaining_size() != 0 {
        return Err(malformed_record(format!(
            "{} trailing bytes after record body",
            buffer.remaining_size()
        )));
    }
    record.validate()?;

    tracing::trace!(
        points = record.len(),
        format = %header.format,
        scale = record.scale,
        "deserialized vertex record"
    );
    Ok(record)
}

/// Reads and checks the record header.
pub fn decode_header(buffer: &mut DecoderBuffer<'_>) -> StatusResult<RecordHeader> {
    let magic = buffer.decode_slice(RECORD_MAGIC.len())?;
    if magic != RECORD_MAGIC {
        return Err(malformed_record("Invalid magic"));
    }

    let version_major = buffer.decode_u8()?;
    let version_minor = buffer.decode_u8()?;
    if !is_supported_version(version_major, version_minor) {
        return Err(malformed_record(format!(
            "Unsupported record version {}.{}",
            version_major, version_minor
        )));
    }

    let tag = buffer.decode_u8()?;
    let format = RecordFormat::from_tag(tag)
        .ok_or_else(|| malformed_record(format!("Unknown record format tag {}", tag)))?;

    let scale = buffer.decode_u32()?;
    if scale == 0 {
        return Err(malformed_record("Quantization scale is zero"));
    }

    let point_count = buffer.decode_varint()?;

    Ok(RecordHeader {
        version_major,
        version_minor,
        format,
        scale,
        point_count,
    })
}

fn decode_varint_body(buffer: &mut DecoderBuffer<'_>, header: &RecordHeader) -> StatusResult<StructuredRecord> {
    // Each value takes at least one byte, which bounds a believable count
    // before anything is allocated.
    let max_points = buffer.remaining_size() / 3;
    let count = usize::try_from(header.point_count)
        .ok()
        .filter(|&count| count <= max_points)
        .ok_or_else(|| {
            malformed_record(format!(
                "Point count {} exceeds the {} bytes of body",
                header.point_count,
                buffer.remaining_size()
            ))
        })?;

    let mut record = StructuredRecord::new(header.scale);
    for axis in [&mut record.xs, &mut record.ys, &mut record.zs] {
        axis.try_reserve_exact(count)?;
        for _ in 0..count {
            axis.push(buffer.decode_varint_signed_i32()?);
        }
    }
    Ok(record)
}

fn decode_json_body(buffer: &mut DecoderBuffer<'_>, header: &RecordHeader) -> StatusResult<StructuredRecord> {
    let axes: JsonAxes = serde_json::from_slice(buffer.decode_remaining())?;
    let record = StructuredRecord::from_axes(header.scale, axes.x, axes.y, axes.z);
    record.validate()?;
    if record.len() as u64 != header.point_count {
        return Err(malformed_record(format!(
            "Header declares {} points, body holds {}",
            header.point_count,
            record.len()
        )));
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_encoder::serialize;
    use crate::status::ErrorCode;

    fn sample_record() -> StructuredRecord {
        StructuredRecord::from_axes(100, vec![101, 0, -7], vec![-200, 0, 9], vec![0, 0, 123456])
    }

    fn header_bytes(format: u8, scale: u32, count: u8) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"VTXR");
        bytes.extend_from_slice(&[1, 0, format]);
        bytes.extend_from_slice(&scale.to_le_bytes());
        bytes.push(count);
        bytes
    }

    #[test]
    fn test_round_trip_both_formats() {
        for format in [RecordFormat::Varint, RecordFormat::Json] {
            let bytes = serialize(&sample_record(), format).unwrap();
            assert_eq!(deserialize(&bytes).unwrap(), sample_record());
        }
    }

    #[test]
    fn test_header_fields() {
        let bytes = serialize(&sample_record(), RecordFormat::Json).unwrap();
        let mut buffer = DecoderBuffer::new(&bytes);
        let header = decode_header(&mut buffer).unwrap();
        assert_eq!(header.version_major, 1);
        assert_eq!(header.version_minor, 0);
        assert_eq!(header.format, RecordFormat::Json);
        assert_eq!(header.scale, 100);
        assert_eq!(header.point_count, 3);
    }

    #[test]
    fn test_rejects_invalid_magic() {
        let mut bytes = serialize(&sample_record(), RecordFormat::Varint).unwrap();
        bytes[0..4].copy_from_slice(b"XXXX");
        assert_eq!(deserialize(&bytes).unwrap_err().code(), ErrorCode::MalformedRecord);
    }

    #[test]
    fn test_rejects_unsupported_version() {
        let mut bytes = serialize(&sample_record(), RecordFormat::Varint).unwrap();
        bytes[4] = 2;
        let err = deserialize(&bytes).unwrap_err();
        assert!(err.message().contains("Unsupported record version 2.0"));
    }

    #[test]
    fn test_rejects_unknown_format() {
        let bytes = header_bytes(9, 100, 0);
        let err = deserialize(&bytes).unwrap_err();
        assert!(err.message().contains("Unknown record format tag 9"));
    }

    #[test]
    fn test_rejects_zero_scale() {
        let bytes = header_bytes(0, 0, 0);
        assert_eq!(deserialize(&bytes).unwrap_err().code(), ErrorCode::MalformedRecord);
    }

    #[test]
    fn test_rejects_every_truncation() {
        for format in [RecordFormat::Varint, RecordFormat::Json] {
            let bytes = serialize(&sample_record(), format).unwrap();
            for len in 0..bytes.len() {
                let err = deserialize(&bytes[..len]).unwrap_err();
                assert_eq!(err.code(), ErrorCode::MalformedRecord, "format {} len {}", format, len);
            }
        }
    }

    #[test]
    fn test_rejects_trailing_bytes() {
        let mut bytes = serialize(&sample_record(), RecordFormat::Varint).unwrap();
        bytes.push(0);
        let err = deserialize(&bytes).unwrap_err();
        assert!(err.message().contains("trailing"));
    }

    #[test]
    fn test_rejects_oversized_count() {
        let mut bytes = header_bytes(0, 100, 0);
        bytes.pop();
        bytes.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
        bytes.extend_from_slice(&[0, 0, 0]);
        let err = deserialize(&bytes).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MalformedRecord);
    }

    #[test]
    fn test_rejects_json_length_mismatch() {
        let mut bytes = header_bytes(1, 100, 2);
        bytes.extend_from_slice(br#"{"x":[1,2],"y":[1],"z":[1,2]}"#);
        assert_eq!(deserialize(&bytes).unwrap_err().code(), ErrorCode::MalformedRecord);

        let mut bytes = header_bytes(1, 100, 3);
        bytes.extend_from_slice(br#"{"x":[1,2],"y":[1,2],"z":[1,2]}"#);
        let err = deserialize(&bytes).unwrap_err();
        assert!(err.message().contains("declares 3 points"));
    }

    #[test]
    fn test_rejects_non_numeric_json() {
        let mut bytes = header_bytes(1, 100, 1);
        bytes.extend_from_slice(br#"{"x":["a"],"y":[1],"z":[1]}"#);
        assert_eq!(deserialize(&bytes).unwrap_err().code(), ErrorCode::MalformedRecord);

        let mut bytes = header_bytes(1, 100, 1);
        bytes.extend_from_slice(br#"{"x":[1],"y":[1],"z":[1],"w":[1]}"#);
        assert_eq!(deserialize(&bytes).unwrap_err().code(), ErrorCode::MalformedRecord);
    }

    #[test]
    fn test_empty_record() {
        for format in [RecordFormat::Varint, RecordFormat::Json] {
            let record = StructuredRecord::new(100);
            let bytes = serialize(&record, format).unwrap();
            assert_eq!(deserialize(&bytes).unwrap(), record);
        }
    }
}
