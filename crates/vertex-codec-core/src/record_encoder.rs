//! Serialization of [`StructuredRecord`]s into self-describing bytes.
//!
//! Layout (all records):
//!
//! | Field        | Encoding                          |
//! |--------------|-----------------------------------|
//! | magic        | `b"VTXR"`                         |
//! | version      | major `u8`, minor `u8`            |
//! | format       | `u8` tag of [`RecordFormat`]      |
//! | scale        | `u32` little endian               |
//! | point count  | unsigned varint                   |
//! | body         | depends on the format             |
//!
//! The `Varint` body stores all x values, then all y values, then all z
//! values as zigzag varints. The `Json` body is a UTF-8 object
//! `{"x":[..],"y":[..],"z":[..]}`.
//!
//! Output is a pure function of the record and format, so equal inputs
//! always produce equal bytes.

use serde::Serialize;

use crate::encoder_buffer::{convert_signed_int_to_symbol, varint_size, EncoderBuffer};
use crate::encoder_options::RecordFormat;
use crate::status::StatusResult;
use crate::structured_record::StructuredRecord;
use crate::version::{RECORD_FIXED_HEADER_SIZE, RECORD_MAGIC, RECORD_VERSION_MAJOR, RECORD_VERSION_MINOR};

#[derive(Serialize)]
struct JsonAxes<'a> {
    x: &'a [i32],
    y: &'a [i32],
    z: &'a [i32],
}

/// Serializes a record in the given body format.
///
/// Fails with `MalformedRecord` if the record breaks its own invariants
/// (axis lengths differ, zero scale), and with `OutOfMemory` if the output
/// buffer cannot be allocated.
pub fn serialize(record: &StructuredRecord, format: RecordFormat) -> StatusResult<Vec<u8>> {
    record.validate()?;

    let count = record.len() as u64;
    let mut buffer = EncoderBuffer::try_with_capacity(RECORD_FIXED_HEADER_SIZE + varint_size(count))?;
    encode_header(&mut buffer, record.scale, format, count);

    match format {
        RecordFormat::Varint => encode_varint_body(&mut buffer, record)?,
        RecordFormat::Json => encode_json_body(&mut buffer, record)?,
    }

    tracing::trace!(
        points = record.len(),
        format = %format,
        bytes = buffer.size(),
        "serialized vertex record"
    );
    Ok(buffer.into_bytes())
}

fn encode_header(buffer: &mut EncoderBuffer, scale: u32, format: RecordFormat, count: u64) {
    buffer.encode(RECORD_MAGIC);
    buffer.encode_u8(RECORD_VERSION_MAJOR);
    buffer.encode_u8(RECORD_VERSION_MINOR);
    buffer.encode_u8(format.tag());
    buffer.encode_u32(scale);
    buffer.encode_varint(count);
}

fn encode_varint_body(buffer: &mut EncoderBuffer, record: &StructuredRecord) -> StatusResult<()> {
    let axes = [&record.xs, &record.ys, &record.zs];
    let body_size: usize = axes
        .iter()
        .flat_map(|axis| axis.iter())
        .map(|&v| varint_size(u64::from(convert_signed_int_to_symbol(v))))
        .sum();
    buffer.try_reserve(body_size)?;

    for axis in axes {
        for &value in axis.iter() {
            buffer.encode_varint_signed_i32(value);
        }
    }
    Ok(())
}

fn encode_json_body(buffer: &mut EncoderBuffer, record: &StructuredRecord) -> StatusResult<()> {
    let axes = JsonAxes {
        x: &record.xs,
        y: &record.ys,
        z: &record.zs,
    };
    let json = serde_json::to_vec(&axes)?;
    buffer.try_reserve(json.len())?;
    buffer.encode(&json);
    Ok(())
}
