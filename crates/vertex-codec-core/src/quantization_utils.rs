//! Fixed-precision quantization of vertex positions.
//!
//! A coordinate `v` maps to `round(v * scale)` where ties round half away
//! from zero (`f32::round`), so `0.125 * 100` becomes `13` and `-0.125 * 100`
//! becomes `-13`. The multiplication happens in `f32`, the precision the
//! positions arrive in. Reconstruction divides by the same scale, which
//! bounds the per-axis error by `0.5 / scale` plus float rounding noise.

use num_traits::ToPrimitive;

use crate::point::Point3;
use crate::status::{CodecError, StatusResult};
use crate::structured_record::StructuredRecord;

const AXIS_NAMES: [&str; 3] = ["x", "y", "z"];

#[derive(Debug, Clone, Copy)]
pub struct Quantizer {
    scale: f32,
}

impl Quantizer {
    /// Creates a quantizer with `scale` steps per unit.
    pub fn new(scale: u32) -> StatusResult<Self> {
        if scale == 0 {
            return Err(CodecError::InvalidInput(
                "Quantization scale must be positive".to_string(),
            ));
        }
        Ok(Self {
            scale: scale as f32,
        })
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Quantizes a single value. NaN, infinities and values whose scaled
    /// magnitude exceeds `i32` are rejected.
    pub fn quantize_float(&self, val: f32) -> StatusResult<i32> {
        if !val.is_finite() {
            return Err(CodecError::InvalidInput(format!(
                "Cannot quantize non-finite value {}",
                val
            )));
        }
        let scaled = (val * self.scale).round();
        scaled.to_i32().ok_or_else(|| {
            CodecError::InvalidInput(format!(
                "Value {} does not fit the quantization grid at scale {}",
                val, self.scale
            ))
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Dequantizer {
    scale: f32,
}

impl Dequantizer {
    pub fn new(scale: u32) -> StatusResult<Self> {
        if scale == 0 {
            return Err(CodecError::MalformedRecord(
                "Quantization scale is zero".to_string(),
            ));
        }
        Ok(Self {
            scale: scale as f32,
        })
    }

    pub fn dequantize_float(&self, val: i32) -> f32 {
        val as f32 / self.scale
    }
}

/// Quantizes every point into a [`StructuredRecord`] with one integer run
/// per axis.
pub fn quantize_points(points: &[Point3], scale: u32) -> StatusResult<StructuredRecord> {
    let quantizer = Quantizer::new(scale)?;
    let mut record = StructuredRecord::new(scale);
    record.xs.try_reserve_exact(points.len())?;
    record.ys.try_reserve_exact(points.len())?;
    record.zs.try_reserve_exact(points.len())?;

    for (i, point) in points.iter().enumerate() {
        let components = point.to_array();
        let mut quantized = [0i32; 3];
        for (axis, value) in components.iter().enumerate() {
            quantized[axis] = quantizer.quantize_float(*value).map_err(|err| {
                CodecError::InvalidInput(format!(
                    "point {} axis {}: {}",
                    i,
                    AXIS_NAMES[axis],
                    err.message()
                ))
            })?;
        }
        record.xs.push(quantized[0]);
        record.ys.push(quantized[1]);
        record.zs.push(quantized[2]);
    }

    Ok(record)
}

/// Reconstructs points from a record. Fails with `MalformedRecord` if the
/// axis runs differ in length or the scale is zero.
pub fn dequantize_record(record: &StructuredRecord) -> StatusResult<Vec<Point3>> {
    record.validate()?;
    let dequantizer = Dequantizer::new(record.scale)?;

    let mut points = Vec::new();
    points.try_reserve_exact(record.len())?;
    for ((&x, &y), &z) in record.xs.iter().zip(&record.ys).zip(&record.zs) {
        points.push(Point3::new(
            dequantizer.dequantize_float(x),
            dequantizer.dequantize_float(y),
            dequantizer.dequantize_float(z),
        ));
    }
    Ok(points)
}
