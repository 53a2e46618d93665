use crate::status::{malformed_record, ok_status, Status};

/// Quantized positions split into one integer run per axis.
///
/// `xs[i]`, `ys[i]` and `zs[i]` together form point `i`. Keeping the axes
/// apart gives the compressor long runs of similar values. The scale the
/// values were quantized with travels along so the record can be decoded
/// without outside context.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructuredRecord {
    pub scale: u32,
    pub xs: Vec<i32>,
    pub ys: Vec<i32>,
    pub zs: Vec<i32>,
}

impl StructuredRecord {
    /// Creates an empty record for the given scale.
    pub fn new(scale: u32) -> Self {
        Self {
            scale,
            xs: Vec::new(),
            ys: Vec::new(),
            zs: Vec::new(),
        }
    }

    pub fn from_axes(scale: u32, xs: Vec<i32>, ys: Vec<i32>, zs: Vec<i32>) -> Self {
        Self { scale, xs, ys, zs }
    }

    /// Number of points, taken from the x axis. Only meaningful once
    /// [`validate`](Self::validate) has passed.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty() && self.ys.is_empty() && self.zs.is_empty()
    }

    /// Returns the quantized triple at `index`, if all three axes have it.
    pub fn triple(&self, index: usize) -> Option<[i32; 3]> {
        Some([
            *self.xs.get(index)?,
            *self.ys.get(index)?,
            *self.zs.get(index)?,
        ])
    }

    /// Checks the per-axis length invariant and the scale.
    pub fn validate(&self) -> Status {
        if self.xs.len() != self.ys.len() || self.xs.len() != self.zs.len() {
            return Err(malformed_record(format!(
                "Axis lengths differ: x={}, y={}, z={}",
                self.xs.len(),
                self.ys.len(),
                self.zs.len()
            )));
        }
        if self.scale == 0 {
            return Err(malformed_record("Quantization scale is zero"));
        }
        ok_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::ErrorCode;

    #[test]
    fn test_validate_equal_lengths() {
        let record = StructuredRecord::from_axes(100, vec![1, 2], vec![3, 4], vec![5, 6]);
        assert!(record.validate().is_ok());
        assert_eq!(record.len(), 2);
        assert_eq!(record.triple(1), Some([2, 4, 6]));
        assert_eq!(record.triple(2), None);
    }

    #[test]
    fn test_validate_rejects_mismatched_lengths() {
        let record = StructuredRecord::from_axes(100, vec![1, 2], vec![3], vec![5, 6]);
        let err = record.validate().unwrap_err();
        assert_eq!(err.code(), ErrorCode::MalformedRecord);
    }

    #[test]
    fn test_validate_rejects_zero_scale() {
        let record = StructuredRecord::new(0);
        assert_eq!(record.validate().unwrap_err().code(), ErrorCode::MalformedRecord);
    }

    #[test]
    fn test_empty_record() {
        let record = StructuredRecord::new(100);
        assert!(record.is_empty());
        assert_eq!(record.len(), 0);
        assert!(record.validate().is_ok());
    }
}
