use std::fmt;
use std::str::FromStr;

use crate::status::CodecError;

/// Default quantization scale: two decimal digits of precision.
pub const DEFAULT_QUANTIZATION_SCALE: u32 = 100;

/// Default zlib compression level.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Highest zlib compression level; larger requests are clamped.
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Body layout of a serialized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordFormat {
    /// Zigzag varints, one axis after another.
    #[default]
    Varint = 0,
    /// JSON object with `x`, `y` and `z` integer arrays.
    Json = 1,
}

impl RecordFormat {
    pub const fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(RecordFormat::Varint),
            1 => Some(RecordFormat::Json),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            RecordFormat::Varint => "varint",
            RecordFormat::Json => "json",
        }
    }
}

impl fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordFormat {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "varint" => Ok(RecordFormat::Varint),
            "json" => Ok(RecordFormat::Json),
            other => Err(CodecError::InvalidInput(format!(
                "Unknown record format '{}'",
                other
            ))),
        }
    }
}

/// Settings used when encoding. Decoding needs none of them: the scale and
/// record format travel inside the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderOptions {
    quantization_scale: u32,
    record_format: RecordFormat,
    compression_level: u32,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            quantization_scale: DEFAULT_QUANTIZATION_SCALE,
            record_format: RecordFormat::default(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl EncoderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_quantization_scale(&self) -> u32 {
        self.quantization_scale
    }

    /// Sets the number of quantization steps per unit. Zero is accepted
    /// here and rejected when encoding.
    pub fn set_quantization_scale(&mut self, scale: u32) {
        self.quantization_scale = scale;
    }

    pub fn get_record_format(&self) -> RecordFormat {
        self.record_format
    }

    pub fn set_record_format(&mut self, format: RecordFormat) {
        self.record_format = format;
    }

    pub fn get_compression_level(&self) -> u32 {
        self.compression_level
    }

    pub fn set_compression_level(&mut self, level: u32) {
        self.compression_level = level.min(MAX_COMPRESSION_LEVEL);
    }

    pub fn with_quantization_scale(mut self, scale: u32) -> Self {
        self.set_quantization_scale(scale);
        self
    }

    pub fn with_record_format(mut self, format: RecordFormat) -> Self {
        self.set_record_format(format);
        self
    }

    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.set_compression_level(level);
        self
    }
}
