//! Vertex Codec Core Library
//!
//! Lossy compression of 3D vertex positions into a single text token and
//! back. Encoding runs four stages:
//!
//! 1. quantize each coordinate to a fixed-precision integer
//!    ([`quantization_utils`]),
//! 2. pack the per-axis integer arrays into a self-describing record
//!    ([`record_encoder`]),
//! 3. zlib-compress the record ([`compression`]),
//! 4. map the compressed bytes onto the base64 alphabet
//!    ([`text_transcoder`]).
//!
//! Decoding reverses the pipeline and either returns every point or an
//! error, never a partial result. Most callers only need [`encode`] and
//! [`decode`], or [`VertexCodec`] when the defaults need changing.
//!
//! ```
//! use vertex_codec_core::{decode, encode, Point3};
//!
//! let points = [Point3::new(1.005, -2.0, 0.0), Point3::new(0.0, 0.0, 0.0)];
//! let payload = encode(&points).unwrap();
//! let restored = decode(&payload).unwrap();
//!
//! assert_eq!(restored[0], Point3::new(1.01, -2.0, 0.0));
//! ```

// =============================================================================
// Core modules
// =============================================================================

pub mod compression;
pub mod decoder_buffer;
pub mod diagnostics;
pub mod encoder_buffer;
pub mod encoder_options;
pub mod point;
pub mod quantization_utils;
pub mod record_decoder;
pub mod record_encoder;
pub mod status;
pub mod structured_record;
pub mod text_transcoder;
pub mod version;
pub mod vertex_codec;

// =============================================================================
// Re-exports
// =============================================================================

pub use decoder_buffer::DecoderBuffer;
pub use diagnostics::{DiagnosticSink, PayloadStats, TracingSink};
pub use encoder_buffer::EncoderBuffer;
pub use encoder_options::{EncoderOptions, RecordFormat};
pub use point::Point3;
pub use quantization_utils::{dequantize_record, quantize_points, Dequantizer, Quantizer};
pub use record_decoder::deserialize;
pub use record_encoder::serialize;
pub use status::{CodecError, ErrorCode, Status, StatusResult};
pub use structured_record::StructuredRecord;
pub use vertex_codec::{decode, encode, VertexCodec};
