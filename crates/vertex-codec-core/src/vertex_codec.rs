//! Encode/decode entry points tying the pipeline stages together.

use crate::compression::{compress, decompress};
use crate::diagnostics::{DiagnosticSink, PayloadStats};
use crate::encoder_options::EncoderOptions;
use crate::point::Point3;
use crate::quantization_utils::{dequantize_record, quantize_points};
use crate::record_decoder::deserialize;
use crate::record_encoder::serialize;
use crate::status::StatusResult;
use crate::text_transcoder::{from_text, to_text};

/// Stateless vertex codec.
///
/// Holds only its [`EncoderOptions`]; every call works on its own buffers,
/// so one codec can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VertexCodec {
    options: EncoderOptions,
}

impl VertexCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EncoderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Encodes points into an opaque text payload.
    ///
    /// Fails with `InvalidInput` for non-finite coordinates, coordinates
    /// outside the quantization range or a zero scale, and with
    /// `OutOfMemory` when a buffer cannot be allocated.
    pub fn encode(&self, points: &[Point3]) -> StatusResult<String> {
        self.encode_stages(points).map(|(payload, _)| payload)
    }

    /// Like [`encode`](Self::encode), reporting the payload and stage sizes
    /// to `sink` on success.
    pub fn encode_with_diagnostics<S>(&self, points: &[Point3], sink: &mut S) -> StatusResult<String>
    where
        S: DiagnosticSink + ?Sized,
    {
        let (payload, stats) = self.encode_stages(points)?;
        sink.record(&payload, &stats);
        Ok(payload)
    }

    /// Restores the points of a payload produced by [`encode`](Self::encode).
    ///
    /// The first failing stage determines the error: `MalformedText`, then
    /// `CorruptStream`, then `MalformedRecord`. On error nothing is
    /// returned. The scale and record layout are read from the payload, so
    /// any codec can decode what any other codec encoded.
    pub fn decode(&self, payload: &str) -> StatusResult<Vec<Point3>> {
        self.decode_stages(payload).map(|(points, _)| points)
    }

    /// Like [`decode`](Self::decode), reporting the payload and stage sizes
    /// to `sink` on success.
    pub fn decode_with_diagnostics<S>(&self, payload: &str, sink: &mut S) -> StatusResult<Vec<Point3>>
    where
        S: DiagnosticSink + ?Sized,
    {
        let (points, stats) = self.decode_stages(payload)?;
        sink.record(payload, &stats);
        Ok(points)
    }

    fn encode_stages(&self, points: &[Point3]) -> StatusResult<(String, PayloadStats)> {
        let record = quantize_points(points, self.options.get_quantization_scale())?;
        let serialized = serialize(&record, self.options.get_record_format())?;
        let compressed = compress(&serialized, self.options.get_compression_level())?;
        let payload = to_text(&compressed)?;

        let stats = PayloadStats {
            point_count: points.len(),
            record_len: serialized.len(),
            compressed_len: compressed.len(),
            text_len: payload.len(),
        };
        tracing::debug!(
            points = stats.point_count,
            record_len = stats.record_len,
            compressed_len = stats.compressed_len,
            text_len = stats.text_len,
            "encoded vertex payload"
        );
        Ok((payload, stats))
    }

    fn decode_stages(&self, payload: &str) -> StatusResult<(Vec<Point3>, PayloadStats)> {
        let compressed = from_text(payload)?;
        let serialized = decompress(&compressed)?;
        let record = deserialize(&serialized)?;
        let points = dequantize_record(&record)?;

        let stats = PayloadStats {
            point_count: points.len(),
            record_len: serialized.len(),
            compressed_len: compressed.len(),
            text_len: payload.len(),
        };
        tracing::debug!(
            points = stats.point_count,
            record_len = stats.record_len,
            compressed_len = stats.compressed_len,
            text_len = stats.text_len,
            "decoded vertex payload"
        );
        Ok((points, stats))
    }
}

/// Encodes points with the default options (scale 100, varint record,
/// compression level 6).
pub fn encode(points: &[Point3]) -> StatusResult<String> {
    VertexCodec::new().encode(points)
}

/// Decodes a payload produced by [`encode`] or any [`VertexCodec`].
pub fn decode(payload: &str) -> StatusResult<Vec<Point3>> {
    VertexCodec::new().decode(payload)
}
