//! Optional observation of payload sizes.
//!
//! A [`DiagnosticSink`] sees every payload that passes through
//! [`VertexCodec::encode_with_diagnostics`](crate::VertexCodec::encode_with_diagnostics)
//! and [`VertexCodec::decode_with_diagnostics`](crate::VertexCodec::decode_with_diagnostics)
//! together with the size of each pipeline stage. Sinks only observe; they
//! cannot change what the codec returns.

/// Sizes recorded for one encode or decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PayloadStats {
    pub point_count: usize,
    /// Serialized record size in bytes, before compression.
    pub record_len: usize,
    /// Compressed record size in bytes.
    pub compressed_len: usize,
    /// Payload length in bytes.
    pub text_len: usize,
}

impl PayloadStats {
    /// Compressed size relative to the serialized record, 1.0 for an
    /// empty record.
    pub fn compression_ratio(&self) -> f64 {
        if self.record_len == 0 {
            1.0
        } else {
            self.compressed_len as f64 / self.record_len as f64
        }
    }
}

pub trait DiagnosticSink {
    /// Called once per successful encode or decode with the text payload
    /// and the stage sizes.
    fn record(&mut self, payload: &str, stats: &PayloadStats);
}

impl<F> DiagnosticSink for F
where
    F: FnMut(&str, &PayloadStats),
{
    fn record(&mut self, payload: &str, stats: &PayloadStats) {
        self(payload, stats)
    }
}

/// Sink that emits every report as a `tracing` debug event, payload
/// included.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&mut self, payload: &str, stats: &PayloadStats) {
        tracing::debug!(
            points = stats.point_count,
            record_len = stats.record_len,
            compressed_len = stats.compressed_len,
            text_len = stats.text_len,
            payload,
            "vertex payload"
        );
    }
}
