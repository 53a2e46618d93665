//! `vertex-codec inspect`: encode, decode, and report what was lost.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vertex_codec_core::{PayloadStats, Point3};

use crate::encode::CodecArgs;
use crate::obj::read_obj_file;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// OBJ file to run through the codec
    pub input: PathBuf,

    #[command(flatten)]
    pub codec: CodecArgs,

    /// Also log the payload itself
    #[arg(long)]
    pub show_payload: bool,
}

/// Outcome of one encode/decode cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectReport {
    pub stats: PayloadStats,
    /// Largest per-axis difference between input and decoded points.
    pub max_error: f32,
    /// Half a quantization step.
    pub error_bound: f32,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let points = read_obj_file(&args.input)?;
    let (report, payload) = inspect(&points, &args.codec)
        .with_context(|| format!("failed to inspect {}", args.input.display()))?;

    tracing::info!(
        points = report.stats.point_count,
        record_len = report.stats.record_len,
        compressed_len = report.stats.compressed_len,
        payload_len = report.stats.text_len,
        ratio = report.stats.compression_ratio(),
        "payload for {}",
        args.input.display()
    );
    tracing::info!(
        max_error = report.max_error,
        bound = report.error_bound,
        "reconstruction error"
    );
    if args.show_payload {
        tracing::info!(%payload, "payload");
    }
    Ok(())
}

/// Round-trips `points` and measures the reconstruction error.
pub fn inspect(points: &[Point3], args: &CodecArgs) -> Result<(InspectReport, String)> {
    let codec = args.codec();
    let mut stats = PayloadStats::default();

    let payload = codec.encode_with_diagnostics(points, &mut |_: &str, s: &PayloadStats| stats = *s)?;
    let restored = codec.decode(&payload)?;
    anyhow::ensure!(
        restored.len() == points.len(),
        "decoded {} points from {}",
        restored.len(),
        points.len()
    );

    let max_error = points
        .iter()
        .zip(&restored)
        .map(|(a, b)| a.max_axis_distance(b))
        .fold(0.0f32, f32::max);

    let report = InspectReport {
        stats,
        max_error,
        error_bound: 0.5 / args.scale as f32,
    };
    Ok((report, payload))
}
