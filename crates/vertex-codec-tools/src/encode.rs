//! `vertex-codec encode`: OBJ positions to a payload.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vertex_codec_core::encoder_options::{DEFAULT_COMPRESSION_LEVEL, DEFAULT_QUANTIZATION_SCALE};
use vertex_codec_core::{EncoderOptions, PayloadStats, RecordFormat, VertexCodec};

use crate::obj::read_obj_file;

/// Options shared by the commands that encode.
#[derive(Args, Debug, Clone)]
pub struct CodecArgs {
    /// Quantization steps per unit (100 keeps two decimals)
    #[arg(long, default_value_t = DEFAULT_QUANTIZATION_SCALE,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub scale: u32,

    /// Record layout inside the payload
    #[arg(long, default_value_t = RecordFormat::Varint)]
    pub format: RecordFormat,

    /// zlib level, 0 (store) to 9 (best)
    #[arg(long, default_value_t = DEFAULT_COMPRESSION_LEVEL,
          value_parser = clap::value_parser!(u32).range(0..=9))]
    pub level: u32,
}

impl CodecArgs {
    pub fn codec(&self) -> VertexCodec {
        VertexCodec::with_options(
            EncoderOptions::new()
                .with_quantization_scale(self.scale)
                .with_record_format(self.format)
                .with_compression_level(self.level),
        )
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// OBJ file whose `v` lines are encoded
    pub input: PathBuf,

    #[command(flatten)]
    pub codec: CodecArgs,

    /// Write the payload here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: EncodeArgs) -> Result<()> {
    let points = read_obj_file(&args.input)?;

    let mut stats = PayloadStats::default();
    let payload = args
        .codec
        .codec()
        .encode_with_diagnostics(&points, &mut |_: &str, s: &PayloadStats| stats = *s)
        .with_context(|| format!("failed to encode {}", args.input.display()))?;

    tracing::info!(
        points = stats.point_count,
        payload_len = stats.text_len,
        ratio = stats.compression_ratio(),
        "encoded {}",
        args.input.display()
    );

    match &args.output {
        Some(path) => fs::write(path, &payload)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{}", payload),
    }
    Ok(())
}
