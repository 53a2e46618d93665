//! `vertex-codec decode`: a payload back to OBJ positions.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vertex_codec_core::decode;

use crate::obj::write_obj_positions;

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// File holding the payload; surrounding whitespace is ignored
    pub input: PathBuf,

    /// Write OBJ here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: DecodeArgs) -> Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let points = decode(text.trim())
        .with_context(|| format!("failed to decode {}", args.input.display()))?;

    tracing::info!(points = points.len(), "decoded {}", args.input.display());

    match &args.output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_obj_positions(file, &points)?;
        }
        None => write_obj_positions(io::stdout().lock(), &points)?,
    }
    Ok(())
}
