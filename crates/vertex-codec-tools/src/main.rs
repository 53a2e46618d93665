//! Vertex codec command-line tools
//!
//! # Commands
//!
//! - `vertex-codec encode` - Encode OBJ vertex positions into a payload
//! - `vertex-codec decode` - Decode a payload back into OBJ vertices
//! - `vertex-codec inspect` - Round-trip an OBJ file and report sizes and error
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `info`).

mod decode;
mod encode;
mod inspect;
mod obj;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vertex-codec")]
#[command(about = "Lossy text codec for 3D vertex positions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode OBJ vertex positions into a payload
    Encode(encode::EncodeArgs),

    /// Decode a payload back into OBJ vertices
    Decode(decode::DecodeArgs),

    /// Round-trip an OBJ file and report payload size and reconstruction error
    Inspect(inspect::InspectArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode(args) => encode::execute(args),
        Commands::Decode(args) => decode::execute(args),
        Commands::Inspect(args) => inspect::execute(args),
    }
}
