//! `thumbnail` CLI: runs the demo PNG transform on a file.

use std::{
  path::{Path, PathBuf},
  process::ExitCode,
};

use clap::Parser;
use thumbnail::{png::PngChunkIter, transform_png_with, MinizCompressor};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Validates a PNG, applies the demo color transform, and writes a new PNG.
#[derive(Parser, Debug)]
#[command(name = "thumbnail")]
#[command(author, version, about, long_about = None)]
struct Args {
  /// Input PNG file
  #[arg(value_name = "INPUT")]
  input: PathBuf,

  /// Output file path (defaults to `<input>.thumbnail.png`)
  #[arg(short, long, value_name = "OUTPUT")]
  output: Option<PathBuf>,

  /// Deflate level for the output image data
  #[arg(short = 'l', long, default_value_t = MinizCompressor::DEFAULT_LEVEL, value_parser = clap::value_parser!(u8).range(0..=10))]
  level: u8,

  /// Print every chunk of the input instead of transforming it
  #[arg(long)]
  list_chunks: bool,

  /// Show debug logging
  #[arg(short, long)]
  verbose: bool,
}

fn default_output_path(input: &Path) -> PathBuf {
  let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
  input.with_file_name(format!("{stem}.thumbnail.png"))
}

fn list_chunks(bytes: &[u8]) -> bool {
  for (n, chunk_res) in PngChunkIter::new(bytes).enumerate() {
    match chunk_res {
      Ok(chunk) => println!(
        "{n}: {ty} len={len} crc={crc:08X}{critical}",
        ty = chunk.ty(),
        len = chunk.data().len(),
        crc = chunk.declared_crc(),
        critical = if chunk.ty().is_critical() { " (critical)" } else { "" },
      ),
      Err(e) => {
        error!("chunk {n}: {e}");
        return false;
      }
    }
  }
  true
}

fn main() -> ExitCode {
  let args = Args::parse();

  let default_level = if args.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
    )
    .with_writer(std::io::stderr)
    .init();

  debug!("{args:?}");
  let bytes = match std::fs::read(&args.input) {
    Ok(bytes) => bytes,
    Err(e) => {
      error!("Error reading `{}`: {e}", args.input.display());
      return ExitCode::FAILURE;
    }
  };
  info!("read {} bytes from `{}`", bytes.len(), args.input.display());

  if args.list_chunks {
    return if list_chunks(&bytes) { ExitCode::SUCCESS } else { ExitCode::FAILURE };
  }

  let thumbnail = match transform_png_with(&MinizCompressor::new(args.level), &bytes) {
    Ok(thumbnail) => thumbnail,
    Err(e) => {
      error!("Error making thumbnail: {e}");
      return ExitCode::FAILURE;
    }
  };

  let output = args.output.unwrap_or_else(|| default_output_path(&args.input));
  if let Err(e) = std::fs::write(&output, &thumbnail) {
    error!("Error writing `{}`: {e}", output.display());
    return ExitCode::FAILURE;
  }
  info!("wrote {} bytes to `{}`", thumbnail.len(), output.display());
  ExitCode::SUCCESS
}
