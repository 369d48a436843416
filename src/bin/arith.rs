//! Command-line wrapper: compress or decompress one file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "arith", version, about = "Static-model arithmetic coding compressor")]
struct Cli {
    /// Log coder detail to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress a file into an arith container.
    Compress {
        /// File to compress.
        input: PathBuf,
        /// Container to create.
        output: PathBuf,
    },
    /// Expand an arith container back to the original bytes.
    Decompress {
        /// Container to read.
        input: PathBuf,
        /// File to restore.
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let started = Instant::now();
    match cli.command {
        Command::Compress { input, output } => {
            let data = fs::read(&input)
                .with_context(|| format!("cannot open input file '{}'", input.display()))?;
            let container = arith::compress_to_vec(&data)?;
            fs::write(&output, &container)
                .with_context(|| format!("cannot create output file '{}'", output.display()))?;

            println!("compressed {} bytes to {} bytes", data.len(), container.len());
            if !data.is_empty() {
                let saved = (1.0 - container.len() as f64 / data.len() as f64) * 100.0;
                println!("space saving: {saved:.1}%");
            }
        }
        Command::Decompress { input, output } => {
            let container = fs::read(&input)
                .with_context(|| format!("cannot open input file '{}'", input.display()))?;
            let data = arith::decompress_from_slice(&container)?;
            fs::write(&output, &data)
                .with_context(|| format!("cannot create output file '{}'", output.display()))?;

            println!("restored {} bytes", data.len());
        }
    }
    println!("elapsed: {:.3}s", started.elapsed().as_secs_f64());
    Ok(())
}
