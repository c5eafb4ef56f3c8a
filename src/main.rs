//! `ipm` - inverse probability of matching of a text file.
//!
//! Prints the exact reduced fraction and its floating-point value. Logs go
//! to stderr (`RUST_LOG=info` for progress), results to stdout.

#![forbid(unsafe_code)]

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use ipmrs::{
    DEFAULT_DISPLAY_ENCODING, DEFAULT_READ_CAPACITY, DEFAULT_SOURCE_ENCODING, IpmConfig,
    compute_ipm,
};

/// Computes the inverse probability of matching (IPM) of any two
/// arbitrarily chosen characters in a text file.
#[derive(Parser)]
#[command(name = "ipm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The text file to read.
    file: PathBuf,

    /// Character encoding of the input file (any WHATWG label).
    #[arg(short = 'e', long = "encoding", default_value = DEFAULT_SOURCE_ENCODING)]
    encoding: String,

    /// Print the number of occurrences of every distinct character.
    #[arg(short = 'v', long = "show-occurrences")]
    show_occurrences: bool,

    /// Encoding used to print characters with --show-occurrences.
    #[arg(long, default_value = DEFAULT_DISPLAY_ENCODING)]
    display_encoding: String,

    /// Number of bytes read at a time.
    #[arg(long, default_value_t = DEFAULT_READ_CAPACITY)]
    chunk_size: usize,
}

fn main() -> ExitCode {
    // Logs on stderr so stdout carries only the result
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = IpmConfig::default()
        .with_source_encoding(cli.encoding)
        .with_display_encoding(cli.display_encoding)
        .with_read_capacity(cli.chunk_size)
        .with_show_occurrences(cli.show_occurrences);

    let report = match compute_ipm(&cli.file, &config) {
        Ok(report) => report,
        Err(e) => {
            error!(stage = e.stage(), "{e}");
            eprintln!("ipm: {} failed: {e}", e.stage());
            return ExitCode::from(e.exit_code());
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = report.write_to(&mut out).and_then(|()| out.flush()) {
        if e.kind() != io::ErrorKind::BrokenPipe {
            eprintln!("ipm: cannot write result: {e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
