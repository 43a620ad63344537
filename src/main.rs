//! # Werf
//!
//! Loads a file through the line store and writes it back out, optionally
//! reporting what was loaded.
//!
//! ## Quick Start
//!
//! ```bash
//! # Print a file through the engine
//! cargo run -- path/to/file.txt
//!
//! # Copy it elsewhere and show line and byte counts
//! cargo run -- path/to/file.txt -o copy.txt --stats
//! ```

use clap::Parser;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use werf_core::{Config, Editor};

/// Werf - a line-array text editing core
#[derive(Parser, Debug)]
#[command(name = "werf")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to load
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Write the document here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print line and byte counts to stderr
    #[arg(long)]
    stats: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting werf v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    let mut editor = Editor::with_config(config);
    editor.open(&args.file)?;

    if args.stats {
        let buffer = editor.buffer();
        eprintln!(
            "{}: {} lines, {} bytes",
            args.file.display(),
            buffer.len_lines(),
            buffer.len_bytes()
        );
    }

    match &args.output {
        Some(path) => editor.save_as(path)?,
        None => {
            let written = editor.buffer().write_to(BufWriter::new(io::stdout().lock()))?;
            tracing::info!(bytes = written, "wrote document to stdout");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["werf", "notes.txt"]);
        assert_eq!(args.file, PathBuf::from("notes.txt"));
        assert!(args.output.is_none());
        assert!(!args.stats);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_args_with_options() {
        let args = Args::parse_from(["werf", "in.txt", "-o", "out.txt", "--stats", "-vv"]);
        assert_eq!(args.output, Some(PathBuf::from("out.txt")));
        assert!(args.stats);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_file_is_required() {
        assert!(Args::try_parse_from(["werf"]).is_err());
    }

    #[test]
    fn test_round_trip_through_editor() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        std::fs::write(&input, "alpha\nbeta\n").unwrap();

        let mut editor = Editor::new();
        editor.open(&input).unwrap();
        editor.save_as(&output).unwrap();
        assert_eq!(std::fs::read(&output).unwrap(), b"alpha\nbeta\n");
    }
}
