//! `kabi-crc`: print exported-symbol checksums for pre-parsed units.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use kabi_export::{CompilationUnit, ExportConfig, ExportWalker, DEFAULT_MARKER_PREFIX};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "kabi-crc", version)]
#[command(about = "Generate kABI checksums for exported symbols", long_about = None)]
struct Args {
    /// Compilation units (JSON) to process, in order.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Print each symbol's canonical token stream to stderr.
    #[arg(long)]
    dump_tokens: bool,

    /// Prefix of export marker symbols.
    #[arg(long, default_value = DEFAULT_MARKER_PREFIX)]
    marker_prefix: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let config = ExportConfig {
        marker_prefix: args.marker_prefix,
        dump_tokens: args.dump_tokens,
        ..ExportConfig::default()
    };
    let walker = ExportWalker::new(config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for path in &args.files {
        let unit = CompilationUnit::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?;

        for crc in walker.process(&unit) {
            if let Some(tokens) = &crc.tokens {
                eprintln!("{}: {}", crc.name, tokens.trim_end());
            }
            writeln!(out, "{crc}")?;
        }
    }
    out.flush()?;
    Ok(())
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .without_time()
        .init();
}
