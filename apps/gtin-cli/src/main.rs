//! # gtin
//!
//! Command-line adapter over `gtin-core`.
//!
//! ## Usage
//! ```bash
//! # Normalize a few barcodes with the default prefix (748)
//! gtin 12345678901 4006381333931
//!
//! # Stream a catalog export, one barcode per line
//! GTIN_PREFIX=840 gtin < barcodes.txt > gtins.jsonl
//!
//! # Reject standard-length codes with a wrong check digit
//! gtin --verify 4006381333932
//! ```

mod cli;
mod config;
mod run;

use std::env;
use std::io::{self, BufRead};

use anyhow::Context;
use gtin_core::GtinNormalizer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{CliArgs, USAGE};
use crate::config::CliConfig;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse(env::args().skip(1))?;
    if args.help {
        print!("{USAGE}");
        return Ok(());
    }

    init_tracing();

    let mut config = CliConfig::load().context("loading configuration")?;
    config.apply_args(&args)?;
    info!(
        prefix = %config.normalizer.prefix,
        passthrough = %config.normalizer.passthrough,
        "Configuration loaded"
    );

    let normalizer = GtinNormalizer::new(config.normalizer);
    let mpn = args.mpn.as_deref();
    let mut out = io::stdout().lock();

    let summary = if args.barcodes.is_empty() {
        run::run(&normalizer, io::stdin().lock().split(b'\n'), mpn, &mut out)?
    } else {
        let inputs = args.barcodes.iter().map(|b| Ok(b.clone().into_bytes()));
        run::run(&normalizer, inputs, mpn, &mut out)?
    };

    info!(
        total = summary.total(),
        passthrough = summary.passthrough,
        synthesized = summary.synthesized,
        no_result = summary.no_result,
        "Normalization complete"
    );

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=warn` - Only rejected barcodes and errors
/// - `RUST_LOG=gtin_cli=trace` - Everything from this binary
/// - Default: INFO, plus DEBUG for this binary (each synthesized GTIN)
///
/// Logs go to stderr so stdout stays valid JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gtin_cli=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
