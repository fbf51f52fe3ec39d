//! `winprice-decrypt` — command-line entry point.
//!
//! Startup sequence:
//! 1. Parse [`cli::Args`].
//! 2. Load and validate [`Config`] from `WINPRICE_*` environment variables.
//! 3. Initialise structured JSON logging on stderr.
//! 4. Decrypt each ciphertext and write one JSON [`report::Report`] per line to stdout.

mod cli;
mod config;
mod report;
mod telemetry;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use config::Config;

fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Arguments
    // -----------------------------------------------------------------------
    let args = cli::Args::parse();

    // -----------------------------------------------------------------------
    // 2. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 3. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(version = env!("CARGO_PKG_VERSION"), raw = args.raw, "winprice-decrypt starting");

    let decrypter = cfg.decrypter()?;

    // -----------------------------------------------------------------------
    // 4. Decrypt
    // -----------------------------------------------------------------------
    let inputs = if args.ciphertexts.is_empty() {
        read_stdin_lines().context("failed to read ciphertexts from stdin")?
    } else {
        args.ciphertexts
    };

    let mut out = io::stdout().lock();
    let mut failures = 0usize;
    for ciphertext in &inputs {
        let report = report::decrypt_one(&decrypter, ciphertext, args.raw)
            .context("decryption aborted")?;
        if report.is_failure() {
            failures += 1;
        }
        serde_json::to_writer(&mut out, &report).context("failed to write report")?;
        writeln!(out).context("failed to write report")?;
    }
    out.flush().context("failed to flush stdout")?;

    info!(total = inputs.len(), failures, "winprice-decrypt finished");
    if failures > 0 {
        anyhow::bail!("{failures} of {} ciphertexts failed", inputs.len());
    }
    Ok(())
}

/// Non-blank lines from stdin.
fn read_stdin_lines() -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}
