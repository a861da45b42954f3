//! FolderGauge: folder disk usage with a per-category breakdown.
//!
//! Thin binary entry point. Scanning lives in `foldergauge-core`, output
//! formatting in `foldergauge-report`.

mod cli;

use anyhow::{bail, Context};
use clap::Parser;
use cli::{Cli, Format};
use foldergauge_core::{CategoryTable, Scanner};
use foldergauge_report::{ChartReport, CsvReport, JsonReport, SummaryReport};
use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Reports go to stdout; logs stay on stderr.
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(io::stderr)
        .init();

    tracing::info!("FolderGauge starting");

    let table = match &cli.categories {
        Some(path) => CategoryTable::from_json_file(path)
            .with_context(|| format!("Failed to load categories from {}", path.display()))?,
        None => CategoryTable::default(),
    };
    let scanner = Scanner::new(table, cli.scan_options());
    let targets = cli.targets();
    let renderer = cli.renderer();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let [target] = targets.as_slice() {
        let result = scanner
            .scan(&target.path)
            .with_context(|| format!("Failed to scan {}", target.path.display()))?;
        if result.has_errors() {
            tracing::warn!(
                "{} entries under {} could not be read",
                result.error_count,
                result.root.display()
            );
        }
        renderer
            .render(&result, &mut out)
            .context("Failed to write report")?;
        return Ok(());
    }

    let multi = scanner.scan_many(&targets);
    match cli.format {
        Format::Json => JsonReport {
            pretty: cli.pretty,
            generated_at: None,
        }
        .render_many(&multi, &mut out),
        Format::Csv => CsvReport.render_many(&multi, &mut out),
        Format::Chart => ChartReport::default().render_many(&multi, &mut out),
        Format::Text => {
            for scan in &multi.scans {
                writeln!(out, "== {} ==", scan.name)?;
                renderer.render(&scan.result, &mut out)?;
                writeln!(out)?;
            }
            SummaryReport.render(&multi, &mut out)
        }
    }
    .context("Failed to write report")?;

    if multi.scans.is_empty() {
        bail!("None of the {} folders could be scanned", targets.len());
    }
    Ok(())
}
