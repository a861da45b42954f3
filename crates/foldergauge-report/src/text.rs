/// Plain-text report: heaviest folders, heaviest files, category usage.
use crate::{Render, ReportError};
use foldergauge_core::model::size::{format_count, format_size};
use foldergauge_core::{CategoryTotals, ScanResult};
use std::io::Write;
use tracing::debug;

/// Width of the right-aligned size column.
const SIZE_WIDTH: usize = 11;

/// Human-readable report, the default CLI output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReport;

impl Render for TextReport {
    fn render(&self, result: &ScanResult, out: &mut dyn Write) -> Result<(), ReportError> {
        debug!("Rendering text report for {}", result.root.display());

        writeln!(out, "Scan of {}", result.root.display())?;
        writeln!(
            out,
            "Total: {} in {} files, {} folders",
            format_size(result.total_size),
            format_count(result.file_count),
            format_count(result.dir_count)
        )?;

        writeln!(out)?;
        writeln!(out, "Heaviest folders")?;
        if result.top_folders.is_empty() {
            writeln!(out, "  (none)")?;
        }
        for folder in &result.top_folders {
            writeln!(
                out,
                "  {:>width$} | {} ({} files)",
                format_size(folder.size),
                folder.path.display(),
                format_count(folder.file_count),
                width = SIZE_WIDTH
            )?;
        }

        writeln!(out)?;
        writeln!(out, "Heaviest files")?;
        if result.top_files.is_empty() {
            writeln!(out, "  (none)")?;
        }
        for file in &result.top_files {
            let marker = if file.unreadable { " [unreadable]" } else { "" };
            writeln!(
                out,
                "  {:>width$} | {} | {}{marker}",
                format_size(file.size),
                file.category,
                file.path.display(),
                width = SIZE_WIDTH
            )?;
        }

        writeln!(out)?;
        writeln!(out, "Category usage")?;
        write_category_rows(out, &result.category_totals)?;
        write_skipped_advisory(out, result.error_count)?;
        Ok(())
    }
}

/// Non-empty categories, largest first, one per line.
pub(crate) fn write_category_rows(
    out: &mut dyn Write,
    totals: &CategoryTotals,
) -> Result<(), ReportError> {
    let rows = totals.sorted_by_size();
    if rows.is_empty() {
        writeln!(out, "  (no data)")?;
        return Ok(());
    }
    let label_width = rows.iter().map(|(c, _)| c.as_str().len()).max().unwrap_or(0);
    for (category, stats) in rows {
        writeln!(
            out,
            "  {:<label_width$} {:>width$} ({} files)",
            category.as_str(),
            format_size(stats.total_size),
            format_count(stats.file_count),
            width = SIZE_WIDTH
        )?;
    }
    Ok(())
}

/// Trailing note about entries that could not be read, if any.
pub(crate) fn write_skipped_advisory(out: &mut dyn Write, errors: u64) -> Result<(), ReportError> {
    if errors > 0 {
        writeln!(out)?;
        writeln!(
            out,
            "{} files skipped due to permission or access errors",
            format_count(errors)
        )?;
    }
    Ok(())
}
