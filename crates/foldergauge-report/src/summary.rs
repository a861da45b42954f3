/// Overview of several folders scanned one after another.
use crate::text::{write_category_rows, write_skipped_advisory};
use crate::ReportError;
use foldergauge_core::model::size::format_size;
use foldergauge_core::MultiScan;
use std::io::Write;

/// Folder totals, heaviest first, then category usage merged across all of
/// them. Targets that could not be scanned are listed separately.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryReport;

impl SummaryReport {
    pub fn render(&self, multi: &MultiScan, out: &mut dyn Write) -> Result<(), ReportError> {
        writeln!(out, "Folder summary")?;

        let ranked = multi.ranked();
        let name_width = ranked
            .iter()
            .map(|s| s.name.len())
            .chain(std::iter::once("Total".len()))
            .max()
            .unwrap_or(0);

        for scan in &ranked {
            writeln!(
                out,
                "  {:<name_width$} {:>11}  {}",
                scan.name,
                format_size(scan.result.total_size),
                scan.result.root.display()
            )?;
        }
        writeln!(
            out,
            "  {:<name_width$} {:>11}",
            "Total",
            format_size(multi.total_size())
        )?;

        if !multi.missing.is_empty() {
            writeln!(out)?;
            writeln!(out, "Not scanned")?;
            for missing in &multi.missing {
                writeln!(
                    out,
                    "  {} ({}): {}",
                    missing.target.name,
                    missing.target.path.display(),
                    missing.reason
                )?;
            }
        }

        writeln!(out)?;
        writeln!(out, "Category usage (all folders)")?;
        write_category_rows(out, &multi.category_totals)?;
        write_skipped_advisory(out, multi.error_count())?;
        Ok(())
    }
}
