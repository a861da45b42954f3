/// Horizontal bar charts of how the scanned bytes split across categories
/// and, for several folders, across the folders themselves.
use crate::{Render, ReportError};
use foldergauge_core::model::size::format_size;
use foldergauge_core::{CategoryTotals, MultiScan, ScanResult};
use std::io::Write;

/// Text bar chart. Each non-empty category gets a row of `#` proportional to
/// its share of the categorised total.
#[derive(Debug, Clone, Copy)]
pub struct ChartReport {
    /// Characters in a 100% bar.
    pub width: usize,
}

impl Default for ChartReport {
    fn default() -> Self {
        Self { width: 40 }
    }
}

impl ChartReport {
    pub fn with_width(width: usize) -> Self {
        Self { width }
    }

    pub fn render_totals(
        &self,
        totals: &CategoryTotals,
        out: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let rows: Vec<(&str, u64)> = totals
            .sorted_by_size()
            .into_iter()
            .map(|(category, stats)| (category.as_str(), stats.total_size))
            .collect();
        self.write_bars(&rows, out)
    }

    /// How space splits across the scanned folders, then across categories
    /// for all folders together.
    pub fn render_many(&self, multi: &MultiScan, out: &mut dyn Write) -> Result<(), ReportError> {
        writeln!(out, "Folder share")?;
        let rows: Vec<(&str, u64)> = multi
            .ranked()
            .into_iter()
            .filter(|scan| scan.result.total_size > 0)
            .map(|scan| (scan.name.as_str(), scan.result.total_size))
            .collect();
        self.write_bars(&rows, out)?;

        writeln!(out)?;
        writeln!(out, "Category share (all folders)")?;
        self.render_totals(&multi.category_totals, out)
    }

    /// One `label |####   | pct%  size` line per row. Rows are expected
    /// non-empty and largest first.
    fn write_bars(&self, rows: &[(&str, u64)], out: &mut dyn Write) -> Result<(), ReportError> {
        let total: u64 = rows.iter().map(|(_, size)| size).sum();
        if total == 0 {
            writeln!(out, "No data to chart.")?;
            return Ok(());
        }

        let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        for &(label, size) in rows {
            let pct = size as f64 / total as f64 * 100.0;
            let bar = "#".repeat(bar_len(pct, self.width));
            writeln!(
                out,
                "{:<label_width$} |{:<bar_width$}| {:>5.1}%  {}",
                label,
                bar,
                pct,
                format_size(size),
                bar_width = self.width
            )?;
        }
        Ok(())
    }
}

impl Render for ChartReport {
    fn render(&self, result: &ScanResult, out: &mut dyn Write) -> Result<(), ReportError> {
        writeln!(out, "Category share of {}", result.root.display())?;
        self.render_totals(&result.category_totals, out)
    }
}

/// Filled cells for `pct` percent of `width`. A visible share never rounds
/// down to an empty bar.
fn bar_len(pct: f64, width: usize) -> usize {
    let cells = (pct / 100.0).clamp(0.0, 1.0) * width as f64;
    let rounded = cells.round() as usize;
    if rounded == 0 && pct > 0.0 && width > 0 {
        1
    } else {
        rounded.min(width)
    }
}
