/// FolderGauge Report: renderers for scan results.
///
/// Every renderer consumes a finished [`ScanResult`] and writes to any
/// [`std::io::Write`]. Scanning code never prints; this crate is the only
/// place output formatting lives.
pub mod chart;
pub mod csv_export;
pub mod error;
pub mod json;
pub mod summary;
pub mod text;

pub use chart::ChartReport;
pub use csv_export::CsvReport;
pub use error::ReportError;
pub use json::JsonReport;
pub use summary::SummaryReport;
pub use text::TextReport;

use foldergauge_core::ScanResult;
use std::io::Write;

/// A way of presenting one scan result.
pub trait Render {
    fn render(&self, result: &ScanResult, out: &mut dyn Write) -> Result<(), ReportError>;

    /// Render into an in-memory string.
    fn render_to_string(&self, result: &ScanResult) -> Result<String, ReportError> {
        let mut buf = Vec::new();
        self.render(result, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
