/// CSV export of the heaviest files.
use crate::{Render, ReportError};
use foldergauge_core::model::size::format_size;
use foldergauge_core::{FileRecord, MultiScan, ScanResult};
use serde::Serialize;
use std::io::Write;

const HEADER: [&str; 4] = ["path", "size", "size_human", "category"];

/// One row per top file, largest first. The header is always written.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvReport;

#[derive(Serialize)]
struct CsvRow<'a> {
    path: String,
    size: u64,
    size_human: String,
    category: &'a str,
}

/// [`CsvRow`] prefixed with the scan target's name.
#[derive(Serialize)]
struct FolderCsvRow<'a> {
    folder: &'a str,
    path: String,
    size: u64,
    size_human: String,
    category: &'a str,
}

impl<'a> From<&'a FileRecord> for CsvRow<'a> {
    fn from(file: &'a FileRecord) -> Self {
        Self {
            path: file.path.display().to_string(),
            size: file.size,
            size_human: format_size(file.size),
            category: file.category.as_str(),
        }
    }
}

impl CsvReport {
    /// Top files of every scanned folder, with a leading `folder` column
    /// naming the target each row came from.
    pub fn render_many(&self, multi: &MultiScan, out: &mut dyn Write) -> Result<(), ReportError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(out);
        writer.write_record(std::iter::once("folder").chain(HEADER))?;
        for scan in &multi.scans {
            for file in &scan.result.top_files {
                let row = CsvRow::from(file);
                writer.serialize(FolderCsvRow {
                    folder: &scan.name,
                    path: row.path,
                    size: row.size,
                    size_human: row.size_human,
                    category: row.category,
                })?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

impl Render for CsvReport {
    fn render(&self, result: &ScanResult, out: &mut dyn Write) -> Result<(), ReportError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(out);
        writer.write_record(HEADER)?;
        for file in &result.top_files {
            writer.serialize(CsvRow::from(file))?;
        }
        writer.flush()?;
        Ok(())
    }
}
