/// Machine-readable JSON report.
use crate::{Render, ReportError};
use chrono::{DateTime, Utc};
use foldergauge_core::{MultiScan, ScanResult};
use serde::Serialize;
use std::io::Write;

/// Serialises the whole result, stamped with the time it was rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReport {
    pub pretty: bool,
    /// Fixed timestamp instead of "now".
    pub generated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct JsonDocument<'a, T: Serialize> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    body: &'a T,
}

impl JsonReport {
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            generated_at: None,
        }
    }

    /// One document covering every folder of a multi-folder scan.
    pub fn render_many(&self, multi: &MultiScan, out: &mut dyn Write) -> Result<(), ReportError> {
        self.write_document(multi, out)
    }

    fn write_document<T: Serialize>(&self, body: &T, out: &mut dyn Write) -> Result<(), ReportError> {
        let doc = JsonDocument {
            generated_at: self.generated_at.unwrap_or_else(Utc::now),
            body,
        };
        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, &doc)?;
        } else {
            serde_json::to_writer(&mut *out, &doc)?;
        }
        writeln!(out)?;
        Ok(())
    }
}

impl Render for JsonReport {
    fn render(&self, result: &ScanResult, out: &mut dyn Write) -> Result<(), ReportError> {
        self.write_document(result, out)
    }
}
