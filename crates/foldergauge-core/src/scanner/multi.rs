/// Sequential scanning of several named folders with a combined summary.
use super::probe::SizeProbe;
use super::{ScanResult, Scanner};
use crate::analysis::CategoryTotals;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// A folder to scan, with the label shown in summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanTarget {
    pub name: String,
    pub path: PathBuf,
}

impl ScanTarget {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Target labelled with the last path component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }
}

/// One successfully scanned target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderScan {
    pub name: String,
    pub result: ScanResult,
}

/// A target that could not be scanned at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingTarget {
    pub target: ScanTarget,
    pub reason: String,
}

/// Results for several targets, in the order they were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiScan {
    pub scans: Vec<FolderScan>,
    pub missing: Vec<MissingTarget>,
    /// Category totals merged across every successful scan.
    pub category_totals: CategoryTotals,
}

impl MultiScan {
    /// Successful scans, heaviest first.
    pub fn ranked(&self) -> Vec<&FolderScan> {
        let mut ranked: Vec<&FolderScan> = self.scans.iter().collect();
        ranked.sort_by(|a, b| b.result.total_size.cmp(&a.result.total_size));
        ranked
    }

    /// Sum of all scanned folder totals.
    pub fn total_size(&self) -> u64 {
        self.scans.iter().map(|s| s.result.total_size).sum()
    }

    pub fn error_count(&self) -> u64 {
        self.scans.iter().map(|s| s.result.error_count).sum()
    }
}

impl<P: SizeProbe> Scanner<P> {
    /// Scan each target in turn. Targets that are not valid directories are
    /// reported in [`MultiScan::missing`] instead of failing the batch.
    pub fn scan_many(&self, targets: &[ScanTarget]) -> MultiScan {
        let mut multi = MultiScan {
            category_totals: CategoryTotals::seeded(self.table()),
            ..MultiScan::default()
        };

        for target in targets {
            match self.scan(&target.path) {
                Ok(result) => {
                    multi.category_totals.merge(&result.category_totals);
                    multi.scans.push(FolderScan {
                        name: target.name.clone(),
                        result,
                    });
                }
                Err(err) => {
                    warn!("Skipping {} ({}): {err}", target.name, target.path.display());
                    multi.missing.push(MissingTarget {
                        target: target.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        multi
    }
}
