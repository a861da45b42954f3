/// FolderGauge Core: scanning, categorisation, and data model.
///
/// This crate contains all business logic with zero UI dependencies.
/// Renderers consume the [`ScanResult`] it produces.
///
/// # Modules
///
/// - [`model`]: Arena-allocated file tree and size formatting.
/// - [`analysis`]: Extension categories, category totals, top-N rankings.
/// - [`scanner`]: Root validation, the single-pass walk, multi-folder scans.
/// - [`error`]: Fatal scan errors, config errors, skipped-entry records.
pub mod analysis;
pub mod error;
pub mod model;
pub mod scanner;

pub use analysis::{classify, Category, CategoryTable, CategoryTotals, FileRecord, FolderRecord};
pub use error::{ConfigError, ScanError, SkipKind, SkippedEntry};
pub use model::size::{format_count, format_size};
pub use scanner::multi::{MultiScan, ScanTarget};
pub use scanner::{scan, ScanOptions, ScanResult, Scanner};
