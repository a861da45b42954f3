/// Scanner module: orchestrates a single blocking scan.
///
/// A [`Scanner`] owns its category table, top-N options and size probe.
/// Each call to [`Scanner::scan`] validates the root, walks the tree once,
/// aggregates folder sizes bottom-up and returns a fresh [`ScanResult`].
/// Accumulators live only inside one call, so scans never share state.
pub mod multi;
pub mod path;
pub mod probe;
pub mod result;
mod walk;

use crate::analysis::CategoryTable;
use crate::error::ScanError;
use probe::{FsProbe, SizeProbe};
pub use result::ScanResult;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Default number of entries in each top-N list.
pub const DEFAULT_TOP_N: usize = 10;

/// How many of the heaviest entries to keep in a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    pub top_files: usize,
    pub top_folders: usize,
}

impl ScanOptions {
    /// The same N for files and folders.
    pub fn top(n: usize) -> Self {
        Self {
            top_files: n,
            top_folders: n,
        }
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::top(DEFAULT_TOP_N)
    }
}

/// Directory scanner configured with a category table and size probe.
#[derive(Debug, Clone)]
pub struct Scanner<P = FsProbe> {
    table: CategoryTable,
    options: ScanOptions,
    probe: P,
}

impl Scanner<FsProbe> {
    /// Scanner reading sizes from the real filesystem.
    pub fn new(table: CategoryTable, options: ScanOptions) -> Self {
        Self::with_probe(table, options, FsProbe)
    }
}

impl Default for Scanner<FsProbe> {
    fn default() -> Self {
        Self::new(CategoryTable::default(), ScanOptions::default())
    }
}

impl<P: SizeProbe> Scanner<P> {
    /// Scanner with a custom size source (used by tests to simulate
    /// unreadable files).
    pub fn with_probe(table: CategoryTable, options: ScanOptions, probe: P) -> Self {
        Self {
            table,
            options,
            probe,
        }
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan the directory tree rooted at `root`.
    ///
    /// Fails only when `root` is not an existing, listable directory; in
    /// that case nothing is walked. Unreadable entries below the root are
    /// tallied in the result instead.
    pub fn scan(&self, root: impl AsRef<Path>) -> Result<ScanResult, ScanError> {
        let root_path = path::resolve_root(root.as_ref())?;
        let start = Instant::now();
        info!("Starting scan of {}", root_path.display());

        let walk::WalkOutput { mut tree, skipped } =
            walk::walk_tree(&root_path, &self.table, &self.probe);

        debug!(
            "Walk complete: {} nodes in {:?}. Running aggregation...",
            tree.len(),
            start.elapsed()
        );
        tree.aggregate_sizes();

        let result = ScanResult::from_tree(&tree, &self.table, &self.options, skipped);
        info!(
            "Scan of {} complete: {} files, {} dirs, {} errors, {} bytes in {:?}",
            result.root.display(),
            result.file_count,
            result.dir_count,
            result.error_count,
            result.total_size,
            start.elapsed()
        );
        Ok(result)
    }
}

/// Scan `root` with the built-in categories, keeping `top_n` files and folders.
pub fn scan(root: impl AsRef<Path>, top_n: usize) -> Result<ScanResult, ScanError> {
    Scanner::new(CategoryTable::default(), ScanOptions::top(top_n)).scan(root)
}
