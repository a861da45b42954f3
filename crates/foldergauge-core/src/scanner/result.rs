/// The structured outcome of one scan, consumed by renderers.
use super::ScanOptions;
use crate::analysis::{
    analyse_categories, top_files, top_folders, CategoryTable, CategoryTotals, FileRecord,
    FolderRecord,
};
use crate::error::{SkipKind, SkippedEntry};
use crate::model::FileTree;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Everything a scan produces. Built fresh per scan and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Absolute, normalised scan root.
    pub root: PathBuf,
    /// Recursive size of the root, i.e. of every readable file below it.
    pub total_size: u64,
    pub file_count: u64,
    /// Directories in the subtree, root included.
    pub dir_count: u64,
    /// Recursive size of every directory in the root's subtree.
    pub folder_sizes: BTreeMap<PathBuf, u64>,
    /// Heaviest folders, largest first.
    pub top_folders: Vec<FolderRecord>,
    /// Heaviest files, largest first.
    pub top_files: Vec<FileRecord>,
    pub category_totals: CategoryTotals,
    /// Unreadable files plus unlistable directories.
    pub error_count: u64,
    pub skipped: Vec<SkippedEntry>,
}

impl ScanResult {
    /// Assemble a result from an aggregated tree.
    pub fn from_tree(
        tree: &FileTree,
        table: &CategoryTable,
        options: &ScanOptions,
        skipped: Vec<SkippedEntry>,
    ) -> Self {
        Self {
            root: tree.root_path.clone(),
            total_size: tree.total_size,
            file_count: tree.file_count(),
            dir_count: tree.dir_count(),
            folder_sizes: tree.folder_sizes(),
            top_folders: top_folders(tree, options.top_folders),
            top_files: top_files(tree, options.top_files),
            category_totals: analyse_categories(tree, table),
            error_count: skipped.len() as u64,
            skipped,
        }
    }

    /// Recursive size recorded for `path`, if it is a folder of this scan.
    pub fn folder_size(&self, path: impl AsRef<Path>) -> Option<u64> {
        self.folder_sizes.get(path.as_ref()).copied()
    }

    /// Re-rank folders from the full map, e.g. for a larger N than scanned.
    pub fn largest_folders(&self, n: usize) -> Vec<(&Path, u64)> {
        let mut folders: Vec<(&Path, u64)> = self
            .folder_sizes
            .iter()
            .map(|(path, &size)| (path.as_path(), size))
            .collect();
        // Stable sort keeps path order among equal sizes.
        folders.sort_by(|a, b| b.1.cmp(&a.1));
        folders.truncate(n);
        folders
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Number of files whose size could not be read.
    pub fn unreadable_files(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| s.kind == SkipKind::File)
            .count()
    }

    /// Number of directories that could not be listed.
    pub fn unreadable_dirs(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| s.kind == SkipKind::Directory)
            .count()
    }
}
