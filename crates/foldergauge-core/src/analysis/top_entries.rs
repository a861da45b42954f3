/// Top-N largest files and folders.
///
/// Extracts the heaviest entries from a scanned `FileTree` and enriches
/// them with full paths for presentation.
use super::categories::Category;
use crate::model::FileTree;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single file in the "heaviest files" results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: PathBuf,
    /// Size in bytes; 0 for empty and for unreadable files.
    pub size: u64,
    pub category: Category,
    /// `true` when the size could not be read.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unreadable: bool,
}

/// A single folder in the "heaviest folders" results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRecord {
    pub path: PathBuf,
    /// Recursive size of everything below the folder.
    pub size: u64,
    /// Number of files anywhere below the folder.
    pub file_count: u64,
}

/// Get the top N largest files from the tree, largest first.
pub fn top_files(tree: &FileTree, n: usize) -> Vec<FileRecord> {
    tree.largest_files(n)
        .into_iter()
        .map(|idx| {
            let node = tree.node(idx);
            FileRecord {
                path: tree.full_path(idx),
                size: node.size,
                category: node.category.clone().unwrap_or_else(Category::other),
                unreadable: node.is_error,
            }
        })
        .collect()
}

/// Get the top N largest folders (the root included), largest first.
///
/// Requires the tree to be aggregated.
pub fn top_folders(tree: &FileTree, n: usize) -> Vec<FolderRecord> {
    tree.largest_dirs(n)
        .into_iter()
        .map(|idx| {
            let node = tree.node(idx);
            FolderRecord {
                path: tree.full_path(idx),
                size: node.size,
                file_count: node.descendant_count,
            }
        })
        .collect()
}
