/// A single node in the arena-allocated file tree.
///
/// Nodes are stored in a flat `Vec<FileNode>` for cache-friendly traversal.
/// Parent-child relationships use indices rather than pointers.
use crate::analysis::Category;
use compact_str::CompactString;

/// Largest arena a single scan may build; `NodeIndex` is a `u32`.
pub const MAX_NODES: usize = u32::MAX as usize;

/// Lightweight index into the arena `Vec<FileNode>`.
///
/// Uses `u32` to keep nodes small; supports up to ~4 billion nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Create a new `NodeIndex` from a `usize`.
    ///
    /// The walker stops before the arena reaches [`MAX_NODES`], so an
    /// out-of-range index is a bug: it panics in debug builds and clamps
    /// to the last index otherwise.
    #[inline]
    pub fn new(index: usize) -> Self {
        match Self::try_from(index) {
            Ok(idx) => idx,
            Err(_) => {
                debug_assert!(false, "NodeIndex overflow: {index}");
                Self(u32::MAX)
            }
        }
    }

    /// Return the index as a `usize` for Vec indexing.
    #[inline]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<usize> for NodeIndex {
    type Error = std::num::TryFromIntError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        u32::try_from(index).map(Self)
    }
}

/// A single file or directory in the tree.
///
/// Children are linked via a `first_child` / `next_sibling` list so that
/// no separate `Vec<NodeIndex>` allocation is needed per node.
#[derive(Debug, Clone)]
pub struct FileNode {
    /// File or directory name only (NOT the full path).
    /// Full paths are reconstructed on demand by walking up via `parent`.
    pub name: CompactString,

    /// Size in bytes. For directories this is the sum of all descendant
    /// file sizes, filled in by the bottom-up aggregation pass.
    pub size: u64,

    pub is_dir: bool,

    /// Index of the parent node. `None` only for the scan root.
    pub parent: Option<NodeIndex>,

    /// First child (directories only).
    pub first_child: Option<NodeIndex>,

    /// Next sibling under the same parent.
    pub next_sibling: Option<NodeIndex>,

    /// Total number of descendant *files* (not directories).
    pub descendant_count: u64,

    /// Category assigned at scan time. Always `None` for directories.
    pub category: Option<Category>,

    /// `true` if this node could not be read (size unknown, or a directory
    /// that could not be listed). Error nodes carry size 0.
    pub is_error: bool,
}

impl FileNode {
    /// Create a new file node with the given name, size and category.
    pub fn new_file(
        name: CompactString,
        size: u64,
        category: Category,
        parent: Option<NodeIndex>,
    ) -> Self {
        Self {
            name,
            size,
            is_dir: false,
            parent,
            first_child: None,
            next_sibling: None,
            descendant_count: 0,
            category: Some(category),
            is_error: false,
        }
    }

    /// Create a new directory node.
    pub fn new_dir(name: CompactString, parent: Option<NodeIndex>) -> Self {
        Self {
            name,
            size: 0,
            is_dir: true,
            parent,
            first_child: None,
            next_sibling: None,
            descendant_count: 0,
            category: None,
            is_error: false,
        }
    }

    /// Create a file node whose size could not be read.
    pub fn new_unreadable_file(
        name: CompactString,
        category: Category,
        parent: Option<NodeIndex>,
    ) -> Self {
        Self {
            is_error: true,
            ..Self::new_file(name, 0, category, parent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_index_conversion_is_checked() {
        assert_eq!(NodeIndex::try_from(7usize).map(NodeIndex::idx), Ok(7));
        assert_eq!(NodeIndex::new(MAX_NODES).idx(), MAX_NODES);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn node_index_rejects_values_beyond_u32() {
        assert!(NodeIndex::try_from(MAX_NODES + 1).is_err());
    }
}
