/// Arena-backed file tree with O(n) bottom-up size aggregation.
///
/// All nodes live in a single `Vec<FileNode>`. Relationships between nodes
/// use `NodeIndex` (a thin `u32` wrapper) rather than heap pointers.
use super::file_node::{FileNode, NodeIndex};
use compact_str::CompactString;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The complete file tree produced by one scan.
#[derive(Debug, Clone)]
pub struct FileTree {
    /// Arena: every node in a flat vector. Children always come after
    /// their parent.
    pub nodes: Vec<FileNode>,

    /// Index of the scan root (always the first node).
    pub root: NodeIndex,

    /// Absolute, normalised path of the scan root.
    pub root_path: PathBuf,

    /// Total size of the root's subtree. Valid after [`aggregate_sizes`].
    ///
    /// [`aggregate_sizes`]: FileTree::aggregate_sizes
    pub total_size: u64,
}

impl FileTree {
    /// Create a tree holding only the root directory node.
    ///
    /// `estimated_nodes` is a capacity hint; the arena grows as needed.
    pub fn new(root_path: impl Into<PathBuf>, estimated_nodes: usize) -> Self {
        let root_path = root_path.into();
        let mut nodes = Vec::with_capacity(estimated_nodes.max(1));
        nodes.push(FileNode::new_dir(root_display_name(&root_path), None));
        Self {
            nodes,
            root: NodeIndex::new(0),
            root_path,
            total_size: 0,
        }
    }

    /// Allocate a new node in the arena and return its index.
    pub fn add_node(&mut self, node: FileNode) -> NodeIndex {
        let idx = NodeIndex::new(self.nodes.len());
        self.nodes.push(node);
        idx
    }

    /// Attach `child` as a child of `parent`, prepending to the sibling list.
    pub fn add_child(&mut self, parent: NodeIndex, child: NodeIndex) {
        debug_assert!(child > parent, "children must follow their parent");
        let old_first = self.nodes[parent.idx()].first_child;
        self.nodes[child.idx()].next_sibling = old_first;
        self.nodes[child.idx()].parent = Some(parent);
        self.nodes[parent.idx()].first_child = Some(child);
    }

    /// Allocate `node` and link it under `parent` in one step.
    pub fn insert(&mut self, parent: NodeIndex, node: FileNode) -> NodeIndex {
        let idx = self.add_node(node);
        self.add_child(parent, idx);
        idx
    }

    /// Compute directory sizes and descendant counts in a single bottom-up pass.
    ///
    /// Because children are always inserted after their parent, iterating
    /// in *reverse* guarantees every child is folded into its parent before
    /// the parent itself is propagated. Each node is visited exactly once.
    ///
    /// Safe to call repeatedly; directory totals are reset first.
    pub fn aggregate_sizes(&mut self) {
        for node in self.nodes.iter_mut() {
            if node.is_dir {
                node.size = 0;
                node.descendant_count = 0;
            }
        }

        for i in (0..self.nodes.len()).rev() {
            let node = &self.nodes[i];
            let (size, files) = if node.is_dir {
                (node.size, node.descendant_count)
            } else {
                (node.size, 1)
            };
            if let Some(parent_idx) = node.parent {
                let parent = &mut self.nodes[parent_idx.idx()];
                parent.size += size;
                parent.descendant_count += files;
            }
        }

        self.total_size = self.nodes[self.root.idx()].size;
    }

    /// Recursive size of every directory in the tree, keyed by full path.
    pub fn folder_sizes(&self) -> BTreeMap<PathBuf, u64> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_dir)
            .map(|(i, node)| (self.full_path(NodeIndex::new(i)), node.size))
            .collect()
    }

    /// The `n` largest files, sorted descending by size.
    pub fn largest_files(&self, n: usize) -> Vec<NodeIndex> {
        self.largest_where(n, |node| !node.is_dir)
    }

    /// The `n` largest directories (root included), sorted descending by size.
    pub fn largest_dirs(&self, n: usize) -> Vec<NodeIndex> {
        self.largest_where(n, |node| node.is_dir)
    }

    /// Top-N selection over the nodes accepted by `keep`.
    ///
    /// Uses `select_nth_unstable_by` (O(n) average) to bring the top-N
    /// elements to the front, then sorts only those N elements. Ties are
    /// broken by arena position. The scanner fills the arena in sorted
    /// depth-first order, which is ascending path order, so equal sizes
    /// rank by path.
    fn largest_where(&self, n: usize, keep: impl Fn(&FileNode) -> bool) -> Vec<NodeIndex> {
        if n == 0 {
            return Vec::new();
        }

        let mut indices: Vec<NodeIndex> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| keep(*node))
            .map(|(i, _)| NodeIndex::new(i))
            .collect();

        let by_size_desc = |a: &NodeIndex, b: &NodeIndex| -> Ordering {
            self.nodes[b.idx()]
                .size
                .cmp(&self.nodes[a.idx()].size)
                .then(a.cmp(b))
        };

        if indices.len() > n {
            indices.select_nth_unstable_by(n - 1, by_size_desc);
            indices.truncate(n);
        }
        indices.sort_unstable_by(by_size_desc);
        indices
    }

    /// Reconstruct the full path for a node by walking up to the root.
    pub fn full_path(&self, index: NodeIndex) -> PathBuf {
        let mut segments = Vec::new();
        let mut current = index;
        while let Some(parent) = self.nodes[current.idx()].parent {
            segments.push(self.nodes[current.idx()].name.as_str());
            current = parent;
        }

        let mut path = self.root_path.clone();
        for segment in segments.into_iter().rev() {
            path.push(segment);
        }
        path
    }

    #[inline]
    pub fn node(&self, index: NodeIndex) -> &FileNode {
        &self.nodes[index.idx()]
    }

    /// Total number of nodes in the tree, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root, so this is never true.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of file nodes (readable or not).
    pub fn file_count(&self) -> u64 {
        self.nodes.iter().filter(|n| !n.is_dir).count() as u64
    }

    /// Number of directory nodes, root included.
    pub fn dir_count(&self) -> u64 {
        self.nodes.iter().filter(|n| n.is_dir).count() as u64
    }
}

/// Derive a display name for the scan root.
fn root_display_name(path: &Path) -> CompactString {
    match path.file_name() {
        Some(name) => CompactString::new(name.to_string_lossy()),
        None => CompactString::new(path.to_string_lossy()),
    }
}
