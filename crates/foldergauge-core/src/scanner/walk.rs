/// Single-threaded directory walker using `jwalk` in serial mode.
///
/// Entries are visited depth-first in sorted order, so every directory is
/// yielded before its contents and every node lands in the arena after its
/// parent. That ordering is what lets `FileTree::aggregate_sizes` fold
/// sizes bottom-up in one reverse pass. Symlinks are never followed.
use super::probe::{read_size, SizeProbe, SizeReading};
use crate::analysis::CategoryTable;
use crate::error::{SkipKind, SkippedEntry};
use crate::model::{FileNode, FileTree, NodeIndex, MAX_NODES};
use compact_str::CompactString;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{trace, warn};

/// Rough per-scan arena pre-allocation.
const INITIAL_CAPACITY: usize = 4_096;

/// Everything the walk collected, before aggregation.
pub(crate) struct WalkOutput {
    pub tree: FileTree,
    pub skipped: Vec<SkippedEntry>,
}

/// Accumulators for one walk. Lives only for the duration of a scan.
struct WalkState {
    tree: FileTree,
    skipped: Vec<SkippedEntry>,
    /// Directory path -> arena index.
    dir_map: HashMap<PathBuf, NodeIndex>,
    node_limit: usize,
}

impl WalkState {
    fn new(root_path: &Path, node_limit: usize) -> Self {
        let tree = FileTree::new(root_path, INITIAL_CAPACITY.min(node_limit));
        let mut dir_map = HashMap::with_capacity(256);
        dir_map.insert(root_path.to_path_buf(), tree.root);
        Self {
            tree,
            skipped: Vec::new(),
            dir_map,
            node_limit,
        }
    }

    fn is_full(&self) -> bool {
        self.tree.len() >= self.node_limit
    }

    fn parent_of(&self, path: &Path) -> Option<NodeIndex> {
        path.parent().and_then(|p| self.dir_map.get(p)).copied()
    }

    /// Add a directory. `list_error` is set when its contents could not be
    /// read; the directory then stays in the tree as an empty error node.
    fn add_dir(
        &mut self,
        path: PathBuf,
        name: CompactString,
        parent: NodeIndex,
        list_error: Option<String>,
    ) {
        let idx = self.tree.insert(parent, FileNode::new_dir(name, None));
        self.dir_map.insert(path.clone(), idx);
        if let Some(message) = list_error {
            self.record_unlistable(path, message);
        }
    }

    fn add_file(
        &mut self,
        path: &Path,
        name: CompactString,
        parent: NodeIndex,
        reading: SizeReading,
        table: &CategoryTable,
    ) {
        let category = table.classify(&name);
        let node = match &reading {
            SizeReading::Unreadable(err) => {
                warn!("Unreadable file {}: {err}", path.display());
                self.skipped
                    .push(SkippedEntry::new(path, SkipKind::File, err.to_string()));
                FileNode::new_unreadable_file(name, category, None)
            }
            SizeReading::Empty => {
                trace!("Empty file: {}", path.display());
                FileNode::new_file(name, reading.bytes(), category, None)
            }
            SizeReading::Sized(_) => FileNode::new_file(name, reading.bytes(), category, None),
        };
        self.tree.insert(parent, node);
    }

    /// Mark a directory whose contents could not be read.
    ///
    /// The directory keeps its node (total 0 for the missing part of the
    /// subtree) and is counted once, however often the failure is reported.
    fn record_unlistable(&mut self, path: PathBuf, message: String) {
        let already_counted = self
            .skipped
            .iter()
            .any(|s| s.kind == SkipKind::Directory && s.path == path);
        if already_counted {
            return;
        }

        if let Some(&idx) = self.dir_map.get(&path) {
            self.tree.nodes[idx.idx()].is_error = true;
        }
        warn!("Unreadable directory {}: {message}", path.display());
        self.skipped
            .push(SkippedEntry::new(path, SkipKind::Directory, message));
    }

    /// An entry jwalk could not produce at all. Known directories are
    /// treated as unlistable; anything else counts as an unreadable file.
    fn record_entry_error(&mut self, path: PathBuf, message: String) {
        if self.dir_map.contains_key(&path) {
            self.record_unlistable(path, message);
        } else {
            warn!("Unreadable entry {}: {message}", path.display());
            self.skipped
                .push(SkippedEntry::new(path, SkipKind::File, message));
        }
    }

    fn finish(self) -> WalkOutput {
        WalkOutput {
            tree: self.tree,
            skipped: self.skipped,
        }
    }
}

/// Walk `root_path` and build an unaggregated tree.
///
/// Unreadable files become zero-sized error nodes; directories that cannot
/// be listed stay in the tree as empty error nodes. Both are recorded in
/// `skipped` and never abort the walk.
pub(crate) fn walk_tree<P: SizeProbe + ?Sized>(
    root_path: &Path,
    table: &CategoryTable,
    probe: &P,
) -> WalkOutput {
    let mut state = WalkState::new(root_path, MAX_NODES);

    let walker = jwalk::WalkDir::new(root_path)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .parallelism(jwalk::Parallelism::Serial);

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                // Entry-level failure, e.g. an entry vanished mid-listing.
                let err_path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root_path.to_path_buf());
                state.record_entry_error(err_path, err.to_string());
                continue;
            }
        };

        // jwalk reports a failed read_dir on the directory entry itself.
        let list_error = entry.read_children_error.as_ref().map(|e| e.to_string());
        let path = entry.path();

        // The root node already exists.
        if path == root_path {
            if let Some(message) = list_error {
                state.record_unlistable(path, message);
            }
            continue;
        }

        if state.is_full() {
            warn!(
                "Node limit of {} reached; stopping walk of {}",
                state.node_limit,
                root_path.display()
            );
            break;
        }

        let Some(parent_idx) = state.parent_of(&path) else {
            // Serial sorted walks always yield parents first.
            warn!("Orphan entry skipped: {}", path.display());
            continue;
        };

        let name = CompactString::new(entry.file_name().to_string_lossy());

        if entry.file_type().is_dir() {
            state.add_dir(path, name, parent_idx, list_error);
        } else {
            let reading = read_size(probe, &path);
            state.add_file(&path, name, parent_idx, reading, table);
        }
    }

    state.finish()
}
