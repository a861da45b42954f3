/// Per-category size and count totals.
use super::categories::{Category, CategoryTable};
use crate::model::FileTree;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Size and count totals for a single category.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub total_size: u64,
    pub file_count: u64,
}

/// Accumulated totals for every category of a table, plus `Other`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTotals {
    entries: BTreeMap<Category, CategoryStats>,
}

impl CategoryTotals {
    /// Totals with every category of `table` and `Other` present at zero.
    pub fn seeded(table: &CategoryTable) -> Self {
        let entries = table
            .categories()
            .iter()
            .cloned()
            .chain(std::iter::once(Category::other()))
            .map(|cat| (cat, CategoryStats::default()))
            .collect();
        Self { entries }
    }

    /// Count one file of `size` bytes under `category`.
    pub fn add(&mut self, category: &Category, size: u64) {
        let stats = self.entries.entry(category.clone()).or_default();
        stats.total_size += size;
        stats.file_count += 1;
    }

    /// Fold another set of totals into this one.
    pub fn merge(&mut self, other: &CategoryTotals) {
        for (cat, stats) in &other.entries {
            let entry = self.entries.entry(cat.clone()).or_default();
            entry.total_size += stats.total_size;
            entry.file_count += stats.file_count;
        }
    }

    /// Bytes accumulated under `label`, 0 when unknown.
    pub fn size_of(&self, label: &str) -> u64 {
        self.stats_of(label).map_or(0, |s| s.total_size)
    }

    pub fn stats_of(&self, label: &str) -> Option<&CategoryStats> {
        self.entries.get(label)
    }

    /// Sum of all category totals.
    pub fn total_size(&self) -> u64 {
        self.entries.values().map(|s| s.total_size).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, &CategoryStats)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Categories that hold at least one byte, largest first.
    ///
    /// Ties keep label order so output is deterministic.
    pub fn sorted_by_size(&self) -> Vec<(&Category, &CategoryStats)> {
        let mut results: Vec<_> = self
            .entries
            .iter()
            .filter(|(_, stats)| stats.total_size > 0)
            .collect();
        results.sort_by(|a, b| b.1.total_size.cmp(&a.1.total_size));
        results
    }
}

/// Compute per-category totals for every file in the tree.
///
/// Files classified during the scan carry their category on the node;
/// unreadable files count towards `file_count` with 0 bytes.
pub fn analyse_categories(tree: &FileTree, table: &CategoryTable) -> CategoryTotals {
    let mut totals = CategoryTotals::seeded(table);
    for node in &tree.nodes {
        if node.is_dir {
            continue;
        }
        match &node.category {
            Some(cat) => totals.add(cat, node.size),
            None => totals.add(&table.classify(&node.name), node.size),
        }
    }
    totals
}
