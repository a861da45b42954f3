/// File categorisation based on file extensions.
///
/// A [`CategoryTable`] maps category labels to disjoint sets of lowercase
/// extensions. The table is an explicit value handed to the scanner so
/// callers (and tests) can substitute their own category sets; the
/// built-in set is available through `CategoryTable::default()`.
use crate::error::ConfigError;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

/// Label of the fallback category for unmatched extensions.
pub const OTHER_LABEL: &str = "Other";

/// Built-in extension table. Extensions are lowercase and dot-less.
const DEFAULT_TABLE: &[(&str, &[&str])] = &[
    (
        "Videos",
        &["mp4", "mkv", "avi", "mov", "wmv", "flv", "mpeg", "mpg"],
    ),
    ("Music", &["mp3", "wav", "flac", "aac", "m4a", "ogg", "wma"]),
    (
        "Images",
        &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp", "heic"],
    ),
    (
        "Documents",
        &[
            "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt", "csv", "md",
        ],
    ),
    ("Archives", &["zip", "rar", "7z", "tar", "gz"]),
    ("Installers", &["exe", "msi", "apk", "dmg", "pkg"]),
];

/// An immutable category label such as `Videos` or `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(CompactString);

impl Category {
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(CompactString::new(label.as_ref()))
    }

    /// The fallback category.
    pub fn other() -> Self {
        Self::new(OTHER_LABEL)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_other(&self) -> bool {
        self.0 == OTHER_LABEL
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for Category {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Category {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Category {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// One row of a category table as it appears in a JSON config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub label: String,
    pub extensions: Vec<String>,
}

/// Ordered, disjoint mapping from category to file extensions.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    /// Categories in declaration order, used for seeding totals.
    categories: Vec<Category>,
    /// Reverse index: lowercase extension -> position in `categories`.
    by_extension: HashMap<CompactString, usize>,
}

impl CategoryTable {
    /// Build a table, rejecting empty labels, the reserved fallback label
    /// and any extension listed under two categories.
    pub fn new(specs: Vec<CategorySpec>) -> Result<Self, ConfigError> {
        let mut categories = Vec::with_capacity(specs.len());
        let mut by_extension = HashMap::new();
        let mut seen_labels = HashSet::new();

        for (pos, spec) in specs.into_iter().enumerate() {
            let label = spec.label.trim();
            if label.is_empty() {
                return Err(ConfigError::EmptyLabel { position: pos });
            }
            if label == OTHER_LABEL || !seen_labels.insert(label.to_string()) {
                return Err(ConfigError::DuplicateLabel {
                    label: label.to_string(),
                });
            }
            categories.push(Category::new(label));

            for ext in spec.extensions {
                let ext = normalise_extension(&ext);
                if ext.is_empty() {
                    continue;
                }
                if let Some(&prev) = by_extension.get(&ext) {
                    if prev != pos {
                        let first: &Category = &categories[prev];
                        return Err(ConfigError::OverlappingExtension {
                            extension: ext.to_string(),
                            first: first.to_string(),
                            second: label.to_string(),
                        });
                    }
                    continue;
                }
                by_extension.insert(ext, pos);
            }
        }

        Ok(Self {
            categories,
            by_extension,
        })
    }

    /// Parse a JSON array of `{ "label": ..., "extensions": [...] }`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let specs: Vec<CategorySpec> = serde_json::from_str(json)?;
        Self::new(specs)
    }

    /// Read and parse a JSON category file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Export the table back into its config representation.
    pub fn to_specs(&self) -> Vec<CategorySpec> {
        let mut grouped: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for (ext, &pos) in &self.by_extension {
            grouped.entry(pos).or_default().push(ext.to_string());
        }
        self.categories
            .iter()
            .enumerate()
            .map(|(pos, cat)| {
                let mut extensions = grouped.remove(&pos).unwrap_or_default();
                extensions.sort();
                CategorySpec {
                    label: cat.to_string(),
                    extensions,
                }
            })
            .collect()
    }

    /// Configured categories in declaration order, without `Other`.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Categorise a file name by its extension, case-insensitively.
    pub fn classify(&self, file_name: &str) -> Category {
        extension_of(file_name)
            .and_then(|ext| self.by_extension.get(&normalise_extension(ext)))
            .map(|&pos| self.categories[pos].clone())
            .unwrap_or_else(Category::other)
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        let mut categories = Vec::with_capacity(DEFAULT_TABLE.len());
        let mut by_extension = HashMap::new();
        for (pos, (label, exts)) in DEFAULT_TABLE.iter().enumerate() {
            categories.push(Category::new(label));
            for ext in exts.iter() {
                by_extension.insert(CompactString::new(ext), pos);
            }
        }
        Self {
            categories,
            by_extension,
        }
    }
}

/// Categorise `file_name` with the built-in table.
pub fn classify(file_name: &str) -> Category {
    static DEFAULT: OnceLock<CategoryTable> = OnceLock::new();
    DEFAULT.get_or_init(CategoryTable::default).classify(file_name)
}

/// Extension of a file name: the text after the last `.`.
///
/// A leading dot alone (`.bashrc`) does not start an extension.
fn extension_of(file_name: &str) -> Option<&str> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        None
    } else {
        Some(ext)
    }
}

fn normalise_extension(ext: &str) -> CompactString {
    let ext = ext.trim().trim_start_matches('.');
    let mut lower = CompactString::with_capacity(ext.len());
    for ch in ext.chars() {
        lower.extend(ch.to_lowercase());
    }
    lower
}
