/// Analysis modules: categorisation and post-scan rankings.

pub mod categories;
pub mod top_entries;
pub mod totals;

pub use categories::{classify, Category, CategorySpec, CategoryTable, OTHER_LABEL};
pub use top_entries::{top_files, top_folders, FileRecord, FolderRecord};
pub use totals::{analyse_categories, CategoryStats, CategoryTotals};
