//! Directory scanning and grouping.
//!
//! A scan walks a directory tree, extracts the video identifier from every
//! filename, and groups the files of each identifier into a [`MediaItem`].
//! [`completeness`] then decides which items can be converted.

pub mod completeness;
mod item;
pub mod validate;

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};
use tubeprep_common::{CategoryTable, VideoId};
use walkdir::{DirEntry, WalkDir};

pub use completeness::{classify, import_problems, partition, Completeness, ImportProblem, Partition};
pub use item::MediaItem;
pub use validate::{validate_media, ValidationReport};

/// Prefix of scratch directories created next to outputs during conversion.
const SCRATCH_PREFIX: &str = ".tubeprep-";

/// Groups the files under a directory by video identifier.
pub struct FileGrouper {
    table: CategoryTable,
}

impl FileGrouper {
    pub fn new(table: CategoryTable) -> Self {
        Self { table }
    }

    /// Scan `root` recursively and return one item per identifier.
    ///
    /// Entries are visited in lexical order within each directory, so when
    /// several files of the same single-valued category share an identifier
    /// the lexically last one is kept. Items are returned sorted by id.
    pub fn scan_directory(&self, root: &Path) -> Result<Vec<MediaItem>> {
        if !root.is_dir() {
            anyhow::bail!("Not a directory: {:?}", root);
        }
        let root = root
            .canonicalize()
            .with_context(|| format!("Failed to resolve {:?}", root))?;

        info!("Scanning directory: {:?}", root);
        let mut items: BTreeMap<VideoId, MediaItem> = BTreeMap::new();

        for entry in WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_scratch_dir(e))
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(id) = VideoId::from_filename(file_name) else {
                continue;
            };
            let Some(category) = self.table.categorize(file_name) else {
                debug!("Ignoring uncategorized file {:?}", path);
                continue;
            };

            debug!(video_id = %id, category = %category, "Found {:?}", path);
            let dir = path.parent().unwrap_or(&root).to_path_buf();
            items
                .entry(id.clone())
                .or_insert_with(|| MediaItem::new(id, dir))
                .record(category, path.to_path_buf());
        }

        info!("Scan complete: {} items found in {:?}", items.len(), root);
        Ok(items.into_values().collect())
    }
}

fn is_scratch_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|n| n.starts_with(SCRATCH_PREFIX))
}
