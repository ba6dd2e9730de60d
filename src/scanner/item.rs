use serde::Serialize;
use std::path::{Path, PathBuf};
use tubeprep_common::{Category, VideoId};

/// Every file discovered for one video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaItem {
    pub id: VideoId,
    pub media_path: Option<PathBuf>,
    pub metadata_path: Option<PathBuf>,
    pub thumb_path: Option<PathBuf>,
    pub subtitle_paths: Vec<PathBuf>,
    pub description_path: Option<PathBuf>,
    /// Directory the item lives in; outputs are written here.
    pub root_dir: PathBuf,
}

impl MediaItem {
    pub fn new(id: VideoId, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            id,
            media_path: None,
            metadata_path: None,
            thumb_path: None,
            subtitle_paths: Vec::new(),
            description_path: None,
            root_dir: root_dir.into(),
        }
    }

    /// Record a file under its category. Single-valued slots keep the last
    /// file recorded.
    pub fn record(&mut self, category: Category, path: PathBuf) {
        match category {
            Category::Media => {
                if let Some(parent) = path.parent() {
                    self.root_dir = parent.to_path_buf();
                }
                self.media_path = Some(path);
            }
            Category::Metadata => self.metadata_path = Some(path),
            Category::Thumb => self.thumb_path = Some(path),
            Category::Subtitle => {
                if !self.subtitle_paths.contains(&path) {
                    self.subtitle_paths.push(path);
                }
            }
            Category::Description => self.description_path = Some(path),
        }
    }

    pub fn has_media(&self) -> bool {
        self.media_path.is_some()
    }

    pub fn has_metadata(&self) -> bool {
        self.metadata_path.is_some()
    }

    /// Every path attached to this item.
    pub fn paths(&self) -> Vec<&Path> {
        let mut paths: Vec<&Path> = [
            &self.media_path,
            &self.metadata_path,
            &self.thumb_path,
            &self.description_path,
        ]
        .into_iter()
        .flatten()
        .map(PathBuf::as_path)
        .collect();
        paths.extend(self.subtitle_paths.iter().map(PathBuf::as_path));
        paths
    }

    /// Canonical output path `[<id>]<suffix>` in the item's directory.
    pub fn output_path(&self, suffix: &str) -> PathBuf {
        self.root_dir.join(self.id.file_name(suffix))
    }
}
