//! Completeness classification of grouped items.

use serde::Serialize;
use tubeprep_common::VideoId;

use super::MediaItem;

/// How far an item is from being convertible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Completeness {
    /// Has a media file.
    Usable,
    /// No media file and no thumbnail or subtitles.
    Missing,
    /// Thumbnail or subtitles without a media file.
    Orphan,
}

impl std::fmt::Display for Completeness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Completeness::Usable => write!(f, "usable"),
            Completeness::Missing => write!(f, "missing"),
            Completeness::Orphan => write!(f, "orphan"),
        }
    }
}

pub fn classify(item: &MediaItem) -> Completeness {
    if item.has_media() {
        Completeness::Usable
    } else if item.thumb_path.is_some() || !item.subtitle_paths.is_empty() {
        Completeness::Orphan
    } else {
        Completeness::Missing
    }
}

/// Grouped items split by [`Completeness`].
#[derive(Debug, Default)]
pub struct Partition {
    pub usable: Vec<MediaItem>,
    pub missing: Vec<MediaItem>,
    pub orphans: Vec<MediaItem>,
}

impl Partition {
    pub fn total(&self) -> usize {
        self.usable.len() + self.missing.len() + self.orphans.len()
    }
}

pub fn partition(items: Vec<MediaItem>) -> Partition {
    let mut out = Partition::default();
    for item in items {
        match classify(&item) {
            Completeness::Usable => out.usable.push(item),
            Completeness::Missing => out.missing.push(item),
            Completeness::Orphan => out.orphans.push(item),
        }
    }
    out
}

/// Reason an item is not ready for import into a media library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportProblem {
    pub id: VideoId,
    pub missing_media: bool,
    pub missing_metadata: bool,
    pub orphan: bool,
}

impl std::fmt::Display for ImportProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut reasons = Vec::new();
        if self.missing_media {
            reasons.push("no media");
        }
        if self.missing_metadata {
            reasons.push("no metadata");
        }
        if self.orphan {
            reasons.push("orphaned files");
        }
        write!(f, "{}: {}", self.id, reasons.join(", "))
    }
}

/// Items lacking a media file or a metadata sidecar.
pub fn import_problems(items: &[MediaItem]) -> Vec<ImportProblem> {
    items
        .iter()
        .filter(|item| !item.has_media() || !item.has_metadata())
        .map(|item| ImportProblem {
            id: item.id.clone(),
            missing_media: !item.has_media(),
            missing_metadata: !item.has_metadata(),
            orphan: classify(item) == Completeness::Orphan,
        })
        .collect()
}
