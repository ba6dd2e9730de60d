//! Readability check of every media file in a scan.

use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};
use tubeprep_av::MediaToolkit;
use tubeprep_common::VideoId;

use super::MediaItem;

/// Outcome of [`validate_media`].
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    /// Media files that passed.
    pub valid: Vec<PathBuf>,
    /// Media files whose first video stream could not be read.
    pub invalid: Vec<PathBuf>,
    /// Items with no media file at all.
    pub no_media: Vec<VideoId>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.invalid.is_empty() && self.no_media.is_empty()
    }
}

/// Check that the first video stream of every item's media can be read.
///
/// Tool errors for a single file count as invalid; they never abort the
/// whole check.
pub fn validate_media(toolkit: &dyn MediaToolkit, items: &[MediaItem]) -> ValidationReport {
    let mut report = ValidationReport::default();

    for item in items {
        let Some(media) = &item.media_path else {
            report.no_media.push(item.id.clone());
            continue;
        };

        match toolkit.validate(media) {
            Ok(true) => {
                debug!(video_id = %item.id, "Media is valid: {:?}", media);
                report.valid.push(media.clone());
            }
            Ok(false) => {
                warn!(video_id = %item.id, "Invalid media file: {:?}", media);
                report.invalid.push(media.clone());
            }
            Err(e) => {
                warn!(video_id = %item.id, "Failed to validate {:?}: {}", media, e);
                report.invalid.push(media.clone());
            }
        }
    }

    report
}
