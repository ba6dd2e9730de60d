//! Progress reporting for conversion batches.
//!
//! The orchestrator calls a [`ProgressObserver`] from its own thread as
//! items advance. Rendering is up to the caller; the CLI draws terminal
//! bars, tests usually record events.

use tubeprep_common::VideoId;

use super::{BatchSummary, ConversionResult, ItemState};
use crate::scanner::MediaItem;

/// Receives batch, item, and transcode progress.
///
/// Every method has an empty default so observers implement only what
/// they render.
pub trait ProgressObserver {
    fn batch_started(&mut self, _total: usize) {}

    fn item_started(&mut self, _index: usize, _item: &MediaItem) {}

    fn state_changed(&mut self, _id: &VideoId, _state: ItemState) {}

    /// Transcode progress in percent, never decreasing for one item.
    fn transcode_progress(&mut self, _id: &VideoId, _percent: f32) {}

    fn item_finished(&mut self, _result: &ConversionResult) {}

    fn batch_finished(&mut self, _summary: &BatchSummary) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}

/// Observer that reports through `tracing`.
#[derive(Debug, Default)]
pub struct LogObserver {
    last_logged: Option<u32>,
}

impl ProgressObserver for LogObserver {
    fn batch_started(&mut self, total: usize) {
        tracing::info!("Converting {} items", total);
    }

    fn item_started(&mut self, index: usize, item: &MediaItem) {
        self.last_logged = None;
        tracing::info!(video_id = %item.id, "[{}] Starting", index + 1);
    }

    fn state_changed(&mut self, id: &VideoId, state: ItemState) {
        tracing::debug!(video_id = %id, "{}", state);
    }

    fn transcode_progress(&mut self, id: &VideoId, percent: f32) {
        // One line per 10%.
        let bucket = (percent / 10.0) as u32;
        if self.last_logged != Some(bucket) {
            self.last_logged = Some(bucket);
            tracing::info!(video_id = %id, "[{:.0}%] transcoding", percent);
        }
    }

    fn item_finished(&mut self, result: &ConversionResult) {
        match &result.error {
            Some(e) if result.is_failed() => {
                tracing::error!(video_id = %result.id, "Failed during {}: {}", result.stage, e)
            }
            _ => tracing::info!(video_id = %result.id, "Finished: {:?}", result.status),
        }
    }

    fn batch_finished(&mut self, summary: &BatchSummary) {
        tracing::info!("Batch complete: {}", summary);
    }
}
