//! Batch conversion of grouped items into the normalized layout.
//!
//! For every usable item the [`ConversionOrchestrator`] pulls out a JPEG
//! thumbnail and WebVTT subtitles, stream-copies the media into the
//! normalized container, renames the metadata sidecar, and removes the
//! original. Outputs are named `[<id>].<ext>` next to the source media.

mod orchestrator;
mod progress;
mod result;
mod state;

pub use orchestrator::{ConversionOrchestrator, ConversionSettings};
pub use progress::{LogObserver, NoopObserver, ProgressObserver};
pub use result::{
    BatchReport, BatchSummary, ConversionError, ConversionResult, ConversionStatus, SkipReason,
};
pub use state::ItemState;
