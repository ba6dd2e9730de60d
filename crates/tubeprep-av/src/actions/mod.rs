//! Media processing actions.
//!
//! This module provides the per-item operations of a conversion run:
//! - Locating or extracting a cover image and normalizing it to JPEG
//! - Extracting subtitle streams to sidecar files
//! - Stream-copy remuxing into the normalized container

mod remux;
mod subtitles;
mod thumbnail;

pub use remux::{remux_args, remux_into, RemuxProgress};
pub use subtitles::{extract_subtitles, plan_subtitles, subtitle_args, SubtitleOutcome, SubtitleTarget};
pub use thumbnail::{
    find_matroska_cover, find_mp4_cover, normalize_thumbnail, resolve_thumbnail, sibling_thumbnail,
    ContainerFamily,
};
