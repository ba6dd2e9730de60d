//! Tubeprep-Common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across tubeprep:
//!
//! - **Video IDs**: The 11-character identifier token embedded in filenames
//! - **Categories**: The category-extension table used to group sidecar files
//! - **Languages**: ISO 639-2 to ISO 639-1 language code conversion
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use tubeprep_common::{Category, CategoryTable, VideoId};
//!
//! let id = VideoId::from_filename("Video [abcdefghij1].mkv").unwrap();
//! assert_eq!(id.as_str(), "abcdefghij1");
//!
//! let table = CategoryTable::default();
//! assert_eq!(table.categorize("Video [abcdefghij1].info.json"), Some(Category::Metadata));
//! ```

pub mod error;
pub mod ids;
pub mod language;
pub mod paths;

pub use error::{Error, Result};
pub use ids::VideoId;
pub use language::{long_to_short, subtitle_language};
pub use paths::{Category, CategoryTable};
