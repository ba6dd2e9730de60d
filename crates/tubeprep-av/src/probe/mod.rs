//! Media stream inspection.
//!
//! Streams are read by running ffprobe and parsing its JSON document into
//! [`StreamDescriptor`]s.

mod ffprobe;
mod types;

pub use ffprobe::{parse_ffprobe_json, probe_with_ffprobe, validate_with_ffprobe};
pub use types::*;
