//! # tubeprep-av
//!
//! Stream inspection and processing for archived video downloads.
//!
//! This crate provides functionality for:
//! - Discovering the ffmpeg/ffprobe executables ([`ToolRegistry`])
//! - Probing containers into [`StreamDescriptor`]s
//! - Extracting embedded covers (per [`ContainerFamily`]) and subtitles
//! - Stream-copy remuxing with progress reporting
//!
//! All tool access goes through the [`MediaToolkit`] trait so callers can
//! swap the ffmpeg-backed [`FfmpegToolkit`] for a test double.
//!
//! ## Example
//!
//! ```no_run
//! use tubeprep_av::{FfmpegToolkit, MediaToolkit, ToolPaths, ToolRegistry};
//!
//! let toolkit = FfmpegToolkit::new(ToolRegistry::discover(&ToolPaths::default()));
//! toolkit.preflight()?;
//! let report = toolkit.probe("/path/to/video.mkv".as_ref())?;
//! for stream in &report.streams {
//!     println!("{} {} {}", stream.index, stream.codec_type, stream.codec_name);
//! }
//! # Ok::<(), tubeprep_av::Error>(())
//! ```

pub mod actions;
mod command;
mod error;
pub mod probe;
pub mod toolkit;
pub mod tools;
pub mod workspace;

// Re-exports
pub use actions::{ContainerFamily, SubtitleTarget};
pub use command::{ToolCommand, ToolOutput};
pub use error::{Error, Result};
pub use probe::{CodecType, ProbeReport, StreamDescriptor};
pub use toolkit::{FfmpegToolkit, MediaToolkit};
pub use tools::{ToolInfo, ToolPaths, ToolRegistry};
pub use workspace::Workspace;
