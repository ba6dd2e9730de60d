//! FFprobe-based stream inspection.

use super::types::*;
use crate::command::ToolCommand;
use crate::tools::FFPROBE;
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    format: Option<FfprobeFormat>,
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    format_name: Option<String>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    index: u32,
    codec_type: String,
    codec_name: Option<String>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

/// Probe a media file with ffprobe and return its stream descriptors.
///
/// A non-zero exit is [`Error::ToolFailed`]; output that is not the
/// expected JSON document is [`Error::ParseError`].
pub fn probe_with_ffprobe(ffprobe: &Path, media: &Path) -> Result<ProbeReport> {
    if !media.exists() {
        return Err(Error::file_not_found(media));
    }

    let output = ToolCommand::new(ffprobe)
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .path_arg(media)
        .execute()?;

    parse_ffprobe_json(media, &output.stdout)
}

/// Check that the first video stream of a file can be read.
///
/// Returns `Ok(false)` when ffprobe rejects the file; errors are reserved
/// for the tool itself being unusable.
pub fn validate_with_ffprobe(ffprobe: &Path, media: &Path) -> Result<bool> {
    let output = ToolCommand::new(ffprobe)
        .args([
            "-v",
            "error",
            "-of",
            "json",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=codec_type",
        ])
        .path_arg(media)
        .output()?;

    if !output.status.success() {
        tracing::debug!(path = %media.display(), stderr = %output.stderr.trim(), "media failed validation");
    }

    Ok(output.status.success())
}

/// Parse the JSON document printed by `ffprobe -show_streams`.
pub fn parse_ffprobe_json(path: &Path, json: &str) -> Result<ProbeReport> {
    let output: FfprobeOutput = serde_json::from_str(json)
        .map_err(|e| Error::parse_error(FFPROBE, format!("{}: {}", path.display(), e)))?;

    let (container, duration) = match output.format {
        Some(format) => (
            format.format_name,
            format
                .duration
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|d| d.is_finite() && *d >= 0.0)
                .map(Duration::from_secs_f64),
        ),
        None => (None, None),
    };

    let streams = output
        .streams
        .into_iter()
        .map(|s| StreamDescriptor {
            index: s.index,
            codec_type: CodecType::from_ffprobe(&s.codec_type),
            codec_name: s.codec_name.unwrap_or_default(),
            tags: s.tags,
        })
        .collect();

    Ok(ProbeReport {
        file_path: path.to_path_buf(),
        container,
        duration,
        streams,
    })
}
