//! Subtitle stream extraction to sidecar WebVTT files.

use crate::probe::{ProbeReport, StreamDescriptor};
use crate::toolkit::MediaToolkit;
use crate::Error;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tubeprep_common::{subtitle_language, VideoId};

/// One subtitle stream and the sidecar it will be written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleTarget {
    /// Stream index within the container.
    pub stream_index: u32,
    /// Codec of the source stream.
    pub codec_name: String,
    /// Short language code used in the filename.
    pub language: String,
    /// Output path, `[<id>].<lang>.vtt`.
    pub path: PathBuf,
}

/// Outcome of extracting every planned subtitle.
#[derive(Debug, Default)]
pub struct SubtitleOutcome {
    /// Sidecars written.
    pub extracted: Vec<PathBuf>,
    /// Streams that could not be extracted, with the reason.
    pub failed: Vec<(u32, Error)>,
}

/// Plan one sidecar per subtitle stream.
///
/// Two streams with the same language would map to the same filename; the
/// first one in container order keeps it and the rest are skipped.
pub fn plan_subtitles(report: &ProbeReport, id: &VideoId, dir: &Path) -> Vec<SubtitleTarget> {
    let mut seen = HashSet::new();

    report
        .subtitles()
        .filter_map(|stream: &StreamDescriptor| {
            let language = subtitle_language(stream.language());
            if !seen.insert(language.clone()) {
                tracing::warn!(
                    video_id = %id,
                    stream = stream.index,
                    language = %language,
                    "skipping subtitle stream with duplicate language"
                );
                return None;
            }
            let path = dir.join(id.file_name(&format!(".{}.vtt", language)));
            Some(SubtitleTarget {
                stream_index: stream.index,
                codec_name: stream.codec_name.clone(),
                language,
                path,
            })
        })
        .collect()
}

/// Extract every planned subtitle, isolating per-stream failures.
pub fn extract_subtitles(
    toolkit: &dyn MediaToolkit,
    media: &Path,
    targets: &[SubtitleTarget],
) -> SubtitleOutcome {
    let mut outcome = SubtitleOutcome::default();

    for target in targets {
        match toolkit.extract_subtitle(media, target) {
            Ok(()) => {
                tracing::debug!("Extracted subtitle stream {} to {:?}", target.stream_index, target.path);
                outcome.extracted.push(target.path.clone());
            }
            Err(e) => {
                tracing::warn!(
                    stream = target.stream_index,
                    "failed to extract subtitle from {:?}: {}",
                    media,
                    e
                );
                outcome.failed.push((target.stream_index, e));
            }
        }
    }

    outcome
}

/// Arguments for extracting one subtitle stream to WebVTT.
///
/// WebVTT sources are stream-copied; other text formats are converted by
/// the webvtt encoder, since the sidecar must be WebVTT.
pub fn subtitle_args(media: &Path, target: &SubtitleTarget) -> Vec<String> {
    let codec = if target.codec_name == "webvtt" { "copy" } else { "webvtt" };
    vec![
        "-nostats".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-y".to_string(),
        "-i".to_string(),
        media.to_string_lossy().into_owned(),
        "-map".to_string(),
        format!("0:{}", target.stream_index),
        "-c:s".to_string(),
        codec.to_string(),
        target.path.to_string_lossy().into_owned(),
    ]
}
