//! Stream descriptor types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Kind of stream inside a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodecType {
    Video,
    Audio,
    Subtitle,
    Attachment,
    Data,
    /// Any codec type ffprobe reports that is not listed above.
    Other(String),
}

impl CodecType {
    /// Map the `codec_type` string reported by ffprobe.
    pub fn from_ffprobe(s: &str) -> Self {
        match s {
            "video" => CodecType::Video,
            "audio" => CodecType::Audio,
            "subtitle" => CodecType::Subtitle,
            "attachment" => CodecType::Attachment,
            "data" => CodecType::Data,
            other => CodecType::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for CodecType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecType::Video => write!(f, "video"),
            CodecType::Audio => write!(f, "audio"),
            CodecType::Subtitle => write!(f, "subtitle"),
            CodecType::Attachment => write!(f, "attachment"),
            CodecType::Data => write!(f, "data"),
            CodecType::Other(s) => write!(f, "{}", s),
        }
    }
}

/// One stream inside a probed container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    /// Position within the container.
    pub index: u32,
    /// Stream kind.
    pub codec_type: CodecType,
    /// Codec name (e.g. "h264", "opus", "webvtt", "png"). Empty when unknown.
    pub codec_name: String,
    /// Stream tags (language, filename, mimetype, ...).
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl StreamDescriptor {
    /// Look up a tag, ignoring key case.
    ///
    /// Matroska tags come back upper-case from some muxers (`LANGUAGE`).
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .or_else(|| {
                self.tags
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(key))
                    .map(|(_, v)| v)
            })
            .map(String::as_str)
    }

    /// Language tag, if any.
    pub fn language(&self) -> Option<&str> {
        self.tag("language")
    }

    /// Whether this stream carries audio or video payload.
    pub fn is_audio_or_video(&self) -> bool {
        matches!(self.codec_type, CodecType::Video | CodecType::Audio)
    }
}

/// Result of probing one container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeReport {
    /// Path to the probed file.
    pub file_path: PathBuf,
    /// Container format name reported by the prober (e.g. "matroska,webm").
    pub container: Option<String>,
    /// Duration of the media.
    pub duration: Option<Duration>,
    /// Streams in container order.
    pub streams: Vec<StreamDescriptor>,
}

impl ProbeReport {
    /// Streams of the given kind, in container order.
    pub fn streams_of(&self, kind: CodecType) -> impl Iterator<Item = &StreamDescriptor> {
        self.streams.iter().filter(move |s| s.codec_type == kind)
    }

    /// Subtitle streams.
    pub fn subtitles(&self) -> impl Iterator<Item = &StreamDescriptor> {
        self.streams_of(CodecType::Subtitle)
    }

    /// Attachment streams.
    pub fn attachments(&self) -> impl Iterator<Item = &StreamDescriptor> {
        self.streams_of(CodecType::Attachment)
    }

    /// `(codec_type, codec_name)` of every audio/video stream, in order.
    pub fn av_signature(&self) -> Vec<(CodecType, String)> {
        self.streams
            .iter()
            .filter(|s| s.is_audio_or_video())
            .map(|s| (s.codec_type.clone(), s.codec_name.clone()))
            .collect()
    }
}
