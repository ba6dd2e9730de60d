//! The video identifier carried in every filename of an archived video.
//!
//! Files belonging to the same video share an 11-character token drawn from
//! `[A-Za-z0-9_-]`, enclosed in square brackets somewhere in the file stem
//! (e.g. `Video [abcdefghij1].mkv`).

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Length of a video identifier.
pub const VIDEO_ID_LEN: usize = 11;

static BRACKETED_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([A-Za-z0-9_-]{11})\]").expect("valid id pattern"));

/// Identifier for one logical video across all its associated files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Parse a bare identifier (without brackets).
    pub fn parse(s: &str) -> Result<Self> {
        let valid = s.len() == VIDEO_ID_LEN
            && s
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(Error::InvalidVideoId(s.to_string()))
        }
    }

    /// Extract the first bracketed identifier from a filename.
    ///
    /// Only the last extension is stripped before matching, so
    /// `Video [abcdefghij1].info.json` still yields `abcdefghij1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tubeprep_common::VideoId;
    ///
    /// let id = VideoId::from_filename("Show [abcdefghij1].mkv").unwrap();
    /// assert_eq!(id.as_str(), "abcdefghij1");
    /// assert!(VideoId::from_filename("Show [tooshort].mkv").is_none());
    /// ```
    pub fn from_filename(file_name: &str) -> Option<Self> {
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);

        BRACKETED_ID
            .captures(stem)
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build a normalized filename of the form `[<id>]<suffix>`.
    ///
    /// ```
    /// use tubeprep_common::VideoId;
    ///
    /// let id = VideoId::parse("abcdefghij1").unwrap();
    /// assert_eq!(id.file_name(".en.vtt"), "[abcdefghij1].en.vtt");
    /// ```
    pub fn file_name(&self, suffix: &str) -> String {
        format!("[{}]{}", self.0, suffix)
    }
}

impl TryFrom<String> for VideoId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

impl std::str::FromStr for VideoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
