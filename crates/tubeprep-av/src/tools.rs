//! External tool detection and management.
//!
//! The [`ToolRegistry`] discovers the locations of the ffmpeg and ffprobe
//! executables once per run and hands them to the rest of the crate.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Transcoder binary name.
pub const FFMPEG: &str = "ffmpeg";
/// Stream probe binary name.
pub const FFPROBE: &str = "ffprobe";

/// Tools every conversion run needs.
pub const REQUIRED_TOOLS: &[&str] = &[FFMPEG, FFPROBE];

/// Optional overrides for tool locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolPaths {
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    #[serde(default)]
    pub ffprobe_path: Option<PathBuf>,
}

impl ToolPaths {
    fn configured(&self, name: &str) -> Option<&Path> {
        match name {
            FFMPEG => self.ffmpeg_path.as_deref(),
            FFPROBE => self.ffprobe_path.as_deref(),
            _ => None,
        }
    }
}

/// Availability information for a tool, returned by [`ToolRegistry::check_all`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name.
    pub name: String,
    /// Whether the tool was found.
    pub available: bool,
    /// Version string (first line of `-version` output), if available.
    pub version: Option<String>,
    /// Resolved path to the executable.
    pub path: Option<PathBuf>,
}

/// Registry holding discovered tool locations.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, PathBuf>,
}

impl ToolRegistry {
    /// Discover tools using configured overrides, falling back to `PATH`.
    ///
    /// A configured path is used only if it exists. Tools that cannot be
    /// found are omitted; [`ToolRegistry::preflight`] reports them.
    pub fn discover(paths: &ToolPaths) -> Self {
        let mut tools = HashMap::new();

        for &name in REQUIRED_TOOLS {
            let resolved = match paths.configured(name) {
                Some(p) if p.exists() => Some(p.to_path_buf()),
                Some(p) => {
                    tracing::warn!(tool = name, path = %p.display(), "configured tool path does not exist, searching PATH");
                    which::which(name).ok()
                }
                None => which::which(name).ok(),
            };

            if let Some(path) = resolved {
                tracing::debug!(tool = name, path = %path.display(), "resolved tool");
                tools.insert(name.to_string(), path);
            }
        }

        Self { tools }
    }

    /// Build a registry from explicit locations without touching `PATH`.
    pub fn with_paths(entries: impl IntoIterator<Item = (&'static str, PathBuf)>) -> Self {
        Self {
            tools: entries
                .into_iter()
                .map(|(name, path)| (name.to_string(), path))
                .collect(),
        }
    }

    /// Path to the given tool, or [`Error::ToolNotFound`].
    pub fn require(&self, name: &str) -> Result<&Path> {
        self.tools
            .get(name)
            .map(PathBuf::as_path)
            .ok_or_else(|| Error::tool_not_found(name))
    }

    /// Fail with the first missing required tool.
    pub fn preflight(&self) -> Result<()> {
        for &name in REQUIRED_TOOLS {
            self.require(name)?;
        }
        Ok(())
    }

    /// Check all required tools and return availability information.
    pub fn check_all(&self) -> Vec<ToolInfo> {
        REQUIRED_TOOLS
            .iter()
            .map(|&name| match self.tools.get(name) {
                Some(path) => ToolInfo {
                    name: name.to_string(),
                    available: true,
                    version: detect_version(path),
                    path: Some(path.clone()),
                },
                None => ToolInfo {
                    name: name.to_string(),
                    available: false,
                    version: None,
                    path: None,
                },
            })
            .collect()
    }
}

/// Run `<tool> -version` and return the first line of stdout.
fn detect_version(path: &Path) -> Option<String> {
    let output = Command::new(path).arg("-version").output().ok()?;

    if !output.status.success() {
        return None;
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_missing_tool() {
        let registry = ToolRegistry::default();
        let err = registry.require(FFMPEG).unwrap_err();
        assert!(err.is_tool_missing());
    }

    #[test]
    fn test_preflight_reports_first_missing() {
        let registry = ToolRegistry::with_paths([(FFMPEG, PathBuf::from("/usr/bin/ffmpeg"))]);
        match registry.preflight() {
            Err(Error::ToolNotFound { tool }) => assert_eq!(tool, FFPROBE),
            other => panic!("expected missing ffprobe, got {other:?}"),
        }
    }

    #[test]
    fn test_preflight_ok_with_both() {
        let registry = ToolRegistry::with_paths([
            (FFMPEG, PathBuf::from("/usr/bin/ffmpeg")),
            (FFPROBE, PathBuf::from("/usr/bin/ffprobe")),
        ]);
        assert!(registry.preflight().is_ok());
        assert_eq!(
            registry.require(FFPROBE).unwrap(),
            Path::new("/usr/bin/ffprobe")
        );
    }

    #[test]
    fn test_check_all_unavailable() {
        let registry = ToolRegistry::default();
        let infos = registry.check_all();
        assert_eq!(infos.len(), 2);
        assert!(infos.iter().all(|i| !i.available && i.path.is_none()));
    }
}
