//! The [`MediaToolkit`] trait and its ffmpeg-backed implementation.

use std::path::Path;
use std::time::Duration;

use crate::actions::{remux_args, subtitle_args, RemuxProgress, SubtitleTarget};
use crate::command::ToolCommand;
use crate::probe::{probe_with_ffprobe, validate_with_ffprobe, ProbeReport};
use crate::tools::{ToolRegistry, FFMPEG, FFPROBE};
use crate::Result;

/// Every external-tool operation a conversion run performs.
///
/// Each call blocks until the underlying tool exits. Implementations must
/// be safe to share across threads (`Send + Sync`).
pub trait MediaToolkit: Send + Sync {
    /// Human-readable name identifying this implementation.
    fn name(&self) -> &'static str;

    /// Fail if a tool needed by this implementation is unavailable.
    fn preflight(&self) -> Result<()> {
        Ok(())
    }

    /// Read the stream layout of a container.
    fn probe(&self, media: &Path) -> Result<ProbeReport>;

    /// Whether the first video stream of a file can be read.
    fn validate(&self, media: &Path) -> Result<bool>;

    /// Write the `position`-th attachment stream of a Matroska file to `output`.
    fn dump_attachment(&self, media: &Path, position: usize, output: &Path) -> Result<()>;

    /// Stream-copy the attached-picture video stream of an MP4 file to `output`.
    fn copy_cover_stream(&self, media: &Path, output: &Path) -> Result<()>;

    /// Extract one subtitle stream to its sidecar path.
    fn extract_subtitle(&self, media: &Path, target: &SubtitleTarget) -> Result<()>;

    /// Stream-copy `input` into `output`, reporting percent complete.
    fn remux(
        &self,
        input: &Path,
        output: &Path,
        duration: Option<Duration>,
        on_progress: &mut dyn FnMut(f32),
    ) -> Result<()>;
}

/// [`MediaToolkit`] backed by the ffmpeg and ffprobe command-line tools.
#[derive(Debug, Clone)]
pub struct FfmpegToolkit {
    tools: ToolRegistry,
}

impl FfmpegToolkit {
    /// Create a toolkit using discovered tool locations.
    pub fn new(tools: ToolRegistry) -> Self {
        Self { tools }
    }

    /// Tool locations in use.
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    fn ffmpeg(&self) -> Result<ToolCommand> {
        Ok(ToolCommand::new(self.tools.require(FFMPEG)?))
    }
}

impl MediaToolkit for FfmpegToolkit {
    fn name(&self) -> &'static str {
        "ffmpeg"
    }

    fn preflight(&self) -> Result<()> {
        self.tools.preflight()
    }

    fn probe(&self, media: &Path) -> Result<ProbeReport> {
        probe_with_ffprobe(self.tools.require(FFPROBE)?, media)
    }

    fn validate(&self, media: &Path) -> Result<bool> {
        validate_with_ffprobe(self.tools.require(FFPROBE)?, media)
    }

    fn dump_attachment(&self, media: &Path, position: usize, output: &Path) -> Result<()> {
        // ffmpeg exits non-zero after a dump because no output file is
        // given; the caller checks that `output` was written instead.
        let result = self
            .ffmpeg()?
            .args(["-v", "quiet", "-y"])
            .arg(format!("-dump_attachment:t:{}", position))
            .path_arg(output)
            .arg("-i")
            .path_arg(media)
            .output()?;
        tracing::trace!(status = %result.status, "attachment dump finished");
        Ok(())
    }

    fn copy_cover_stream(&self, media: &Path, output: &Path) -> Result<()> {
        self.ffmpeg()?
            .args(["-v", "error", "-y", "-i"])
            .path_arg(media)
            .args(["-map", "0:v", "-map", "-0:V", "-c", "copy"])
            .path_arg(output)
            .execute()?;
        Ok(())
    }

    fn extract_subtitle(&self, media: &Path, target: &SubtitleTarget) -> Result<()> {
        self.ffmpeg()?
            .args(subtitle_args(media, target))
            .execute()?;
        Ok(())
    }

    fn remux(
        &self,
        input: &Path,
        output: &Path,
        duration: Option<Duration>,
        on_progress: &mut dyn FnMut(f32),
    ) -> Result<()> {
        let mut progress = RemuxProgress::new(duration);

        self.ffmpeg()?
            .args(remux_args(input, output))
            .execute_with_stderr_lines(|line| {
                if let Some(pct) = progress.feed(line) {
                    on_progress(pct);
                }
            })?;

        if progress.percent() < 100.0 {
            on_progress(100.0);
        }
        Ok(())
    }
}
