//! Stream-copy remuxing into the normalized container.

use crate::toolkit::MediaToolkit;
use crate::{Result, Workspace};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Arguments for a stream-copy remux that reports progress on stderr.
pub fn remux_args(input: &Path, output: &Path) -> Vec<String> {
    let mut args: Vec<String> = ["-y", "-threads", "0", "-progress", "pipe:2", "-nostats"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    args.extend(["-loglevel".to_string(), "error".to_string()]);
    args.push("-i".to_string());
    args.push(input.to_string_lossy().into_owned());
    // Every video stream except attached covers, and every audio stream.
    // Subtitles and attachments are extracted separately.
    for map in ["0:V", "0:a?"] {
        args.extend(["-map".to_string(), map.to_string()]);
    }
    args.extend(["-codec".to_string(), "copy".to_string()]);
    args.push(output.to_string_lossy().into_owned());
    args
}

/// Turns `ffmpeg -progress` key/value lines into a percentage.
///
/// The reported value never decreases and stays within `[0, 100]`. Without
/// a known duration only the final `progress=end` moves it (to 100).
#[derive(Debug, Clone)]
pub struct RemuxProgress {
    duration_us: Option<f64>,
    percent: f32,
}

impl RemuxProgress {
    /// Create a tracker for media of the given duration.
    pub fn new(duration: Option<Duration>) -> Self {
        Self {
            duration_us: duration
                .map(|d| d.as_secs_f64() * 1_000_000.0)
                .filter(|us| *us > 0.0),
            percent: 0.0,
        }
    }

    /// Last reported percentage.
    pub fn percent(&self) -> f32 {
        self.percent
    }

    /// Feed one stderr line; returns the new percentage if it advanced.
    pub fn feed(&mut self, line: &str) -> Option<f32> {
        let line = line.trim();

        let candidate = if let Some(val) = line.strip_prefix("out_time_us=") {
            let out_us = val.parse::<f64>().ok()?;
            let total = self.duration_us?;
            ((out_us / total) * 100.0).clamp(0.0, 100.0) as f32
        } else if line == "progress=end" {
            100.0
        } else {
            return None;
        };

        if candidate > self.percent {
            self.percent = candidate;
            Some(candidate)
        } else {
            None
        }
    }
}

/// Remux `input` into `dest` with stream copy.
///
/// The output is written to a scratch directory next to `dest` and only
/// moved into place once the tool succeeded, so a failed run leaves neither
/// a partial output nor any change to `input`.
pub fn remux_into(
    toolkit: &dyn MediaToolkit,
    input: &Path,
    dest: &Path,
    duration: Option<Duration>,
    on_progress: &mut dyn FnMut(f32),
) -> Result<PathBuf> {
    let dir = dest.parent().unwrap_or_else(|| Path::new("."));
    let file_name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| crate::Error::InvalidInput(format!("bad output path: {:?}", dest)))?;

    let workspace = Workspace::new_in(dir)?;
    let scratch = workspace.temp_file(&file_name);

    tracing::info!("Remuxing {:?} -> {:?}", input, dest);
    toolkit.remux(input, &scratch, duration, on_progress)?;

    let out = workspace.finalize(&scratch, dest)?;
    tracing::debug!("Remux complete: {:?}", out);
    Ok(out)
}
