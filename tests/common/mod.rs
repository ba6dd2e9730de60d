//! Shared helpers for integration tests.
//!
//! [`MockToolkit`] stands in for ffmpeg/ffprobe. Probe reports are
//! registered per file name; every tool call is recorded, and the calls
//! that produce files write small real files so the pipeline can move
//! them around.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use tubeprep_av::{
    CodecType, Error, MediaToolkit, ProbeReport, Result, StreamDescriptor, SubtitleTarget,
};

/// One recorded tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Probe(PathBuf),
    Validate(PathBuf),
    DumpAttachment { media: PathBuf, position: usize },
    CopyCover(PathBuf),
    ExtractSubtitle { media: PathBuf, stream: u32 },
    Remux { input: PathBuf },
}

#[derive(Default)]
pub struct MockToolkit {
    reports: Mutex<HashMap<String, ProbeReport>>,
    calls: Mutex<Vec<Call>>,
    failing_probes: HashSet<String>,
    failing_remux: HashSet<String>,
    failing_subtitles: HashSet<u32>,
    invalid: HashSet<String>,
    missing_tool: bool,
    silent_cover_copy: bool,
}

fn key(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl MockToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the report returned when probing a file with this name.
    pub fn with_report(self, file_name: &str, streams: Vec<StreamDescriptor>) -> Self {
        let report = ProbeReport {
            file_path: PathBuf::from(file_name),
            container: Some("matroska,webm".to_string()),
            duration: Some(Duration::from_secs(60)),
            streams,
        };
        self.reports
            .lock()
            .unwrap()
            .insert(file_name.to_string(), report);
        self
    }

    pub fn failing_probe(mut self, file_name: &str) -> Self {
        self.failing_probes.insert(file_name.to_string());
        self
    }

    pub fn failing_remux(mut self, file_name: &str) -> Self {
        self.failing_remux.insert(file_name.to_string());
        self
    }

    pub fn failing_subtitle(mut self, stream: u32) -> Self {
        self.failing_subtitles.insert(stream);
        self
    }

    pub fn invalid_media(mut self, file_name: &str) -> Self {
        self.invalid.insert(file_name.to_string());
        self
    }

    /// Cover copies succeed without writing anything.
    pub fn silent_cover_copy(mut self) -> Self {
        self.silent_cover_copy = true;
        self
    }

    pub fn without_tools(mut self) -> Self {
        self.missing_tool = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl MediaToolkit for MockToolkit {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn preflight(&self) -> Result<()> {
        if self.missing_tool {
            Err(Error::tool_not_found("ffmpeg"))
        } else {
            Ok(())
        }
    }

    fn probe(&self, media: &Path) -> Result<ProbeReport> {
        self.record(Call::Probe(media.to_path_buf()));
        let name = key(media);
        if self.failing_probes.contains(&name) {
            return Err(Error::tool_failed("ffprobe", "Invalid data found"));
        }
        self.reports
            .lock()
            .unwrap()
            .get(&name)
            .cloned()
            .map(|mut report| {
                report.file_path = media.to_path_buf();
                report
            })
            .ok_or_else(|| Error::tool_failed("ffprobe", "no such file"))
    }

    fn validate(&self, media: &Path) -> Result<bool> {
        self.record(Call::Validate(media.to_path_buf()));
        Ok(!self.invalid.contains(&key(media)))
    }

    fn dump_attachment(&self, media: &Path, position: usize, output: &Path) -> Result<()> {
        self.record(Call::DumpAttachment {
            media: media.to_path_buf(),
            position,
        });
        write_image(output);
        Ok(())
    }

    fn copy_cover_stream(&self, media: &Path, output: &Path) -> Result<()> {
        self.record(Call::CopyCover(media.to_path_buf()));
        if !self.silent_cover_copy {
            write_image(output);
        }
        Ok(())
    }

    fn extract_subtitle(&self, media: &Path, target: &SubtitleTarget) -> Result<()> {
        self.record(Call::ExtractSubtitle {
            media: media.to_path_buf(),
            stream: target.stream_index,
        });
        if self.failing_subtitles.contains(&target.stream_index) {
            return Err(Error::tool_failed("ffmpeg", "Subtitle encoding failed"));
        }
        fs::write(&target.path, "WEBVTT\n\n").map_err(Error::from)
    }

    fn remux(
        &self,
        input: &Path,
        output: &Path,
        _duration: Option<Duration>,
        on_progress: &mut dyn FnMut(f32),
    ) -> Result<()> {
        self.record(Call::Remux {
            input: input.to_path_buf(),
        });
        if self.failing_remux.contains(&key(input)) {
            return Err(Error::tool_failed("ffmpeg", "Conversion failed!"));
        }

        for percent in [0.0, 25.0, 50.0, 100.0] {
            on_progress(percent);
        }
        fs::write(output, b"remuxed")?;

        // Same selection as `-map 0:V -map 0:a?`; these fixtures carry no
        // attached-picture streams.
        let mut reports = self.reports.lock().unwrap();
        if let Some(source) = reports.get(&key(input)).cloned() {
            let streams = source
                .streams
                .into_iter()
                .filter(|s| s.is_audio_or_video())
                .collect();
            reports.insert(
                key(output),
                ProbeReport {
                    streams,
                    container: Some("mov,mp4,m4a,3gp,3g2,mj2".to_string()),
                    ..source
                },
            );
        }
        Ok(())
    }
}

fn write_image(path: &Path) {
    image::RgbImage::from_pixel(8, 8, image::Rgb([200, 30, 30]))
        .save(path)
        .unwrap();
}

pub fn stream(
    index: u32,
    codec_type: CodecType,
    codec_name: &str,
    tags: &[(&str, &str)],
) -> StreamDescriptor {
    StreamDescriptor {
        index,
        codec_type,
        codec_name: codec_name.to_string(),
        tags: tags
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// Video, audio, and a `cover.png` attachment.
pub fn mkv_streams_with_cover() -> Vec<StreamDescriptor> {
    vec![
        stream(0, CodecType::Video, "h264", &[]),
        stream(1, CodecType::Audio, "aac", &[("language", "eng")]),
        stream(
            2,
            CodecType::Attachment,
            "png",
            &[("filename", "cover.png"), ("mimetype", "image/png")],
        ),
    ]
}

pub fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"data").unwrap();
    path
}

/// Names of the regular files directly inside `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
