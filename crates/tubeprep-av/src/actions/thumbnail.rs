//! Cover image discovery, extraction, and JPEG normalization.

use crate::probe::{CodecType, ProbeReport};
use crate::toolkit::MediaToolkit;
use crate::{Error, Result};
use image::ImageFormat;
use std::path::{Path, PathBuf};

/// Sibling image suffixes accepted as an existing thumbnail, in order.
const SIBLING_EXTENSIONS: &[&str] = &["jpg", "png"];

/// Container families that differ in how a cover image is embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFamily {
    /// Cover stored as an attachment stream tagged with `filename`/`mimetype`.
    Matroska,
    /// Cover stored as an attached-picture video stream.
    Mp4,
}

impl ContainerFamily {
    /// Family of a media path, judged by extension.
    pub fn of(media: &Path) -> Option<Self> {
        let ext = media.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "mkv" => Some(ContainerFamily::Matroska),
            "mp4" | "m4v" | "mov" => Some(ContainerFamily::Mp4),
            _ => None,
        }
    }

    /// Pull the embedded cover out of `media` into a sibling file.
    ///
    /// Returns `Ok(None)` when the container has no cover.
    pub fn extract_embedded_cover(
        &self,
        toolkit: &dyn MediaToolkit,
        media: &Path,
        report: &ProbeReport,
    ) -> Result<Option<PathBuf>> {
        match self {
            ContainerFamily::Matroska => {
                let Some((position, ext)) = find_matroska_cover(report) else {
                    return Ok(None);
                };
                let out = media.with_extension(&ext);
                tracing::debug!("Dumping attachment {} of {:?} to {:?}", position, media, out);
                toolkit.dump_attachment(media, position, &out)?;
                ensure_written(&out)?;
                Ok(Some(out))
            }
            ContainerFamily::Mp4 => {
                let Some(ext) = find_mp4_cover(report) else {
                    return Ok(None);
                };
                let out = media.with_extension(ext);
                tracing::debug!("Copying cover stream of {:?} to {:?}", media, out);
                toolkit.copy_cover_stream(media, &out)?;
                ensure_written(&out)?;
                Ok(Some(out))
            }
        }
    }
}

fn ensure_written(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::MissingOutput {
            path: path.to_path_buf(),
        })
    }
}

/// Locate the Matroska cover attachment.
///
/// Returns its position among the attachment streams (what
/// `-dump_attachment:t:<n>` expects) and the extension of its original
/// filename.
pub fn find_matroska_cover(report: &ProbeReport) -> Option<(usize, String)> {
    report
        .attachments()
        .enumerate()
        .find(|(_, s)| {
            s.tag("mimetype").is_some()
                && s.tag("filename").is_some_and(|f| f.starts_with("cover"))
        })
        .map(|(position, s)| {
            let ext = s
                .tag("filename")
                .and_then(|f| Path::new(f).extension())
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase())
                .or_else(|| s.tag("mimetype").and_then(mimetype_extension).map(String::from))
                .unwrap_or_else(|| "jpg".to_string());
            (position, ext)
        })
}

fn mimetype_extension(mimetype: &str) -> Option<&'static str> {
    match mimetype {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Locate an attached-picture video stream and return the matching extension.
pub fn find_mp4_cover(report: &ProbeReport) -> Option<&'static str> {
    report
        .streams_of(CodecType::Video)
        .find_map(|s| match s.codec_name.as_str() {
            "png" => Some("png"),
            "jpg" | "mjpeg" => Some("jpg"),
            _ => None,
        })
}

/// Image next to the media file sharing its base name, if one exists.
pub fn sibling_thumbnail(media: &Path) -> Option<PathBuf> {
    SIBLING_EXTENSIONS
        .iter()
        .map(|ext| media.with_extension(ext))
        .find(|p| p.is_file())
}

/// Find a thumbnail for an item, extracting the embedded cover if needed.
///
/// Precedence: an already-known thumbnail, then a sibling image, then the
/// embedded cover (only when a probe report is available). `Ok(None)`
/// means the item simply has no thumbnail.
pub fn resolve_thumbnail(
    toolkit: &dyn MediaToolkit,
    known: Option<&Path>,
    media: &Path,
    report: Option<&ProbeReport>,
) -> Result<Option<PathBuf>> {
    if let Some(path) = known {
        return Ok(Some(path.to_path_buf()));
    }

    if let Some(path) = sibling_thumbnail(media) {
        tracing::debug!("Using sibling thumbnail {:?}", path);
        return Ok(Some(path));
    }

    match (ContainerFamily::of(media), report) {
        (Some(family), Some(report)) => family.extract_embedded_cover(toolkit, media, report),
        _ => Ok(None),
    }
}

/// Convert a thumbnail to JPEG at `dest`, removing the source.
///
/// JPEG sources are renamed; other formats are decoded and re-encoded as
/// RGB JPEG.
pub fn normalize_thumbnail(src: &Path, dest: &Path) -> Result<PathBuf> {
    if src == dest {
        return Ok(dest.to_path_buf());
    }

    let is_jpeg = src
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"));

    if is_jpeg {
        std::fs::rename(src, dest)?;
    } else {
        let img = image::open(src)?;
        img.to_rgb8().save_with_format(dest, ImageFormat::Jpeg)?;
        std::fs::remove_file(src)?;
    }

    Ok(dest.to_path_buf())
}
