use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use tubeprep_av::actions::{
    extract_subtitles, normalize_thumbnail, plan_subtitles, remux_into, resolve_thumbnail,
};
use tubeprep_av::{MediaToolkit, ProbeReport};
use tubeprep_common::VideoId;

use super::{
    BatchReport, ConversionError, ConversionResult, ConversionStatus, ItemState,
    ProgressObserver, SkipReason,
};
use crate::config::ConversionConfig;
use crate::scanner::MediaItem;

const THUMBNAIL_SUFFIX: &str = ".jpg";
const METADATA_SUFFIX: &str = ".info.json";

/// Options that shape one conversion run.
#[derive(Debug, Clone)]
pub struct ConversionSettings {
    /// Target container extension, without the dot.
    pub normalized_extension: String,
    pub delete_original: bool,
    pub dry_run: bool,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self::from(&ConversionConfig::default())
    }
}

impl From<&ConversionConfig> for ConversionSettings {
    fn from(config: &ConversionConfig) -> Self {
        Self {
            normalized_extension: config.normalized_extension.clone(),
            delete_original: config.delete_original,
            dry_run: false,
        }
    }
}

impl ConversionSettings {
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn output_suffix(&self) -> String {
        format!(".{}", self.normalized_extension)
    }

    fn is_normalized(&self, media: &Path) -> bool {
        media
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.normalized_extension))
    }
}

/// Drives every usable item through validation, extraction, transcoding,
/// metadata rename, and cleanup.
///
/// Items are processed one at a time. A failing item never stops the batch;
/// only a missing external tool does, and that is checked before the first
/// item is touched.
pub struct ConversionOrchestrator {
    settings: ConversionSettings,
    toolkit: Arc<dyn MediaToolkit>,
}

impl ConversionOrchestrator {
    pub fn new(settings: ConversionSettings, toolkit: Arc<dyn MediaToolkit>) -> Self {
        Self { settings, toolkit }
    }

    pub fn settings(&self) -> &ConversionSettings {
        &self.settings
    }

    /// Fail if a required external tool is unavailable.
    pub fn preflight(&self) -> Result<(), ConversionError> {
        self.toolkit
            .preflight()
            .map_err(ConversionError::ToolMissing)
    }

    /// Convert a batch of items.
    ///
    /// Returns `Err` only for [`ConversionError::ToolMissing`]; every
    /// per-item outcome is in the report.
    pub fn run(
        &self,
        items: Vec<MediaItem>,
        observer: &mut dyn ProgressObserver,
    ) -> Result<BatchReport, ConversionError> {
        self.preflight()?;

        info!(
            "Converting {} items with {} (dry run: {})",
            items.len(),
            self.toolkit.name(),
            self.settings.dry_run
        );
        observer.batch_started(items.len());

        let mut results = Vec::with_capacity(items.len());
        for (index, mut item) in items.into_iter().enumerate() {
            observer.item_started(index, &item);
            let result = self.process_item(&mut item, observer);
            observer.item_finished(&result);
            results.push(result);
        }

        let report = BatchReport::new(results);
        observer.batch_finished(&report.summary);
        Ok(report)
    }

    /// Convert a single item, updating its derived paths as steps complete.
    pub fn process_item(
        &self,
        item: &mut MediaItem,
        observer: &mut dyn ProgressObserver,
    ) -> ConversionResult {
        let mut run = ItemRun::new(item.id.clone());

        run.advance(ItemState::Validating, observer);
        let Some(media) = item.media_path.clone() else {
            return run.skip(SkipReason::MissingMedia, Some(ConversionError::MissingMedia));
        };
        if self.settings.is_normalized(&media) {
            debug!(video_id = %item.id, "Already normalized: {:?}", media);
            return run.skip(SkipReason::AlreadyNormalized, None);
        }
        if !media.is_file() {
            return run.fail(ConversionError::SourceMissing(media));
        }
        if !item.has_metadata() {
            return run.fail(ConversionError::MissingMetadata);
        }
        if self.settings.dry_run {
            run.outputs = self.planned_outputs(item);
            info!(video_id = %item.id, "[DRY RUN] Would convert {:?}", media);
            return run.skip(SkipReason::DryRun, None);
        }

        let report = match self.toolkit.probe(&media) {
            Ok(report) => Some(report),
            Err(e) => {
                run.warn(ConversionError::Probe(e));
                None
            }
        };

        run.advance(ItemState::ExtractingThumbnail, observer);
        self.extract_thumbnail(item, &media, report.as_ref(), &mut run);

        run.advance(ItemState::ExtractingSubtitles, observer);
        if let Some(report) = &report {
            self.extract_subtitles(item, &media, report, &mut run);
        }

        run.advance(ItemState::Transcoding, observer);
        let dest = item.output_path(&self.settings.output_suffix());
        let duration = report.as_ref().and_then(|r| r.duration);
        let id = item.id.clone();
        let transcoded = remux_into(
            self.toolkit.as_ref(),
            &media,
            &dest,
            duration,
            &mut |percent| observer.transcode_progress(&id, percent),
        );
        match transcoded {
            Ok(out) => run.outputs.push(out),
            Err(e) => return run.fail(ConversionError::Transcode(e)),
        }

        run.advance(ItemState::RenamingMetadata, observer);
        match rename_metadata(item) {
            Ok(path) => run.outputs.push(path),
            Err(e) => return run.fail(e),
        }

        run.advance(ItemState::CleaningUp, observer);
        if self.settings.delete_original && media != dest {
            match std::fs::remove_file(&media) {
                Ok(()) => info!(video_id = %item.id, "Removed original {:?}", media),
                Err(e) => {
                    warn!(video_id = %item.id, "Could not remove original {:?}: {}", media, e);
                    run.warnings
                        .push(format!("could not remove original {:?}: {}", media, e));
                }
            }
        }
        item.media_path = Some(dest);

        run.advance(ItemState::Done, observer);
        run.finish(ConversionStatus::Success, None)
    }

    fn extract_thumbnail(
        &self,
        item: &mut MediaItem,
        media: &Path,
        report: Option<&ProbeReport>,
        run: &mut ItemRun,
    ) {
        let known = item.thumb_path.as_deref().filter(|p| p.is_file());
        let source = match resolve_thumbnail(self.toolkit.as_ref(), known, media, report) {
            Ok(Some(source)) => source,
            Ok(None) => {
                debug!(video_id = %item.id, "No thumbnail available");
                return;
            }
            Err(e) => return run.warn(ConversionError::Extraction(e)),
        };

        let dest = item.output_path(THUMBNAIL_SUFFIX);
        match normalize_thumbnail(&source, &dest) {
            Ok(path) => {
                debug!(video_id = %item.id, "Thumbnail written to {:?}", path);
                item.thumb_path = Some(path.clone());
                run.outputs.push(path);
            }
            Err(e) => run.warn(ConversionError::Extraction(e)),
        }
    }

    fn extract_subtitles(
        &self,
        item: &mut MediaItem,
        media: &Path,
        report: &ProbeReport,
        run: &mut ItemRun,
    ) {
        let targets = plan_subtitles(report, &item.id, &item.root_dir);
        if targets.is_empty() {
            return;
        }

        let outcome = extract_subtitles(self.toolkit.as_ref(), media, &targets);
        for path in outcome.extracted {
            if !item.subtitle_paths.contains(&path) {
                item.subtitle_paths.push(path.clone());
            }
            run.outputs.push(path);
        }
        for (_, e) in outcome.failed {
            run.warn(ConversionError::Extraction(e));
        }
    }

    fn planned_outputs(&self, item: &MediaItem) -> Vec<PathBuf> {
        vec![
            item.output_path(&self.settings.output_suffix()),
            item.output_path(THUMBNAIL_SUFFIX),
            item.output_path(METADATA_SUFFIX),
        ]
    }
}

fn rename_metadata(item: &mut MediaItem) -> Result<PathBuf, ConversionError> {
    let src = item
        .metadata_path
        .clone()
        .ok_or(ConversionError::MissingMetadata)?;
    let dest = item.output_path(METADATA_SUFFIX);

    if src != dest {
        std::fs::rename(&src, &dest).map_err(|source| ConversionError::Rename {
            from: src.clone(),
            to: dest.clone(),
            source,
        })?;
        debug!(video_id = %item.id, "Renamed {:?} -> {:?}", src, dest);
    }

    item.metadata_path = Some(dest.clone());
    Ok(dest)
}

/// Bookkeeping for one item while it moves through the state machine.
struct ItemRun {
    id: VideoId,
    state: ItemState,
    outputs: Vec<PathBuf>,
    warnings: Vec<String>,
}

impl ItemRun {
    fn new(id: VideoId) -> Self {
        Self {
            id,
            state: ItemState::Pending,
            outputs: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn advance(&mut self, to: ItemState, observer: &mut dyn ProgressObserver) {
        debug_assert!(
            self.state.can_transition_to(to),
            "invalid transition {} -> {}",
            self.state,
            to
        );
        self.state = to;
        observer.state_changed(&self.id, to);
    }

    fn warn(&mut self, error: ConversionError) {
        warn!(video_id = %self.id, "{} (continuing)", error);
        self.warnings.push(error.to_string());
    }

    fn skip(self, reason: SkipReason, error: Option<ConversionError>) -> ConversionResult {
        info!(video_id = %self.id, "Skipped: {}", reason);
        self.finish(ConversionStatus::Skipped(reason), error)
    }

    fn fail(self, error: ConversionError) -> ConversionResult {
        debug_assert!(self.state.can_fail(), "{} cannot fail", self.state);
        warn!(video_id = %self.id, "Failed during {}: {}", self.state, error);
        self.finish(ConversionStatus::Failed, Some(error))
    }

    fn finish(self, status: ConversionStatus, error: Option<ConversionError>) -> ConversionResult {
        ConversionResult {
            id: self.id,
            status,
            stage: self.state,
            error,
            outputs: self.outputs,
            warnings: self.warnings,
        }
    }
}
