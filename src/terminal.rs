//! Terminal progress bars for `convert`.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tubeprep::conversion::{
    BatchSummary, ConversionResult, ConversionStatus, ItemState, ProgressObserver,
};
use tubeprep::scanner::MediaItem;
use tubeprep_common::VideoId;

/// Outer bar counts items, inner bar shows the current transcode.
pub struct BarObserver {
    multi: MultiProgress,
    items: ProgressBar,
    current: Option<ProgressBar>,
}

impl BarObserver {
    pub fn new() -> Self {
        let multi = MultiProgress::new();
        let items = multi.add(ProgressBar::new(0));
        items.set_style(style(
            "{prefix:>10} {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}] {msg}",
        ));
        items.set_prefix("Videos");
        Self {
            multi,
            items,
            current: None,
        }
    }

    fn clear_current(&mut self) {
        if let Some(bar) = self.current.take() {
            bar.finish_and_clear();
            self.multi.remove(&bar);
        }
    }
}

impl Default for BarObserver {
    fn default() -> Self {
        Self::new()
    }
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}

impl ProgressObserver for BarObserver {
    fn batch_started(&mut self, total: usize) {
        self.items.set_length(total as u64);
    }

    fn item_started(&mut self, _index: usize, item: &MediaItem) {
        self.clear_current();
        let bar = self.multi.add(ProgressBar::new(100));
        bar.set_style(style("{prefix:>10} {bar:40.green/white} {pos:>3}% {msg}"));
        bar.set_prefix(item.id.to_string());
        self.current = Some(bar);
    }

    fn state_changed(&mut self, _id: &VideoId, state: ItemState) {
        if let Some(bar) = &self.current {
            bar.set_message(state.label());
        }
    }

    fn transcode_progress(&mut self, _id: &VideoId, percent: f32) {
        if let Some(bar) = &self.current {
            bar.set_position(percent.round() as u64);
        }
    }

    fn item_finished(&mut self, result: &ConversionResult) {
        self.clear_current();
        let line = match (&result.status, &result.error) {
            (ConversionStatus::Failed, Some(e)) => format!("✗ {} failed: {}", result.id, e),
            (ConversionStatus::Skipped(reason), _) => format!("- {} skipped: {}", result.id, reason),
            _ => format!("✓ {}", result.id),
        };
        self.items.println(line);
        for warning in &result.warnings {
            self.items.println(format!("    warning: {}", warning));
        }
        self.items.inc(1);
    }

    fn batch_finished(&mut self, summary: &BatchSummary) {
        self.clear_current();
        self.items.finish_with_message(summary.to_string());
    }
}
