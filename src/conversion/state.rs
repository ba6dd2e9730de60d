//! Per-item conversion state machine.

use serde::Serialize;

/// Step an item is in while being converted.
///
/// Items move forward one step at a time. `Failed` is absorbing and can
/// only be entered from the steps that have a hard failure mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    Pending,
    Validating,
    ExtractingThumbnail,
    ExtractingSubtitles,
    Transcoding,
    RenamingMetadata,
    CleaningUp,
    Done,
    Failed,
}

impl ItemState {
    /// The step after this one on the success path.
    pub fn next(self) -> Option<ItemState> {
        use ItemState::*;
        match self {
            Pending => Some(Validating),
            Validating => Some(ExtractingThumbnail),
            ExtractingThumbnail => Some(ExtractingSubtitles),
            ExtractingSubtitles => Some(Transcoding),
            Transcoding => Some(RenamingMetadata),
            RenamingMetadata => Some(CleaningUp),
            CleaningUp => Some(Done),
            Done | Failed => None,
        }
    }

    /// Whether a failure in this step fails the item.
    pub fn can_fail(self) -> bool {
        matches!(
            self,
            ItemState::Validating | ItemState::Transcoding | ItemState::RenamingMetadata
        )
    }

    pub fn can_transition_to(self, to: ItemState) -> bool {
        if to == ItemState::Failed {
            return self.can_fail();
        }
        self.next() == Some(to)
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemState::Pending => "pending",
            ItemState::Validating => "validating",
            ItemState::ExtractingThumbnail => "extracting thumbnail",
            ItemState::ExtractingSubtitles => "extracting subtitles",
            ItemState::Transcoding => "transcoding",
            ItemState::RenamingMetadata => "renaming metadata",
            ItemState::CleaningUp => "cleaning up",
            ItemState::Done => "done",
            ItemState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ItemState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_path_reaches_done() {
        let mut state = ItemState::Pending;
        let mut steps = 0;
        while let Some(next) = state.next() {
            assert!(state.can_transition_to(next));
            state = next;
            steps += 1;
        }
        assert_eq!(state, ItemState::Done);
        assert_eq!(steps, 7);
    }

    #[test]
    fn test_failed_only_from_hard_steps() {
        assert!(ItemState::Validating.can_transition_to(ItemState::Failed));
        assert!(ItemState::Transcoding.can_transition_to(ItemState::Failed));
        assert!(ItemState::RenamingMetadata.can_transition_to(ItemState::Failed));
        assert!(!ItemState::ExtractingThumbnail.can_transition_to(ItemState::Failed));
        assert!(!ItemState::ExtractingSubtitles.can_transition_to(ItemState::Failed));
        assert!(!ItemState::CleaningUp.can_transition_to(ItemState::Failed));
        assert!(!ItemState::Done.can_transition_to(ItemState::Failed));
    }

    #[test]
    fn test_no_skipping_steps() {
        assert!(!ItemState::Validating.can_transition_to(ItemState::Transcoding));
        assert_eq!(ItemState::Failed.next(), None);
    }
}
