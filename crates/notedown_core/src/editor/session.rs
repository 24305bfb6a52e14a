//! Editing session: buffer/selection owner and action dispatch surface.
//!
//! # Responsibility
//! - Own the live buffer and selection for exactly one note being edited.
//! - Hold the single-slot pending formatting action the toolbar writes.
//! - Route proposed text changes through the interceptor and commit the
//!   verdict.
//!
//! # Invariants
//! - One session is the only writer of its buffer; there is no concurrent
//!   mutation by construction.
//! - Adoption order is fixed: buffer first, then selection, so the stored
//!   selection is always valid against the stored buffer.
//! - At most one formatting action is pending between two observation
//!   points; a second write overwrites the first (last write wins).

use crate::editor::boundary::{char_len, clamp_range, splice, Selection};
use crate::editor::format::{apply_formatting, EditOutcome, FormattingAction};
use crate::editor::intercept::{propose_text_change, Decision};
use crate::model::note::Note;

/// Live editing state for one note's content.
#[derive(Debug, Clone)]
pub struct EditorSession {
    buffer: String,
    selection: Selection,
    pending_action: Option<FormattingAction>,
}

impl EditorSession {
    /// Starts a session over the given plain-text content, caret at start.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            buffer: content.into(),
            selection: Selection::caret(0),
            pending_action: None,
        }
    }

    /// Starts a session over a note's content.
    ///
    /// The session works on its own copy; the surrounding app writes the
    /// result back into the note when it saves.
    pub fn open(note: &Note) -> Self {
        Self::new(note.content.clone())
    }

    /// Current buffer text.
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Current caret/selection.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Owned copy of the buffer for asynchronous saves.
    ///
    /// Writers off the update path must persist this snapshot, never a
    /// reference that could observe a later mutation mid-write.
    #[must_use]
    pub fn snapshot(&self) -> String {
        self.buffer.clone()
    }

    /// Moves the caret/selection, clamped against the current buffer.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = clamp_range(selection, char_len(&self.buffer));
    }

    /// Toolbar entry point: records `action` as the next pending action.
    ///
    /// Overwrites any action queued since the last observation point; the
    /// lost update is acceptable because toggles are idempotent and
    /// user-repeatable.
    pub fn queue_action(&mut self, action: FormattingAction) {
        self.pending_action = Some(action);
    }

    /// The queued action, if one is waiting to be consumed.
    #[must_use]
    pub fn pending_action(&self) -> Option<FormattingAction> {
        self.pending_action
    }

    /// Observation point: applies and clears the pending action.
    ///
    /// Returns `None` when nothing was queued.
    pub fn flush_pending(&mut self) -> Option<EditOutcome> {
        let action = self.pending_action.take()?;
        Some(self.apply_formatting(action))
    }

    /// Applies a formatting action at the current selection.
    pub fn apply_formatting(&mut self, action: FormattingAction) -> EditOutcome {
        let outcome = apply_formatting(&self.buffer, self.selection, action);
        self.adopt(outcome.clone());
        outcome
    }

    /// Interceptor entry point for the host text widget.
    ///
    /// Returns `true` when a shorthand rule consumed the change (the
    /// session already adopted the rewrite); `false` tells the host to
    /// apply its default edit, typically via [`Self::apply_default_change`].
    pub fn propose_text_change(&mut self, range: Selection, replacement: &str) -> bool {
        match propose_text_change(&self.buffer, range, replacement) {
            Decision::Handled(outcome) => {
                self.adopt(outcome);
                true
            }
            Decision::NotHandled => false,
        }
    }

    /// Commits a not-handled change verbatim, caret after the replacement.
    pub fn apply_default_change(&mut self, range: Selection, replacement: &str) -> EditOutcome {
        let safe = clamp_range(range, char_len(&self.buffer));
        let buffer = splice(&self.buffer, safe, replacement);
        let caret = safe.location + char_len(replacement);
        let outcome = EditOutcome {
            buffer,
            selection: Selection::caret(caret),
        };
        self.adopt(outcome.clone());
        outcome
    }

    fn adopt(&mut self, outcome: EditOutcome) {
        self.buffer = outcome.buffer;
        self.selection = clamp_range(outcome.selection, char_len(&self.buffer));
    }
}
