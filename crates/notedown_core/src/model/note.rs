//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical record persisted in the notes collection file.
//! - Provide constructors for user-created and imported notes.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `content` is plain text; markdown markers live inside it as literal
//!   characters, never as styled runs.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for every note in the collection.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// Validation error for note records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// The nil UUID is reserved and never a valid note identity.
    NilId,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "note id must not be the nil uuid"),
        }
    }
}

impl Error for NoteValidationError {}

/// Canonical note record.
///
/// `content` is the plain-text buffer the editing engine operates on; the
/// surrounding layers only ever read it whole or replace it whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable global ID used for lookup and file identity.
    pub id: NoteId,
    /// User-visible note title.
    pub title: String,
    /// Plain-text body with literal markdown markers.
    pub content: String,
    /// Creation timestamp in Unix epoch milliseconds.
    pub created_at: i64,
}

impl Note {
    /// Creates a new note with a generated stable ID and the current time.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, content, now_epoch_ms())
    }

    /// Creates a note with caller-provided identity and timestamp.
    ///
    /// Used by import/load paths where identity already exists externally.
    ///
    /// # Invariants
    /// - The provided `id` must remain stable for this note's lifetime.
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            created_at,
        }
    }

    /// Checks structural invariants of this record.
    ///
    /// # Errors
    /// - `NoteValidationError::NilId` when the id is the nil uuid.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.is_nil() {
            return Err(NoteValidationError::NilId);
        }
        Ok(())
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteValidationError};
    use uuid::Uuid;

    #[test]
    fn new_note_has_unique_id_and_timestamp() {
        let first = Note::new("a", "");
        let second = Note::new("b", "");
        assert_ne!(first.id, second.id);
        assert!(first.created_at > 0);
    }

    #[test]
    fn validate_rejects_nil_id() {
        let note = Note::with_id(Uuid::nil(), "t", "c", 1);
        assert_eq!(note.validate(), Err(NoteValidationError::NilId));
    }

    #[test]
    fn validate_accepts_generated_id() {
        assert!(Note::new("t", "c").validate().is_ok());
    }

    #[test]
    fn serde_round_trip_preserves_fields() {
        let note = Note::new("groceries", "• milk\n• eggs");
        let encoded = serde_json::to_string(&note).expect("note should encode");
        let decoded: Note = serde_json::from_str(&encoded).expect("note should decode");
        assert_eq!(decoded, note);
    }
}
