//! Note repository contract and JSON-file implementation.
//!
//! # Responsibility
//! - Provide note persistence APIs over a single collection file.
//! - Own atomic whole-collection writes (temp file + rename).
//!
//! # Invariants
//! - The collection file is always a complete JSON array of notes; partial
//!   writes are never visible at the final path.
//! - An unreadable or structurally invalid collection file degrades to an
//!   empty collection instead of failing the open.
//! - `list_notes` order is `created_at DESC, id ASC`.

use crate::model::note::{Note, NoteId, NoteValidationError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for note persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(NoteValidationError),
    Io(std::io::Error),
    Encode(serde_json::Error),
    NotFound(NoteId),
    DuplicateId(NoteId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "collection file i/o failed: {err}"),
            Self::Encode(err) => write!(f, "collection encoding failed: {err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::DuplicateId(id) => write!(f, "note id already exists: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateId(_) => None,
        }
    }
}

impl From<NoteValidationError> for RepoError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Repository interface for note CRUD operations.
pub trait NoteRepository {
    /// Adds one note and returns its stable id.
    fn create_note(&mut self, note: &Note) -> RepoResult<NoteId>;
    /// Replaces the stored record for an existing note.
    fn update_note(&mut self, note: &Note) -> RepoResult<()>;
    /// Gets one note by id.
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Lists all notes, newest first.
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
    /// Removes one note for good.
    fn delete_note(&mut self, id: NoteId) -> RepoResult<()>;
    /// Writes the whole collection to durable storage.
    fn persist(&mut self) -> RepoResult<()>;
}

/// JSON-file backed note repository.
///
/// Keeps the whole collection cached in memory; every mutation rewrites
/// the file atomically so readers only ever see a complete collection.
pub struct JsonNoteRepository {
    path: PathBuf,
    notes: Vec<Note>,
}

impl JsonNoteRepository {
    /// Opens the collection at `path`, loading any existing notes.
    ///
    /// Never fails: a missing file starts an empty collection, and an
    /// unreadable or invalid file is logged and treated as empty rather
    /// than blocking the app from starting.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let started_at = Instant::now();
        let notes = load_collection(&path);
        info!(
            "event=store_open module=repo status=ok path={} notes={} duration_ms={}",
            path.display(),
            notes.len(),
            started_at.elapsed().as_millis()
        );
        Self { path, notes }
    }

    /// Path of the collection file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn position_of(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    fn write_collection(&self) -> RepoResult<()> {
        let encoded = serde_json::to_string_pretty(&self.notes)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        // Stage next to the final path so the rename stays on one
        // filesystem and is atomic.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, encoded)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl NoteRepository for JsonNoteRepository {
    fn create_note(&mut self, note: &Note) -> RepoResult<NoteId> {
        note.validate()?;
        if self.position_of(note.id).is_some() {
            return Err(RepoError::DuplicateId(note.id));
        }
        self.notes.push(note.clone());
        self.persist()?;
        Ok(note.id)
    }

    fn update_note(&mut self, note: &Note) -> RepoResult<()> {
        note.validate()?;
        let Some(position) = self.position_of(note.id) else {
            return Err(RepoError::NotFound(note.id));
        };
        self.notes[position] = note.clone();
        self.persist()
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        Ok(self.notes.iter().find(|note| note.id == id).cloned())
    }

    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        let mut notes = self.notes.clone();
        notes.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(notes)
    }

    fn delete_note(&mut self, id: NoteId) -> RepoResult<()> {
        let Some(position) = self.position_of(id) else {
            return Err(RepoError::NotFound(id));
        };
        self.notes.remove(position);
        self.persist()
    }

    fn persist(&mut self) -> RepoResult<()> {
        let started_at = Instant::now();
        match self.write_collection() {
            Ok(()) => {
                info!(
                    "event=store_persist module=repo status=ok notes={} duration_ms={}",
                    self.notes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_persist module=repo status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

/// Loads the collection file, degrading to empty on any defect.
///
/// Read-path strictness: a decodable file whose records violate model
/// invariants (nil or duplicate ids) counts as invalid, same as a parse
/// failure.
fn load_collection(path: &Path) -> Vec<Note> {
    if !path.exists() {
        return Vec::new();
    }

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            error!(
                "event=store_open module=repo status=error path={} error_code=read_failed error={}",
                path.display(),
                err
            );
            return Vec::new();
        }
    };

    let notes: Vec<Note> = match serde_json::from_str(&raw) {
        Ok(notes) => notes,
        Err(err) => {
            error!(
                "event=store_open module=repo status=error path={} error_code=decode_failed error={}",
                path.display(),
                err
            );
            return Vec::new();
        }
    };

    let mut seen = std::collections::BTreeSet::new();
    for note in &notes {
        if note.validate().is_err() || !seen.insert(note.id) {
            error!(
                "event=store_open module=repo status=error path={} error_code=invalid_collection note={}",
                path.display(),
                note.id
            );
            return Vec::new();
        }
    }

    notes
}
