//! Note use-case service.
//!
//! # Responsibility
//! - Provide note create/rename/update/get/list/delete/search APIs.
//! - Derive markdown preview projections for list rendering.
//!
//! # Invariants
//! - `update_content` uses full content replacement semantics; the editor
//!   hands over a whole buffer snapshot, never a diff.
//! - Note list is always sorted by `created_at DESC, id ASC`.

use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::{NoteRepository, RepoError, RepoResult};
use crate::search::scan::{search_notes, SearchHit, SearchQuery};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\*_`#>~\-\[\]\(\)!•]+").expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const PREVIEW_MAX_CHARS: usize = 100;

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NoteNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Read model for note list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListItem {
    /// Stable note id.
    pub id: NoteId,
    /// User-visible title.
    pub title: String,
    /// Derived plain-text preview (absent for empty notes).
    pub preview_text: Option<String>,
    /// Derived first markdown image path (absent without images).
    pub preview_image: Option<String>,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

/// Markdown-derived preview projection for one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownPreview {
    /// Sanitized summary text.
    pub preview_text: Option<String>,
    /// First markdown image path.
    pub preview_image: Option<String>,
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one note and returns the stored record.
    pub fn create_note(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Note, NoteServiceError> {
        let note = Note::new(title, content);
        let id = self.repo.create_note(&note)?;
        self.repo
            .get_note(id)?
            .ok_or(NoteServiceError::InconsistentState(
                "created note not found in read-back",
            ))
    }

    /// Replaces a note's content in full (the editor's save path).
    pub fn update_content(
        &mut self,
        id: NoteId,
        content: impl Into<String>,
    ) -> Result<Note, NoteServiceError> {
        let mut note = self.require_note(id)?;
        note.content = content.into();
        self.repo.update_note(&note)?;
        self.repo
            .get_note(id)?
            .ok_or(NoteServiceError::InconsistentState(
                "updated note not found in read-back",
            ))
    }

    /// Renames a note, leaving its content untouched.
    pub fn rename_note(
        &mut self,
        id: NoteId,
        title: impl Into<String>,
    ) -> Result<Note, NoteServiceError> {
        let mut note = self.require_note(id)?;
        note.title = title.into();
        self.repo.update_note(&note)?;
        self.repo
            .get_note(id)?
            .ok_or(NoteServiceError::InconsistentState(
                "renamed note not found in read-back",
            ))
    }

    /// Gets one note by stable id.
    pub fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        self.repo.get_note(id)
    }

    /// Lists all notes newest-first with derived previews.
    pub fn list_notes(&self) -> Result<Vec<NoteListItem>, NoteServiceError> {
        let notes = self.repo.list_notes()?;
        Ok(notes
            .into_iter()
            .map(|note| {
                let preview = derive_markdown_preview(&note.content);
                NoteListItem {
                    id: note.id,
                    title: note.title,
                    preview_text: preview.preview_text,
                    preview_image: preview.preview_image,
                    created_at: note.created_at,
                }
            })
            .collect())
    }

    /// Removes one note for good.
    pub fn delete_note(&mut self, id: NoteId) -> Result<(), NoteServiceError> {
        self.repo.delete_note(id).map_err(NoteServiceError::from)
    }

    /// Case-insensitive search over titles and contents, newest-first.
    pub fn search_notes(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, NoteServiceError> {
        let notes = self.repo.list_notes()?;
        Ok(search_notes(&notes, query))
    }

    fn require_note(&self, id: NoteId) -> Result<Note, NoteServiceError> {
        self.repo
            .get_note(id)?
            .ok_or(NoteServiceError::NoteNotFound(id))
    }
}

/// Derives note preview fields from markdown content.
///
/// Rules:
/// - `preview_image`: first markdown image path matched by regex.
/// - `preview_text`: images removed, links reduced to their text, markdown
///   symbols (including the bullet glyph) stripped, whitespace normalized,
///   first 100 chars retained.
pub fn derive_markdown_preview(content: &str) -> MarkdownPreview {
    let preview_image = MARKDOWN_IMAGE_RE
        .captures(content)
        .and_then(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|value| !value.is_empty());

    let without_images = MARKDOWN_IMAGE_RE.replace_all(content, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();
    let preview_text = if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
    };

    MarkdownPreview {
        preview_text,
        preview_image,
    }
}

#[cfg(test)]
mod tests {
    use super::derive_markdown_preview;

    #[test]
    fn preview_extracts_first_image_path() {
        let preview = derive_markdown_preview("x ![a](one.png) y ![b](two.png)");
        assert_eq!(preview.preview_image.as_deref(), Some("one.png"));
    }

    #[test]
    fn preview_strips_markdown_symbols_and_limits_length() {
        let source = "# title\n\n- [link](https://example.com)\n**bold** `code`";
        let preview = derive_markdown_preview(source);
        let text = preview.preview_text.expect("preview_text should exist");
        assert!(!text.contains('#'));
        assert!(!text.contains('*'));
        assert!(text.chars().count() <= 100);
    }

    #[test]
    fn preview_strips_bullet_glyphs() {
        let preview = derive_markdown_preview("• milk\n• eggs");
        assert_eq!(preview.preview_text.as_deref(), Some("milk eggs"));
    }

    #[test]
    fn empty_content_yields_no_preview() {
        let preview = derive_markdown_preview("   \n  ");
        assert_eq!(preview.preview_text, None);
        assert_eq!(preview.preview_image, None);
    }
}
