//! Core domain logic for Notedown.
//! This crate is the single source of truth for business invariants.

pub mod editor;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use editor::boundary::{clamp_range, line_range, selection_or_word, Selection};
pub use editor::format::{apply_formatting, EditOutcome, FormattingAction};
pub use editor::intercept::{propose_text_change, Decision};
pub use editor::session::EditorSession;
pub use export::{export_note, render_export, ExportError, ExportFormat};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use repo::note_repo::{JsonNoteRepository, NoteRepository, RepoError, RepoResult};
pub use search::scan::{search_notes, SearchHit, SearchQuery};
pub use service::note_service::{
    derive_markdown_preview, NoteListItem, NoteService, NoteServiceError,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
