//! Domain model for the note collection.
//!
//! # Responsibility
//! - Define the canonical note record used by core business logic.
//! - Keep one plain-text content shape shared by editor, store and export.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Deleting a note removes it from the collection for good; there are no
//!   tombstones.

pub mod note;
