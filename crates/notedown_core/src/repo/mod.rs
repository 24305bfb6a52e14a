//! Repository layer for the note collection.
//!
//! # Responsibility
//! - Define the use-case oriented data access contract for notes.
//! - Isolate collection-file details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Note::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateId`) in
//!   addition to transport errors.

pub mod note_repo;
