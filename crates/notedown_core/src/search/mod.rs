//! Search entry points over the note collection.
//!
//! # Responsibility
//! - Expose typed query APIs for filtering notes by text.
//! - Keep hit shaping (titles, snippets) inside core.

pub mod scan;
