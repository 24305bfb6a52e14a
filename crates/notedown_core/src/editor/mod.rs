//! Plain-text rich-editing engine.
//!
//! # Responsibility
//! - Toggle inline and line-prefix markdown markers on a live text buffer.
//! - Upgrade typed shorthand tokens ("- ") to the bullet glyph ("• ") and
//!   auto-continue bulleted lists across line breaks.
//! - Keep caret/selection coherent across every buffer mutation.
//!
//! # Invariants
//! - All offsets are Unicode scalar (char) positions; no other index space
//!   appears anywhere in the engine.
//! - Every operation is total: malformed ranges are clamped, degenerate
//!   input degrades to a no-op or a minimal valid edit.
//! - Markers are literal text in the buffer, never styled runs.

pub mod boundary;
pub mod format;
pub mod intercept;
pub mod session;
