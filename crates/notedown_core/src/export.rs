//! Note export to plain files.
//!
//! # Responsibility
//! - Render one note into a shareable text document.
//! - Write the document next to other exports with a filesystem-safe name.
//!
//! # Invariants
//! - The rendered document is always `title`, a blank line, then `content`
//!   verbatim; markdown markers are not transformed.
//! - File stems never contain path separators or control characters.

use crate::model::note::Note;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

const EXPORT_STEM_MAX_CHARS: usize = 64;
const EXPORT_FALLBACK_STEM: &str = "note";

/// Target file format for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Markdown document (`.md`).
    Markdown,
    /// Plain text document (`.txt`).
    PlainText,
}

impl ExportFormat {
    /// File extension for this format, without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::PlainText => "txt",
        }
    }
}

/// Export error for file writing.
#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "export write failed: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Renders the shareable document for one note.
#[must_use]
pub fn render_export(note: &Note) -> String {
    format!("{}\n\n{}", note.title, note.content)
}

/// Writes a note into `dir` as `<sanitized title>.<ext>`.
///
/// # Errors
/// - `ExportError::Io` when the directory or file cannot be written.
pub fn export_note(note: &Note, dir: &Path, format: ExportFormat) -> Result<PathBuf, ExportError> {
    let stem = sanitize_file_stem(&note.title);
    let path = dir.join(format!("{stem}.{}", format.extension()));

    match fs::write(&path, render_export(note)) {
        Ok(()) => {
            info!(
                "event=export_note module=export status=ok note={} format={} path={}",
                note.id,
                format.extension(),
                path.display()
            );
            Ok(path)
        }
        Err(err) => {
            error!(
                "event=export_note module=export status=error note={} format={} error={}",
                note.id,
                format.extension(),
                err
            );
            Err(err.into())
        }
    }
}

/// Reduces a title to a safe file stem.
///
/// Path separators and control characters become spaces, surrounding
/// whitespace is trimmed, length is capped, and an empty result falls back
/// to a fixed stem.
fn sanitize_file_stem(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|ch| {
            if ch == '/' || ch == '\\' || ch == ':' || ch.is_control() {
                ' '
            } else {
                ch
            }
        })
        .collect();
    let trimmed: String = cleaned.trim().chars().take(EXPORT_STEM_MAX_CHARS).collect();
    let trimmed = trimmed.trim().to_string();
    if trimmed.is_empty() {
        EXPORT_FALLBACK_STEM.to_string()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::{render_export, sanitize_file_stem, ExportFormat};
    use crate::model::note::Note;

    #[test]
    fn rendered_document_is_title_blank_line_content() {
        let note = Note::new("Groceries", "• milk\n• eggs");
        assert_eq!(render_export(&note), "Groceries\n\n• milk\n• eggs");
    }

    #[test]
    fn extensions_match_formats() {
        assert_eq!(ExportFormat::Markdown.extension(), "md");
        assert_eq!(ExportFormat::PlainText.extension(), "txt");
    }

    #[test]
    fn stem_replaces_separators_and_trims() {
        assert_eq!(sanitize_file_stem("  a/b\\c:d  "), "a b c d");
    }

    #[test]
    fn empty_title_falls_back_to_fixed_stem() {
        assert_eq!(sanitize_file_stem("   "), "note");
        assert_eq!(sanitize_file_stem("///"), "note");
    }

    #[test]
    fn stem_length_is_capped() {
        let stem = sanitize_file_stem(&"x".repeat(200));
        assert_eq!(stem.chars().count(), 64);
    }
}
