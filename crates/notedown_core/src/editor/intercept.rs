//! Shorthand autocomplete intercepting proposed text changes.
//!
//! # Responsibility
//! - Inspect every proposed replacement before the host widget commits it.
//! - Upgrade dash shorthand to the bullet glyph, continue or terminate
//!   bulleted lines on enter, and unwrap the glyph on backspace.
//!
//! # Invariants
//! - Line ranges are recomputed from the current buffer on every call and
//!   clamped before use; no range from a previous buffer revision survives.
//! - A `Handled` verdict fully replaces the host's default edit; the host
//!   must not additionally apply the proposed change.

use crate::editor::boundary::{char_len, clamp_range, line_range, slice, splice, Selection};
use crate::editor::format::EditOutcome;

/// Bare bullet glyph, the rendered form of a typed dash.
const BULLET: &str = "•";
/// Glyph plus its trailing space, as it appears at the start of a list line.
const BULLET_GLYPH: &str = "• ";
/// A typed dash before its confirming space arrives.
const DASH: &str = "-";
/// Dash shorthand a bullet line starts out as.
const DASH_SHORTHAND: &str = "- ";

/// Interceptor verdict on one proposed text change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The interceptor substituted its own edit; the host adopts the
    /// outcome and drops the default insertion.
    Handled(EditOutcome),
    /// No rule matched; the host applies the proposed change verbatim.
    NotHandled,
}

/// Runs the shorthand rules against one proposed replacement.
///
/// `range` is the buffer range the host wants to replace with
/// `replacement` (empty `replacement` with non-zero range is a deletion).
/// Rules are evaluated in precedence order against the line containing the
/// edit point; the first match wins.
#[must_use]
pub fn propose_text_change(buffer: &str, range: Selection, replacement: &str) -> Decision {
    let safe = clamp_range(range, char_len(buffer));
    let line = line_range(buffer, safe.location);
    let line_text = slice(buffer, line);
    let line_content = line_text.strip_suffix('\n').unwrap_or(line_text);
    let caret_prefix = slice(
        buffer,
        Selection::new(line.location, safe.location.saturating_sub(line.location)),
    );
    let glyph_len = char_len(BULLET_GLYPH);

    if replacement == " " {
        // Rule 1: a lone typed dash plus this space becomes the glyph.
        if caret_prefix == DASH {
            let rewritten = splice(buffer, Selection::new(line.location, 1), BULLET_GLYPH);
            return handled(rewritten, line.location + glyph_len);
        }
        // Rule 2: dash shorthand already on the line converts in place.
        if caret_prefix == DASH_SHORTHAND {
            let rewritten = splice(buffer, Selection::new(line.location, glyph_len), BULLET_GLYPH);
            return handled(rewritten, safe.location);
        }
    }

    if replacement == "\n" {
        if line_content.starts_with(BULLET_GLYPH) || line_content == BULLET {
            let item: String = line_content.chars().skip(glyph_len).collect();
            if item.trim().is_empty() {
                // Rule 3a: enter on an empty item ends the list. Strip the
                // glyph, then insert a plain newline at the shifted caret.
                let glyph_here = Selection::new(line.location, glyph_len.min(line.length));
                let without_glyph = splice(buffer, glyph_here, "");
                let caret = shift_left(safe.location, line.location, glyph_here.length);
                let rewritten = splice(&without_glyph, Selection::caret(caret), "\n");
                return handled(rewritten, caret + 1);
            }
            // Rule 3b: enter mid-list continues it with a fresh bullet.
            let insertion = format!("\n{BULLET_GLYPH}");
            let rewritten = splice(buffer, safe, &insertion);
            return handled(rewritten, safe.location + 1 + glyph_len);
        }

        // Rule 4: enter on an unconverted shorthand line converts it and
        // continues the list in one edit. Shorthand and glyph have equal
        // char length, so the caret keeps its numeric position.
        if line_content.starts_with(DASH_SHORTHAND) {
            let converted = splice(buffer, Selection::new(line.location, glyph_len), BULLET_GLYPH);
            let insertion = format!("\n{BULLET_GLYPH}");
            let rewritten = splice(&converted, Selection::caret(safe.location), &insertion);
            return handled(rewritten, safe.location + 1 + glyph_len);
        }
    }

    // Rule 5: backspacing the char right before the caret, with the caret
    // sitting exactly at the end of a leading glyph, removes the whole
    // glyph instead of half of it.
    if replacement.is_empty()
        && safe.length == 1
        && line_content.starts_with(BULLET_GLYPH)
        && safe.end() == line.location + glyph_len
    {
        let rewritten = splice(buffer, Selection::new(line.location, glyph_len), "");
        return handled(rewritten, line.location);
    }

    Decision::NotHandled
}

/// Caret position after `removed` chars disappeared at `edit_start`.
fn shift_left(caret: usize, edit_start: usize, removed: usize) -> usize {
    if caret >= edit_start + removed {
        caret - removed
    } else {
        caret.min(edit_start)
    }
}

fn handled(buffer: String, caret: usize) -> Decision {
    let caret = caret.min(char_len(&buffer));
    Decision::Handled(EditOutcome {
        buffer,
        selection: Selection::caret(caret),
    })
}
