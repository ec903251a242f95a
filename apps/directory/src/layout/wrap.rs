//! Greedy word wrap bounded by measured width.
//!
//! Words are never split. A word wider than `max_width` is emitted on a line of
//! its own and overflows the limit; everything else fits.

use crate::layout::font_metrics::FontSpec;

/// Splits `text` on whitespace and packs the words into lines no wider than
/// `max_width` points at `font`.
///
/// Empty or all-whitespace input yields no lines.
pub fn wrap_text(text: &str, font: FontSpec, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }

        let candidate = format!("{line} {word}");
        if font.string_width(&candidate) <= max_width {
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
