//! Shared rendering utilities and helpers.
//!
//! Low-level text handling used across UI components: cursor positioning,
//! width-aware padding and truncation, and the preformatted-text wrapping that
//! keeps result payloads verbatim.
//!
//! Widths are counted in `char`s. Wide glyphs (CJK, emoji) may overflow a row
//! by a cell.

use std::fmt::Write as _;

/// Tab stops used when expanding payload tabs.
const TAB_WIDTH: usize = 4;

/// Positions the cursor at a specific row and column (1-indexed).
///
/// ```rust
/// use finassist::ui::helpers::position_cursor;
///
/// position_cursor(5, 1); // Move to start of row 5
/// print!("Content at row 5");
/// ```
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Display width of `text` in columns.
#[must_use]
pub fn display_len(text: &str) -> usize {
    text.chars().count()
}

/// Truncates `text` to `width` columns, marking the cut with `…`.
///
/// ```rust
/// use finassist::ui::helpers::truncate;
///
/// assert_eq!(truncate("Tesla earnings", 8), "Tesla e…");
/// assert_eq!(truncate("AAPL", 8), "AAPL");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if display_len(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Keeps the last `width` columns of `text`, marking the cut with `…`.
///
/// Used for input lines, where the cursor sits at the end of the text.
#[must_use]
pub fn truncate_start(text: &str, width: usize) -> String {
    let len = display_len(text);
    if len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::from('…');
    out.extend(text.chars().skip(len - (width - 1)));
    out
}

/// Splits a payload into display lines no wider than `width`.
///
/// The text is shown as-is: line breaks are kept (`\r\n` counts as one),
/// blank lines survive, tabs expand to the next multiple of four columns and
/// long lines are hard-wrapped. Other control characters become `U+FFFD`.
///
/// ```rust
/// use finassist::ui::helpers::wrap_preformatted;
///
/// let lines = wrap_preformatted("AAPL: $150\n\nvol\t1.2M", 40);
/// assert_eq!(lines, vec!["AAPL: $150", "", "vol 1.2M"]);
/// ```
#[must_use]
pub fn wrap_preformatted(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for raw in text.split('\n') {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let expanded = expand_line(raw);

        if expanded.is_empty() {
            lines.push(String::new());
            continue;
        }

        let chars: Vec<char> = expanded.chars().collect();
        for chunk in chars.chunks(width) {
            lines.push(chunk.iter().collect());
        }
    }

    lines
}

fn expand_line(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut column = 0;

    for c in raw.chars() {
        match c {
            '\t' => {
                let spaces = TAB_WIDTH - column % TAB_WIDTH;
                let _ = write!(out, "{:spaces$}", "");
                column += spaces;
            }
            c if c.is_control() => {
                out.push('\u{fffd}');
                column += 1;
            }
            c => {
                out.push(c);
                column += 1;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_lines_wrap_at_width() {
        assert_eq!(wrap_preformatted("abcdefg", 3), vec!["abc", "def", "g"]);
    }

    #[test]
    fn crlf_and_trailing_newline_are_kept_as_lines() {
        assert_eq!(wrap_preformatted("a\r\nb\n", 10), vec!["a", "b", ""]);
    }

    #[test]
    fn tabs_expand_to_stops_and_escapes_are_neutralized() {
        assert_eq!(wrap_preformatted("ab\tc", 20), vec!["ab  c"]);
        assert_eq!(wrap_preformatted("\u{1b}[31mred", 20), vec!["\u{fffd}[31mred"]);
    }

    #[test]
    fn truncation_keeps_requested_end() {
        assert_eq!(truncate_start("/home/me/reports/q3.pdf", 10), "…ts/q3.pdf");
        assert_eq!(truncate("abc", 0), "");
    }
}
