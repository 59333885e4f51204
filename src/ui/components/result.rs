//! Result area renderers for the loading, success and failure outcomes.

use crate::ui::helpers::{display_len, position_cursor, truncate, wrap_preformatted};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ErrorInfo, ResultView, SpinnerInfo};

/// Left margin of the result area.
const MARGIN: usize = 2;

/// Renders the spinner line at `row`.
pub fn render_spinner(row: usize, spinner: &SpinnerInfo, theme: &Theme, cols: usize) -> usize {
    let text = truncate(&format!("{} {}…", spinner.frame, spinner.message), cols.saturating_sub(MARGIN));

    position_cursor(row, 1);
    print!("{}", " ".repeat(MARGIN));
    print!("{}", Theme::fg(&theme.colors.spinner_fg));
    print!("{text}");
    print!("{}", Theme::reset());
    print!("{}", " ".repeat(cols.saturating_sub(MARGIN + display_len(&text))));
    row + 1
}

/// Renders the status line followed by the visible payload lines.
///
/// Lines arrive already wrapped and windowed; they are printed verbatim.
///
/// # Returns
///
/// The row after the last printed line.
pub fn render_result(row: usize, view: &ResultView, theme: &Theme, cols: usize) -> usize {
    let status = truncate(&view.status, cols.saturating_sub(MARGIN));

    position_cursor(row, 1);
    print!("{}", " ".repeat(MARGIN));
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{status}");
    print!("{}", Theme::reset());

    let mut current_row = row + 1;
    for line in &view.lines {
        position_cursor(current_row, 1);
        print!("{}", " ".repeat(MARGIN));
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{line}");
        print!("{}", Theme::reset());
        print!("{}", " ".repeat(cols.saturating_sub(MARGIN + display_len(line))));
        current_row += 1;
    }
    current_row
}

/// Renders a failure as an `Error:` label and the wrapped message, using at
/// most `max_rows` rows.
pub fn render_error(row: usize, error: &ErrorInfo, theme: &Theme, cols: usize, max_rows: usize) -> usize {
    const LABEL: &str = "Error: ";
    let width = cols.saturating_sub(MARGIN * 2 + LABEL.len()).max(1);

    let mut current_row = row;
    for (i, line) in wrap_preformatted(&error.message, width)
        .iter()
        .take(max_rows.max(1))
        .enumerate()
    {
        position_cursor(current_row, 1);
        print!("{}", " ".repeat(MARGIN));
        print!("{}", Theme::fg(&theme.colors.error_fg));
        if i == 0 {
            print!("{}{LABEL}", Theme::bold());
            print!("{}", Theme::reset());
            print!("{}", Theme::fg(&theme.colors.error_fg));
        } else {
            print!("{}", " ".repeat(LABEL.len()));
        }
        print!("{line}");
        print!("{}", Theme::reset());
        current_row += 1;
    }
    current_row
}
