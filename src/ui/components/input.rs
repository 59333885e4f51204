//! Input box component renderer.
//!
//! Renders the active mode's input line inside a bordered frame.

use crate::ui::helpers::{display_len, position_cursor, truncate_start};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::InputLineInfo;

/// Horizontal margin for the input box (spaces on left and right).
const INPUT_BOX_MARGIN: usize = 2;

/// Renders the input box at the specified row.
///
/// # Returns
///
/// The next available row position (row + 3, since the box uses 3 lines)
///
/// # Layout
///
/// ```text
/// [margin] ┌────────────────────┐ [margin]
/// [margin] │ Ticker: AAPL▏      │ [margin]
/// [margin] └────────────────────┘ [margin]
/// ```
///
/// While the text is empty the placeholder is shown dimmed instead. Text that
/// does not fit keeps its end visible, where typing happens.
pub fn render_input_box(row: usize, input: &InputLineInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(INPUT_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);

    position_cursor(row, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.input_border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let prefix = format!(" {}: ", input.label);
    let room = inner_width.saturating_sub(display_len(&prefix) + 1);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.input_border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{prefix}");

    let shown = if input.text.is_empty() {
        let placeholder = truncate_start(&input.placeholder, room);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("▏");
        print!("{}", Theme::fg(&theme.colors.placeholder_fg));
        print!("{placeholder}");
        display_len(&placeholder)
    } else {
        let text = truncate_start(&input.text, room);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{text}▏");
        display_len(&text)
    };

    let padding = inner_width.saturating_sub(display_len(&prefix) + shown + 1);
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(&theme.colors.input_border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.input_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
