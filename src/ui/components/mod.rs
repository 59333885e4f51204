//! Composable UI component renderers.
//!
//! Each component renders one part of the interface at a given row and returns
//! the next free row, so the layout function reads top to bottom.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`tabs`]: Mode tabs
//! - [`input`]: Bordered input box for the active mode
//! - [`empty`]: Idle hint
//! - [`result`]: Spinner, result text and error message
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Tabs]
//! [Border]
//! [Input box - 3 lines]
//! [Result area: hint | spinner | status + text | error]
//! [Border]
//! [Footer]
//! [blank line]
//! ```

mod empty;
mod footer;
mod header;
mod input;
mod result;
mod tabs;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ResultBody, UIViewModel};

use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use input::render_input_box;
use result::{render_error, render_result, render_spinner};
use tabs::render_tabs;

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full plugin layout.
///
/// The result area spans from below the input box to the row above the lower
/// border. Result text is windowed by the view model to fit it exactly.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_tabs(current_row, &vm.tabs, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_input_box(current_row, &vm.input, theme, cols);

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);
    let body_rows = border_row.saturating_sub(current_row);

    match &vm.body {
        ResultBody::Empty(empty) => render_empty_state(current_row + 1, empty, theme, cols),
        ResultBody::Loading(spinner) => {
            render_spinner(current_row + 1, spinner, theme, cols);
        }
        ResultBody::Result(view) => {
            render_result(current_row, view, theme, cols);
        }
        ResultBody::Error(error) => {
            render_error(current_row + 1, error, theme, cols, body_rows.saturating_sub(1));
        }
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
