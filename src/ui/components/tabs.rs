//! Mode tab bar renderer.

use crate::ui::helpers::{display_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TabItem;

/// Renders the mode tabs on one row, left to right.
///
/// The active tab is drawn bold on the tab background; inactive tabs are
/// dimmed. Tabs that do not fit the pane width are dropped.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_tabs(row: usize, tabs: &[TabItem], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!(" ");
    let mut used = 1;

    for tab in tabs {
        let label = format!(" {} ", tab.label);
        let width = display_len(&label) + 1;
        if used + width > cols {
            break;
        }

        if tab.is_active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.tab_active_fg));
            print!("{}", Theme::bg(&theme.colors.tab_active_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.tab_inactive_fg));
        }
        print!("{label}");
        print!("{} ", Theme::reset());
        used += width;
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}
