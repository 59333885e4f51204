//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the plugin.
//! It holds the active mode, the per-mode input, the single request outcome slot
//! and the bookkeeping that ties asynchronous settlements back to the dispatch
//! that caused them.
//!
//! # State Components
//!
//! - **Mode**: Which of the three query types is active
//! - **Input**: Ticker, news query and selected file (persist across mode switches)
//! - **Outcome**: `Idle`, `Loading`, `Success` or `Failure` of the latest dispatch
//! - **In-flight ticket**: The dispatch whose settlement is still awaited
//! - **Display**: Result scroll offset, spinner frame, last known pane size
//!
//! # Dispatch Tickets
//!
//! Every dispatch takes a fresh generation number. Settlements carry the ticket
//! back; [`AppState::settle`] only accepts the ticket currently in flight, so
//! results for abandoned dispatches never overwrite newer state.
//!
//! # Example
//!
//! ```rust
//! use finassist::api::ApiEndpoint;
//! use finassist::app::AppState;
//! use finassist::domain::{Mode, RequestOutcome};
//! use finassist::ui::Theme;
//!
//! let mut state = AppState::new(Mode::Stock, ApiEndpoint::default(), Theme::default());
//! state.input.set_ticker("aapl");
//!
//! let ticket = state.begin_dispatch().expect("guard passes");
//! assert!(state.outcome.is_loading());
//! assert!(state.settle(ticket, RequestOutcome::Success("AAPL: $150".into())));
//! ```

use crate::api::{ApiEndpoint, DispatchTicket};
use crate::domain::{InputState, Mode, PermissionState, RequestOutcome};
use crate::ui::helpers::wrap_preformatted;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    EmptyState, ErrorInfo, FooterInfo, HeaderInfo, InputLineInfo, ResultBody, ResultView,
    SpinnerInfo, TabItem, UIViewModel,
};

/// Rows taken by everything except result text: blank line, header, tabs,
/// border, input box (3), result status line, border, footer, bottom margin.
const CHROME_ROWS: usize = 11;

/// Horizontal margin on each side of the result area.
const RESULT_MARGIN: usize = 2;

/// Frames of the loading spinner.
const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Currently active query mode.
    pub mode: Mode,

    /// Text collected by each mode's input line.
    pub input: InputState,

    /// Lifecycle state of the latest dispatch.
    pub outcome: RequestOutcome,

    /// Ticket of the dispatch awaiting settlement, if any.
    ///
    /// Set by [`AppState::begin_dispatch`], cleared by a matching
    /// [`AppState::settle`] or by a mode switch.
    pub in_flight: Option<DispatchTicket>,

    /// Generation of the most recent dispatch. Monotonic for the session.
    pub generation: u64,

    /// First visible wrapped line of a successful result.
    pub result_scroll: usize,

    /// Spinner frame counter, advanced by timer ticks while loading.
    pub spinner_tick: usize,

    /// Whether a spinner timer is currently armed.
    pub tick_scheduled: bool,

    /// Wall-clock time (UTC) at which the current outcome settled.
    pub settled_at: Option<String>,

    /// Last pane size seen by the renderer, as `(rows, cols)`.
    pub viewport: (usize, usize),

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Backend endpoints.
    pub api: ApiEndpoint,

    /// Answer to the host permission prompt.
    pub permissions: PermissionState,

    /// Tracing directive forwarded to the document worker with each read.
    pub trace_level: Option<String>,
}

impl AppState {
    #[must_use]
    pub fn new(mode: Mode, api: ApiEndpoint, theme: Theme) -> Self {
        Self {
            mode,
            input: InputState::default(),
            outcome: RequestOutcome::Idle,
            in_flight: None,
            generation: 0,
            result_scroll: 0,
            spinner_tick: 0,
            tick_scheduled: false,
            settled_at: None,
            viewport: (24, 80),
            theme,
            api,
            permissions: PermissionState::default(),
            trace_level: None,
        }
    }

    /// Activates `mode`, discarding the current outcome.
    ///
    /// Always resets the outcome to `Idle`, even when `mode` is already active,
    /// and abandons any in-flight dispatch so its settlement will be ignored.
    /// Input text is never touched.
    pub fn switch_mode(&mut self, mode: Mode) {
        if let Some(ticket) = self.in_flight.take() {
            tracing::debug!(
                generation = ticket.generation,
                from = %ticket.mode,
                "abandoning in-flight dispatch on mode switch"
            );
        }

        tracing::debug!(from = %self.mode, to = %mode, "switching mode");
        self.mode = mode;
        self.outcome = RequestOutcome::Idle;
        self.settled_at = None;
        self.result_scroll = 0;
        self.spinner_tick = 0;
    }

    /// Text shown on the active mode's input line.
    #[must_use]
    pub fn active_text(&self) -> &str {
        match self.mode {
            Mode::Stock => &self.input.ticker_text,
            Mode::News => &self.input.news_query_text,
            Mode::Document => self.input.file_path_text(),
        }
    }

    /// Applies `edit` to the active mode's text and stores the result through
    /// that mode's setter.
    pub fn edit_active_text(&mut self, edit: impl FnOnce(&mut String)) {
        let mut text = self.active_text().to_string();
        edit(&mut text);

        match self.mode {
            Mode::Stock => self.input.set_ticker(&text),
            Mode::News => self.input.set_news_query(&text),
            Mode::Document => self.input.set_file_path(&text),
        }

        tracing::trace!(mode = %self.mode, text = %self.active_text(), "input updated");
    }

    /// Whether the active mode has the input its request needs.
    #[must_use]
    pub fn has_required_input(&self) -> bool {
        match self.mode {
            Mode::Stock => !self.input.ticker_text.is_empty(),
            Mode::News => !self.input.news_query_text.is_empty(),
            Mode::Document => self.input.selected_file.is_some(),
        }
    }

    /// Starts a dispatch for the active mode if its guards pass.
    ///
    /// Returns `None` without touching state when the required input is
    /// missing or another dispatch is still in flight. Otherwise moves the
    /// outcome to `Loading` and returns the new ticket.
    pub fn begin_dispatch(&mut self) -> Option<DispatchTicket> {
        if !self.has_required_input() {
            tracing::debug!(mode = %self.mode, "dispatch ignored: required input missing");
            return None;
        }

        if let Some(pending) = self.in_flight {
            tracing::debug!(
                mode = %self.mode,
                pending_generation = pending.generation,
                "dispatch rejected: request already in flight"
            );
            return None;
        }

        self.generation += 1;
        let ticket = DispatchTicket::new(self.generation, self.mode);

        self.in_flight = Some(ticket);
        self.outcome = RequestOutcome::Loading;
        self.settled_at = None;
        self.result_scroll = 0;
        self.spinner_tick = 0;

        tracing::debug!(generation = ticket.generation, mode = %ticket.mode, "dispatch started");
        Some(ticket)
    }

    /// Whether `ticket` belongs to the dispatch currently in flight.
    #[must_use]
    pub fn is_current(&self, ticket: DispatchTicket) -> bool {
        self.in_flight == Some(ticket)
    }

    /// Stores the settlement of `ticket`'s dispatch.
    ///
    /// Returns `false` and leaves state untouched for stale tickets.
    pub fn settle(&mut self, ticket: DispatchTicket, outcome: RequestOutcome) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                generation = ticket.generation,
                mode = %ticket.mode,
                current = ?self.in_flight,
                "discarding stale settlement"
            );
            return false;
        }

        tracing::debug!(
            generation = ticket.generation,
            mode = %ticket.mode,
            success = matches!(outcome, RequestOutcome::Success(_)),
            "dispatch settled"
        );

        self.in_flight = None;
        self.outcome = outcome;
        self.result_scroll = 0;
        self.settled_at = Some(chrono::Utc::now().format("%H:%M:%S UTC").to_string());
        true
    }

    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport = (rows, cols);
    }

    /// Moves the result window by `delta` wrapped lines, clamped to the text.
    ///
    /// Returns whether the offset changed.
    pub fn scroll_by(&mut self, delta: isize) -> bool {
        let max = self.max_scroll();
        let target = if delta.is_negative() {
            self.result_scroll.saturating_sub(delta.unsigned_abs())
        } else {
            self.result_scroll.saturating_add(delta.unsigned_abs()).min(max)
        };
        self.scroll_to(target)
    }

    /// Moves the result window by one screen.
    pub fn page_by(&mut self, pages: isize) -> bool {
        let page = Self::result_rows(self.viewport.0).saturating_sub(1).max(1);
        self.scroll_by(pages.saturating_mul(isize::try_from(page).unwrap_or(isize::MAX)))
    }

    pub fn scroll_to_start(&mut self) -> bool {
        self.scroll_to(0)
    }

    pub fn scroll_to_end(&mut self) -> bool {
        self.scroll_to(self.max_scroll())
    }

    fn scroll_to(&mut self, target: usize) -> bool {
        let target = target.min(self.max_scroll());
        if target == self.result_scroll {
            return false;
        }
        self.result_scroll = target;
        true
    }

    fn max_scroll(&self) -> usize {
        let (rows, cols) = self.viewport;
        match &self.outcome {
            RequestOutcome::Success(payload) => wrap_preformatted(payload, Self::result_width(cols))
                .len()
                .saturating_sub(Self::result_rows(rows)),
            _ => 0,
        }
    }

    /// Rows available for result text.
    const fn result_rows(rows: usize) -> usize {
        let available = rows.saturating_sub(CHROME_ROWS);
        if available == 0 {
            1
        } else {
            available
        }
    }

    /// Columns available for result text.
    const fn result_width(cols: usize) -> usize {
        let available = cols.saturating_sub(RESULT_MARGIN * 2);
        if available == 0 {
            1
        } else {
            available
        }
    }

    /// Computes a renderable UI view model from current state and pane size.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        UIViewModel {
            header: HeaderInfo {
                title: " FinAssist ".to_string(),
            },
            tabs: Mode::ALL
                .iter()
                .map(|mode| TabItem {
                    label: mode.label().to_string(),
                    is_active: *mode == self.mode,
                })
                .collect(),
            input: self.compute_input_line(),
            body: self.compute_body(rows, cols),
            footer: FooterInfo {
                keybindings: "Tab: mode  Enter: submit  Ctrl+u: clear  ↑/↓ PgUp/PgDn: scroll  Esc: close"
                    .to_string(),
            },
        }
    }

    fn compute_input_line(&self) -> InputLineInfo {
        let (label, placeholder) = match self.mode {
            Mode::Stock => ("Ticker", "e.g., AAPL"),
            Mode::News => ("Search", "e.g., Tesla earnings"),
            Mode::Document => ("File", "path to a PDF, DOCX or TXT file"),
        };

        InputLineInfo {
            label: label.to_string(),
            text: self.active_text().to_string(),
            placeholder: placeholder.to_string(),
        }
    }

    fn compute_body(&self, rows: usize, cols: usize) -> ResultBody {
        match &self.outcome {
            RequestOutcome::Idle => ResultBody::Empty(EmptyState {
                message: match self.mode {
                    Mode::Stock => "Enter a ticker symbol and press Enter",
                    Mode::News => "Enter a news search and press Enter",
                    Mode::Document => "Enter a document path and press Enter",
                }
                .to_string(),
                subtitle: format!("Backend: {}", self.api.base()),
            }),
            RequestOutcome::Loading => ResultBody::Loading(SpinnerInfo {
                frame: SPINNER_FRAMES[self.spinner_tick % SPINNER_FRAMES.len()],
                message: match self.mode {
                    Mode::Stock => "Fetching stock info",
                    Mode::News => "Searching financial news",
                    Mode::Document => "Uploading and analyzing document",
                }
                .to_string(),
            }),
            RequestOutcome::Success(payload) => {
                let lines = wrap_preformatted(payload, Self::result_width(cols));
                let window = Self::result_rows(rows);
                let total = lines.len();
                let start = self.result_scroll.min(total.saturating_sub(window));
                let end = (start + window).min(total);

                let received = self.settled_at.as_deref().unwrap_or("-");
                let status = if total > window {
                    format!("Received {received}  lines {}-{end} of {total}", start + 1)
                } else {
                    format!("Received {received}")
                };

                ResultBody::Result(ResultView {
                    lines: lines[start..end].to_vec(),
                    status,
                })
            }
            RequestOutcome::Failure(message) => ResultBody::Error(ErrorInfo {
                message: message.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(mode: Mode) -> AppState {
        AppState::new(mode, ApiEndpoint::default(), Theme::default())
    }

    #[test]
    fn guard_requires_input_for_active_mode() {
        let mut state = state(Mode::News);
        state.input.set_ticker("AAPL");

        assert!(state.begin_dispatch().is_none());
        assert_eq!(state.outcome, RequestOutcome::Idle);
        assert_eq!(state.generation, 0);
    }

    #[test]
    fn second_dispatch_is_rejected_while_in_flight() {
        let mut state = state(Mode::Stock);
        state.input.set_ticker("msft");

        let first = state.begin_dispatch();
        assert!(first.is_some());
        assert!(state.begin_dispatch().is_none());
        assert_eq!(state.in_flight, first);
        assert_eq!(state.generation, 1);
    }

    #[test]
    fn settle_ignores_stale_tickets() {
        let mut state = state(Mode::Stock);
        state.input.set_ticker("msft");
        let ticket = state.begin_dispatch().unwrap();

        state.switch_mode(Mode::Stock);
        assert!(!state.settle(ticket, RequestOutcome::Success("late".into())));
        assert_eq!(state.outcome, RequestOutcome::Idle);
        assert!(state.settled_at.is_none());
    }

    #[test]
    fn edits_go_through_the_mode_setter() {
        let mut state = state(Mode::Stock);
        state.edit_active_text(|t| t.push_str("brk.b"));
        assert_eq!(state.input.ticker_text, "BRK.B");

        state.switch_mode(Mode::Document);
        state.edit_active_text(|t| t.push('x'));
        state.edit_active_text(|t| {
            t.pop();
        });
        assert!(state.input.selected_file.is_none());
        assert_eq!(state.input.ticker_text, "BRK.B");
    }

    #[test]
    fn scrolling_is_clamped_to_wrapped_text() {
        let mut state = state(Mode::Stock);
        state.set_viewport(15, 40);
        state.input.set_ticker("x");
        let ticket = state.begin_dispatch().unwrap();
        let text = (1..=10).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        state.settle(ticket, RequestOutcome::Success(text));

        // 15 rows leave 4 rows of text, so at most 6 lines of scroll.
        assert!(state.scroll_to_end());
        assert_eq!(state.result_scroll, 6);
        assert!(!state.scroll_by(3));
        assert!(state.scroll_by(-2));
        assert_eq!(state.result_scroll, 4);
        assert!(state.scroll_to_start());
        assert!(!state.scroll_by(-1));
    }

    #[test]
    fn viewmodel_windows_result_lines() {
        let mut state = state(Mode::Stock);
        state.input.set_ticker("x");
        let ticket = state.begin_dispatch().unwrap();
        state.settle(ticket, RequestOutcome::Success("a\nb\nc\nd\ne".into()));
        state.set_viewport(14, 40);
        state.scroll_by(1);

        let vm = state.compute_viewmodel(14, 40);
        match vm.body {
            ResultBody::Result(view) => {
                assert_eq!(view.lines, vec!["b", "c", "d"]);
                assert!(view.status.ends_with("lines 2-4 of 5"));
            }
            other => panic!("expected result body, got {other:?}"),
        }
    }

    #[test]
    fn idle_and_failure_bodies() {
        let mut state = state(Mode::News);
        assert!(matches!(state.compute_viewmodel(24, 80).body, ResultBody::Empty(_)));

        state.input.set_news_query("q");
        let ticket = state.begin_dispatch().unwrap();
        assert!(matches!(state.compute_viewmodel(24, 80).body, ResultBody::Loading(_)));

        state.settle(ticket, RequestOutcome::generic_failure());
        match state.compute_viewmodel(24, 80).body {
            ResultBody::Error(error) => assert_eq!(error.message, "An error occurred"),
            other => panic!("expected error body, got {other:?}"),
        }
    }
}
