//! View model types representing renderable UI state.
//!
//! View models are computed from application state and contain only
//! display-ready data: wrapped and windowed result lines, the spinner frame,
//! labels and placeholders. They hold no business logic.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer.
//!
//! # Example
//!
//! ```rust
//! use finassist::ui::viewmodel::*;
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " FinAssist ".to_string() },
//!     tabs: vec![TabItem { label: "Stock Info".to_string(), is_active: true }],
//!     input: InputLineInfo {
//!         label: "Ticker".to_string(),
//!         text: String::new(),
//!         placeholder: "e.g., AAPL".to_string(),
//!     },
//!     body: ResultBody::Error(ErrorInfo { message: "Ticker not found".to_string() }),
//!     footer: FooterInfo { keybindings: "Esc: close".to_string() },
//! };
//! assert!(matches!(vm.body, ResultBody::Error(_)));
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Header information (title).
    pub header: HeaderInfo,

    /// Mode tabs in display order.
    pub tabs: Vec<TabItem>,

    /// The active mode's input line.
    pub input: InputLineInfo,

    /// What the result area shows.
    pub body: ResultBody,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// One mode tab.
#[derive(Debug, Clone)]
pub struct TabItem {
    pub label: String,
    pub is_active: bool,
}

/// Input box contents.
#[derive(Debug, Clone)]
pub struct InputLineInfo {
    /// Short field name shown before the text (e.g. "Ticker").
    pub label: String,

    /// Current text of the active mode.
    pub text: String,

    /// Hint shown while `text` is empty.
    pub placeholder: String,
}

/// Result area contents, one variant per request outcome.
#[derive(Debug, Clone)]
pub enum ResultBody {
    /// Nothing dispatched yet (or the outcome was reset).
    Empty(EmptyState),

    /// A dispatch is in flight.
    Loading(SpinnerInfo),

    /// The payload of a successful dispatch.
    Result(ResultView),

    /// The message of a failed dispatch.
    Error(ErrorInfo),
}

/// Idle hint display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g., "Enter a ticker symbol and press Enter").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Loading indicator.
#[derive(Debug, Clone)]
pub struct SpinnerInfo {
    /// Current spinner glyph.
    pub frame: char,

    /// What is being waited for.
    pub message: String,
}

/// Visible window of a successful result.
#[derive(Debug, Clone)]
pub struct ResultView {
    /// Wrapped payload lines inside the scroll window.
    pub lines: Vec<String>,

    /// Status line (receive time and scroll position).
    pub status: String,
}

/// Failure display information.
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    pub message: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}
