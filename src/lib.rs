//! FinAssist: a Zellij plugin for querying a financial assistant API.
//!
//! FinAssist is a terminal multiplexer plugin that provides:
//! - Stock information lookup by ticker symbol
//! - Financial news search
//! - Document upload with a returned analysis summary
//! - One result (or one error) at a time, scrollable inside the pane
//! - Document reads on a Zellij worker thread, off the render loop
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Dispatch tickets and in-flight guard             │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ API Layer     │   │ Worker Layer  │
//! │ (ui/)         │   │ (api/)        │   │ (worker/)     │
//! │ - Rendering   │   │ - URLs        │   │ - File reads  │
//! │ - Theming     │   │ - Multipart   │   │ - IPC bridge  │
//! │ - Components  │   │ - Normalizing │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Error types (domain/error)                       │
//! │  - Mode, input, outcome (domain/)                   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing-subscriber JSON lines                    │
//! │  - Size-rotated trace file                          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`api`]: Request building, dispatch tickets and response normalization
//! - [`domain`]: Core domain types (modes, input, outcome, errors)
//! - [`infrastructure`]: Sandbox path utilities
//! - [`worker`]: Background worker for document reads
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: Tracing setup
//!
//! # Configuration
//!
//! The plugin is configured via Zellij's plugin configuration:
//!
//! ```kdl
//! // ~/.config/zellij/layouts/default.kdl
//! pane {
//!     plugin location="file:/path/to/finassist.wasm" {
//!         api_base "http://localhost:5001/api"
//!         start_mode "news"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! A document can also be picked from outside the plugin:
//!
//! ```text
//! zellij pipe --name select_file -- ~/reports/q3.pdf
//! ```
//!
//! # Examples
//!
//! ```rust
//! use finassist::{handle_event, initialize, Action, Config, Event, RequestOutcome};
//!
//! let mut state = initialize(&Config::default());
//!
//! for c in "aapl".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Dispatch)?;
//! let Action::SendRequest(request) = &actions[0] else { unreachable!() };
//! assert_eq!(request.url, "http://localhost:5001/api/stock/AAPL");
//!
//! handle_event(&mut state, &Event::ResponseArrived {
//!     ticket: Some(request.ticket),
//!     status: 200,
//!     body: br#"{"info":"AAPL: $150"}"#.to_vec(),
//! })?;
//! assert_eq!(state.outcome, RequestOutcome::Success("AAPL: $150".into()));
//! # Ok::<(), finassist::FinAssistError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Library**: Host-testable; only `main.rs` touches the Zellij host API

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;
pub mod worker;

pub use api::{ApiEndpoint, DispatchTicket, DEFAULT_API_BASE};
pub use app::{handle_event, Action, AppState, Event};
pub use domain::{FinAssistError, Mode, Permission, RequestOutcome, Result};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Name of the Zellij pipe that selects a document from outside the plugin.
pub const SELECT_FILE_PIPE: &str = "select_file";

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/finassist.wasm" {
///     api_base "https://fin.example.com/api"
///     start_mode "document"
///     theme "catppuccin-latte"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Base address of the backend API. Default: [`DEFAULT_API_BASE`]
    pub api_base: String,

    /// Mode active when the plugin opens. Default: [`Mode::Stock`]
    pub start_mode: Mode,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing filter directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            start_mode: Mode::Stock,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - `api_base`: trimmed; blank values fall back to the default
    /// - `start_mode`: `stock`, `news` or `document` (case-insensitive); unknown
    ///   values fall back to `stock`
    /// - `theme`, `theme_file`, `trace_level`: taken as-is
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use finassist::{Config, Mode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_base".to_string(), " https://fin.example.com/api/ ".to_string());
    /// map.insert("start_mode".to_string(), "News".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_base, "https://fin.example.com/api/");
    /// assert_eq!(config.start_mode, Mode::News);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let api_base = config
            .get("api_base")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map_or_else(|| DEFAULT_API_BASE.to_string(), String::from);

        let start_mode = config
            .get("start_mode")
            .and_then(|s| match s.parse::<Mode>() {
                Ok(mode) => Some(mode),
                Err(e) => {
                    tracing::debug!(value = %s, error = %e, "invalid start_mode, using default");
                    None
                }
            })
            .unwrap_or_default();

        Self {
            api_base,
            start_mode,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }
}

/// Initializes the plugin with configuration.
///
/// Creates a new `AppState` with:
/// - The configured start mode and an `Idle` outcome
/// - The API endpoint set
/// - Loaded theme (from file, name, or default)
///
/// # Example
///
/// ```rust
/// use finassist::{initialize, Config, Mode};
///
/// let config = Config {
///     start_mode: Mode::Document,
///     ..Default::default()
/// };
///
/// let state = initialize(&config);
/// assert_eq!(state.mode, Mode::Document);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_base = %config.api_base, start_mode = %config.start_mode, "initializing finassist plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let mut state = AppState::new(config.start_mode, ApiEndpoint::new(&config.api_base), theme);
    state.trace_level = config.trace_level.clone();
    state
}
