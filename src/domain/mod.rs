//! Domain layer for the finassist plugin.
//!
//! Core types independent of Zellij APIs: the query [`Mode`], per-mode
//! [`InputState`], the [`RequestOutcome`] slot, and error types.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`mode`]: The three query modes
//! - [`input`]: Per-mode raw input and document selection
//! - [`outcome`]: Request lifecycle state
//! - [`permission`]: Host permissions and the prompt's answer
//!
//! # Examples
//!
//! ```
//! use finassist::domain::{InputState, Mode, RequestOutcome};
//!
//! let mut input = InputState::default();
//! input.set_ticker("nvda");
//! assert_eq!(input.ticker_text, "NVDA");
//! assert_eq!(Mode::default(), Mode::Stock);
//! assert_eq!(RequestOutcome::default(), RequestOutcome::Idle);
//! ```

pub mod error;
pub mod input;
pub mod mode;
pub mod outcome;
pub mod permission;

pub use error::{FinAssistError, Result};
pub use input::{InputState, SelectedFile};
pub use mode::Mode;
pub use outcome::{RequestOutcome, GENERIC_FAILURE_MESSAGE};
pub use permission::{Permission, PermissionState};
