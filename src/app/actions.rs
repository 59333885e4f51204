//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! plugin shim executes them in order against the Zellij host API, which keeps
//! the handler free of host calls and testable on a normal target.
//!
//! # Example
//!
//! ```rust
//! use finassist::api::{ApiEndpoint, DispatchTicket};
//! use finassist::app::Action;
//! use finassist::domain::Mode;
//!
//! let ticket = DispatchTicket::new(1, Mode::Stock);
//! let actions = vec![
//!     Action::SendRequest(ApiEndpoint::default().stock_request("AAPL", ticket)),
//!     Action::ScheduleTick,
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::api::OutboundRequest;
use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Performs an HTTP request through the host (`web_request`).
    ///
    /// The request's ticket travels in the request context and comes back with
    /// the `WebRequestResult` event.
    SendRequest(OutboundRequest),

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),

    /// Arms a short timer that drives the loading spinner.
    ScheduleTick,

    /// Hides the plugin pane.
    CloseFocus,
}
