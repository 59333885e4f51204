//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input, request
//! settlements and worker responses, translating them into state changes and
//! action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime or worker thread
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Modes**: `SwitchMode`, `NextMode`, `PreviousMode`
//! - **Input**: `Char`, `Backspace`, `ClearInput`, `SelectFile`
//! - **Dispatch**: `Dispatch`, `ResponseArrived`, `WorkerResponse`
//! - **Display**: `Tick`, scrolling events
//! - **System**: `CloseFocus`, `PermissionsRequested`, `PermissionsResult`
//!
//! # Dispatch Flow
//!
//! ```text
//! Stock/News:  Dispatch → SendRequest ─────────────────────────────→ ResponseArrived → settle
//! Document:    Dispatch → PostToWorker → DocumentLoaded → SendRequest → ResponseArrived → settle
//!                                      ↘ DocumentUnreadable → settle (generic failure)
//! ```
//!
//! # Example
//!
//! ```rust
//! use finassist::api::ApiEndpoint;
//! use finassist::app::{handle_event, Action, AppState, Event};
//! use finassist::domain::Mode;
//! use finassist::ui::Theme;
//!
//! let mut state = AppState::new(Mode::News, ApiEndpoint::default(), Theme::default());
//! for c in "Tesla earnings".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Dispatch)?;
//! match &actions[0] {
//!     Action::SendRequest(request) => assert!(request.url.ends_with("/news/Tesla%20earnings")),
//!     other => panic!("unexpected action {other:?}"),
//! }
//! # Ok::<(), finassist::FinAssistError>(())
//! ```

use crate::api::{normalize_response, transport_failure, DispatchTicket, MultipartForm};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{Mode, Permission, PermissionState, RequestOutcome};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Multipart field name the upload endpoint reads the document from.
const UPLOAD_FIELD: &str = "file";

/// Events triggered by user input, request settlements or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Activates a specific mode.
    SwitchMode(Mode),
    /// Activates the next mode in tab order (wraps).
    NextMode,
    /// Activates the previous mode in tab order (wraps).
    PreviousMode,

    /// Appends a character to the active mode's input.
    Char(char),
    /// Removes the last character from the active mode's input.
    Backspace,
    /// Empties the active mode's input.
    ClearInput,
    /// Replaces the document selection from outside the input line.
    ///
    /// `None` or an empty path clears the selection.
    SelectFile(Option<String>),

    /// Sends the active mode's request.
    Dispatch,

    /// A `web_request` settled.
    ResponseArrived {
        /// Ticket recovered from the request context, if it was intact.
        ticket: Option<DispatchTicket>,
        /// HTTP status code (Zellij reports transport errors as a 4xx with a
        /// plain-text body).
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
    },

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),

    /// Spinner timer elapsed.
    Tick,

    /// Scrolls the result up one line.
    ScrollUp,
    /// Scrolls the result down one line.
    ScrollDown,
    /// Scrolls the result up one screen.
    PageUp,
    /// Scrolls the result down one screen.
    PageDown,
    /// Jumps to the first result line.
    ScrollHome,
    /// Jumps to the last screen of the result.
    ScrollEnd,

    /// Hides the plugin pane.
    CloseFocus,

    /// The permission prompt was shown.
    PermissionsRequested,

    /// Reports the user's answer to the permission request.
    PermissionsResult {
        /// Permissions the user refused; empty when everything was granted.
        denied: Vec<Permission>,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Guard-rejected dispatches and stale settlements
/// return `(false, vec![])` and leave state untouched.
///
/// # Errors
///
/// Currently infallible; the `Result` lets the shim treat every handler the
/// same way and keeps room for fallible transitions.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = %event_name(event)).entered();

    match event {
        Event::SwitchMode(mode) => {
            state.switch_mode(*mode);
            Ok((true, vec![]))
        }
        Event::NextMode => {
            state.switch_mode(state.mode.next());
            Ok((true, vec![]))
        }
        Event::PreviousMode => {
            state.switch_mode(state.mode.previous());
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if c.is_control() {
                return Ok((false, vec![]));
            }
            state.edit_active_text(|text| text.push(*c));
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.active_text().is_empty() {
                return Ok((false, vec![]));
            }
            state.edit_active_text(|text| {
                text.pop();
            });
            Ok((true, vec![]))
        }
        Event::ClearInput => {
            if state.active_text().is_empty() {
                return Ok((false, vec![]));
            }
            state.edit_active_text(String::clear);
            Ok((true, vec![]))
        }
        Event::SelectFile(path) => {
            let path = path.as_deref().map(str::trim).unwrap_or_default();
            tracing::debug!(path = %path, "document selected externally");
            state.input.set_file_path(path);
            Ok((state.mode == Mode::Document, vec![]))
        }
        Event::Dispatch => {
            if state.permissions.is_pending() {
                tracing::debug!("dispatch ignored: permission prompt unanswered");
                return Ok((false, vec![]));
            }

            let Some(ticket) = state.begin_dispatch() else {
                return Ok((false, vec![]));
            };

            // The host drops calls it was not allowed to make, so nothing
            // would ever settle this ticket.
            if let Some(permission) = state.permissions.refused_for(ticket.mode) {
                tracing::warn!(permission = ?permission, mode = %ticket.mode, "dispatch failed: permission denied");
                return Ok((state.settle(ticket, transport_failure()), vec![]));
            }

            let request = match ticket.mode {
                Mode::Stock => Action::SendRequest(
                    state.api.stock_request(&state.input.ticker_text, ticket),
                ),
                Mode::News => Action::SendRequest(
                    state.api.news_request(&state.input.news_query_text, ticket),
                ),
                Mode::Document => {
                    let path = state.input.file_path_text().to_string();
                    tracing::debug!(path = %path, "requesting document read");
                    Action::PostToWorker(
                        WorkerMessage::load_document(ticket, path)
                            .with_trace_level(state.trace_level.clone()),
                    )
                }
            };

            let mut actions = vec![request];
            if !state.tick_scheduled {
                state.tick_scheduled = true;
                actions.push(Action::ScheduleTick);
            }
            Ok((true, actions))
        }
        Event::ResponseArrived { ticket, status, body } => {
            let Some(ticket) = ticket else {
                tracing::warn!(status = status, "response without dispatch ticket, ignoring");
                return Ok((false, vec![]));
            };

            tracing::debug!(
                generation = ticket.generation,
                mode = %ticket.mode,
                status = status,
                body_len = body.len(),
                "response arrived"
            );

            if !state.is_current(*ticket) {
                tracing::debug!(generation = ticket.generation, "discarding stale response");
                return Ok((false, vec![]));
            }

            let outcome = normalize_response(ticket.mode, *status, body);
            if let RequestOutcome::Failure(message) = &outcome {
                tracing::info!(status = status, message = %message, "request failed");
            }
            Ok((state.settle(*ticket, outcome), vec![]))
        }
        Event::WorkerResponse(response) => {
            tracing::debug!(
                generation = response.ticket().generation,
                current = state.is_current(response.ticket()),
                "worker response arrived"
            );
            match response {
                WorkerResponse::DocumentLoaded { ticket, file_name, content } => {
                    if !state.is_current(*ticket) {
                        tracing::debug!(
                            generation = ticket.generation,
                            "document read for abandoned dispatch, not uploading"
                        );
                        return Ok((false, vec![]));
                    }

                    tracing::debug!(file_name = %file_name, bytes = content.len(), "uploading document");
                    let form = MultipartForm::new()
                        .file(UPLOAD_FIELD, file_name, content.clone())
                        .encode();
                    Ok((false, vec![Action::SendRequest(state.api.upload_request(form, *ticket))]))
                }
                WorkerResponse::DocumentUnreadable { ticket, path, message } => {
                    tracing::warn!(path = %path, error = %message, "document could not be read");
                    Ok((state.settle(*ticket, transport_failure()), vec![]))
                }
            }
        }
        Event::Tick => {
            state.tick_scheduled = false;
            if !state.outcome.is_loading() {
                return Ok((false, vec![]));
            }
            state.spinner_tick = state.spinner_tick.wrapping_add(1);
            state.tick_scheduled = true;
            Ok((true, vec![Action::ScheduleTick]))
        }
        Event::ScrollUp => Ok((state.scroll_by(-1), vec![])),
        Event::ScrollDown => Ok((state.scroll_by(1), vec![])),
        Event::PageUp => Ok((state.page_by(-1), vec![])),
        Event::PageDown => Ok((state.page_by(1), vec![])),
        Event::ScrollHome => Ok((state.scroll_to_start(), vec![])),
        Event::ScrollEnd => Ok((state.scroll_to_end(), vec![])),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::PermissionsRequested => {
            state.permissions = PermissionState::Pending;
            Ok((false, vec![]))
        }
        Event::PermissionsResult { denied } => {
            if denied.is_empty() {
                tracing::debug!("permissions granted");
            } else {
                tracing::warn!(denied = ?denied, "permissions denied, affected dispatches will fail");
            }
            state.permissions = PermissionState::Answered { denied: denied.clone() };
            Ok((false, vec![]))
        }
    }
}

/// Short event label for spans; avoids dumping document bytes into traces.
fn event_name(event: &Event) -> &'static str {
    match event {
        Event::SwitchMode(_) => "SwitchMode",
        Event::NextMode => "NextMode",
        Event::PreviousMode => "PreviousMode",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::ClearInput => "ClearInput",
        Event::SelectFile(_) => "SelectFile",
        Event::Dispatch => "Dispatch",
        Event::ResponseArrived { .. } => "ResponseArrived",
        Event::WorkerResponse(WorkerResponse::DocumentLoaded { .. }) => "DocumentLoaded",
        Event::WorkerResponse(WorkerResponse::DocumentUnreadable { .. }) => "DocumentUnreadable",
        Event::Tick => "Tick",
        Event::ScrollUp => "ScrollUp",
        Event::ScrollDown => "ScrollDown",
        Event::PageUp => "PageUp",
        Event::PageDown => "PageDown",
        Event::ScrollHome => "ScrollHome",
        Event::ScrollEnd => "ScrollEnd",
        Event::CloseFocus => "CloseFocus",
        Event::PermissionsRequested => "PermissionsRequested",
        Event::PermissionsResult { .. } => "PermissionsResult",
    }
}
