//! Zellij plugin wrapper and entry point.
//!
//! This module provides the thin integration layer between the FinAssist library
//! and the Zellij plugin system. It implements the `ZellijPlugin` and
//! `ZellijWorker` traits, maps Zellij events to library events and executes
//! the library's actions against the host API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────┐
//! │    Zellij Main Thread       │
//! │  ┌──────────────────────┐   │
//! │  │   State (plugin)     │   │  ← UI state, event handling
//! │  └──────────────────────┘   │
//! │       │            ▲        │
//! │  web_request   WebRequestResult
//! │       │            │        │
//! │       ▼   IPC      │        │
//! │  ┌──────────────────────┐   │
//! │  │  FinAssistWorker     │   │  ← Document reads
//! │  │  (worker thread)     │   │
//! │  └──────────────────────┘   │
//! └─────────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess` and `FullHdAccess`
//! 3. **Subscribe**: Key, `WebRequestResult`, `CustomMessage`, `Timer`, permission results
//! 4. **Update**: Map events, delegate to `handle_event`, execute actions
//! 5. **Render**: Record the pane size, call the library renderer
//!
//! # Event Mapping
//!
//! - `Key` → mode, editing, dispatch and scrolling events
//! - `WebRequestResult` → `Event::ResponseArrived` (ticket read from the context)
//! - `CustomMessage` from the worker → `Event::WorkerResponse`
//! - `Timer` → `Event::Tick`
//! - pipe `select_file` → `Event::SelectFile`
//!
//! # Keybindings
//!
//! - `Tab` / `Shift+Tab`: Next / previous mode
//! - `Alt+1` / `Alt+2` / `Alt+3`: Stock / News / Document
//! - `Enter`: Submit
//! - `Backspace`: Delete last character
//! - `Ctrl+u`: Clear the input line
//! - `Up`/`Down`, `PageUp`/`PageDown`, `Home`/`End`: Scroll the result
//! - `Esc`: Hide the plugin
//!
//! Everything else that produces a character is typed into the active input.

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
register_plugin!(shim::State);
#[cfg(target_family = "wasm")]
register_worker!(shim::FinAssistWorker, finassist_worker, FINASSIST_WORKER);

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("finassist is a Zellij plugin: build it with --target wasm32-wasip1 and load the .wasm from Zellij");
}

#[cfg(target_family = "wasm")]
mod shim {
    use std::collections::BTreeMap;
    use zellij_tile::prelude::*;
    use zellij_tile::shim::{post_message_to, post_message_to_plugin};

    use finassist::api::{HttpMethod, OutboundRequest};
    use finassist::worker::{DocumentWorker, WorkerMessage, WorkerResponse};
    use finassist::{handle_event, Action, Config, DispatchTicket, Event, Mode, Permission};

    /// Worker name used for IPC; Zellij resolves it to `finassist_worker`.
    const WORKER_NAME: &str = "finassist";

    /// Seconds between spinner frames.
    const SPINNER_INTERVAL_SECS: f64 = 0.1;

    /// Plugin state wrapper.
    pub struct State {
        /// Core application state from library layer.
        app: finassist::app::AppState,
    }

    impl Default for State {
        fn default() -> Self {
            Self {
                app: finassist::initialize(&Config::default()),
            }
        }
    }

    impl ZellijPlugin for State {
        /// Initializes the plugin on load.
        ///
        /// # Permissions
        ///
        /// - `WebAccess`: Backend requests
        /// - `FullHdAccess`: Reading the selected document
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            finassist::observability::init_tracing(&config);

            let span = tracing::debug_span!("plugin_load");
            let _guard = span.entered();

            tracing::debug!(api_base = %config.api_base, start_mode = %config.start_mode, "parsed configuration");
            self.app = finassist::initialize(&config);

            request_permission(&[PermissionType::WebAccess, PermissionType::FullHdAccess]);
            self.dispatch(&Event::PermissionsRequested);
            subscribe(&[
                EventType::Key,
                EventType::WebRequestResult,
                EventType::CustomMessage,
                EventType::Timer,
                EventType::PermissionRequestResult,
            ]);

            tracing::debug!("plugin load complete");
        }

        /// Handles incoming Zellij events.
        ///
        /// Returns `true` if the UI should re-render.
        fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
            let event_name = Self::get_event_name(&event);
            let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
            let _guard = span.entered();

            let our_event = match event {
                zellij_tile::prelude::Event::Key(ref key) => match Self::map_key_event(key) {
                    Some(event) => event,
                    None => return false,
                },
                zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                    Event::ResponseArrived {
                        ticket: DispatchTicket::from_context(&context),
                        status,
                        body,
                    }
                }
                zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                    match Self::map_custom_message_event(&message, &payload) {
                        Some(event) => event,
                        None => return false,
                    }
                }
                zellij_tile::prelude::Event::Timer(_) => Event::Tick,
                zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                    Event::PermissionsResult {
                        denied: match status {
                            PermissionStatus::Granted => vec![],
                            PermissionStatus::Denied => {
                                vec![Permission::WebAccess, Permission::FullHdAccess]
                            }
                        },
                    }
                }
                _ => return false,
            };

            self.dispatch(&our_event)
        }

        /// Handles `zellij pipe --name select_file -- <path>`.
        fn pipe(&mut self, pipe_message: PipeMessage) -> bool {
            if pipe_message.name != finassist::SELECT_FILE_PIPE {
                return false;
            }

            let should_render = self.dispatch(&Event::SelectFile(pipe_message.payload.clone()));

            if let PipeSource::Cli(pipe_id) = &pipe_message.source {
                let path = self.app.input.file_path_text();
                let reply = if path.is_empty() {
                    "document selection cleared\n".to_string()
                } else {
                    format!("selected {path}\n")
                };
                cli_pipe_output(pipe_id, &reply);
                unblock_cli_pipe_input(pipe_id);
            }

            should_render
        }

        /// Renders the plugin UI.
        fn render(&mut self, rows: usize, cols: usize) {
            self.app.set_viewport(rows, cols);
            finassist::ui::render(&self.app, rows, cols);
        }
    }

    impl State {
        /// Runs one library event and executes its actions.
        fn dispatch(&mut self, event: &Event) -> bool {
            match handle_event(&mut self.app, event) {
                Ok((should_render, actions)) => {
                    tracing::debug!(
                        action_count = actions.len(),
                        should_render = should_render,
                        "event handled successfully"
                    );
                    for action in actions {
                        Self::execute_action(action);
                    }
                    should_render
                }
                Err(e) => {
                    tracing::error!(error = %e, "error handling event");
                    false
                }
            }
        }

        /// Gets a string name for a Zellij event for logging purposes.
        fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
            match event {
                zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
                zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                    format!("WebRequestResult({status})")
                }
                zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
                zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
                zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                    "PermissionRequestResult".to_string()
                }
                _ => "Other".to_string(),
            }
        }

        /// Maps keyboard events to application events.
        fn map_key_event(key: &KeyWithModifier) -> Option<Event> {
            tracing::trace!(bare_key = ?key.bare_key, "key event");

            if key.has_modifiers(&[KeyModifier::Ctrl]) {
                return match key.bare_key {
                    BareKey::Char('u') => Some(Event::ClearInput),
                    _ => None,
                };
            }

            if key.has_modifiers(&[KeyModifier::Alt]) {
                return match key.bare_key {
                    BareKey::Char('1') => Some(Event::SwitchMode(Mode::Stock)),
                    BareKey::Char('2') => Some(Event::SwitchMode(Mode::News)),
                    BareKey::Char('3') => Some(Event::SwitchMode(Mode::Document)),
                    _ => None,
                };
            }

            if key.has_modifiers(&[KeyModifier::Shift]) {
                return match key.bare_key {
                    BareKey::Tab => Some(Event::PreviousMode),
                    BareKey::Char(c) => Some(Event::Char(c)),
                    _ => None,
                };
            }

            if !key.has_no_modifiers() {
                return None;
            }

            Some(match key.bare_key {
                BareKey::Tab => Event::NextMode,
                BareKey::Enter => Event::Dispatch,
                BareKey::Backspace => Event::Backspace,
                BareKey::Esc => Event::CloseFocus,
                BareKey::Up => Event::ScrollUp,
                BareKey::Down => Event::ScrollDown,
                BareKey::PageUp => Event::PageUp,
                BareKey::PageDown => Event::PageDown,
                BareKey::Home => Event::ScrollHome,
                BareKey::End => Event::ScrollEnd,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            })
        }

        /// Maps custom message events to application events.
        fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
            if message != WORKER_NAME {
                tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
                return None;
            }

            match serde_json::from_str::<WorkerResponse>(payload) {
                Ok(response) => Some(Event::WorkerResponse(response)),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to deserialize worker response");
                    None
                }
            }
        }

        /// Posts a message to the worker thread as JSON.
        fn post_worker_message(message: &WorkerMessage) {
            match serde_json::to_string(message) {
                Ok(payload) => {
                    tracing::debug!(payload_len = payload.len(), "posting message to worker");
                    post_message_to(PluginMessage {
                        worker_name: Some(WORKER_NAME.to_string()),
                        name: WORKER_NAME.to_string(),
                        payload,
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to serialize worker message");
                }
            }
        }

        fn send_request(request: OutboundRequest) {
            let verb = match request.method {
                HttpMethod::Get => HttpVerb::Get,
                HttpMethod::Post => HttpVerb::Post,
            };
            tracing::debug!(
                url = %request.url,
                method = ?request.method,
                body_len = request.body.len(),
                generation = request.ticket.generation,
                "sending web request"
            );
            web_request(
                request.url,
                verb,
                request.headers,
                request.body,
                request.ticket.to_context(),
            );
        }

        /// Executes an action returned from event handling.
        fn execute_action(action: Action) {
            match action {
                Action::SendRequest(request) => Self::send_request(request),
                Action::PostToWorker(message) => Self::post_worker_message(&message),
                Action::ScheduleTick => set_timeout(SPINNER_INTERVAL_SECS),
                Action::CloseFocus => {
                    tracing::debug!("hiding plugin");
                    hide_self();
                }
            }
        }
    }

    /// Worker entry wrapper around the library's [`DocumentWorker`].
    #[derive(Default, serde::Serialize, serde::Deserialize)]
    pub struct FinAssistWorker {
        #[serde(skip)]
        inner: DocumentWorker,
    }

    impl ZellijWorker<'_> for FinAssistWorker {
        /// Reads the requested document and posts the response back under the
        /// same message name.
        fn on_message(&mut self, message: String, payload: String) {
            match self.inner.process_payload(&payload) {
                Ok(payload) => post_message_to_plugin(PluginMessage {
                    name: message,
                    payload,
                    worker_name: None,
                }),
                // No ticket could be recovered, so there is no dispatch to settle.
                Err(e) => tracing::error!(error = %e, "worker failed to process message"),
            }
        }
    }
}
