//! Worker thread implementation for document reads.
//!
//! Reading a document from the host filesystem can take a while for large PDFs,
//! so it runs on a Zellij worker thread instead of the plugin's render loop.
//! The worker is stateless apart from its one-time tracing setup.

use crate::api::DispatchTicket;
use crate::domain::error::Result;
use crate::domain::SelectedFile;
use crate::infrastructure::paths::{resolve_document_path, strip_host_prefix};
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::atomic::{AtomicBool, Ordering};

/// Tracks whether worker tracing has been initialized.
///
/// Used to ensure tracing is only set up once per worker thread lifetime.
static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Worker thread state for reading selected documents.
#[derive(Debug, Default)]
pub struct DocumentWorker;

impl DocumentWorker {
    /// Processes a worker message and returns the response to post back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let span = tracing::debug_span!(
            "worker_handle_message",
            generation = message.ticket().generation,
            mode = %message.ticket().mode
        );
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadDocument { ticket, path, .. } => match read_document(&path) {
                Ok(content) => {
                    tracing::debug!(bytes = content.len(), "document read");
                    WorkerResponse::DocumentLoaded {
                        ticket,
                        file_name: SelectedFile::new(path.as_str()).file_name(),
                        content,
                    }
                }
                Err(e) => {
                    let shown = strip_host_prefix(&resolve_document_path(&path).to_string_lossy());
                    tracing::warn!(path = %shown, error = %e, "failed to read document");
                    WorkerResponse::DocumentUnreadable {
                        ticket,
                        path,
                        message: format!("{shown}: {e}"),
                    }
                }
            },
        }
    }

    /// Decodes a JSON message payload, handles it and encodes the response.
    ///
    /// Initializes worker tracing on first use, with the message's trace
    /// level. A message that does not decode but still carries its ticket is
    /// answered with [`WorkerResponse::DocumentUnreadable`], so the dispatch
    /// it belongs to settles instead of waiting forever.
    ///
    /// # Errors
    ///
    /// Returns an error if no ticket can be recovered from the payload. The
    /// plugin then has nothing to settle; its own payloads always carry one.
    pub fn process_payload(&mut self, payload: &str) -> Result<String> {
        let response = match serde_json::from_str::<WorkerMessage>(payload) {
            Ok(message) => {
                init_worker_tracing(message.trace_level());
                self.handle_message(message)
            }
            Err(e) => {
                init_worker_tracing(None);
                let Some(ticket) = ticket_in_payload(payload) else {
                    return Err(e.into());
                };
                tracing::warn!(generation = ticket.generation, error = %e, "undecodable worker message");
                WorkerResponse::DocumentUnreadable {
                    ticket,
                    path: String::new(),
                    message: format!("invalid worker message: {e}"),
                }
            }
        };
        Ok(serde_json::to_string(&response)?)
    }
}

fn init_worker_tracing(trace_level: Option<&str>) {
    if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
        crate::observability::init_tracing(&crate::Config {
            trace_level: trace_level.map(String::from),
            ..Default::default()
        });
    }
}

/// Recovers the ticket of a message whose other fields did not decode.
fn ticket_in_payload(payload: &str) -> Option<DispatchTicket> {
    let value: serde_json::Value = serde_json::from_str(payload).ok()?;
    value
        .as_object()?
        .values()
        .find_map(|fields| serde_json::from_value(fields.get("ticket")?.clone()).ok())
}

fn read_document(path: &str) -> Result<Vec<u8>> {
    let resolved = resolve_document_path(path);
    tracing::debug!(path = %path, resolved = ?resolved, "reading document");
    Ok(std::fs::read(&resolved)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Mode;

    #[test]
    fn missing_file_is_reported_with_ticket() {
        let ticket = DispatchTicket::new(4, Mode::Document);
        let response = DocumentWorker.handle_message(WorkerMessage::load_document(
            ticket,
            "/definitely/not/here/finassist.pdf",
        ));

        match response {
            WorkerResponse::DocumentUnreadable { ticket: t, path, message } => {
                assert_eq!(t, ticket);
                assert_eq!(path, "/definitely/not/here/finassist.pdf");
                assert!(message.starts_with("/definitely/not/here/finassist.pdf: "));
            }
            other => panic!("expected DocumentUnreadable, got {other:?}"),
        }
    }

    #[test]
    fn garbage_payload_is_an_error() {
        assert!(DocumentWorker.process_payload("not json").is_err());
    }

    #[test]
    fn malformed_message_with_ticket_still_settles() {
        let ticket = DispatchTicket::new(9, Mode::Document);
        let payload = serde_json::json!({
            "LoadDocument": { "ticket": ticket, "path": 42 }
        })
        .to_string();

        let reply = DocumentWorker.process_payload(&payload).unwrap();
        match serde_json::from_str::<WorkerResponse>(&reply).unwrap() {
            WorkerResponse::DocumentUnreadable { ticket: t, message, .. } => {
                assert_eq!(t, ticket);
                assert!(message.starts_with("invalid worker message: "));
            }
            other => panic!("expected DocumentUnreadable, got {other:?}"),
        }
    }

    #[test]
    fn trace_level_is_optional_on_the_wire() {
        let ticket = DispatchTicket::new(1, Mode::Document);
        let payload = serde_json::json!({
            "LoadDocument": { "ticket": ticket, "path": "a.pdf" }
        })
        .to_string();

        let message: WorkerMessage = serde_json::from_str(&payload).unwrap();
        assert_eq!(message, WorkerMessage::load_document(ticket, "a.pdf"));
        assert_eq!(message.trace_level(), None);
    }
}
