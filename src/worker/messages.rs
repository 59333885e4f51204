//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the main plugin
//! thread and the document worker. Every message carries the
//! [`DispatchTicket`] of the dispatch it belongs to, so the plugin can drop
//! responses for dispatches that have since been abandoned.

use crate::api::DispatchTicket;
use serde::{Deserialize, Serialize};

/// Messages sent from the main thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read the selected document so it can be uploaded.
    LoadDocument {
        /// Dispatch this read belongs to.
        ticket: DispatchTicket,

        /// Path as the user entered it (resolved by the worker).
        path: String,

        /// Tracing directive for the worker thread, applied on its first
        /// message. `None` logs at `info`.
        #[serde(default)]
        trace_level: Option<String>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub fn load_document(ticket: DispatchTicket, path: impl Into<String>) -> Self {
        Self::LoadDocument {
            ticket,
            path: path.into(),
            trace_level: None,
        }
    }

    /// Sets the tracing directive the worker initializes with.
    #[must_use]
    pub fn with_trace_level(mut self, level: Option<String>) -> Self {
        match &mut self {
            Self::LoadDocument { trace_level, .. } => *trace_level = level,
        }
        self
    }

    #[must_use]
    pub fn trace_level(&self) -> Option<&str> {
        match self {
            Self::LoadDocument { trace_level, .. } => trace_level.as_deref(),
        }
    }

    /// Ticket of the dispatch this message belongs to.
    #[must_use]
    pub const fn ticket(&self) -> DispatchTicket {
        match self {
            Self::LoadDocument { ticket, .. } => *ticket,
        }
    }
}

/// Responses sent from the worker thread back to the main thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The document was read.
    DocumentLoaded {
        ticket: DispatchTicket,

        /// Final path component, used as the upload filename.
        file_name: String,

        /// Raw file bytes.
        content: Vec<u8>,
    },

    /// The document could not be read.
    DocumentUnreadable {
        ticket: DispatchTicket,

        /// Path as the user entered it.
        path: String,

        /// Human-readable I/O error.
        message: String,
    },
}

impl WorkerResponse {
    /// Ticket of the dispatch this response belongs to.
    #[must_use]
    pub const fn ticket(&self) -> DispatchTicket {
        match self {
            Self::DocumentLoaded { ticket, .. } | Self::DocumentUnreadable { ticket, .. } => *ticket,
        }
    }
}
