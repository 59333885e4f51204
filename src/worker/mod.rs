//! Background worker thread for document reads.
//!
//! Uploading a document needs its bytes, and reading them is blocking I/O.
//! The worker does that read on a Zellij worker thread and posts the content
//! back to the plugin as a JSON message.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types, each tagged with a dispatch ticket
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::DocumentWorker;
pub use messages::{WorkerMessage, WorkerResponse};
