//! Structured tracing with file-based JSON export.
//!
//! The plugin cannot write to a terminal of its own, so `tracing` events are
//! serialized as JSON lines into a rotating file for offline debugging.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt::layer().json() → FileWriter → trace file
//! ```
//!
//! # Features
//!
//! - **File-Based Export**: Traces written to `~/.local/share/zellij/finassist/finassist-trace.log`
//! - **Automatic Rotation**: Files rotate at 10 MiB with 3-backup retention
//! - **JSON Lines**: One event per line with its current span
//!
//! # Configuration
//!
//! Trace level comes from the `trace_level` plugin option, defaulting to
//! `"info"`. Any `EnvFilter` directive is accepted, e.g.
//! `"finassist::api=debug,info"`.
//!
//! # Modules
//!
//! - [`init`]: Tracing initialization and subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

pub mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::{init_tracing, TRACE_FILE_NAME};
