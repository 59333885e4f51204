//! Backend API client layer.
//!
//! Everything the plugin needs to talk to the financial assistant API, kept
//! free of Zellij calls so it can be tested on the host:
//!
//! - [`request`]: URL and request construction per mode
//! - [`multipart`]: `multipart/form-data` encoding for uploads
//! - [`response`]: Normalization of settlements into a [`RequestOutcome`](crate::domain::RequestOutcome)
//! - [`ticket`]: Dispatch tickets carried through request context

pub mod multipart;
pub mod request;
pub mod response;
pub mod ticket;

pub use multipart::{EncodedForm, MultipartForm};
pub use request::{ApiEndpoint, HttpMethod, OutboundRequest, DEFAULT_API_BASE};
pub use response::{normalize_response, transport_failure};
pub use ticket::DispatchTicket;
