//! Request lifecycle state.

/// Message shown when a failure carries no structured `error` field.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred";

/// The single slot holding the lifecycle of the most recent dispatch.
///
/// Exactly one variant holds at a time. Payloads and messages are display
/// strings and are never parsed or truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Nothing dispatched since start-up or the last mode switch.
    #[default]
    Idle,
    /// A dispatch is in flight.
    Loading,
    /// The backend returned a payload.
    Success(String),
    /// The backend reported an error, or no response was obtained.
    Failure(String),
}

impl RequestOutcome {
    /// Failure carrying [`GENERIC_FAILURE_MESSAGE`].
    #[must_use]
    pub fn generic_failure() -> Self {
        Self::Failure(GENERIC_FAILURE_MESSAGE.to_string())
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}
