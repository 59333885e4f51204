//! Dispatch tickets.
//!
//! Every dispatch is tagged with a [`DispatchTicket`]. The ticket travels with
//! the request through Zellij's `web_request` context map (and through worker
//! messages for document uploads) and comes back with the settlement. A
//! settlement whose ticket no longer matches the in-flight one is stale and is
//! dropped.

use crate::domain::Mode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const GENERATION_KEY: &str = "dispatch_generation";
const MODE_KEY: &str = "dispatch_mode";

/// Identity of one dispatch: a monotonically increasing generation plus the
/// mode that was active when it was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DispatchTicket {
    pub generation: u64,
    pub mode: Mode,
}

impl DispatchTicket {
    #[must_use]
    pub const fn new(generation: u64, mode: Mode) -> Self {
        Self { generation, mode }
    }

    /// Encodes the ticket as a `web_request` context map.
    #[must_use]
    pub fn to_context(self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (GENERATION_KEY.to_string(), self.generation.to_string()),
            (MODE_KEY.to_string(), self.mode.as_str().to_string()),
        ])
    }

    /// Decodes a ticket from a `web_request` context map.
    ///
    /// Returns `None` when either key is missing or malformed, which happens
    /// for web requests this plugin did not originate.
    ///
    /// ```
    /// use finassist::api::DispatchTicket;
    /// use finassist::domain::Mode;
    ///
    /// let ticket = DispatchTicket::new(7, Mode::News);
    /// assert_eq!(DispatchTicket::from_context(&ticket.to_context()), Some(ticket));
    /// ```
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let generation = context.get(GENERATION_KEY)?.parse().ok()?;
        let mode = context.get(MODE_KEY)?.parse().ok()?;
        Some(Self { generation, mode })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_or_partial_context_yields_no_ticket() {
        assert_eq!(DispatchTicket::from_context(&BTreeMap::new()), None);

        let mut context = DispatchTicket::new(3, Mode::Stock).to_context();
        context.insert(GENERATION_KEY.to_string(), "three".to_string());
        assert_eq!(DispatchTicket::from_context(&context), None);

        let mut context = DispatchTicket::new(3, Mode::Stock).to_context();
        context.remove(MODE_KEY);
        assert_eq!(DispatchTicket::from_context(&context), None);
    }
}
