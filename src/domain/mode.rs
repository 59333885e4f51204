//! Query modes.
//!
//! The plugin offers three mutually exclusive ways to query the backend. The
//! active [`Mode`] decides which input line is shown, which request a dispatch
//! builds, and which response field carries the payload.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three mutually exclusive query types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Ticker lookup (`GET stock/{ticker}`).
    #[default]
    Stock,
    /// News search (`GET news/{query}`).
    News,
    /// Document upload and analysis (`POST upload`).
    Document,
}

impl Mode {
    /// All modes in tab order.
    pub const ALL: [Self; 3] = [Self::Stock, Self::News, Self::Document];

    /// Response body field holding the success payload for this mode.
    ///
    /// ```
    /// use finassist::domain::Mode;
    ///
    /// assert_eq!(Mode::Stock.payload_field(), "info");
    /// assert_eq!(Mode::News.payload_field(), "news");
    /// assert_eq!(Mode::Document.payload_field(), "summary");
    /// ```
    #[must_use]
    pub const fn payload_field(self) -> &'static str {
        match self {
            Self::Stock => "info",
            Self::News => "news",
            Self::Document => "summary",
        }
    }

    /// Tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stock => "Stock Info",
            Self::News => "Financial News",
            Self::Document => "Document Analysis",
        }
    }

    /// Stable lowercase identifier, used in config and request context.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stock => "stock",
            Self::News => "news",
            Self::Document => "document",
        }
    }

    /// The mode after this one in tab order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Stock => Self::News,
            Self::News => Self::Document,
            Self::Document => Self::Stock,
        }
    }

    /// The mode before this one in tab order, wrapping around.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Stock => Self::Document,
            Self::News => Self::Stock,
            Self::Document => Self::News,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stock" => Ok(Self::Stock),
            "news" => Ok(Self::News),
            "document" | "upload" => Ok(Self::Document),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_and_previous_cycle_through_all_modes() {
        for mode in Mode::ALL {
            assert_eq!(mode.next().previous(), mode);
            assert_eq!(mode.next().next().next(), mode);
        }
        assert_eq!(Mode::Document.next(), Mode::Stock);
        assert_eq!(Mode::Stock.previous(), Mode::Document);
    }

    #[test]
    fn parses_identifiers_case_insensitively() {
        assert_eq!("News".parse::<Mode>(), Ok(Mode::News));
        assert_eq!(" document ".parse::<Mode>(), Ok(Mode::Document));
        assert!("crypto".parse::<Mode>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for mode in Mode::ALL {
            assert_eq!(mode.to_string().parse::<Mode>(), Ok(mode));
        }
    }
}
