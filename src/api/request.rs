//! Outbound request builders.
//!
//! Turns mode input into the exact request shape each backend endpoint expects.
//! Builders are pure: they describe the request and the plugin shim performs it
//! with `web_request`.

use super::multipart::EncodedForm;
use super::ticket::DispatchTicket;
use std::collections::BTreeMap;

/// Base address used when the plugin configuration does not set `api_base`.
pub const DEFAULT_API_BASE: &str = "http://localhost:5001/api";

/// HTTP verbs the plugin issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A fully described request, ready to hand to `web_request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub ticket: DispatchTicket,
}

/// The backend API, rooted at a fixed base address.
///
/// # Example
///
/// ```
/// use finassist::api::ApiEndpoint;
///
/// let api = ApiEndpoint::new("http://localhost:5001/api/");
/// assert_eq!(api.stock_url("AAPL"), "http://localhost:5001/api/stock/AAPL");
/// assert_eq!(
///     api.news_url("Tesla earnings"),
///     "http://localhost:5001/api/news/Tesla%20earnings"
/// );
/// assert_eq!(api.upload_url(), "http://localhost:5001/api/upload");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base: String,
}

impl Default for ApiEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl ApiEndpoint {
    /// Creates an endpoint. Trailing slashes on `base` are ignored.
    #[must_use]
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Ticker lookup URL. The ticker is embedded as typed, without escaping.
    #[must_use]
    pub fn stock_url(&self, ticker: &str) -> String {
        format!("{}/stock/{ticker}", self.base)
    }

    /// News search URL with the query percent-encoded as one path segment.
    #[must_use]
    pub fn news_url(&self, query: &str) -> String {
        format!("{}/news/{}", self.base, urlencoding::encode(query))
    }

    #[must_use]
    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.base)
    }

    #[must_use]
    pub fn stock_request(&self, ticker: &str, ticket: DispatchTicket) -> OutboundRequest {
        OutboundRequest {
            method: HttpMethod::Get,
            url: self.stock_url(ticker),
            headers: json_headers(),
            body: Vec::new(),
            ticket,
        }
    }

    #[must_use]
    pub fn news_request(&self, query: &str, ticket: DispatchTicket) -> OutboundRequest {
        OutboundRequest {
            method: HttpMethod::Get,
            url: self.news_url(query),
            headers: json_headers(),
            body: Vec::new(),
            ticket,
        }
    }

    /// Upload request carrying an encoded multipart form.
    #[must_use]
    pub fn upload_request(&self, form: EncodedForm, ticket: DispatchTicket) -> OutboundRequest {
        let mut headers = json_headers();
        headers.insert("Content-Type".to_string(), form.content_type);
        OutboundRequest {
            method: HttpMethod::Post,
            url: self.upload_url(),
            headers,
            body: form.body,
            ticket,
        }
    }
}

fn json_headers() -> BTreeMap<String, String> {
    BTreeMap::from([("Accept".to_string(), "application/json".to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MultipartForm;
    use crate::domain::Mode;

    #[test]
    fn ticker_is_not_escaped() {
        let api = ApiEndpoint::default();
        assert_eq!(api.stock_url("BRK.B"), "http://localhost:5001/api/stock/BRK.B");
        assert_eq!(api.stock_url("A B"), "http://localhost:5001/api/stock/A B");
    }

    #[test]
    fn news_query_is_a_single_encoded_segment() {
        let api = ApiEndpoint::new("https://fin.example.com/api");
        assert_eq!(
            api.news_url("AT&T / Verizon?"),
            "https://fin.example.com/api/news/AT%26T%20%2F%20Verizon%3F"
        );
    }

    #[test]
    fn get_requests_have_no_body() {
        let ticket = DispatchTicket::new(1, Mode::Stock);
        let request = ApiEndpoint::default().stock_request("AAPL", ticket);
        assert_eq!(request.method, HttpMethod::Get);
        assert!(request.body.is_empty());
        assert_eq!(request.ticket, ticket);
        assert_eq!(request.headers.get("Accept").map(String::as_str), Some("application/json"));
    }

    #[test]
    fn upload_request_carries_multipart_content_type() {
        let form = MultipartForm::with_boundary("zz").file("file", "a.txt", b"x".to_vec()).encode();
        let body = form.body.clone();
        let request = ApiEndpoint::default().upload_request(form, DispatchTicket::new(2, Mode::Document));

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "http://localhost:5001/api/upload");
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("multipart/form-data; boundary=zz")
        );
        assert_eq!(request.body, body);
    }
}
