//! `multipart/form-data` encoding for document uploads.
//!
//! Zellij's `web_request` takes a raw body, so the form is encoded here. Only
//! file parts are needed: the upload endpoint reads a single `file` field.

use std::path::Path;

const CRLF: &str = "\r\n";

/// One file field of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

/// An encoded multipart body and its `Content-Type` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedForm {
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Builder for a `multipart/form-data` body.
///
/// # Example
///
/// ```
/// use finassist::api::MultipartForm;
///
/// let encoded = MultipartForm::with_boundary("xyz")
///     .file("file", "notes.txt", b"hello".to_vec())
///     .encode();
///
/// assert_eq!(encoded.content_type, "multipart/form-data; boundary=xyz");
/// assert!(encoded.body.ends_with(b"\r\n--xyz--\r\n"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartForm {
    boundary: String,
    parts: Vec<FilePart>,
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartForm {
    /// Creates an empty form with a time-derived boundary.
    #[must_use]
    pub fn new() -> Self {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        Self::with_boundary(format!("----finassist{nanos:x}"))
    }

    #[must_use]
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    /// Adds a file field. The part content type is guessed from the file name.
    #[must_use]
    pub fn file(mut self, field: &str, file_name: &str, content: Vec<u8>) -> Self {
        self.parts.push(FilePart {
            field: field.to_string(),
            file_name: file_name.to_string(),
            content_type: guess_content_type(file_name).to_string(),
            content,
        });
        self
    }

    /// Encodes the form.
    ///
    /// If the boundary happens to occur inside a part's content, a numeric
    /// suffix is appended until it no longer does.
    #[must_use]
    pub fn encode(self) -> EncodedForm {
        let boundary = self.unique_boundary();

        let mut body = Vec::new();
        for part in &self.parts {
            body.extend_from_slice(format!("--{boundary}{CRLF}").as_bytes());
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"{CRLF}",
                    escape_quoted(&part.field),
                    escape_quoted(&part.file_name),
                )
                .as_bytes(),
            );
            body.extend_from_slice(format!("Content-Type: {}{CRLF}{CRLF}", part.content_type).as_bytes());
            body.extend_from_slice(&part.content);
            body.extend_from_slice(CRLF.as_bytes());
        }
        body.extend_from_slice(format!("--{boundary}--{CRLF}").as_bytes());

        tracing::debug!(
            boundary = %boundary,
            part_count = self.parts.len(),
            body_len = body.len(),
            "multipart form encoded"
        );

        EncodedForm {
            content_type: format!("multipart/form-data; boundary={boundary}"),
            body,
        }
    }

    fn unique_boundary(&self) -> String {
        let mut boundary = self.boundary.clone();
        let mut suffix = 0_u32;
        while self
            .parts
            .iter()
            .any(|p| contains_subslice(&p.content, boundary.as_bytes()))
        {
            suffix += 1;
            boundary = format!("{}{suffix}", self.boundary);
        }
        boundary
    }
}

/// Guesses a part content type from the file extension.
///
/// Covers the document types the analysis endpoint accepts; anything else is
/// sent as `application/octet-stream`.
#[must_use]
pub fn guess_content_type(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Escapes a value for a quoted `Content-Disposition` parameter the way
/// browsers do: `"` becomes `%22` and line breaks are dropped.
fn escape_quoted(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .collect::<String>()
        .replace('"', "%22")
}

fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_single_file_field() {
        let encoded = MultipartForm::with_boundary("BOUNDARY")
            .file("file", "q3.pdf", b"%PDF-1.7\ndata".to_vec())
            .encode();

        let expected = "--BOUNDARY\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"q3.pdf\"\r\n\
             Content-Type: application/pdf\r\n\
             \r\n\
             %PDF-1.7\ndata\r\n\
             --BOUNDARY--\r\n";

        assert_eq!(String::from_utf8(encoded.body).unwrap(), expected);
        assert_eq!(encoded.content_type, "multipart/form-data; boundary=BOUNDARY");
    }

    #[test]
    fn boundary_is_changed_when_present_in_content() {
        let encoded = MultipartForm::with_boundary("abc")
            .file("file", "a.txt", b"xx abc abc1 yy".to_vec())
            .encode();

        assert_eq!(encoded.content_type, "multipart/form-data; boundary=abc2");
        let body = String::from_utf8(encoded.body).unwrap();
        assert!(body.starts_with("--abc2\r\n"));
        assert!(body.ends_with("--abc2--\r\n"));
    }

    #[test]
    fn file_names_are_escaped() {
        let encoded = MultipartForm::with_boundary("b")
            .file("file", "we\"ird\r\nname.txt", Vec::new())
            .encode();
        let body = String::from_utf8(encoded.body).unwrap();
        assert!(body.contains("filename=\"we%22irdname.txt\""));
    }

    #[test]
    fn content_type_guess_is_case_insensitive() {
        assert_eq!(guess_content_type("REPORT.PDF"), "application/pdf");
        assert_eq!(guess_content_type("notes.txt"), "text/plain");
        assert_eq!(
            guess_content_type("memo.docx"),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(guess_content_type("archive"), "application/octet-stream");
    }

    #[test]
    fn generated_boundaries_are_prefixed() {
        let encoded = MultipartForm::new().file("file", "a.txt", b"x".to_vec()).encode();
        assert!(encoded
            .content_type
            .starts_with("multipart/form-data; boundary=----finassist"));
    }
}
