//! Per-mode user input.
//!
//! [`InputState`] holds the raw text each mode's input line collects. Fields are
//! independent and survive mode switches, so switching away from a mode and back
//! shows the text that was there before.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A document chosen for upload.
///
/// Holds the path exactly as the user entered it. Resolution into the plugin
/// sandbox happens when the document is read, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub path: String,
}

impl SelectedFile {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Final path component, used as the multipart filename.
    ///
    /// Falls back to the whole path when it has no file name component.
    ///
    /// ```
    /// use finassist::domain::SelectedFile;
    ///
    /// assert_eq!(SelectedFile::new("~/reports/q3.pdf").file_name(), "q3.pdf");
    /// ```
    #[must_use]
    pub fn file_name(&self) -> String {
        Path::new(&self.path)
            .file_name()
            .map_or_else(|| self.path.clone(), |n| n.to_string_lossy().into_owned())
    }
}

/// Raw input for every mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    /// Ticker symbol, always stored upper-cased.
    pub ticker_text: String,

    /// News search query, stored verbatim. Percent-encoding is applied only
    /// when a request is built.
    pub news_query_text: String,

    /// Most recently selected document, if any.
    pub selected_file: Option<SelectedFile>,
}

impl InputState {
    /// Stores `text` upper-cased.
    ///
    /// No length or charset rules are enforced; the backend decides what a
    /// valid ticker is.
    ///
    /// ```
    /// use finassist::domain::InputState;
    ///
    /// let mut input = InputState::default();
    /// input.set_ticker("aapl");
    /// assert_eq!(input.ticker_text, "AAPL");
    /// ```
    pub fn set_ticker(&mut self, text: &str) {
        self.ticker_text = text.to_uppercase();
    }

    /// Stores `text` verbatim.
    pub fn set_news_query(&mut self, text: &str) {
        self.news_query_text = text.to_string();
    }

    /// Replaces the current selection. `None` clears it.
    pub fn set_file(&mut self, file: Option<SelectedFile>) {
        self.selected_file = file;
    }

    /// Path text of the current selection, empty when nothing is selected.
    #[must_use]
    pub fn file_path_text(&self) -> &str {
        self.selected_file.as_ref().map_or("", |f| f.path.as_str())
    }

    /// Sets the document selection from typed path text.
    ///
    /// An empty path means no selection.
    pub fn set_file_path(&mut self, text: &str) {
        if text.is_empty() {
            self.set_file(None);
        } else {
            self.set_file(Some(SelectedFile::new(text)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_is_upper_cased_and_idempotent() {
        let mut input = InputState::default();
        for typed in ["msft", "Brk.b", "ÄÖÜ", "already UP", ""] {
            input.set_ticker(typed);
            assert_eq!(input.ticker_text, typed.to_uppercase());

            let stored = input.ticker_text.clone();
            input.set_ticker(&stored);
            assert_eq!(input.ticker_text, stored);
        }
    }

    #[test]
    fn news_query_is_stored_verbatim() {
        let mut input = InputState::default();
        input.set_news_query("  Tesla earnings / Q3 & more ");
        assert_eq!(input.news_query_text, "  Tesla earnings / Q3 & more ");
    }

    #[test]
    fn set_file_replaces_and_clears_selection() {
        let mut input = InputState::default();
        input.set_file(Some(SelectedFile::new("a.pdf")));
        input.set_file(Some(SelectedFile::new("b.txt")));
        assert_eq!(input.file_path_text(), "b.txt");

        input.set_file(None);
        assert!(input.selected_file.is_none());
        assert_eq!(input.file_path_text(), "");
    }

    #[test]
    fn empty_path_text_means_no_selection() {
        let mut input = InputState::default();
        input.set_file_path("report.docx");
        assert_eq!(input.selected_file, Some(SelectedFile::new("report.docx")));

        input.set_file_path("");
        assert_eq!(input.selected_file, None);
    }

    #[test]
    fn file_name_falls_back_to_whole_path() {
        assert_eq!(SelectedFile::new("/tmp/x/notes.txt").file_name(), "notes.txt");
        assert_eq!(SelectedFile::new("..").file_name(), "..");
    }
}
