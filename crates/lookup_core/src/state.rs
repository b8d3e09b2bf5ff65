//! Pure lookup state and its transitions.
//!
//! Every response is tagged with the query it was issued for; only a response
//! whose query equals the current one may touch the result or loading flag.

use shared::{domain::WordResult, error::LookupError};

/// A lookup the caller must issue after a query change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub query: String,
}

/// Content branch shown underneath the offline overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentState {
    Loading,
    Word(WordResult),
    EmptyQuery,
    NoResults,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Offline,
    Content(ContentState),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupState {
    query: String,
    word: Option<WordResult>,
    is_loading: bool,
    is_connected: bool,
}

impl Default for LookupState {
    fn default() -> Self {
        Self {
            query: String::new(),
            word: None,
            is_loading: false,
            is_connected: true,
        }
    }
}

impl LookupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn word(&self) -> Option<&WordResult> {
        self.word.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_connected(&self) -> bool {
        self.is_connected
    }

    pub fn is_current(&self, for_query: &str) -> bool {
        !self.query.is_empty() && self.query == for_query
    }

    pub fn set_query(&mut self, text: impl Into<String>) -> Option<LookupRequest> {
        self.query = text.into();
        if self.query.is_empty() {
            self.word = None;
            self.is_loading = false;
            return None;
        }

        self.is_loading = true;
        Some(LookupRequest {
            query: self.query.clone(),
        })
    }

    /// Returns `false` when the response is stale and was discarded.
    pub fn on_lookup_succeeded(&mut self, for_query: &str, result: WordResult) -> bool {
        if !self.is_current(for_query) {
            return false;
        }
        self.word = Some(result);
        self.is_loading = false;
        true
    }

    /// Returns `false` when the failure is stale and was discarded.
    ///
    /// Not-found and transport failures land in the same state.
    pub fn on_lookup_failed(&mut self, for_query: &str, _reason: &LookupError) -> bool {
        if !self.is_current(for_query) {
            return false;
        }
        self.word = None;
        self.is_loading = false;
        true
    }

    /// Returns whether the flag actually changed.
    pub fn on_connectivity_changed(&mut self, is_connected: bool) -> bool {
        let changed = self.is_connected != is_connected;
        self.is_connected = is_connected;
        changed
    }

    pub fn content_state(&self) -> ContentState {
        if self.is_loading {
            ContentState::Loading
        } else if let Some(word) = &self.word {
            ContentState::Word(word.clone())
        } else if self.query.is_empty() {
            ContentState::EmptyQuery
        } else {
            ContentState::NoResults
        }
    }

    pub fn display_state(&self) -> DisplayState {
        if !self.is_connected {
            return DisplayState::Offline;
        }
        DisplayState::Content(self.content_state())
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
