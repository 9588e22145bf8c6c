use std::time::Duration;

use crate::ScoredJob;

/// Queries shorter than this (after trimming) never reach the network.
pub const MIN_QUERY_LEN: usize = 2;

pub fn can_search(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_LEN
}

/// Visible state of the search pane.
///
/// Transitions are plain methods so they can be driven without any IO; the
/// search client decides *when* they are applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<ScoredJob>,
    pub loading: bool,
    pub error: Option<String>,
    pub took: Option<Duration>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A request for `query` has been issued.
    pub fn begin(&mut self, query: &str) {
        self.query = query.to_string();
        self.loading = true;
        self.error = None;
    }

    /// Results replace the previous ones in upstream order.
    pub fn succeed(&mut self, results: Vec<ScoredJob>, took: Duration) {
        self.results = results;
        self.took = Some(took);
        self.error = None;
        self.loading = false;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.results.clear();
        self.took = None;
        self.loading = false;
    }

    /// Short-query path: nothing to show, nothing pending.
    pub fn clear(&mut self, query: &str) {
        self.query = query.to_string();
        self.results.clear();
        self.error = None;
        self.took = None;
        self.loading = false;
    }

    /// The active request was dropped without a replacement.
    pub fn abandon(&mut self) {
        self.loading = false;
    }
}
