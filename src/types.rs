use serde::{Deserialize, Serialize};

/// Canonical record shape. Every field is always present; missing source values are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    pub title: String,
    pub content: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Source resolved but nothing fetched yet.
    #[default]
    Idle,
    Loading,
    Ready,
    /// Sticky: a failed instance never retries.
    Failed,
}

impl LoadState {
    pub fn is_loading(self) -> bool { matches!(self, LoadState::Loading) }
    pub fn has_error(self) -> bool { matches!(self, LoadState::Failed) }
}

/// What the last call to `SiteSearch::input` produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    Results,
    Loading,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub term: String,
    pub results: Vec<ContentRecord>,
    pub current_page: usize,
    pub outcome: Outcome,
}

impl Default for SearchState {
    fn default() -> Self {
        Self { term: String::new(), results: Vec::new(), current_page: 1, outcome: Outcome::Results }
    }
}
