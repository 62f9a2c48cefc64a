pub mod config;
pub mod data;
pub mod error;
pub mod loader;
pub mod mapping;
pub mod paginate;
pub mod query;
pub mod snippet;
pub mod types;
pub mod widget;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::config::{ButtonPosition, DataSource, SearchConfig};
    pub use crate::error::{ConfigError, LoadError};
    pub use crate::loader::{ContentSource, FileSource, HttpSource, InlineSource, ResponseShape};
    pub use crate::paginate::{Page, PageControl};
    pub use crate::snippet::Highlighter;
    pub use crate::types::{ContentRecord, LoadState, Outcome, SearchState};
    pub use crate::widget::{ClickAction, ResultView, SiteSearch, View};
}

pub use crate::mapping::{normalize, normalize_all};
pub use crate::paginate::{page_controls, paginate};
pub use crate::query::search;
pub use crate::snippet::{highlight, snippet};
pub use crate::widget::SiteSearch;
