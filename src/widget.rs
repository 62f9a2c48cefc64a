use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::SearchConfig;
use crate::loader::ContentSource;
use crate::paginate::{page_controls, paginate, total_pages, PageControl};
use crate::query::{normalize_term, search};
use crate::snippet::{snippet, Highlighter, DEFAULT_MAX_LENGTH};
use crate::types::{ContentRecord, LoadState, Outcome, SearchState};

pub type SearchCallback = Box<dyn Fn(&str, &[ContentRecord]) + Send + Sync>;
pub type ClickCallback = Box<dyn Fn(&ContentRecord) + Send + Sync>;

const DEFAULT_TYPE_LABEL: &str = "Page";

/// What the embedder should do after a result was clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// The `on_result_click` callback took care of it.
    Handled,
    /// No callback: follow the record's URL.
    Navigate(String),
}

/// One rendered result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub id: String,
    pub url: String,
    pub title: String,
    pub snippet: String,
    pub type_label: String,
    pub date_label: Option<String>,
}

/// Presentation-neutral description of the result area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Message(String),
    Results {
        items: Vec<ResultView>,
        controls: Vec<PageControl>,
        page: usize,
        total_pages: usize,
    },
}

#[derive(Default)]
struct Inner {
    collection: Vec<ContentRecord>,
    load: LoadState,
    search: SearchState,
    open: bool,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One search widget instance: its content, load state and search state.
pub struct SiteSearch {
    config: SearchConfig,
    inner: Arc<Mutex<Inner>>,
    // Present only while a load is still possible.
    source: Option<Arc<dyn ContentSource>>,
    on_search: Option<SearchCallback>,
    on_result_click: Option<ClickCallback>,
    highlighter: Highlighter,
}

impl SiteSearch {
    /// Build an instance from configuration. Inline content is available immediately;
    /// file and remote content waits for [`SiteSearch::load`] or [`SiteSearch::spawn_load`].
    pub fn new(config: SearchConfig) -> Self {
        let config = config.normalized();
        let problems = config.validate();
        for p in &problems {
            warn!("sitesearch: {}", p);
        }
        match config.content_source() {
            Ok(src) => Self::with_source(config, Arc::from(src)),
            Err(e) => {
                if !problems.contains(&e) { error!("sitesearch: {}", e); }
                let this = Self::from_parts(config, None);
                lock(&this.inner).load = LoadState::Failed;
                this
            }
        }
    }

    /// Build an instance around an explicit content source.
    pub fn with_source(config: SearchConfig, source: Arc<dyn ContentSource>) -> Self {
        let config = config.normalized();
        match source.ready_now() {
            Some(records) => {
                let this = Self::from_parts(config, None);
                {
                    let mut inner = lock(&this.inner);
                    inner.collection = records;
                    inner.load = LoadState::Ready;
                }
                this
            }
            None => Self::from_parts(config, Some(source)),
        }
    }

    fn from_parts(config: SearchConfig, source: Option<Arc<dyn ContentSource>>) -> Self {
        Self {
            config,
            inner: Arc::new(Mutex::new(Inner::default())),
            source,
            on_search: None,
            on_result_click: None,
            highlighter: Highlighter::default(),
        }
    }

    /// Observe every completed search. Purely informational.
    pub fn on_search(mut self, f: impl Fn(&str, &[ContentRecord]) + Send + Sync + 'static) -> Self {
        self.on_search = Some(Box::new(f));
        self
    }

    /// Replace the default click behaviour (navigate to the record URL).
    pub fn on_result_click(mut self, f: impl Fn(&ContentRecord) + Send + Sync + 'static) -> Self {
        self.on_result_click = Some(Box::new(f));
        self
    }

    pub fn with_highlighter(mut self, highlighter: Highlighter) -> Self {
        self.highlighter = highlighter;
        self
    }

    pub fn config(&self) -> &SearchConfig { &self.config }

    // --- Loading ---

    /// Run the pending load in place. No-op once a load has started, succeeded or failed.
    pub async fn load(&self) -> LoadState {
        if let Some(source) = self.begin_load() {
            finish_load(Arc::downgrade(&self.inner), source).await;
        }
        self.load_state()
    }

    /// Start the pending load on the current tokio runtime and return at once.
    /// Returns `None` when there is nothing to load, a load already happened,
    /// or no runtime is running (the load then stays pending).
    pub fn spawn_load(&self) -> Option<JoinHandle<()>> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("sitesearch: no tokio runtime, load not started");
            return None;
        };
        let source = self.begin_load()?;
        Some(runtime.spawn(finish_load(Arc::downgrade(&self.inner), source)))
    }

    fn begin_load(&self) -> Option<Arc<dyn ContentSource>> {
        let source = self.source.clone()?;
        let mut inner = lock(&self.inner);
        if inner.load != LoadState::Idle { return None; }
        inner.load = LoadState::Loading;
        Some(source)
    }

    pub fn load_state(&self) -> LoadState { lock(&self.inner).load }
    pub fn is_loading(&self) -> bool { self.load_state().is_loading() }
    pub fn has_error(&self) -> bool { self.load_state().has_error() }

    /// Number of records in the loaded collection.
    pub fn len(&self) -> usize { lock(&self.inner).collection.len() }
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn records(&self) -> Vec<ContentRecord> { lock(&self.inner).collection.clone() }

    // --- Visibility ---

    pub fn open(&self) { lock(&self.inner).open = true; }
    pub fn close(&self) { lock(&self.inner).open = false; }
    pub fn is_open(&self) -> bool { lock(&self.inner).open }

    // --- Searching ---

    /// Handle a change of the search input. Always resets to the first page.
    pub fn input(&self, raw: &str) -> Outcome {
        let term = normalize_term(raw);
        let results = {
            let mut guard = lock(&self.inner);
            let inner = &mut *guard;
            inner.search.term = term.clone();
            inner.search.current_page = 1;
            inner.search.results.clear();
            if term.is_empty() {
                inner.search.outcome = Outcome::Results;
                return Outcome::Results;
            }
            match inner.load {
                LoadState::Idle | LoadState::Loading => {
                    inner.search.outcome = Outcome::Loading;
                    return Outcome::Loading;
                }
                LoadState::Failed => {
                    inner.search.outcome = Outcome::Error;
                    return Outcome::Error;
                }
                LoadState::Ready => {}
            }
            let results = search(&term, &inner.collection);
            inner.search.results = results.clone();
            inner.search.outcome = Outcome::Results;
            results
        };
        debug!("search `{}`: {} results", term, results.len());
        if let Some(cb) = &self.on_search { cb(&term, &results); }
        Outcome::Results
    }

    pub fn search_state(&self) -> SearchState { lock(&self.inner).search.clone() }

    pub fn total_pages(&self) -> usize {
        total_pages(lock(&self.inner).search.results.len(), self.config.results_per_page)
    }

    pub fn current_page(&self) -> usize { lock(&self.inner).search.current_page }

    /// Jump to a page, clamped to the available range.
    pub fn go_to_page(&self, page: usize) -> usize {
        let total = self.total_pages().max(1);
        let mut inner = lock(&self.inner);
        inner.search.current_page = page.clamp(1, total);
        inner.search.current_page
    }

    pub fn next_page(&self) -> usize { self.go_to_page(self.current_page() + 1) }
    pub fn previous_page(&self) -> usize { self.go_to_page(self.current_page().saturating_sub(1)) }

    /// Activate the result at `index` on the current page. The search closes either way.
    pub fn click_result(&self, index: usize) -> Option<ClickAction> {
        let record = {
            let inner = lock(&self.inner);
            let page = paginate(&inner.search.results, inner.search.current_page, self.config.results_per_page);
            page.items.get(index).cloned()
        }?;
        self.close();
        match &self.on_result_click {
            Some(cb) => {
                cb(&record);
                Some(ClickAction::Handled)
            }
            None => Some(ClickAction::Navigate(record.url)),
        }
    }

    pub fn view(&self) -> View {
        let inner = lock(&self.inner);
        let s = &inner.search;
        match s.outcome {
            Outcome::Loading => return View::Message(self.config.loading_text.clone()),
            Outcome::Error => return View::Message(self.config.error_text.clone()),
            Outcome::Results if s.results.is_empty() => return View::Message(self.config.no_results_text.clone()),
            Outcome::Results => {}
        }
        let page = paginate(&s.results, s.current_page, self.config.results_per_page);
        View::Results {
            items: page.items.iter().map(|r| self.result_view(r, &s.term)).collect(),
            controls: page_controls(page.page, page.total_pages),
            page: page.page,
            total_pages: page.total_pages,
        }
    }

    fn result_view(&self, r: &ContentRecord, term: &str) -> ResultView {
        let excerpt = snippet(&r.content, term, DEFAULT_MAX_LENGTH);
        ResultView {
            id: r.id.clone(),
            url: r.url.clone(),
            title: self.highlighter.highlight(&r.title, term),
            snippet: self.highlighter.highlight(&excerpt, term),
            type_label: if r.kind.is_empty() { DEFAULT_TYPE_LABEL.to_string() } else { r.kind.clone() },
            date_label: (!r.date.is_empty()).then(|| display_date(&r.date)),
        }
    }
}

async fn finish_load(target: Weak<Mutex<Inner>>, source: Arc<dyn ContentSource>) {
    let result = source.fetch().await;
    let Some(inner) = target.upgrade() else {
        debug!("discarding content from {}: widget is gone", source.describe());
        return;
    };
    let mut inner = lock(&inner);
    match result {
        Ok(records) => {
            info!("loaded {} records from {}", records.len(), source.describe());
            inner.collection = records;
            inner.load = LoadState::Ready;
        }
        Err(e) => {
            error!("error loading content from {}: {}", source.describe(), e);
            inner.load = LoadState::Failed;
        }
    }
}

/// Human-readable date; falls back to the raw text when it does not parse.
pub fn display_date(raw: &str) -> String {
    const FMT: &str = "%b %-d, %Y";
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) { return dt.format(FMT).to_string(); }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") { return dt.format(FMT).to_string(); }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") { return d.format(FMT).to_string(); }
    raw.to_string()
}
