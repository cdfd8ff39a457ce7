//! Search page with a debounced query box.

use std::sync::Arc;

use crate::api::{ParsedError, search_endpoint};
use crate::context::AppContext;
use crate::debounce::Debouncer;
use crate::fetch::FetchHolder;
use crate::models::SearchResult;
use crate::router::Route;

#[derive(Debug, Clone)]
pub enum SearchState {
    /// Nothing searched yet, or the box was cleared
    Idle,
    Loading,
    Error(ParsedError),
    Results(Arc<Vec<SearchResult>>),
    /// The query matched nothing
    NoResults { query: String },
}

impl SearchState {
    pub fn no_results_text(query: &str) -> String {
        format!("No results found for \"{}\"", query)
    }
}

pub struct SearchView {
    ctx: AppContext,
    query: String,
    results: FetchHolder<Vec<SearchResult>>,
    debouncer: Debouncer,
}

impl SearchView {
    /// Mount the page, searching right away if `initial` is non-empty
    pub fn mount(ctx: &AppContext, initial: Option<&str>) -> Self {
        let query = initial.unwrap_or_default().to_string();
        let results = FetchHolder::new(ctx.api(), search_endpoint(&query), false);

        if !query.is_empty() {
            results.spawn_fetch(Some(search_endpoint(&query)));
        }

        Self {
            ctx: ctx.clone(),
            query,
            results,
            debouncer: Debouncer::new(ctx.search_debounce()),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &FetchHolder<Vec<SearchResult>> {
        &self.results
    }

    /// Handle an edit of the query box. The route follows immediately; the
    /// request waits for the input to go quiet.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.query = input.into();
        self.ctx.navigator().replace(Route::search(&self.query));

        let results = self.results.clone();
        let query = self.query.clone();
        self.debouncer.arm(move || {
            if query.is_empty() {
                results.set_data(Vec::new());
            } else {
                tracing::debug!("Searching for {:?}", query);
                results.spawn_fetch(Some(search_endpoint(&query)));
            }
        });
    }

    /// Whether a keystroke is still waiting for the debounce window
    pub fn is_debouncing(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn state(&self) -> SearchState {
        let state = self.results.state();
        if state.is_idle() {
            return SearchState::Idle;
        }
        if state.is_loading() {
            return SearchState::Loading;
        }
        if let Some(err) = state.error() {
            return SearchState::Error(err.clone());
        }
        match state.data() {
            Some(results) if !results.is_empty() => SearchState::Results(results.clone()),
            _ if self.query.is_empty() => SearchState::Idle,
            _ => SearchState::NoResults {
                query: self.query.clone(),
            },
        }
    }

    /// Wait for the current request, if any
    pub async fn settle(&self) -> SearchState {
        self.results.settled().await;
        self.state()
    }
}
