//! Application context shared by every page.
//!
//! The catalog store, the API client and the navigator are built once at the
//! root and handed to each view explicitly. Building a context without a store
//! or an API is an error rather than a silent default.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use thiserror::Error;

use crate::api::{ApiClient, ShowApi};
use crate::config::Config;
use crate::router::{Navigator, Route};
use crate::store::ShowsStore;

/// Default quiet period before a search is sent
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("No ShowsStore was provided to the app context")]
    MissingStore,

    #[error("No catalog API was provided to the app context")]
    MissingApi,

    #[error("Failed to create API client: {0}")]
    Client(#[from] crate::api::ParsedError),
}

/// Handles every page needs
#[derive(Clone)]
pub struct AppContext {
    api: Arc<dyn ShowApi>,
    store: Arc<ShowsStore>,
    navigator: Arc<Mutex<Navigator>>,
    search_debounce: Duration,
}

impl AppContext {
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder::default()
    }

    /// Context backed by the real API client and a fresh store
    pub fn from_config(config: &Config) -> Result<Self, ContextError> {
        let client = ApiClient::new(config.api_base_url(), config.api.timeout())?;
        tracing::debug!("Using catalog API at {}", client.base_url());

        Self::builder()
            .api(Arc::new(client))
            .store(Arc::new(ShowsStore::new()))
            .search_debounce(config.search.debounce())
            .build()
    }

    pub fn api(&self) -> Arc<dyn ShowApi> {
        self.api.clone()
    }

    pub fn store(&self) -> &Arc<ShowsStore> {
        &self.store
    }

    pub fn search_debounce(&self) -> Duration {
        self.search_debounce
    }

    /// Lock the navigator
    pub fn navigator(&self) -> MutexGuard<'_, Navigator> {
        self.navigator.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current_route(&self) -> Route {
        self.navigator().current().clone()
    }
}

#[derive(Default)]
pub struct AppContextBuilder {
    api: Option<Arc<dyn ShowApi>>,
    store: Option<Arc<ShowsStore>>,
    search_debounce: Option<Duration>,
}

impl AppContextBuilder {
    pub fn api(mut self, api: Arc<dyn ShowApi>) -> Self {
        self.api = Some(api);
        self
    }

    pub fn store(mut self, store: Arc<ShowsStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = Some(delay);
        self
    }

    pub fn build(self) -> Result<AppContext, ContextError> {
        let store = self.store.ok_or(ContextError::MissingStore)?;
        let api = self.api.ok_or(ContextError::MissingApi)?;

        Ok(AppContext {
            api,
            store,
            navigator: Arc::new(Mutex::new(Navigator::new(Route::Home))),
            search_debounce: self.search_debounce.unwrap_or(DEFAULT_SEARCH_DEBOUNCE),
        })
    }
}

#[cfg(test)]
pub(crate) fn test_context(api: &Arc<crate::api::mock::MockApi>) -> AppContext {
    AppContext::builder()
        .api(api.clone())
        .store(Arc::new(ShowsStore::new()))
        .build()
        .unwrap()
}
