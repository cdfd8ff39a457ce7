//! Observable state for a single logical API request.
//!
//! A [`FetchHolder`] owns one endpoint and publishes its progress as a
//! [`FetchState`] through a `tokio::sync::watch` channel. Views read the
//! current state each frame or subscribe to changes.
//!
//! Triggers are numbered. When several overlap, only the most recently issued
//! one is allowed to settle the state; earlier responses are dropped. If a
//! trigger future is dropped before it finishes, the state it replaced is put
//! back so the holder never stays stuck in `Loading`. A panic inside the
//! request settles the holder as a failure carrying the panic message.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::FutureExt;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::{ParsedError, RequestOptions, ShowApi, api_fetch, parse_error};

/// Progress of a request
#[derive(Debug)]
pub enum FetchState<T> {
    /// Never triggered
    Idle,
    /// Request in flight; `previous` is the last successful payload, if any
    Loading { previous: Option<Arc<T>> },
    Success(Arc<T>),
    /// Request failed; `previous` is the last successful payload, if any
    Failure {
        error: ParsedError,
        previous: Option<Arc<T>>,
    },
}

// Derived Clone would require `T: Clone`; payloads are shared behind `Arc`.
impl<T> Clone for FetchState<T> {
    fn clone(&self) -> Self {
        match self {
            FetchState::Idle => FetchState::Idle,
            FetchState::Loading { previous } => FetchState::Loading {
                previous: previous.clone(),
            },
            FetchState::Success(data) => FetchState::Success(data.clone()),
            FetchState::Failure { error, previous } => FetchState::Failure {
                error: error.clone(),
                previous: previous.clone(),
            },
        }
    }
}

impl<T> FetchState<T> {
    /// Latest payload, kept across later loads and failures
    pub fn data(&self) -> Option<&Arc<T>> {
        match self {
            FetchState::Idle => None,
            FetchState::Loading { previous } => previous.as_ref(),
            FetchState::Success(data) => Some(data),
            FetchState::Failure { previous, .. } => previous.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&ParsedError> {
        match self {
            FetchState::Failure { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading { .. })
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, FetchState::Idle)
    }
}

struct Inner<T> {
    api: Arc<dyn ShowApi>,
    endpoint: String,
    options: RequestOptions,
    state: watch::Sender<FetchState<T>>,
    /// Number of the most recently issued trigger
    latest: AtomicU64,
}

/// Fetch state holder for one endpoint
pub struct FetchHolder<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for FetchHolder<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> FetchHolder<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    /// Create a holder for `endpoint`. With `enabled`, the first fetch is
    /// spawned immediately; this requires a tokio runtime.
    pub fn new(api: Arc<dyn ShowApi>, endpoint: impl Into<String>, enabled: bool) -> Self {
        Self::with_options(api, endpoint, enabled, RequestOptions::default())
    }

    pub fn with_options(
        api: Arc<dyn ShowApi>,
        endpoint: impl Into<String>,
        enabled: bool,
        options: RequestOptions,
    ) -> Self {
        let (state, _) = watch::channel(FetchState::Idle);
        let holder = Self {
            inner: Arc::new(Inner {
                api,
                endpoint: endpoint.into(),
                options,
                state,
                latest: AtomicU64::new(0),
            }),
        };

        if enabled {
            holder.spawn_fetch(None);
        }

        holder
    }

    /// Snapshot of the current state
    pub fn state(&self) -> FetchState<T> {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.inner.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading()
    }

    /// Mark the holder as loading right away and run the fetch on a task
    pub fn spawn_fetch(&self, endpoint: Option<String>) -> JoinHandle<()> {
        let request = self.begin();
        let holder = self.clone();
        tokio::spawn(async move { holder.complete(request, endpoint.as_deref()).await })
    }

    /// Replace the payload without a request. Supersedes any trigger still in
    /// flight.
    pub fn set_data(&self, data: T) {
        self.inner.latest.fetch_add(1, Ordering::SeqCst);
        self.inner
            .state
            .send_replace(FetchState::Success(Arc::new(data)));
    }

    /// Wait until no request is in flight and return the settled state
    pub async fn settled(&self) -> FetchState<T> {
        let mut rx = self.subscribe();
        match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            // The sender lives in `self`, so the channel cannot close here
            Err(_) => self.state(),
        }
    }

    async fn complete(&self, request: InFlight<T>, endpoint: Option<&str>) {
        let endpoint = endpoint.unwrap_or(&self.inner.endpoint);
        let call = api_fetch::<T>(self.inner.api.as_ref(), endpoint, &self.inner.options);
        let result = AssertUnwindSafe(call)
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(parse_error(panic.as_ref())));
        request.finish(result);
    }

    fn begin(&self) -> InFlight<T> {
        let ticket = self.inner.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let mut replaced = FetchState::Idle;
        self.inner.state.send_modify(|state| {
            replaced = state.clone();
            *state = FetchState::Loading {
                previous: state.data().cloned(),
            };
        });
        InFlight {
            inner: self.inner.clone(),
            ticket,
            replaced: Some(replaced),
        }
    }
}

#[cfg(test)]
impl<T> FetchHolder<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    /// Run a fetch to completion, against `endpoint` or the default one
    pub async fn fetch(&self, endpoint: Option<&str>) {
        let request = self.begin();
        self.complete(request, endpoint).await;
    }

    pub fn data(&self) -> Option<Arc<T>> {
        self.inner.state.borrow().data().cloned()
    }

    pub fn error(&self) -> Option<ParsedError> {
        self.inner.state.borrow().error().cloned()
    }
}

/// One issued trigger. Settles the holder on `finish`, or restores the state
/// it replaced when dropped unfinished.
struct InFlight<T> {
    inner: Arc<Inner<T>>,
    ticket: u64,
    replaced: Option<FetchState<T>>,
}

impl<T> InFlight<T> {
    fn is_current(&self) -> bool {
        self.inner.latest.load(Ordering::SeqCst) == self.ticket
    }

    fn finish(mut self, result: Result<T, ParsedError>) {
        self.replaced = None;

        if !self.is_current() {
            tracing::debug!(
                "Discarding stale response for {} (trigger {})",
                self.inner.endpoint,
                self.ticket
            );
            return;
        }

        self.inner.state.send_modify(|state| {
            *state = match result {
                Ok(data) => FetchState::Success(Arc::new(data)),
                Err(error) => {
                    tracing::warn!("Fetch for {} failed: {}", self.inner.endpoint, error);
                    FetchState::Failure {
                        error,
                        previous: state.data().cloned(),
                    }
                }
            };
        });
    }
}

impl<T> Drop for InFlight<T> {
    fn drop(&mut self) {
        let Some(replaced) = self.replaced.take() else {
            return;
        };
        if self.is_current() {
            tracing::debug!("Fetch for {} dropped before completion", self.inner.endpoint);
            self.inner.state.send_replace(replaced);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{MockApi, show, show_json};
    use crate::models::Show;
    use futures::future::BoxFuture;
    use serde_json::{Value, json};
    use std::time::Duration;

    /// Backend whose every request panics
    struct PanickingApi;

    impl ShowApi for PanickingApi {
        fn get_json<'a>(
            &'a self,
            endpoint: &'a str,
            _options: &'a RequestOptions,
        ) -> BoxFuture<'a, Result<Value, ParsedError>> {
            Box::pin(async move { explode(endpoint) })
        }
    }

    fn explode(endpoint: &str) -> Result<Value, ParsedError> {
        panic!("handler for {} panicked", endpoint)
    }

    fn holder<T>(api: &Arc<MockApi>, endpoint: &str, enabled: bool) -> FetchHolder<T>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        FetchHolder::new(api.clone(), endpoint, enabled)
    }

    #[tokio::test]
    async fn test_fetch_success_transitions() {
        let api = Arc::new(MockApi::new());
        api.respond("test-endpoint", show_json(1, "Test Show", &["Drama"], Some(8.0)));

        let holder: FetchHolder<Show> = holder(&api, "test-endpoint", false);
        assert!(holder.state().is_idle());
        assert!(!holder.is_loading());
        assert!(holder.data().is_none());

        let mut rx = holder.subscribe();
        let observed = tokio::spawn(async move {
            let mut seen = Vec::new();
            while rx.changed().await.is_ok() {
                let loading = rx.borrow_and_update().is_loading();
                seen.push(loading);
                if !loading {
                    break;
                }
            }
            seen
        });

        holder.fetch(None).await;

        assert!(!holder.is_loading());
        assert_eq!(holder.data().unwrap().name, "Test Show");
        assert!(holder.error().is_none());
        assert_eq!(api.calls(), vec!["test-endpoint"]);
        assert_eq!(observed.await.unwrap(), vec![true, false]);
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_previous_data() {
        let api = Arc::new(MockApi::new());
        api.respond("shows/1", show_json(1, "Kept", &[], None))
            .fail("shows/1", "Error: Not Found");

        let holder: FetchHolder<Show> = holder(&api, "shows/1", false);

        holder.fetch(None).await;
        assert_eq!(holder.data().unwrap().name, "Kept");

        holder.fetch(None).await;
        assert!(!holder.is_loading());
        assert_eq!(holder.error().unwrap().message(), "Error: Not Found");
        assert_eq!(holder.data().unwrap().name, "Kept");
    }

    #[tokio::test]
    async fn test_fetch_failure_without_prior_data() {
        let api = Arc::new(MockApi::new());
        api.fail("error-endpoint", "Error: Not Found");

        let holder: FetchHolder<Show> = holder(&api, "error-endpoint", false);
        holder.fetch(None).await;

        assert!(!holder.is_loading());
        assert!(holder.data().is_none());
        assert_eq!(
            holder.error(),
            Some(ParsedError::new("Error: Not Found"))
        );
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let api = Arc::new(MockApi::new());
        api.fail("shows", "boom").respond("shows", json!([]));

        let holder: FetchHolder<Vec<Show>> = holder(&api, "shows", false);
        holder.fetch(None).await;
        assert!(holder.error().is_some());

        holder.fetch(None).await;
        assert!(holder.error().is_none());
        assert!(holder.data().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_decode_failure_is_stored_as_error() {
        let api = Arc::new(MockApi::new());
        api.respond("shows", json!({ "not": "a list" }));

        let holder: FetchHolder<Vec<Show>> = holder(&api, "shows", false);
        holder.fetch(None).await;

        assert!(holder.error().is_some());
        assert!(holder.data().is_none());
    }

    #[tokio::test]
    async fn test_enabled_fetches_on_creation() {
        let api = Arc::new(MockApi::new());
        api.respond("shows", json!([show_json(1, "One", &[], None)]));

        let holder: FetchHolder<Vec<Show>> = holder(&api, "shows", true);
        assert!(holder.is_loading());

        let state = holder.settled().await;
        assert_eq!(state.data().unwrap().len(), 1);
        assert_eq!(api.calls(), vec!["shows"]);
    }

    #[tokio::test]
    async fn test_disabled_does_not_fetch() {
        let api = Arc::new(MockApi::new());
        let holder: FetchHolder<Vec<Show>> = holder(&api, "shows", false);

        assert!(holder.state().is_idle());
        tokio::task::yield_now().await;
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_override_endpoint() {
        let api = Arc::new(MockApi::new());
        api.respond("search/shows?q=batman", json!([]));

        let holder: FetchHolder<Vec<Show>> = holder(&api, "search/shows", false);
        holder.fetch(Some("search/shows?q=batman")).await;

        assert_eq!(api.calls(), vec!["search/shows?q=batman"]);

        api.respond("search/shows", json!([]));
        holder.fetch(None).await;
        assert_eq!(api.calls(), vec!["search/shows?q=batman", "search/shows"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_discarded() {
        let api = Arc::new(MockApi::new());
        api.respond_after("slow", Duration::from_millis(300), json!([show_json(1, "Slow", &[], None)]))
            .respond_after("fast", Duration::from_millis(10), json!([show_json(2, "Fast", &[], None)]));

        let holder: FetchHolder<Vec<Show>> = holder(&api, "slow", false);
        let slow = holder.spawn_fetch(Some("slow".to_string()));
        let fast = holder.spawn_fetch(Some("fast".to_string()));

        fast.await.unwrap();
        assert_eq!(holder.data().unwrap()[0].name, "Fast");

        slow.await.unwrap();
        assert_eq!(holder.data().unwrap()[0].name, "Fast");
        assert!(!holder.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_older_trigger_cannot_clear_loading() {
        let api = Arc::new(MockApi::new());
        api.respond_after("fast", Duration::from_millis(10), json!([]))
            .respond_after("slow", Duration::from_millis(300), json!([]));

        let holder: FetchHolder<Vec<Show>> = holder(&api, "fast", false);
        let fast = holder.spawn_fetch(Some("fast".to_string()));
        let slow = holder.spawn_fetch(Some("slow".to_string()));

        fast.await.unwrap();
        assert!(holder.is_loading());

        slow.await.unwrap();
        assert!(!holder.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_trigger_restores_state() {
        let api = Arc::new(MockApi::new());
        api.respond("shows", json!([show_json(1, "First", &[], None)]))
            .respond_after("shows", Duration::from_secs(30), json!([]));

        let holder: FetchHolder<Vec<Show>> = holder(&api, "shows", false);
        holder.fetch(None).await;

        let task = holder.spawn_fetch(None);
        assert!(holder.is_loading());
        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());

        assert!(!holder.is_loading());
        assert_eq!(holder.data().unwrap()[0].name, "First");
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_data_supersedes_in_flight_fetch() {
        let api = Arc::new(MockApi::new());
        api.respond_after("search", Duration::from_millis(100), json!([show_json(1, "Late", &[], None)]));

        let holder: FetchHolder<Vec<Show>> = holder(&api, "search", false);
        let task = holder.spawn_fetch(None);
        holder.set_data(Vec::new());

        task.await.unwrap();
        assert!(holder.data().unwrap().is_empty());
        assert!(!holder.is_loading());
    }

    #[tokio::test]
    async fn test_panicking_request_settles_as_failure() {
        let holder: FetchHolder<Vec<Show>> = FetchHolder::new(Arc::new(PanickingApi), "shows", false);
        holder.set_data(vec![show(1, "Kept", &[], None)]);

        holder.spawn_fetch(None).await.unwrap();

        assert!(!holder.is_loading());
        assert_eq!(
            holder.error(),
            Some(ParsedError::new("handler for shows panicked"))
        );
        assert_eq!(holder.data().unwrap().len(), 1);
    }
}
