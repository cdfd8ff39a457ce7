//! Home page: the catalog grouped into genre rows.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::{ParsedError, SHOWS_ENDPOINT};
use crate::context::AppContext;
use crate::fetch::{FetchHolder, FetchState};
use crate::models::{Genre, Show};
use crate::store::ShowsStore;

/// Shown in place of the rows when the catalog request fails
pub const HOME_ERROR_TEXT: &str = "Could not load shows";

/// One genre row
#[derive(Debug, Clone)]
pub struct ShowRow {
    pub genre: Genre,
    pub shows: Vec<Arc<Show>>,
}

/// What the home page should draw, in priority order
#[derive(Debug, Clone)]
pub enum HomeState {
    Loading,
    Error(ParsedError),
    /// Always one row per genre, some possibly empty
    Ready(Vec<ShowRow>),
    Empty,
}

pub struct HomeView {
    store: Arc<ShowsStore>,
    catalog: FetchHolder<Vec<Show>>,
    observer: JoinHandle<()>,
}

impl HomeView {
    /// Mount the page. The catalog is only requested when the store is empty.
    pub fn mount(ctx: &AppContext) -> Self {
        let store = ctx.store().clone();
        let fetch = !store.store_ready();
        if !fetch {
            tracing::debug!("Catalog already cached ({} shows), skipping fetch", store.all_shows().len());
        }

        let catalog = FetchHolder::new(ctx.api(), SHOWS_ENDPOINT, fetch);
        let observer = tokio::spawn(push_payloads_into_store(
            catalog.subscribe(),
            store.clone(),
        ));

        Self {
            store,
            catalog,
            observer,
        }
    }

    pub fn catalog(&self) -> &FetchHolder<Vec<Show>> {
        &self.catalog
    }

    /// Request the catalog again
    pub fn refresh(&self) -> JoinHandle<()> {
        self.catalog.spawn_fetch(None)
    }

    pub fn state(&self) -> HomeState {
        let catalog = self.catalog.state();
        if catalog.is_loading() {
            return HomeState::Loading;
        }
        if let Some(err) = catalog.error() {
            return HomeState::Error(err.clone());
        }
        if self.store.store_ready() {
            let rows = Genre::ALL
                .iter()
                .map(|&genre| ShowRow {
                    genre,
                    shows: self.store.genre_shows(genre),
                })
                .collect();
            return HomeState::Ready(rows);
        }
        HomeState::Empty
    }

    /// Wait for the catalog request (if any) and its hand-off to the store
    pub async fn settle(&self) -> HomeState {
        let settled = self.catalog.settled().await;
        if let FetchState::Success(shows) = &settled {
            if !shows.is_empty() {
                let mut versions = self.store.subscribe();
                let _ = versions.wait_for(|_| self.store.store_ready()).await;
            }
        }
        self.state()
    }
}

impl Drop for HomeView {
    fn drop(&mut self) {
        self.observer.abort();
    }
}

/// Copy every new payload into the store, for as long as the page lives.
///
/// The channel only keeps the latest state, so a payload can arrive already
/// wrapped in `Loading` or `Failure` as `previous`. Anything the holder reports
/// as its data that was not pushed yet goes to the store.
async fn push_payloads_into_store(
    mut rx: watch::Receiver<FetchState<Vec<Show>>>,
    store: Arc<ShowsStore>,
) {
    let mut pushed: Option<Arc<Vec<Show>>> = None;
    while rx.changed().await.is_ok() {
        let payload = rx.borrow_and_update().data().cloned();
        let Some(shows) = payload else {
            continue;
        };
        if pushed.as_ref().is_some_and(|last| Arc::ptr_eq(last, &shows)) {
            continue;
        }
        tracing::info!("Catalog loaded with {} shows", shows.len());
        store.set_shows(shows.as_ref().clone());
        pushed = Some(shows);
    }
}
