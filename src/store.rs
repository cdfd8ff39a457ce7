//! In-memory show catalog.
//!
//! The store holds the full show list, sorted by rating when it is written,
//! and lazily derives per-genre lists plus an id lookup. Derived views are
//! cached against a version counter that every [`ShowsStore::set_shows`] call
//! bumps, so a reader either gets the cached views for the current list or
//! rebuilds them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tokio::sync::watch;

use crate::models::{Genre, Show};

/// Views derived from one version of the show list
#[derive(Debug, Default)]
pub struct CatalogViews {
    version: u64,
    by_genre: [Vec<Arc<Show>>; 5],
    by_id: HashMap<u64, Arc<Show>>,
}

impl CatalogViews {
    fn build(version: u64, shows: &[Arc<Show>]) -> Self {
        let mut views = Self {
            version,
            ..Self::default()
        };

        for show in shows {
            // First occurrence wins on duplicate ids
            views.by_id.entry(show.id).or_insert_with(|| show.clone());

            for genre in Genre::ALL {
                if show.has_genre(genre) {
                    views.by_genre[genre.index()].push(show.clone());
                }
            }
        }

        views
    }

    /// Shows tagged with `genre`, in catalog order
    pub fn genre(&self, genre: Genre) -> &[Arc<Show>] {
        &self.by_genre[genre.index()]
    }

    pub fn get(&self, id: u64) -> Option<&Arc<Show>> {
        self.by_id.get(&id)
    }
}

struct Catalog {
    version: u64,
    shows: Arc<[Arc<Show>]>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            version: 0,
            shows: Arc::from(Vec::new()),
        }
    }
}

/// Shared show catalog
pub struct ShowsStore {
    catalog: RwLock<Catalog>,
    views: Mutex<Option<Arc<CatalogViews>>>,
    changes: watch::Sender<u64>,
}

impl Default for ShowsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ShowsStore {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            catalog: RwLock::new(Catalog::default()),
            views: Mutex::new(None),
            changes,
        }
    }

    /// Replace the catalog. Shows are sorted by rating, highest first, with a
    /// missing rating counted as zero.
    pub fn set_shows(&self, mut shows: Vec<Show>) {
        shows.sort_by(|a, b| b.rating_value().total_cmp(&a.rating_value()));
        let shows: Arc<[Arc<Show>]> = shows.into_iter().map(Arc::new).collect();
        let count = shows.len();

        let version = {
            let mut catalog = self.catalog.write().unwrap_or_else(PoisonError::into_inner);
            catalog.version += 1;
            catalog.shows = shows;
            catalog.version
        };

        tracing::debug!("Catalog replaced with {} shows (version {})", count, version);
        self.changes.send_replace(version);
    }

    /// Whether the catalog holds at least one show
    pub fn store_ready(&self) -> bool {
        !self.read().shows.is_empty()
    }

    /// Receiver notified with the new version after every `set_shows`
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Every show, sorted by rating
    pub fn all_shows(&self) -> Arc<[Arc<Show>]> {
        self.read().shows.clone()
    }

    /// Derived views for the current catalog, rebuilt if the list changed
    pub fn views(&self) -> Arc<CatalogViews> {
        let (version, shows) = {
            let catalog = self.read();
            (catalog.version, catalog.shows.clone())
        };

        let mut cached = self.views.lock().unwrap_or_else(PoisonError::into_inner);
        match cached.as_ref() {
            Some(views) if views.version == version => views.clone(),
            _ => {
                let views = Arc::new(CatalogViews::build(version, &shows));
                *cached = Some(views.clone());
                views
            }
        }
    }

    /// Shows tagged with `genre`, sorted by rating
    pub fn genre_shows(&self, genre: Genre) -> Vec<Arc<Show>> {
        match genre {
            Genre::Drama => self.drama_shows(),
            Genre::Thriller => self.thriller_shows(),
            Genre::ScienceFiction => self.fiction_shows(),
            Genre::Comedy => self.comedy_shows(),
            Genre::Action => self.action_shows(),
        }
    }

    pub fn drama_shows(&self) -> Vec<Arc<Show>> {
        self.views().genre(Genre::Drama).to_vec()
    }

    pub fn thriller_shows(&self) -> Vec<Arc<Show>> {
        self.views().genre(Genre::Thriller).to_vec()
    }

    pub fn fiction_shows(&self) -> Vec<Arc<Show>> {
        self.views().genre(Genre::ScienceFiction).to_vec()
    }

    pub fn comedy_shows(&self) -> Vec<Arc<Show>> {
        self.views().genre(Genre::Comedy).to_vec()
    }

    pub fn action_shows(&self) -> Vec<Arc<Show>> {
        self.views().genre(Genre::Action).to_vec()
    }

    /// Look a show up by id
    pub fn lookup(&self, id: u64) -> Option<Arc<Show>> {
        self.views().get(id).cloned()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Catalog> {
        self.catalog.read().unwrap_or_else(PoisonError::into_inner)
    }
}
