//! Details page for a single show.

use std::sync::Arc;

use crate::api::{ParsedError, show_endpoint};
use crate::context::AppContext;
use crate::fetch::{FetchHolder, FetchState};
use crate::models::Show;

#[derive(Debug, Clone)]
pub enum DetailsState {
    Loading,
    Error(ParsedError),
    Ready(Arc<Show>),
}

impl DetailsState {
    /// Inline text for the error state
    pub fn error_text(err: &ParsedError) -> String {
        format!("Error loading show details: {}", err)
    }
}

/// Either a cached show or a request for it
pub enum DetailsView {
    Cached(Arc<Show>),
    Remote { id: u64, show: FetchHolder<Show> },
}

impl DetailsView {
    /// Open the page for `id`, answering from the store when possible
    pub fn open(ctx: &AppContext, id: u64) -> Self {
        match ctx.store().lookup(id) {
            Some(show) => {
                tracing::debug!("Show {} served from catalog cache", id);
                DetailsView::Cached(show)
            }
            None => DetailsView::Remote {
                id,
                show: FetchHolder::new(ctx.api(), show_endpoint(id), true),
            },
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            DetailsView::Cached(show) => show.id,
            DetailsView::Remote { id, .. } => *id,
        }
    }

    pub fn state(&self) -> DetailsState {
        match self {
            DetailsView::Cached(show) => DetailsState::Ready(show.clone()),
            DetailsView::Remote { show, .. } => Self::from_fetch(show.state()),
        }
    }

    /// Wait for the request, if there is one
    pub async fn settle(&self) -> DetailsState {
        match self {
            DetailsView::Cached(show) => DetailsState::Ready(show.clone()),
            DetailsView::Remote { show, .. } => Self::from_fetch(show.settled().await),
        }
    }

    /// Ask for the show again after a failure
    pub fn retry(&self) {
        if let DetailsView::Remote { show, .. } = self {
            show.spawn_fetch(None);
        }
    }

    fn from_fetch(state: FetchState<Show>) -> DetailsState {
        match state {
            FetchState::Failure { error, .. } => DetailsState::Error(error),
            FetchState::Success(show) => DetailsState::Ready(show),
            FetchState::Idle | FetchState::Loading { .. } => DetailsState::Loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{MockApi, show, show_json};
    use crate::context::test_context;

    #[tokio::test]
    async fn test_renders_from_store_without_api_call() {
        let api = Arc::new(MockApi::new());
        let ctx = test_context(&api);
        ctx.store().set_shows(vec![show(1, "Test Show", &["Drama"], Some(8.5))]);

        let view = DetailsView::open(&ctx, 1);
        assert!(matches!(view, DetailsView::Cached(_)));

        let DetailsState::Ready(found) = view.settle().await else {
            panic!("expected cached show");
        };
        assert_eq!(found.name, "Test Show");
        assert_eq!(found.original_image(), Some("1.jpg"));
        assert!(found.genres.contains(&"Drama".to_string()));

        tokio::task::yield_now().await;
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_fetches_when_not_in_store() {
        let api = Arc::new(MockApi::new());
        api.respond("shows/1", show_json(1, "Test Show", &["Drama"], Some(8.5)));
        let ctx = test_context(&api);
        ctx.store().set_shows(vec![show(2, "Other", &[], None)]);

        let view = DetailsView::open(&ctx, 1);
        assert!(matches!(view, DetailsView::Remote { .. }));
        assert_eq!(view.id(), 1);
        assert!(matches!(view.state(), DetailsState::Loading));

        let DetailsState::Ready(found) = view.settle().await else {
            panic!("expected fetched show");
        };
        assert_eq!(found.name, "Test Show");
        assert_eq!(api.calls(), vec!["shows/1"]);
    }

    #[tokio::test]
    async fn test_error_state() {
        let api = Arc::new(MockApi::new());
        api.fail("shows/5", "Failed to fetch");
        let ctx = test_context(&api);

        let view = DetailsView::open(&ctx, 5);
        let DetailsState::Error(err) = view.settle().await else {
            panic!("expected error");
        };
        let text = DetailsState::error_text(&err);
        assert!(text.contains("Error loading show details"));
        assert!(text.contains("Failed to fetch"));
    }

    #[tokio::test]
    async fn test_retry_after_failure() {
        let api = Arc::new(MockApi::new());
        api.fail("shows/5", "Failed to fetch")
            .respond("shows/5", show_json(5, "Five", &[], None));
        let ctx = test_context(&api);

        let view = DetailsView::open(&ctx, 5);
        assert!(matches!(view.settle().await, DetailsState::Error(_)));

        view.retry();
        assert!(matches!(view.settle().await, DetailsState::Ready(_)));
        assert_eq!(api.calls().len(), 2);
    }
}
