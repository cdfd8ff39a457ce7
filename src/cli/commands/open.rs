//! Dispatch a route path the way the window would

use anyhow::Result;

use crate::cli::commands::{home, search, show};
use crate::cli::output::{OutputFormat, print_success};
use crate::context::AppContext;
use crate::router::Route;

/// Shows per genre when a route opens the home page
const HOME_LIMIT: usize = 10;

pub async fn run(ctx: &AppContext, path: &str, format: OutputFormat, quiet: bool) -> Result<()> {
    let route = Route::parse(path)?;
    ctx.navigator().push(route.clone());
    print_success(&format!("Route: {}", route), quiet || format == OutputFormat::Json);

    match route {
        Route::Home => home::run(ctx, None, HOME_LIMIT, format).await,
        Route::Details { id } => show::run(ctx, id, format).await,
        Route::Search { query: Some(query) } => search::run(ctx, &query, format).await,
        Route::Search { query: None } => {
            print_success("Nothing to search for", quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{MockApi, show_json};
    use crate::context::test_context;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_open_details_pushes_route_and_fetches() {
        let api = Arc::new(MockApi::new());
        api.respond("shows/7", show_json(7, "Seven", &["Drama"], Some(7.0)));
        let ctx = test_context(&api);

        run(&ctx, "/details/7", OutputFormat::Json, true).await.unwrap();

        assert_eq!(ctx.current_route(), Route::Details { id: 7 });
        assert_eq!(api.calls(), vec!["shows/7"]);
    }

    #[tokio::test]
    async fn test_open_rejects_bad_route() {
        let api = Arc::new(MockApi::new());
        let ctx = test_context(&api);

        assert!(run(&ctx, "/details/abc", OutputFormat::Text, true).await.is_err());
        assert_eq!(ctx.current_route(), Route::Home);
    }
}
