//! One-shot catalog search

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{OutputFormat, ShowLine, print_formatted};
use crate::context::AppContext;
use crate::views::{SearchState, SearchView};

#[derive(Serialize)]
struct Hit {
    score: f64,
    show: ShowLine,
}

pub async fn run(ctx: &AppContext, query: &str, format: OutputFormat) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        anyhow::bail!("Nothing to search for");
    }

    let view = SearchView::mount(ctx, Some(query));

    let hits: Vec<Hit> = match view.settle().await {
        SearchState::Results(results) => results
            .iter()
            .map(|result| Hit {
                score: result.score,
                show: ShowLine::from(&result.show),
            })
            .collect(),
        SearchState::NoResults { .. } | SearchState::Idle => Vec::new(),
        SearchState::Error(err) => anyhow::bail!("Search failed: {}", err),
        SearchState::Loading => anyhow::bail!("Search did not finish"),
    };

    print_formatted(&hits, format, |hits| {
        if hits.is_empty() {
            return SearchState::no_results_text(query);
        }
        hits.iter()
            .map(|hit| format!("{:>5.2}  {}", hit.score, hit.show.text()))
            .collect::<Vec<_>>()
            .join("\n")
    });

    Ok(())
}
