//! Catalog listing grouped by genre

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{OutputFormat, ShowLine, print_formatted};
use crate::context::AppContext;
use crate::models::Genre;
use crate::views::{HOME_ERROR_TEXT, HomeState, HomeView, ShowRow};

#[derive(Serialize)]
struct GenreRow {
    genre: Genre,
    title: &'static str,
    shows: Vec<ShowLine>,
}

pub async fn run(
    ctx: &AppContext,
    genre: Option<Genre>,
    limit: usize,
    format: OutputFormat,
) -> Result<()> {
    let view = HomeView::mount(ctx);

    let rows = match view.settle().await {
        HomeState::Ready(rows) => rows,
        HomeState::Empty => {
            println!("The catalog is empty");
            return Ok(());
        }
        HomeState::Error(err) => anyhow::bail!("{}: {}", HOME_ERROR_TEXT, err),
        HomeState::Loading => anyhow::bail!("Catalog request did not finish"),
    };

    let rows = select_rows(&rows, genre, limit);

    print_formatted(&rows, format, |rows| {
        rows.iter()
            .map(|row| {
                let mut block = format!("== {} ==", row.title);
                if row.shows.is_empty() {
                    block.push_str("\n  (none)");
                }
                for show in &row.shows {
                    block.push('\n');
                    block.push_str(&show.text());
                }
                block
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    });

    Ok(())
}

fn select_rows(rows: &[ShowRow], genre: Option<Genre>, limit: usize) -> Vec<GenreRow> {
    rows.iter()
        .filter(|row| genre.is_none_or(|g| g == row.genre))
        .map(|row| GenreRow {
            genre: row.genre,
            title: row.genre.title(),
            shows: row
                .shows
                .iter()
                .take(limit)
                .map(|show| ShowLine::from(show.as_ref()))
                .collect(),
        })
        .collect()
}
