//! Details for one show

use anyhow::Result;

use crate::cli::output::{OutputFormat, print_formatted};
use crate::context::AppContext;
use crate::models::Show;
use crate::util::{format_rating, format_run, strip_html};
use crate::views::{DetailsState, DetailsView};

pub async fn run(ctx: &AppContext, id: u64, format: OutputFormat) -> Result<()> {
    let view = DetailsView::open(ctx, id);

    let show = match view.settle().await {
        DetailsState::Ready(show) => show,
        DetailsState::Error(err) => anyhow::bail!(DetailsState::error_text(&err)),
        DetailsState::Loading => anyhow::bail!("Show request did not finish"),
    };

    print_formatted(show.as_ref(), format, describe);
    Ok(())
}

fn describe(show: &Show) -> String {
    let mut lines = Vec::new();

    let run = format_run(show);
    if run.is_empty() {
        lines.push(show.name.clone());
    } else {
        lines.push(format!("{} ({})", show.name, run));
    }
    lines.push(format!("Rating:    {}", format_rating(show)));
    if !show.genres.is_empty() {
        lines.push(format!("Genres:    {}", show.genres.join(", ")));
    }
    if let Some(network) = show.broadcaster() {
        lines.push(format!("Network:   {}", network));
    }
    if let Some(status) = &show.status {
        lines.push(format!("Status:    {}", status));
    }
    if let Some(language) = &show.language {
        lines.push(format!("Language:  {}", language));
    }
    if let Some(summary) = show.summary.as_deref().map(strip_html).filter(|s| !s.is_empty()) {
        lines.push(String::new());
        lines.push(summary);
    }
    if !show.url.is_empty() {
        lines.push(String::new());
        lines.push(show.url.clone());
    }

    lines.join("\n")
}
