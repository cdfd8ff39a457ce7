//! Output formatting utilities for CLI

use serde::Serialize;

use crate::models::Show;
use crate::util::format_average;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print a serializable value as JSON or use custom text formatter
pub fn print_formatted<T, F>(value: &T, format: OutputFormat, text_formatter: F)
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Text => println!("{}", text_formatter(value)),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Print a success message (suppressed in quiet mode)
pub fn print_success(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", message);
    }
}

/// Compact view of a show for listings
#[derive(Debug, Serialize)]
pub struct ShowLine {
    pub id: u64,
    pub name: String,
    pub rating: Option<f64>,
    pub genres: Vec<String>,
}

impl From<&Show> for ShowLine {
    fn from(show: &Show) -> Self {
        Self {
            id: show.id,
            name: show.name.clone(),
            rating: show.rating.as_ref().and_then(|r| r.average),
            genres: show.genres.clone(),
        }
    }
}

impl ShowLine {
    /// One listing line: id, name, rating and genres
    pub fn text(&self) -> String {
        let genres = if self.genres.is_empty() {
            String::new()
        } else {
            format!("  [{}]", self.genres.join(", "))
        };
        format!(
            "{:>6}  {:<40}  {:>7}{}",
            self.id,
            self.name,
            format_average(self.rating),
            genres
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::show;

    #[test]
    fn test_show_line_text() {
        let line = ShowLine::from(&show(1, "Under the Dome", &["Drama", "Thriller"], Some(6.5))).text();
        assert!(line.trim_start().starts_with("1  Under the Dome"));
        assert!(line.contains("6.5 ⭐"));
        assert!(line.ends_with("[Drama, Thriller]"));

        let bare = ShowLine::from(&show(2, "Unrated", &[], None)).text();
        assert!(bare.ends_with("N/A"));
    }

    #[test]
    fn test_show_line_keeps_missing_rating() {
        let line = ShowLine::from(&show(3, "Unrated", &["Comedy"], None));
        assert_eq!(line.rating, None);
        assert_eq!(line.genres, vec!["Comedy"]);
    }
}
