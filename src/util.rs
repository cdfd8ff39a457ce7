//! Display helpers shared by the GUI and CLI

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::models::Show;

fn tag_pattern() -> &'static Regex {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    TAGS.get_or_init(|| Regex::new(r"<[^>]*>").expect("static regex"))
}

/// Turn an HTML summary into plain text
pub fn strip_html(html: &str) -> String {
    let text = tag_pattern().replace_all(html, "");
    let text = text
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rating as shown on cards, e.g. "8.5 ⭐"; unrated shows get "N/A"
pub fn format_rating(show: &Show) -> String {
    format_average(show.rating.as_ref().and_then(|r| r.average))
}

pub fn format_average(average: Option<f64>) -> String {
    match average {
        Some(average) => format!("{:.1} ⭐", average),
        None => "N/A".to_string(),
    }
}

/// Year part of an ISO date such as the premiere date
pub fn year_of(date: Option<&str>) -> Option<i32> {
    date.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map(|d| d.year())
}

/// "2013 – 2015", "2019 –" or "" depending on which dates are known
pub fn format_run(show: &Show) -> String {
    match (
        year_of(show.premiered.as_deref()),
        year_of(show.ended.as_deref()),
    ) {
        (Some(start), Some(end)) if start == end => start.to_string(),
        (Some(start), Some(end)) => format!("{} – {}", start, end),
        (Some(start), None) => format!("{} –", start),
        _ => String::new(),
    }
}
