//! Catalog data types as served by the TVmaze API.
//!
//! Fields the API may omit or null out are optional so partial payloads
//! (search hits, trimmed fixtures) still decode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Weekly airing schedule
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub days: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    pub average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub code: String,
    pub timezone: String,
}

/// Broadcast network or streaming channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub country: Option<Country>,
    #[serde(default)]
    pub official_site: Option<String>,
}

/// Identifiers in other catalogs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Externals {
    pub tvrage: Option<u64>,
    pub thetvdb: Option<u64>,
    pub imdb: Option<String>,
}

/// Poster image URLs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub this: Link,
    #[serde(default)]
    pub previousepisode: Option<Link>,
    #[serde(default)]
    pub nextepisode: Option<Link>,
}

/// A show in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub name: String,
    /// Show type, e.g. "Scripted" or "Reality"
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub average_runtime: Option<u32>,
    #[serde(default)]
    pub premiered: Option<String>,
    #[serde(default)]
    pub ended: Option<String>,
    #[serde(default)]
    pub official_site: Option<String>,
    #[serde(default)]
    pub schedule: Option<Schedule>,
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub network: Option<Network>,
    #[serde(default)]
    pub web_channel: Option<Network>,
    #[serde(default)]
    pub externals: Option<Externals>,
    #[serde(default)]
    pub image: Option<Image>,
    /// HTML summary
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub updated: Option<i64>,
    #[serde(default, rename = "_links")]
    pub links: Option<Links>,
}

impl Show {
    /// Average rating, with a missing rating counted as zero
    pub fn rating_value(&self) -> f64 {
        self.rating
            .as_ref()
            .and_then(|r| r.average)
            .unwrap_or(0.0)
    }

    pub fn has_genre(&self, genre: Genre) -> bool {
        self.genres.iter().any(|tag| tag == genre.tag())
    }

    pub fn original_image(&self) -> Option<&str> {
        self.image
            .as_ref()
            .and_then(|i| i.original.as_deref().or(i.medium.as_deref()))
    }

    /// First genre tag, used as the card subtitle
    pub fn primary_genre(&self) -> Option<&str> {
        self.genres.first().map(String::as_str)
    }

    /// Network or streaming channel name
    pub fn broadcaster(&self) -> Option<&str> {
        self.network
            .as_ref()
            .or(self.web_channel.as_ref())
            .map(|n| n.name.as_str())
    }
}

/// One hit from the search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub score: f64,
    pub show: Show,
}

/// Genres the home page groups the catalog by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Genre {
    Drama,
    Thriller,
    ScienceFiction,
    Comedy,
    Action,
}

impl Genre {
    /// All grouped genres, in home page order
    pub const ALL: [Genre; 5] = [
        Genre::Drama,
        Genre::Thriller,
        Genre::ScienceFiction,
        Genre::Comedy,
        Genre::Action,
    ];

    /// Tag as it appears in a show's genre list
    pub fn tag(&self) -> &'static str {
        match self {
            Genre::Drama => "Drama",
            Genre::Thriller => "Thriller",
            Genre::ScienceFiction => "Science-Fiction",
            Genre::Comedy => "Comedy",
            Genre::Action => "Action",
        }
    }

    /// Heading for the genre row
    pub fn title(&self) -> &'static str {
        match self {
            Genre::Drama => "Drama",
            Genre::Thriller => "Thrillers",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Comedy => "Comedy",
            Genre::Action => "Action",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Genre::Drama => 0,
            Genre::Thriller => 1,
            Genre::ScienceFiction => 2,
            Genre::Comedy => 3,
            Genre::Action => 4,
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Error)]
#[error("Unknown genre: {0} (expected drama, thriller, science-fiction, comedy or action)")]
pub struct UnknownGenre(String);

impl FromStr for Genre {
    type Err = UnknownGenre;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "drama" => Ok(Genre::Drama),
            "thriller" | "thrillers" => Ok(Genre::Thriller),
            "science-fiction" | "sci-fi" | "scifi" | "fiction" => Ok(Genre::ScienceFiction),
            "comedy" => Ok(Genre::Comedy),
            "action" => Ok(Genre::Action),
            _ => Err(UnknownGenre(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_show_payload_decodes() {
        let show: Show = serde_json::from_value(json!({
            "id": 1,
            "url": "https://www.tvmaze.com/shows/1/under-the-dome",
            "name": "Under the Dome",
            "type": "Scripted",
            "language": "English",
            "genres": ["Drama", "Science-Fiction", "Thriller"],
            "status": "Ended",
            "runtime": 60,
            "averageRuntime": 60,
            "premiered": "2013-06-24",
            "ended": "2015-09-10",
            "officialSite": "http://www.cbs.com/shows/under-the-dome/",
            "schedule": { "time": "22:00", "days": ["Thursday"] },
            "rating": { "average": 6.5 },
            "weight": 98,
            "network": {
                "id": 2,
                "name": "CBS",
                "country": { "name": "United States", "code": "US", "timezone": "America/New_York" },
                "officialSite": "https://www.cbs.com/"
            },
            "webChannel": null,
            "dvdCountry": null,
            "externals": { "tvrage": 25988, "thetvdb": 264492, "imdb": "tt1553656" },
            "image": { "medium": "m.jpg", "original": "o.jpg" },
            "summary": "<p><b>Under the Dome</b> is the story of a small town...</p>",
            "updated": 1704794065,
            "_links": {
                "self": { "href": "https://api.tvmaze.com/shows/1" },
                "previousepisode": { "href": "https://api.tvmaze.com/episodes/185054", "name": "The Enemy Within" }
            }
        }))
        .unwrap();

        assert_eq!(show.kind.as_deref(), Some("Scripted"));
        assert_eq!(show.average_runtime, Some(60));
        assert_eq!(show.broadcaster(), Some("CBS"));
        assert_eq!(show.original_image(), Some("o.jpg"));
        assert!(show.has_genre(Genre::ScienceFiction));
        assert!(!show.has_genre(Genre::Comedy));
        assert_eq!(show.links.unwrap().this.href, "https://api.tvmaze.com/shows/1");
    }

    #[test]
    fn test_sparse_show_payload_decodes() {
        let show: Show = serde_json::from_value(json!({
            "id": 7,
            "name": "Sparse",
            "rating": { "average": null },
            "image": null
        }))
        .unwrap();

        assert_eq!(show.rating_value(), 0.0);
        assert!(show.genres.is_empty());
        assert_eq!(show.original_image(), None);
        assert_eq!(show.primary_genre(), None);
    }

    #[test]
    fn test_genre_tag_match_is_exact() {
        let show: Show = serde_json::from_value(json!({
            "id": 3,
            "genres": ["drama", "Science Fiction"]
        }))
        .unwrap();

        assert!(!show.has_genre(Genre::Drama));
        assert!(!show.has_genre(Genre::ScienceFiction));
    }

    #[test]
    fn test_genre_from_str() {
        assert_eq!("Drama".parse::<Genre>().unwrap(), Genre::Drama);
        assert_eq!("sci-fi".parse::<Genre>().unwrap(), Genre::ScienceFiction);
        assert_eq!(
            "science-fiction".parse::<Genre>().unwrap(),
            Genre::ScienceFiction
        );
        assert!("western".parse::<Genre>().is_err());
    }

    #[test]
    fn test_genre_index_matches_order() {
        for (i, genre) in Genre::ALL.iter().enumerate() {
            assert_eq!(genre.index(), i);
        }
    }
}
