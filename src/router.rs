//! Route table and navigation history.
//!
//! Routes:
//!
//! - `/` home
//! - `/details/:id` details for a numeric show id
//! - `/search`, `/search/:query`, `/search?q=<query>` search, optionally seeded

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Invalid show id: {0}")]
    InvalidId(String),

    #[error("No page at {0}")]
    NotFound(String),
}

/// A page the app can show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Details { id: u64 },
    Search { query: Option<String> },
}

impl Route {
    pub fn search(query: &str) -> Self {
        Route::Search {
            query: (!query.is_empty()).then(|| query.to_string()),
        }
    }

    /// Parse a path with an optional query string
    pub fn parse(input: &str) -> Result<Self, RouteError> {
        let (path, query) = match input.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (input, None),
        };

        let q = query.and_then(|query| {
            query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .find(|(key, _)| *key == "q")
                .map(|(_, value)| decode(value))
        });

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Ok(Route::Home),
            ["details", id] => id
                .parse()
                .map(|id| Route::Details { id })
                .map_err(|_| RouteError::InvalidId(id.to_string())),
            ["search"] => Ok(Route::search(q.as_deref().unwrap_or(""))),
            ["search", segment] => {
                // An empty `q` does not override the path segment
                let query = q.filter(|q| !q.is_empty()).unwrap_or_else(|| decode(segment));
                Ok(Route::search(&query))
            }
            _ => Err(RouteError::NotFound(input.to_string())),
        }
    }

    /// The `q` parameter of a search route
    pub fn query(&self) -> Option<&str> {
        match self {
            Route::Search { query } => query.as_deref(),
            _ => None,
        }
    }
}

fn decode(value: &str) -> String {
    let value = value.replace('+', " ");
    urlencoding::decode(&value)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(value)
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("/"),
            Route::Details { id } => write!(f, "/details/{}", id),
            Route::Search { query: None } => f.write_str("/search"),
            Route::Search { query: Some(q) } => {
                write!(f, "/search?q={}", urlencoding::encode(q))
            }
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

/// History stack of visited routes
#[derive(Debug, Clone)]
pub struct Navigator {
    history: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        Self {
            history: vec![initial],
        }
    }

    pub fn current(&self) -> &Route {
        // History is never empty: `back` keeps the first entry
        &self.history[self.history.len() - 1]
    }

    /// Navigate to a new entry
    pub fn push(&mut self, route: Route) {
        if self.current() != &route {
            tracing::debug!("Navigate to {}", route);
            self.history.push(route);
        }
    }

    /// Swap the current entry without growing history
    pub fn replace(&mut self, route: Route) {
        let last = self.history.len() - 1;
        self.history[last] = route;
    }

    /// Go back one entry. Returns false when already at the first one.
    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    #[cfg(test)]
    pub fn depth(&self) -> usize {
        self.history.len()
    }
}
