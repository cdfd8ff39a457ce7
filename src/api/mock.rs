//! In-memory `ShowApi` for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use futures::future::BoxFuture;
use serde_json::{Value, json};

use super::{ParsedError, RequestOptions, ShowApi};

struct Reply {
    delay: Duration,
    result: Result<Value, ParsedError>,
}

/// Scripted API: each endpoint answers from a queue of replies, repeating the
/// last one once the queue is down to a single entry.
#[derive(Default)]
pub(crate) struct MockApi {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<String>>,
}

impl MockApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, endpoint: &str, value: Value) -> &Self {
        self.push(endpoint, Duration::ZERO, Ok(value))
    }

    pub(crate) fn respond_after(&self, endpoint: &str, delay: Duration, value: Value) -> &Self {
        self.push(endpoint, delay, Ok(value))
    }

    pub(crate) fn fail(&self, endpoint: &str, message: &str) -> &Self {
        self.push(endpoint, Duration::ZERO, Err(ParsedError::new(message)))
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, endpoint: &str, delay: Duration, result: Result<Value, ParsedError>) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .entry(endpoint.to_string())
            .or_default()
            .push_back(Reply { delay, result });
        self
    }

    fn next_reply(&self, endpoint: &str) -> (Duration, Result<Value, ParsedError>) {
        let mut replies = self.replies.lock().unwrap();
        let Some(queue) = replies.get_mut(endpoint) else {
            return (Duration::ZERO, Err(ParsedError::http_status(404)));
        };
        let reply = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().map(|r| Reply {
                delay: r.delay,
                result: r.result.clone(),
            })
        };
        match reply {
            Some(reply) => (reply.delay, reply.result),
            None => (Duration::ZERO, Err(ParsedError::http_status(404))),
        }
    }
}

impl ShowApi for MockApi {
    fn get_json<'a>(
        &'a self,
        endpoint: &'a str,
        _options: &'a RequestOptions,
    ) -> BoxFuture<'a, Result<Value, ParsedError>> {
        self.calls.lock().unwrap().push(endpoint.to_string());
        let (delay, result) = self.next_reply(endpoint);
        Box::pin(async move {
            // Suspend at least once, like a real request
            tokio::task::yield_now().await;
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            result
        })
    }
}

/// Minimal show payload as the API would send it
pub(crate) fn show_json(id: u64, name: &str, genres: &[&str], rating: Option<f64>) -> Value {
    json!({
        "id": id,
        "name": name,
        "url": format!("https://www.tvmaze.com/shows/{}", id),
        "genres": genres,
        "rating": { "average": rating },
        "image": { "medium": format!("{}-medium.jpg", id), "original": format!("{}.jpg", id) },
        "summary": format!("<p>{} summary</p>", name),
    })
}

pub(crate) fn show(id: u64, name: &str, genres: &[&str], rating: Option<f64>) -> crate::models::Show {
    serde_json::from_value(show_json(id, name, genres, rating)).unwrap()
}
