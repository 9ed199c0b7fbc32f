//! Cursor pagination over listing endpoints.
//!
//! DESIGN
//! ======
//! [`InfiniteQuery`] is a plain state machine so a reactive UI can keep it in
//! a signal: `begin_fetch` hands out the next request (or `None` while a
//! page is in flight or the sequence is exhausted), `receive` files the
//! result. Each request carries the generation it was issued under; replies
//! that arrive after an invalidation belong to an older generation and are
//! dropped. [`InfiniteQuery::fetch_next_page`] does both around an await for
//! callers that own the query outright.

#[cfg(test)]
#[path = "pagination_test.rs"]
mod pagination_test;

use std::fmt;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{ApiRequest, HttpClient, Transport};

/// Cursor sent with the first page request.
pub const FIRST_CURSOR: &str = "0";

/// Opaque page token. The API sends strings or numbers; both are kept as text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Cursor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Self(s)),
            Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(D::Error::custom(format!("expected string or number cursor, got {other}"))),
        }
    }
}

/// One page of a listing. A missing or `null` `nextCursor` ends the sequence.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(rename = "nextCursor", default)]
    pub next_cursor: Option<Cursor>,
}

/// Filters and endpoint of one listing.
pub trait ListQuery {
    type Item: DeserializeOwned;

    fn endpoint(&self) -> &'static str;

    /// Query parameters other than `cursor`, in the order they are sent.
    fn params(&self) -> Vec<(&'static str, String)>;

    /// Cursor of the first page request; `None` leaves `cursor` out.
    fn first_cursor(&self) -> Option<&'static str> {
        Some(FIRST_CURSOR)
    }

    fn request(&self, cursor: Option<&str>) -> ApiRequest {
        let mut request = ApiRequest::get(self.endpoint());
        if let Some(cursor) = cursor {
            request = request.query("cursor", cursor);
        }
        for (key, value) in self.params() {
            request = request.query(key, value);
        }
        request
    }
}

/// A page request handed out by [`InfiniteQuery::begin_fetch`]. The
/// generation goes back to [`InfiniteQuery::receive`] with the reply.
#[derive(Clone, Debug, PartialEq)]
pub struct PageFetch {
    pub request: ApiRequest,
    pub generation: u64,
}

/// Accumulated pages of one listing plus fetch status.
#[derive(Clone, Debug)]
pub struct InfiniteQuery<Q: ListQuery> {
    query: Q,
    pages: Vec<Page<Q::Item>>,
    fetching: bool,
    error: Option<ApiError>,
    /// Bumped on every invalidation; replies from older generations are dropped.
    generation: u64,
}

impl<Q: ListQuery> InfiniteQuery<Q> {
    pub fn new(query: Q) -> Self {
        Self { query, pages: Vec::new(), fetching: false, error: None, generation: 0 }
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    pub fn pages(&self) -> &[Page<Q::Item>] {
        &self.pages
    }

    pub fn items(&self) -> impl Iterator<Item = &Q::Item> {
        self.pages.iter().flat_map(|page| page.data.iter())
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// No page has arrived yet and one is in flight.
    pub fn is_loading(&self) -> bool {
        self.fetching && self.pages.is_empty()
    }

    pub fn is_fetching_next_page(&self) -> bool {
        self.fetching && !self.pages.is_empty()
    }

    pub fn has_next_page(&self) -> bool {
        match self.pages.last() {
            None => true,
            Some(page) => page.next_cursor.is_some(),
        }
    }

    /// Mark a fetch as started and return its request; `None` while a fetch
    /// is already in flight or after the last page.
    pub fn begin_fetch(&mut self) -> Option<PageFetch> {
        if self.fetching || !self.has_next_page() {
            return None;
        }
        let cursor = match self.pages.last() {
            Some(page) => page.next_cursor.as_ref().map(Cursor::as_str),
            None => self.query.first_cursor(),
        };
        let request = self.query.request(cursor);
        self.fetching = true;
        Some(PageFetch { request, generation: self.generation })
    }

    /// File the reply to the fetch of `generation`. Returns `false` when the
    /// listing was invalidated since and the reply was dropped.
    pub fn receive(&mut self, generation: u64, result: Result<Page<Q::Item>, ApiError>) -> bool {
        if generation != self.generation {
            tracing::debug!(endpoint = self.query.endpoint(), generation, current = self.generation, "dropping stale page");
            return false;
        }
        self.fetching = false;
        match result {
            Ok(page) => {
                self.error = None;
                self.pages.push(page);
            }
            Err(err) => {
                tracing::warn!(endpoint = self.query.endpoint(), error = %err, "page fetch failed");
                self.error = Some(err);
            }
        }
        true
    }

    /// Drop accumulated pages so the next fetch starts from the first page.
    /// A fetch still in flight is orphaned.
    pub fn invalidate(&mut self) {
        self.pages.clear();
        self.error = None;
        self.fetching = false;
        self.generation += 1;
    }

    /// Replace the filters; pages fetched under the old ones are dropped.
    pub fn set_query(&mut self, query: Q) {
        self.query = query;
        self.invalidate();
    }

    /// Fetch and append the next page. Returns whether a request was made.
    pub async fn fetch_next_page<T: Transport>(&mut self, client: &HttpClient<T>) -> bool {
        let Some(fetch) = self.begin_fetch() else {
            return false;
        };
        let result = client.send_json::<Page<Q::Item>>(&fetch.request).await;
        self.receive(fetch.generation, result);
        true
    }

    /// Start over from the first page.
    pub async fn refetch<T: Transport>(&mut self, client: &HttpClient<T>) -> bool {
        self.invalidate();
        self.fetch_next_page(client).await
    }
}
