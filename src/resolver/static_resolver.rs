//! In-memory resolver answering from a fixed table.
//!
//! Useful for tests and dry runs: answers can be delayed or withheld entirely,
//! and every query is recorded with the (tokio) instant it was issued.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use super::BlacklistResolver;
use crate::error_handling::LookupError;

/// Query type recorded by [`StaticResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// A record lookup
    Address,
    /// TXT record lookup
    Text,
    /// PTR lookup
    Reverse,
}

/// A query received by [`StaticResolver`].
#[derive(Debug, Clone)]
pub struct RecordedQuery {
    /// Queried name, without trailing dot
    pub name: String,
    /// Query type
    pub kind: QueryKind,
    /// When the query was received
    pub at: Instant,
}

#[derive(Debug, Clone)]
enum Scripted<T> {
    Answer(T),
    Error(LookupError),
    Hang,
}

/// Resolver answering from an in-memory table.
///
/// Names without an entry answer [`LookupError::NotFound`].
#[derive(Debug, Default)]
pub struct StaticResolver {
    addresses: HashMap<String, Scripted<Vec<String>>>,
    texts: HashMap<String, Scripted<Vec<String>>>,
    ptrs: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    queries: Mutex<Vec<RecordedQuery>>,
}

fn key(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

impl StaticResolver {
    /// Creates an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers A queries for `name` with `addresses`.
    pub fn with_addresses<I, S>(mut self, name: &str, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let addresses = addresses.into_iter().map(Into::into).collect();
        self.addresses.insert(key(name), Scripted::Answer(addresses));
        self
    }

    /// Fails A queries for `name` with `error`.
    pub fn with_address_error(mut self, name: &str, error: LookupError) -> Self {
        self.addresses.insert(key(name), Scripted::Error(error));
        self
    }

    /// Never answers A queries for `name`.
    pub fn with_hang(mut self, name: &str) -> Self {
        self.addresses.insert(key(name), Scripted::Hang);
        self
    }

    /// Answers TXT queries for `name` with `records`.
    pub fn with_texts<I, S>(mut self, name: &str, records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let records = records.into_iter().map(Into::into).collect();
        self.texts.insert(key(name), Scripted::Answer(records));
        self
    }

    /// Never answers TXT queries for `name`.
    pub fn with_text_hang(mut self, name: &str) -> Self {
        self.texts.insert(key(name), Scripted::Hang);
        self
    }

    /// Answers PTR queries for `address` with `name`.
    pub fn with_ptr(mut self, address: &str, name: &str) -> Self {
        self.ptrs.insert(address.to_string(), name.to_string());
        self
    }

    /// Delays every answer for `name` by `delay`.
    pub fn with_delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(key(name), delay);
        self
    }

    /// Returns all queries received so far, in arrival order.
    pub fn queries(&self) -> Vec<RecordedQuery> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the names queried with `kind`, in arrival order.
    pub fn queried_names(&self, kind: QueryKind) -> Vec<String> {
        self.queries()
            .into_iter()
            .filter(|q| q.kind == kind)
            .map(|q| q.name)
            .collect()
    }

    async fn record(&self, name: &str, kind: QueryKind) -> String {
        let name = key(name);
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedQuery {
                name: name.clone(),
                kind,
                at: Instant::now(),
            });
        if let Some(delay) = self.delays.get(&name) {
            tokio::time::sleep(*delay).await;
        }
        name
    }

    async fn answer(
        table: &HashMap<String, Scripted<Vec<String>>>,
        name: String,
    ) -> Result<Vec<String>, LookupError> {
        match table.get(&name) {
            Some(Scripted::Answer(values)) => Ok(values.clone()),
            Some(Scripted::Error(e)) => Err(e.clone()),
            Some(Scripted::Hang) => std::future::pending().await,
            None => Err(LookupError::NotFound(name)),
        }
    }
}

#[async_trait]
impl BlacklistResolver for StaticResolver {
    async fn lookup_address(&self, name: &str) -> Result<Vec<String>, LookupError> {
        let name = self.record(name, QueryKind::Address).await;
        Self::answer(&self.addresses, name).await
    }

    async fn lookup_text(&self, name: &str) -> Result<Vec<String>, LookupError> {
        let name = self.record(name, QueryKind::Text).await;
        Self::answer(&self.texts, name).await
    }

    async fn reverse_lookup(&self, address: &str) -> Result<String, LookupError> {
        let address = self.record(address, QueryKind::Reverse).await;
        self.ptrs
            .get(&address)
            .cloned()
            .ok_or(LookupError::NotFound(address))
    }
}
