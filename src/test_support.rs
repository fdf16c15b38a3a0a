//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{ApiError, CompendiumSource, Entry};

/// In-memory source that counts how often each endpoint is hit.
pub struct StaticSource {
    entries: Vec<Entry>,
    failure: Option<ApiError>,
    delay: Duration,
    collection_calls: AtomicUsize,
    category_calls: AtomicUsize,
    entry_calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            failure: None,
            delay: Duration::ZERO,
            collection_calls: AtomicUsize::new(0),
            category_calls: AtomicUsize::new(0),
            entry_calls: AtomicUsize::new(0),
        }
    }

    /// A source whose every call fails with `error`.
    pub fn failing(error: ApiError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new(Vec::new())
        }
    }

    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }

    pub fn collection_calls(&self) -> usize {
        self.collection_calls.load(Ordering::SeqCst)
    }

    pub fn category_calls(&self) -> usize {
        self.category_calls.load(Ordering::SeqCst)
    }

    pub fn entry_calls(&self) -> usize {
        self.entry_calls.load(Ordering::SeqCst)
    }

    async fn respond(&self) -> Result<(), ApiError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CompendiumSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_all(&self) -> Result<Vec<Entry>, ApiError> {
        self.collection_calls.fetch_add(1, Ordering::SeqCst);
        self.respond().await?;
        Ok(self.entries.clone())
    }

    async fn fetch_category(&self, category: &str) -> Result<Vec<Entry>, ApiError> {
        self.category_calls.fetch_add(1, Ordering::SeqCst);
        self.respond().await?;
        Ok(self
            .entries
            .iter()
            .filter(|e| e.category.eq_ignore_ascii_case(category))
            .cloned()
            .collect())
    }

    async fn fetch_entry(&self, name: &str) -> Result<Entry, ApiError> {
        self.entry_calls.fetch_add(1, Ordering::SeqCst);
        self.respond().await?;
        self.entries
            .iter()
            .find(|e| e.is_named(name))
            .cloned()
            .ok_or_else(|| ApiError::Application {
                status: 404,
                message: "no results".to_string(),
            })
    }
}

/// Four entries across two categories, deliberately out of name order.
pub fn sample_entries() -> Vec<Entry> {
    vec![
        Entry::new("moblin", "monsters", "A large, brutish monster.", "moblin.png"),
        Entry::new("apple", "materials", "A common fruit.", "apple.png"),
        Entry::new("bokoblin", "monsters", "A small, goblin-like monster.", "bokoblin.png"),
        Entry::new("blue moblin", "monsters", "A tougher moblin.", "blue_moblin.png"),
    ]
}

pub fn entry(name: &str) -> Entry {
    Entry::new(name, "", "", "")
}
