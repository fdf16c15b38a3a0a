//! # Data Provider
//!
//! Fetch-once cache in front of a [`CompendiumSource`].
//!
//! ```text
//!   Empty ──fetch_all()──▶ Pending(shared) ──ok──▶ Ready(entries)
//!     ▲                         │
//!     └─────────── err ─────────┘
//! ```
//!
//! While `Pending`, every caller awaits the same shared future, so there is
//! never more than one collection request on the wire. `Ready` is terminal.
//! Category and single-entry lookups are passed straight through.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use log::{debug, info, warn};

use crate::api::{ApiError, CompendiumSource, Entry};

/// The full compendium, shared read-only once fetched.
pub type EntryCollection = Arc<[Entry]>;

type PendingFetch = Shared<BoxFuture<'static, Result<EntryCollection, ApiError>>>;

enum CacheCell {
    Empty,
    Pending(PendingFetch),
    Ready(EntryCollection),
}

pub struct DataProvider {
    source: Arc<dyn CompendiumSource>,
    cell: Mutex<CacheCell>,
}

impl DataProvider {
    pub fn new(source: Arc<dyn CompendiumSource>) -> Self {
        Self {
            source,
            cell: Mutex::new(CacheCell::Empty),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheCell> {
        self.cell.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached collection, fetching it on first use.
    pub async fn fetch_all(&self) -> Result<EntryCollection, ApiError> {
        let pending = {
            let mut cell = self.lock();
            match &*cell {
                CacheCell::Ready(entries) => return Ok(entries.clone()),
                CacheCell::Pending(fetch) => {
                    debug!("Joining in-flight collection fetch");
                    fetch.clone()
                }
                CacheCell::Empty => {
                    info!("Fetching full collection from {}", self.source.name());
                    let source = self.source.clone();
                    let fetch = async move {
                        source
                            .fetch_all()
                            .await
                            .map(EntryCollection::from)
                    }
                    .boxed()
                    .shared();
                    *cell = CacheCell::Pending(fetch.clone());
                    fetch
                }
            }
        };

        let result = pending.clone().await;

        // Only the fetch still held in the cell may settle it; a newer one
        // may have started after this one failed.
        let mut cell = self.lock();
        let still_ours = matches!(&*cell, CacheCell::Pending(current) if current.ptr_eq(&pending));
        if still_ours {
            match &result {
                Ok(entries) => {
                    info!("Cached {} entries", entries.len());
                    *cell = CacheCell::Ready(entries.clone());
                }
                Err(e) => {
                    warn!("Collection fetch failed: {}", e);
                    *cell = CacheCell::Empty;
                }
            }
        }
        result
    }

    /// The collection if it has already been fetched.
    pub fn cached(&self) -> Option<EntryCollection> {
        match &*self.lock() {
            CacheCell::Ready(entries) => Some(entries.clone()),
            _ => None,
        }
    }

    pub async fn fetch_by_category(&self, category: &str) -> Result<Vec<Entry>, ApiError> {
        self.source.fetch_category(category).await.inspect_err(|e| {
            warn!("Category fetch for '{}' failed: {}", category, e);
        })
    }

    pub async fn fetch_by_name(&self, name: &str) -> Result<Entry, ApiError> {
        self.source.fetch_entry(name).await.inspect_err(|e| {
            warn!("Entry fetch for '{}' failed: {}", name, e);
        })
    }
}
