//! Per-user aggregation of pending input fragments.

mod cache;
mod memory;


pub use cache::CacheStore;
pub use memory::MemoryStore;

use crate::{config::StoreConfig, error::LullError, traits::KeyedCache};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Buffered input for one user, awaiting dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingAggregation {
    /// Platform-specific user ID.
    pub user_id: String,
    /// Platform-specific target for routing the eventual reply.
    pub destination: String,
    /// Fragments received so far, joined by newlines.
    pub buffer: String,
    /// Number of fragments in the buffer.
    pub fragments: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PendingAggregation {
    pub(crate) fn new(user_id: &str, destination: &str, fragment: &str) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.to_string(),
            destination: destination.to_string(),
            buffer: fragment.to_string(),
            fragments: 1,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn push(&mut self, destination: &str, fragment: &str) {
        self.buffer.push('\n');
        self.buffer.push_str(fragment);
        self.fragments += 1;
        // The latest fragment decides where the reply goes.
        self.destination = destination.to_string();
        self.updated_at = Utc::now();
    }
}

/// Keyed store of pending aggregations.
///
/// `drain` returning `Ok(None)` is an expected outcome of the cancellation
/// race, not an error; callers treat it as a no-op.
#[async_trait]
pub trait AggregationStore: Send + Sync {
    /// Append a fragment under `user_id`, creating the entry if absent.
    async fn append(
        &self,
        user_id: &str,
        destination: &str,
        fragment: &str,
    ) -> Result<(), LullError>;

    /// Atomically remove and return the entry for `user_id`.
    async fn drain(&self, user_id: &str) -> Result<Option<PendingAggregation>, LullError>;
}

/// Build the store backend named by the configuration.
///
/// The `cache` backend requires a host-provided [`KeyedCache`]; whether
/// pending input survives a restart is a deployment choice, not a separate
/// code path.
pub fn build(
    config: &StoreConfig,
    cache: Option<Arc<dyn KeyedCache>>,
) -> Result<Arc<dyn AggregationStore>, LullError> {
    match config.backend.as_str() {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        "cache" => {
            let cache = cache.ok_or_else(|| {
                LullError::Config("store backend \"cache\" requires a keyed cache".to_string())
            })?;
            Ok(Arc::new(CacheStore::new(cache, config)))
        }
        other => Err(LullError::Config(format!(
            "unknown store backend: {other}"
        ))),
    }
}
