//! Aggregation store backed by an external keyed cache.
//!
//! Entries are serialized as JSON under `{prefix}{user_id}`, so pending
//! input survives a host restart. The TTL reaps entries orphaned by a
//! crash between append and fire.

use super::{AggregationStore, PendingAggregation};
use crate::{config::StoreConfig, error::LullError, traits::KeyedCache};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub struct CacheStore {
    cache: Arc<dyn KeyedCache>,
    key_prefix: String,
    ttl: Option<Duration>,
}

impl CacheStore {
    pub fn new(cache: Arc<dyn KeyedCache>, config: &StoreConfig) -> Self {
        Self {
            cache,
            key_prefix: config.key_prefix.clone(),
            ttl: config.pending_ttl(),
        }
    }

    fn key(&self, user_id: &str) -> String {
        format!("{}{}", self.key_prefix, user_id)
    }
}

#[async_trait]
impl AggregationStore for CacheStore {
    async fn append(
        &self,
        user_id: &str,
        destination: &str,
        fragment: &str,
    ) -> Result<(), LullError> {
        let key = self.key(user_id);
        // Read-modify-write. The debouncer serializes operations per user,
        // so appends for the same key never interleave.
        let entry = match self.cache.get(&key).await? {
            Some(raw) => {
                let mut entry: PendingAggregation = serde_json::from_str(&raw)?;
                entry.push(destination, fragment);
                entry
            }
            None => PendingAggregation::new(user_id, destination, fragment),
        };
        let raw = serde_json::to_string(&entry)?;
        self.cache.set(&key, &raw, self.ttl).await
    }

    async fn drain(&self, user_id: &str) -> Result<Option<PendingAggregation>, LullError> {
        match self.cache.take(&self.key(user_id)).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}
