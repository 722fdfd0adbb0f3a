//! In-memory aggregation store.

use super::{AggregationStore, PendingAggregation};
use crate::error::LullError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Process-local store. Buffered input is lost if the host crashes before
/// a window fires.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, PendingAggregation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AggregationStore for MemoryStore {
    async fn append(
        &self,
        user_id: &str,
        destination: &str,
        fragment: &str,
    ) -> Result<(), LullError> {
        let mut entries = self.entries.lock().await;
        match entries.get_mut(user_id) {
            Some(entry) => entry.push(destination, fragment),
            None => {
                entries.insert(
                    user_id.to_string(),
                    PendingAggregation::new(user_id, destination, fragment),
                );
            }
        }
        Ok(())
    }

    async fn drain(&self, user_id: &str) -> Result<Option<PendingAggregation>, LullError> {
        Ok(self.entries.lock().await.remove(user_id))
    }
}
