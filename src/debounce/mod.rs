//! Debounce scheduler — one live window per user, reset on every fragment.
//!
//! Each incoming fragment is appended to the user's buffer and replaces the
//! user's scheduled window with a fresh one. A window that survives the
//! quiet period uncancelled drains the buffer and dispatches it downstream
//! (see [`dispatch`]).

mod dispatch;


use crate::{
    config::Config,
    error::LullError,
    store::AggregationStore,
    traits::{Completion, ModelSelector, Outbound},
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

/// A live debounce window for one user.
struct Window {
    id: Uuid,
    /// Set when a newer fragment supersedes this window. Checked at the top
    /// of the fire path: aborting the sleep task is not enough, since the
    /// callback may already be queued for execution.
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

/// Coalesces per-user fragment bursts and dispatches each one exactly once
/// after the user goes quiet.
///
/// Cheap to clone; all clones share the same state. Windows for different
/// users are fully independent and may fire concurrently.
#[derive(Clone)]
pub struct Debouncer {
    inner: Arc<Inner>,
}

struct Inner {
    store: Arc<dyn AggregationStore>,
    completion: Arc<dyn Completion>,
    outbound: Arc<dyn Outbound>,
    models: Arc<dyn ModelSelector>,
    delay: Duration,
    default_model: String,
    failure_reply: String,
    /// Live windows, at most one per user.
    windows: Mutex<HashMap<String, Window>>,
    /// Per-user gates serializing intake against a concurrently firing
    /// window for the same user. Never evicted: a late trigger may still
    /// hold a gate after its window is gone, and a second gate for the
    /// same user would reopen the race the gate exists to close.
    gates: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Debouncer {
    /// Create a debouncer over the given store and capabilities.
    pub fn new(
        config: &Config,
        store: Arc<dyn AggregationStore>,
        completion: Arc<dyn Completion>,
        outbound: Arc<dyn Outbound>,
        models: Arc<dyn ModelSelector>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                completion,
                outbound,
                models,
                delay: config.debounce.delay(),
                default_model: config.model.default.clone(),
                failure_reply: config.debounce.failure_reply.clone(),
                windows: Mutex::new(HashMap::new()),
                gates: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Ingest one fragment: append it to the user's buffer and reset the
    /// user's window. The completion call never happens on this path.
    pub async fn on_fragment(
        &self,
        user_id: &str,
        destination: &str,
        fragment: &str,
    ) -> Result<(), LullError> {
        let gate = self.gate(user_id).await;
        let _guard = gate.lock().await;

        self.inner
            .store
            .append(user_id, destination, fragment)
            .await?;

        // Best-effort typing indicator while the buffer is open.
        let outbound = self.inner.outbound.clone();
        let dest = destination.to_string();
        tokio::spawn(async move {
            if let Err(e) = outbound.typing(&dest).await {
                debug!("typing indicator failed: {e}");
            }
        });

        let id = Uuid::new_v4();
        let cancelled = Arc::new(AtomicBool::new(false));
        let task = {
            let this = self.clone();
            let user = user_id.to_string();
            let flag = cancelled.clone();
            tokio::spawn(async move {
                tokio::time::sleep(this.inner.delay).await;
                this.fire(&user, id, &flag).await;
            })
        };

        let prev = {
            let mut windows = self.inner.windows.lock().await;
            windows.insert(user_id.to_string(), Window { id, cancelled, task })
        };
        match prev {
            Some(prev) => {
                prev.cancelled.store(true, Ordering::SeqCst);
                prev.task.abort();
                debug!("user {user_id}: window {} superseded by {id}", prev.id);
            }
            None => debug!("user {user_id}: window {id} opened"),
        }

        Ok(())
    }

    /// The serialization gate for one user's operations.
    async fn gate(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut gates = self.inner.gates.lock().await;
        gates.entry(user_id.to_string()).or_default().clone()
    }
}
