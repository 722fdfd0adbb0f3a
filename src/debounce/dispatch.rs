//! The fire path: drain the buffer, call the model, route the reply.

use super::Debouncer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

impl Debouncer {
    /// Runs when a window's quiet period elapses. Every failure downstream
    /// of here is contained: nothing propagates to the host loop, and the
    /// drained aggregation is consumed whether or not dispatch succeeds.
    pub(super) async fn fire(&self, user_id: &str, id: Uuid, cancelled: &Arc<AtomicBool>) {
        let pending = {
            let gate = self.gate(user_id).await;
            let _guard = gate.lock().await;

            // Superseded after the timer fired but before we ran.
            if cancelled.load(Ordering::SeqCst) {
                return;
            }

            {
                let mut windows = self.inner.windows.lock().await;
                match windows.get(user_id) {
                    Some(w) if w.id == id => {
                        windows.remove(user_id);
                    }
                    // A different window took over while we were queued.
                    _ => return,
                }
            }

            match self.inner.store.drain(user_id).await {
                Ok(Some(pending)) => pending,
                // Already drained or never populated — a no-op, not an error.
                Ok(None) => return,
                Err(e) => {
                    warn!("user {user_id}: window {id} drain failed: {e}");
                    return;
                }
            }
        };

        info!(
            "user {user_id}: window {id} fired with {} fragment(s), {} chars",
            pending.fragments,
            pending.buffer.len()
        );

        let model = match self.inner.models.model_for(user_id).await {
            Ok(Some(model)) => model,
            Ok(None) => self.inner.default_model.clone(),
            Err(e) => {
                warn!("user {user_id}: model lookup failed, using default: {e}");
                self.inner.default_model.clone()
            }
        };

        let reply = match self
            .inner
            .completion
            .complete(user_id, &model, &pending.buffer)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                // Terminal for this window: not retried, not requeued.
                error!("user {user_id}: window {id} completion failed: {e}");
                self.inner.failure_reply.clone()
            }
        };

        if let Err(e) = self.inner.outbound.send(&pending.destination, &reply).await {
            warn!(
                "user {user_id}: window {id} send to {} failed: {e}",
                pending.destination
            );
        }
    }
}
