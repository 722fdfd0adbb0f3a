//! Capability traits consumed by the debounce core.
//!
//! The host wires concrete transport, model, and cache implementations in
//! behind these seams; the core never touches a network itself.

use crate::error::LullError;
use async_trait::async_trait;
use std::time::Duration;

/// Completion capability — the brain behind the relay.
#[async_trait]
pub trait Completion: Send + Sync {
    /// Send the coalesced prompt and return the reply text.
    async fn complete(&self, user_id: &str, model: &str, text: &str) -> Result<String, LullError>;
}

/// Send capability — routes text back to where the fragments came from.
#[async_trait]
pub trait Outbound: Send + Sync {
    /// Deliver `text` to the platform-specific `destination`.
    async fn send(&self, destination: &str, text: &str) -> Result<(), LullError>;

    /// Show a typing indicator while input is being aggregated.
    async fn typing(&self, _destination: &str) -> Result<(), LullError> {
        Ok(())
    }
}

/// Per-user model preference lookup.
#[async_trait]
pub trait ModelSelector: Send + Sync {
    /// The model this user selected, or `None` to use the configured default.
    async fn model_for(&self, user_id: &str) -> Result<Option<String>, LullError>;
}

/// External keyed cache (e.g. Redis) backing the `cache` store variant.
#[async_trait]
pub trait KeyedCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, LullError>;

    /// Store `value` under `key`, expiring after `ttl` if given.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), LullError>;

    /// Atomically remove and return the value under `key` (e.g. `GETDEL`).
    async fn take(&self, key: &str) -> Result<Option<String>, LullError>;
}
