//! # lull
//!
//! Message-aggregation and debounce core for a chat-driven assistant relay.
//!
//! People type in bursts: a thought split across three or four short
//! messages a second apart. `lull` buffers those fragments per user,
//! restarts a quiet-period timer on each one, and once the user goes
//! silent for the configured delay it dispatches the coalesced text
//! downstream exactly once and routes the reply back where the fragments
//! came from.
//!
//! The crate is transport-agnostic: the chat channel, the language model,
//! the per-user model preference, and the optional backing cache are all
//! injected as capability traits ([`Outbound`], [`Completion`],
//! [`ModelSelector`], [`KeyedCache`]). The core owns only the correctness
//! contract — arrival ordering, cancellation of superseded windows, and
//! at-most-once dispatch per window.

pub mod config;
pub mod debounce;
pub mod error;
pub mod store;
pub mod traits;

pub use config::Config;
pub use debounce::Debouncer;
pub use error::LullError;
pub use store::{AggregationStore, CacheStore, MemoryStore, PendingAggregation};
pub use traits::{Completion, KeyedCache, ModelSelector, Outbound};
