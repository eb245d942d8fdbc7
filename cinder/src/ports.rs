use async_trait::async_trait;
use shared::{Result, TtlSeconds};
use std::time::Duration;

// Ports are the pluggable extension points for backing key-value stores.

/// Remaining lifetime of a key as reported by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyTtl {
    /// The key does not exist (or expired since it was last read).
    Absent,
    /// The key exists and never expires.
    NoExpiry,
    /// The key exists and expires after the given duration.
    Remaining(Duration),
}

/// Port for the external key-value store. Absence is a distinguishable,
/// non-error outcome; every operation is bounded by a timeout in the
/// adapter and must be safe for concurrent use.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn ttl(&self, key: &str) -> Result<KeyTtl>;

    /// Write `(key, value)` with the given expiry, overwriting any existing
    /// entry. `TtlSeconds(0)` stores the entry without expiry.
    async fn set(&self, key: &str, value: &str, ttl: TtlSeconds) -> Result<()>;

    /// Lightweight connectivity probe. Never touches application keys.
    async fn ping(&self) -> Result<()>;
}
