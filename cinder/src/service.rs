use crate::domain::CacheHit;
use crate::events::{now_timestamp, CacheEvent, HitEvent, MissEvent, StoredEvent};
use crate::ports::{KeyTtl, KeyValueStore};
use shared::{Error, Result, TtlSeconds};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

/// Application service for cache access. This is the single entry point for
/// all cache operations: it validates requests, resolves the effective TTL,
/// and maps store outcomes onto the error taxonomy. It holds no mutable
/// state of its own, so a shared instance is safe under arbitrary
/// interleaving of concurrent calls.
#[derive(Clone)]
pub struct CacheAccessService {
    store: Arc<dyn KeyValueStore>,
    default_ttl: TtlSeconds,
    event_broadcaster: Option<broadcast::Sender<CacheEvent>>,
}

impl CacheAccessService {
    pub fn new(store: Arc<dyn KeyValueStore>, default_ttl: TtlSeconds) -> Self {
        Self {
            store,
            default_ttl,
            event_broadcaster: None,
        }
    }

    pub fn with_event_broadcaster(
        store: Arc<dyn KeyValueStore>,
        default_ttl: TtlSeconds,
        broadcaster: broadcast::Sender<CacheEvent>,
    ) -> Self {
        Self {
            store,
            default_ttl,
            event_broadcaster: Some(broadcaster),
        }
    }

    /// Look up `key` and report the value together with its remaining TTL.
    ///
    /// The TTL is a second, dependent read: a transport failure there is a
    /// backend failure even though the value read succeeded, because a value
    /// is never returned without consistent TTL metadata. A key that expires
    /// between the two reads is reported as not found. Keys stored without
    /// expiry report a remaining TTL of zero.
    pub async fn get(&self, key: &str) -> Result<CacheHit> {
        if key.is_empty() {
            return Err(Error::MissingParameter { field: "key" });
        }

        let value = match self.store.get(key).await? {
            Some(value) => value,
            None => {
                self.emit(CacheEvent::Miss(MissEvent {
                    key: key.to_string(),
                    timestamp: now_timestamp(),
                }));
                return Err(Error::NotFound);
            }
        };

        let remaining_ttl = match self.store.ttl(key).await? {
            KeyTtl::Absent => {
                // Expired between the value read and the TTL read.
                self.emit(CacheEvent::Miss(MissEvent {
                    key: key.to_string(),
                    timestamp: now_timestamp(),
                }));
                return Err(Error::NotFound);
            }
            KeyTtl::NoExpiry => TtlSeconds(0),
            KeyTtl::Remaining(duration) => TtlSeconds(round_to_secs(duration)),
        };

        self.emit(CacheEvent::Hit(HitEvent {
            key: key.to_string(),
            remaining_ttl_secs: remaining_ttl.0,
            timestamp: now_timestamp(),
        }));

        Ok(CacheHit::new(value, remaining_ttl))
    }

    /// Store `(key, value)` under the resolved TTL, unconditionally
    /// overwriting any existing entry. Validation rejects the request
    /// before the store sees any part of it.
    pub async fn set(&self, key: &str, value: &str, ttl_override: Option<&str>) -> Result<()> {
        if key.is_empty() {
            return Err(Error::MissingParameter { field: "key" });
        }
        if value.is_empty() {
            return Err(Error::MissingParameter { field: "value" });
        }

        let ttl = self.resolve_ttl(ttl_override)?;

        self.store.set(key, value, ttl).await?;

        self.emit(CacheEvent::Stored(StoredEvent {
            key: key.to_string(),
            value_size: value.len(),
            ttl_secs: ttl.0,
            timestamp: now_timestamp(),
        }));

        Ok(())
    }

    /// Connectivity probe against the store. Reports unhealthy instead of
    /// failing the process; never reads or writes application keys.
    pub async fn health(&self) -> Result<()> {
        self.store.ping().await
    }

    /// TTL resolution policy: an absent or empty override selects the
    /// configured default; anything else must be a base-10 non-negative
    /// integer number of seconds.
    fn resolve_ttl(&self, ttl_override: Option<&str>) -> Result<TtlSeconds> {
        match ttl_override {
            None => Ok(self.default_ttl),
            Some("") => Ok(self.default_ttl),
            Some(raw) => raw
                .parse::<u64>()
                .map(TtlSeconds)
                .map_err(|_| Error::InvalidTtlFormat),
        }
    }

    fn emit(&self, event: CacheEvent) {
        if let Some(ref broadcaster) = self.event_broadcaster {
            match broadcaster.send(event) {
                Ok(subscribers) => {
                    tracing::debug!(subscribers, "broadcast cache event");
                }
                Err(_) => {
                    tracing::debug!("no subscribers for cache event");
                }
            }
        }
    }
}

/// Round a store-reported duration to the nearest whole second, half up.
fn round_to_secs(duration: Duration) -> u64 {
    (duration.as_millis() as u64 + 500) / 1000
}
