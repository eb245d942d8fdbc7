use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CacheEvent {
    Hit(HitEvent),
    Miss(MissEvent),
    Stored(StoredEvent),
}

impl CacheEvent {
    pub fn key(&self) -> &str {
        match self {
            CacheEvent::Hit(e) => &e.key,
            CacheEvent::Miss(e) => &e.key,
            CacheEvent::Stored(e) => &e.key,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CacheEvent::Hit(_) => "hit",
            CacheEvent::Miss(_) => "miss",
            CacheEvent::Stored(_) => "stored",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HitEvent {
    pub key: String,
    pub remaining_ttl_secs: u64,
    pub timestamp: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MissEvent {
    pub key: String,
    pub timestamp: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredEvent {
    pub key: String,
    pub value_size: usize,
    pub ttl_secs: u64,
    pub timestamp: u64,
}

/// Helper to get current timestamp in seconds since UNIX epoch
pub fn now_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}
