// shared/src/lib.rs

pub mod config;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// Required input absent or empty. Detected before the store is contacted.
    #[error("{field} is required")]
    MissingParameter { field: &'static str },
    #[error("ttl must be a string representation of a non-negative integer")]
    InvalidTtlFormat,
    /// Key absent or expired in the store. Not a system failure.
    #[error("key not found")]
    NotFound,
    /// Store transport, timeout, or protocol error. Detail is preserved
    /// verbatim so callers can tell "not found" from "store unreachable".
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Whole-second TTL as exchanged with the store. `TtlSeconds(0)` means
/// "no expiry" (Redis convention: SET without EX).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtlSeconds(pub u64);
