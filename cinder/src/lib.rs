// cinder/src/lib.rs

pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

pub use domain::CacheHit;
pub use events::CacheEvent;
pub use ports::{KeyTtl, KeyValueStore};
pub use service::CacheAccessService;
