pub mod cache;
pub mod health;

pub use cache::{get_cache, set_cache};
pub use health::health_check;
