use async_trait::async_trait;
use cinder::ports::{KeyTtl, KeyValueStore};
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, ConnectionAddr, ConnectionInfo, RedisConnectionInfo, RedisError};
use shared::config::RuntimeConfig;
use shared::{Error, Result, TtlSeconds};
use std::time::Duration;
use tracing::debug;

/// Bound on a single command round-trip.
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(3);
/// Bound on establishing (or re-establishing) the connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Health probes answer faster than regular traffic or not at all.
const PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Redis-backed implementation of the key-value store port.
///
/// The connection manager multiplexes one connection shared by all callers,
/// reconnecting on loss; cloning it is cheap and concurrency-safe, so the
/// store itself needs no locking.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to the store described by `config`. Does not issue any
    /// command; callers that want fail-fast startup should `ping`.
    pub async fn connect(config: &RuntimeConfig) -> Result<Self> {
        let client = redis::Client::open(connection_info(config))
            .map_err(|e| backend_error("client setup", &e))?;

        let manager_config = ConnectionManagerConfig::new()
            .set_connection_timeout(CONNECT_TIMEOUT)
            .set_response_timeout(RESPONSE_TIMEOUT);

        let conn = client
            .get_connection_manager_with_config(manager_config)
            .await
            .map_err(|e| backend_error("connect", &e))?;

        debug!(
            host = %config.redis_host,
            port = config.redis_port,
            "connected to redis"
        );

        Ok(Self { conn })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| backend_error("get", &e))?;

        match &value {
            Some(_) => debug!(key, "cache hit"),
            None => debug!(key, "cache miss"),
        }

        Ok(value)
    }

    async fn ttl(&self, key: &str) -> Result<KeyTtl> {
        let mut conn = self.conn.clone();
        let pttl_millis: i64 = conn
            .pttl(key)
            .await
            .map_err(|e| backend_error("pttl", &e))?;

        Ok(key_ttl_from_pttl(pttl_millis))
    }

    async fn set(&self, key: &str, value: &str, ttl: TtlSeconds) -> Result<()> {
        let mut conn = self.conn.clone();
        // Redis rejects SETEX with a zero expiry; zero means "no expiry"
        // here, which is a plain SET.
        if ttl.0 == 0 {
            conn.set::<_, _, ()>(key, value)
                .await
                .map_err(|e| backend_error("set", &e))?;
        } else {
            conn.set_ex::<_, _, ()>(key, value, ttl.0)
                .await
                .map_err(|e| backend_error("set", &e))?;
        }

        debug!(key, ttl_secs = ttl.0, "stored");
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let probe = async move {
            let reply: std::result::Result<String, RedisError> =
                redis::cmd("PING").query_async(&mut conn).await;
            reply
        };

        match tokio::time::timeout(PING_TIMEOUT, probe).await {
            Err(_) => Err(Error::BackendUnavailable("ping timed out".to_string())),
            Ok(Err(e)) => Err(backend_error("ping", &e)),
            Ok(Ok(_)) => Ok(()),
        }
    }
}

fn connection_info(config: &RuntimeConfig) -> ConnectionInfo {
    ConnectionInfo {
        addr: ConnectionAddr::Tcp(config.redis_host.clone(), config.redis_port),
        redis: RedisConnectionInfo {
            db: 0,
            username: None,
            password: (!config.redis_password.is_empty())
                .then(|| config.redis_password.clone()),
            ..Default::default()
        },
    }
}

/// Map a PTTL reply onto the port's TTL report: -2 means the key is gone,
/// -1 means it exists without expiry, anything else is remaining millis.
fn key_ttl_from_pttl(pttl_millis: i64) -> KeyTtl {
    match pttl_millis {
        -2 => KeyTtl::Absent,
        -1 => KeyTtl::NoExpiry,
        millis => KeyTtl::Remaining(Duration::from_millis(millis.max(0) as u64)),
    }
}

fn backend_error(op: &str, err: &RedisError) -> Error {
    Error::BackendUnavailable(format!("{op}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pttl_replies_map_onto_ttl_reports() {
        assert_eq!(key_ttl_from_pttl(-2), KeyTtl::Absent);
        assert_eq!(key_ttl_from_pttl(-1), KeyTtl::NoExpiry);
        assert_eq!(
            key_ttl_from_pttl(1_500),
            KeyTtl::Remaining(Duration::from_millis(1_500))
        );
        assert_eq!(key_ttl_from_pttl(0), KeyTtl::Remaining(Duration::ZERO));
    }

    #[test]
    fn empty_password_means_no_auth() {
        let config = RuntimeConfig::resolve(|_| None).unwrap();
        let info = connection_info(&config);

        assert_eq!(
            info.addr,
            ConnectionAddr::Tcp("redis".to_string(), 6379)
        );
        assert_eq!(info.redis.db, 0);
        assert_eq!(info.redis.password, None);
    }

    #[test]
    fn configured_password_is_forwarded() {
        let config = RuntimeConfig::resolve(|name| match name {
            "REDIS_PASSWORD" => Some("s3cret".to_string()),
            _ => None,
        })
        .unwrap();
        let info = connection_info(&config);

        assert_eq!(info.redis.password.as_deref(), Some("s3cret"));
    }
}
