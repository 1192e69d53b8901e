/// Cache-aside accessor over Redis
///
/// The cache is a latency optimization, never a source of truth. Every
/// failure mode (Redis unreachable at startup, a dropped connection, a
/// timed-out command) degrades to "always miss": reads fall through to
/// the database and writes become no-ops, with a warning logged. A request
/// must never fail because the cache did.
use redis::{aio::ConnectionManager, AsyncCommands};
use std::time::Duration;
use tokio::time::timeout;

/// Fixed TTL applied by every call site: 30 minutes
pub const DEFAULT_TTL: u64 = 1800;

/// Per-command budget; a slow cache is treated as a miss
const COMMAND_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Clone)]
pub struct CacheService {
    conn: Option<ConnectionManager>,
}

impl CacheService {
    /// Connect to Redis; on failure the service starts disabled and every
    /// lookup is a miss
    pub async fn connect(url: &str) -> Self {
        let conn = match redis::Client::open(url) {
            Ok(client) => match ConnectionManager::new(client).await {
                Ok(conn) => {
                    tracing::info!("Cache connected");
                    Some(conn)
                }
                Err(e) => {
                    tracing::warn!("Cache unavailable, running without it: {}", e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Invalid cache URL, running without cache: {}", e);
                None
            }
        };

        Self { conn }
    }

    /// A cache that is always a miss (for tests and cache-less setups)
    pub fn disabled() -> Self {
        Self { conn: None }
    }

    /// Look up a key; `None` means miss, whether absent, expired, timed
    /// out, or the backend failed
    pub async fn get(&self, key: &str) -> Option<String> {
        let mut conn = self.conn.clone()?;

        match timeout(COMMAND_TIMEOUT, conn.get::<_, Option<String>>(key)).await {
            Ok(Ok(value)) => value,
            Ok(Err(e)) => {
                tracing::warn!("Cache get failed for {key}: {e}");
                None
            }
            Err(_) => {
                tracing::warn!("Cache get timed out for {key}");
                None
            }
        }
    }

    /// Store a value with a TTL in seconds, replacing any prior entry
    pub async fn set(&self, key: &str, value: &str, ttl_secs: u64) {
        let Some(mut conn) = self.conn.clone() else {
            return;
        };

        match timeout(COMMAND_TIMEOUT, conn.set_ex::<_, _, ()>(key, value, ttl_secs)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("Cache set failed for {key}: {e}"),
            Err(_) => tracing::warn!("Cache set timed out for {key}"),
        }
    }

    /// Drop a key immediately; removing an absent key is not an error
    pub async fn delete(&self, key: &str) {
        let Some(mut conn) = self.conn.clone() else {
            return;
        };

        match timeout(COMMAND_TIMEOUT, conn.del::<_, ()>(key)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("Cache delete failed for {key}: {e}"),
            Err(_) => tracing::warn!("Cache delete timed out for {key}"),
        }
    }
}
