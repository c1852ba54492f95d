use std::time::Duration;

use redis::{Client, Commands, Connection};

use crate::error::Result;
use crate::storage::KeyValueStore;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Collections stored as plain string keys in a Redis server.
#[derive(Clone)]
pub struct RedisStore {
    client: Client,
}

impl RedisStore {
    /// Parses the URL only; no connection is made until the first call.
    pub fn open(redis_url: &str) -> Result<Self> {
        let client = Client::open(redis_url)?;
        Ok(Self { client })
    }

    fn connection(&self) -> Result<Connection> {
        Ok(self.client.get_connection_with_timeout(CONNECT_TIMEOUT)?)
    }
}

impl KeyValueStore for RedisStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.connection()?;
        let value: Option<Vec<u8>> = conn.get(key)?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.connection()?;
        let _: () = conn.set(key, value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::storage::BlobStore;
    use std::sync::Arc;

    // Port 1 is never a Redis server; connections are refused immediately.
    const UNREACHABLE: &str = "redis://127.0.0.1:1";

    #[test]
    fn rejects_malformed_urls() {
        assert!(matches!(RedisStore::open("not a url"), Err(AppError::Redis(_))));
    }

    #[test]
    fn unreachable_server_surfaces_as_redis_error() {
        let store = RedisStore::open(UNREACHABLE).unwrap();
        assert!(matches!(store.get("ideas"), Err(AppError::Redis(_))));
    }

    #[test]
    fn unreachable_server_degrades_to_empty_collections() {
        let blobs = BlobStore::new(Arc::new(RedisStore::open(UNREACHABLE).unwrap()));
        blobs.write("ideas", &[1, 2, 3]);
        assert!(blobs.read::<i64>("ideas").is_empty());
    }
}
