use super::{KeyValueStore, ScanPage};
use crate::config::StoreSettings;
use crate::error::{BiblioError, Result};
use redis::{Commands, IntoConnectionInfo};

/// KeyDB/Redis backed store over a single synchronous connection.
///
/// The connection is opened by [`RedisStore::connect`] and closed when the
/// store is dropped.
pub struct RedisStore {
    conn: redis::Connection,
}

impl RedisStore {
    /// Open a connection and verify it with `PING`.
    ///
    /// Any failure here is reported as [`BiblioError::Connection`].
    pub fn connect(settings: &StoreSettings) -> Result<Self> {
        let mut info = settings
            .url()
            .into_connection_info()
            .map_err(BiblioError::Connection)?;
        info.redis.password = settings.password.clone();

        let client = redis::Client::open(info).map_err(BiblioError::Connection)?;
        let conn = client
            .get_connection_with_timeout(settings.timeout)
            .map_err(BiblioError::Connection)?;
        conn.set_read_timeout(Some(settings.timeout))
            .map_err(BiblioError::Connection)?;
        conn.set_write_timeout(Some(settings.timeout))
            .map_err(BiblioError::Connection)?;

        let mut store = Self { conn };
        store.ping().map_err(|e| match e {
            BiblioError::Store(inner) => BiblioError::Connection(inner),
            other => other,
        })?;

        tracing::info!(url = %settings.url(), "connected to store");
        Ok(store)
    }
}

impl KeyValueStore for RedisStore {
    fn ping(&mut self) -> Result<()> {
        redis::cmd("PING").query::<String>(&mut self.conn)?;
        Ok(())
    }

    fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.conn.get(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.set::<_, _, ()>(key, value)?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        let removed: i64 = self.conn.del(key)?;
        Ok(removed > 0)
    }

    fn scan(&mut self, cursor: u64, pattern: &str, count: usize) -> Result<ScanPage> {
        let (cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
            .cursor_arg(cursor)
            .arg("MATCH")
            .arg(pattern)
            .arg("COUNT")
            .arg(count)
            .query(&mut self.conn)?;
        Ok(ScanPage { cursor, keys })
    }
}
