//! # Storage Layer
//!
//! Book records live in an external key-value service as one JSON document
//! per key. The [`KeyValueStore`] trait is the whole surface the rest of the
//! crate needs from that service: point reads and writes, deletes, and a
//! cursor-based prefix scan.
//!
//! ## Implementations
//!
//! - [`remote::RedisStore`]: a synchronous KeyDB/Redis connection
//!   - Acquired once at startup, dropped when the session ends
//!   - Connect, read and write calls are bounded by a timeout
//!
//! - [`memory::InMemoryStore`]: ordered in-memory map for testing
//!   - Emulates `SCAN` paging over the sorted key set
//!   - Can simulate keys vanishing between scan and read, repeated keys
//!     across scan pages, and store failures
//!
//! ## Key Layout
//!
//! ```text
//! <prefix>:<uuid>  ->  {"id": ..., "titulo": ..., "autor": ..., ...}
//! ```
//!
//! The [`Keyspace`] owns the prefix and derives both record keys and the
//! `SCAN` match pattern from it.

use crate::error::Result;

pub mod memory;
pub mod remote;

/// Keys requested from the store per `SCAN` round-trip.
pub const SCAN_BATCH: usize = 250;

/// One page of a cursor-based scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanPage {
    /// Cursor to pass to the next call. `0` means the scan is complete.
    pub cursor: u64,
    pub keys: Vec<String>,
}

/// Abstract interface for the key-value service.
///
/// Methods take `&mut self` because a connection carries one in-flight
/// command at a time.
pub trait KeyValueStore {
    /// Round-trip check, used right after connecting.
    fn ping(&mut self) -> Result<()>;

    /// Read the raw bytes stored under `key`, if any.
    ///
    /// Values are not required to be UTF-8; decoding is up to the caller.
    fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Returns whether it existed.
    fn delete(&mut self, key: &str) -> Result<bool>;

    /// Fetch the next page of keys matching the glob `pattern`.
    ///
    /// A scan starts with cursor `0` and is complete when the returned
    /// cursor is `0` again. Pages may be empty and may repeat keys.
    fn scan(&mut self, cursor: u64, pattern: &str, count: usize) -> Result<ScanPage>;
}

/// The `<prefix>:` namespace records are stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyspace {
    prefix: String,
}

impl Keyspace {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn key_for(&self, id: &str) -> String {
        format!("{}:{}", self.prefix, id)
    }

    /// Glob pattern matching every record key, with the prefix escaped.
    pub fn pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.prefix.len() + 2);
        for c in self.prefix.chars() {
            if matches!(c, '*' | '?' | '[' | ']' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push_str(":*");
        pattern
    }
}

impl Default for Keyspace {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PREFIX)
    }
}
