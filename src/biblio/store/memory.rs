use super::{KeyValueStore, ScanPage};
use crate::error::{BiblioError, Result};
use std::collections::{BTreeMap, HashSet};

/// In-memory key-value store for testing and development.
/// Does NOT persist data.
///
/// `scan` pages through the sorted key set the way `SCAN` walks its hash
/// table: the cursor is an offset, `count` keys are examined per call and
/// only the matching ones are returned.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: BTreeMap<String, Vec<u8>>,
    vanishing: HashSet<String>,
    scan_overlap: usize,
    simulate_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw value under `key`, bypassing simulations.
    pub fn raw(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Store arbitrary bytes under `key`, including values that are not
    /// valid UTF-8.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Make `key` disappear the next time it is read, as if another client
    /// deleted it between a scan and the follow-up `GET`.
    pub fn vanish_on_read(&mut self, key: impl Into<String>) {
        self.vanishing.insert(key.into());
    }

    /// Re-send the last `n` examined keys at the start of every following
    /// page, mimicking the repeats `SCAN` is allowed to produce.
    pub fn set_scan_overlap(&mut self, n: usize) {
        self.scan_overlap = n;
    }

    /// Make every operation fail with a store error.
    pub fn set_simulate_error(&mut self, simulate: bool) {
        self.simulate_error = simulate;
    }

    fn check(&self) -> Result<()> {
        if self.simulate_error {
            return Err(BiblioError::Store(redis::RedisError::from((
                redis::ErrorKind::IoError,
                "Simulated store error",
            ))));
        }
        Ok(())
    }
}

impl KeyValueStore for InMemoryStore {
    fn ping(&mut self) -> Result<()> {
        self.check()
    }

    fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        self.check()?;
        if self.vanishing.remove(key) {
            self.entries.remove(key);
            return Ok(None);
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.check()?;
        self.entries
            .insert(key.to_string(), value.as_bytes().to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        self.check()?;
        Ok(self.entries.remove(key).is_some())
    }

    fn scan(&mut self, cursor: u64, pattern: &str, count: usize) -> Result<ScanPage> {
        self.check()?;
        let count = count.max(1);
        let start = if cursor == 0 {
            0
        } else {
            (cursor as usize).saturating_sub(self.scan_overlap)
        };
        let end = (cursor as usize).max(start) + count;

        let keys = self
            .entries
            .keys()
            .skip(start)
            .take(end - start)
            .filter(|key| glob_match(pattern, key))
            .cloned()
            .collect();

        let cursor = if end >= self.entries.len() {
            0
        } else {
            end as u64
        };
        Ok(ScanPage { cursor, keys })
    }
}

/// Redis-style glob matching supporting `*`, `?` and backslash escapes.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    glob_match_at(&pattern, &text)
}

fn glob_match_at(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('*', rest)) => (0..=text.len()).any(|skip| glob_match_at(rest, &text[skip..])),
        Some(('?', rest)) => !text.is_empty() && glob_match_at(rest, &text[1..]),
        Some(('\\', rest)) if !rest.is_empty() => {
            text.first() == Some(&rest[0]) && glob_match_at(&rest[1..], &text[1..])
        }
        Some((c, rest)) => text.first() == Some(c) && glob_match_at(rest, &text[1..]),
    }
}

// --- Test Fixtures ---


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_matches_prefix_patterns() {
        assert!(glob_match("libro:*", "libro:123"));
        assert!(glob_match("libro:*", "libro:"));
        assert!(!glob_match("libro:*", "libros:123"));
        assert!(glob_match("l?bro:*", "libro:1"));
        assert!(glob_match(r"a\*b:*", "a*b:1"));
        assert!(!glob_match(r"a\*b:*", "axb:1"));
    }

    #[test]
    fn scan_walks_all_pages_until_cursor_returns_to_zero() {
        let mut store = InMemoryStore::new();
        for i in 0..7 {
            store.set(&format!("k:{}", i), "v").unwrap();
        }
        store.set("other:1", "v").unwrap();

        let mut cursor = 0;
        let mut seen = Vec::new();
        let mut rounds = 0;
        loop {
            let page = store.scan(cursor, "k:*", 3).unwrap();
            seen.extend(page.keys);
            rounds += 1;
            cursor = page.cursor;
            if cursor == 0 {
                break;
            }
        }
        assert_eq!(rounds, 3);
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn vanishing_key_reads_as_absent_once() {
        let mut store = InMemoryStore::new();
        store.set("k:1", "v").unwrap();
        store.vanish_on_read("k:1");
        assert_eq!(store.get("k:1").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn holds_values_that_are_not_utf8() {
        let mut store = InMemoryStore::new();
        store.insert_raw("k:1", vec![0xff, 0xfe, b'{']);
        assert_eq!(store.get("k:1").unwrap(), Some(vec![0xff, 0xfe, b'{']));
        store.set("k:2", "v").unwrap();
        assert_eq!(store.raw("k:2"), Some(&b"v"[..]));
    }

    #[test]
    fn delete_reports_existence() {
        let mut store = InMemoryStore::new();
        store.set("k:1", "v").unwrap();
        assert!(store.delete("k:1").unwrap());
        assert!(!store.delete("k:1").unwrap());
    }

    #[test]
    fn simulated_error_fails_operations() {
        let mut store = InMemoryStore::new();
        store.set_simulate_error(true);
        assert!(matches!(store.ping(), Err(BiblioError::Store(_))));
        assert!(store.get("k").is_err());
    }
}
