use crate::error::Result;
use crate::model::Book;
use crate::store::{KeyValueStore, Keyspace, SCAN_BATCH};
use std::collections::{HashSet, VecDeque};

/// Start a scan over every book in `keyspace`.
///
/// Nothing is read until the returned iterator is polled.
pub fn run<'a, S: KeyValueStore>(store: &'a mut S, keyspace: &Keyspace) -> BookScan<'a, S> {
    BookScan::new(store, keyspace.pattern(), SCAN_BATCH)
}

/// Lazy iterator over the books matching a key pattern.
///
/// Drives the store's cursor scan one batch at a time and reads each key as
/// it is reached. Keys that disappear between the scan and the read are
/// skipped, as are values that are not valid books. Keys the store returns
/// more than once are yielded once. A store error is yielded once and ends
/// the iteration.
///
/// The scan cannot be rewound; call [`run`] again to start over.
pub struct BookScan<'a, S: KeyValueStore> {
    store: &'a mut S,
    pattern: String,
    batch: usize,
    /// `None` once the store reported the scan complete
    cursor: Option<u64>,
    pending: VecDeque<String>,
    seen: HashSet<String>,
    failed: bool,
}

impl<'a, S: KeyValueStore> BookScan<'a, S> {
    pub fn new(store: &'a mut S, pattern: String, batch: usize) -> Self {
        Self {
            store,
            pattern,
            batch,
            cursor: Some(0),
            pending: VecDeque::new(),
            seen: HashSet::new(),
            failed: false,
        }
    }

    fn read(&mut self, key: &str) -> Result<Option<Book>> {
        let Some(raw) = self.store.get(key)? else {
            tracing::debug!(%key, "key vanished during scan");
            return Ok(None);
        };
        match serde_json::from_slice(&raw) {
            Ok(book) => Ok(Some(book)),
            Err(e) => {
                tracing::warn!(%key, error = %e, "skipping unparseable record");
                Ok(None)
            }
        }
    }

    fn fill(&mut self, cursor: u64) -> Result<()> {
        let page = self.store.scan(cursor, &self.pattern, self.batch)?;
        tracing::debug!(cursor, next = page.cursor, keys = page.keys.len(), "scan batch");
        self.cursor = (page.cursor != 0).then_some(page.cursor);
        for key in page.keys {
            if self.seen.insert(key.clone()) {
                self.pending.push_back(key);
            }
        }
        Ok(())
    }
}

impl<S: KeyValueStore> Iterator for BookScan<'_, S> {
    type Item = Result<Book>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(key) = self.pending.pop_front() {
                match self.read(&key) {
                    Ok(Some(book)) => return Some(Ok(book)),
                    Ok(None) => continue,
                    Err(e) => {
                        self.failed = true;
                        return Some(Err(e));
                    }
                }
            }

            let cursor = self.cursor?;
            if let Err(e) = self.fill(cursor) {
                self.failed = true;
                return Some(Err(e));
            }
        }
    }
}

impl<S: KeyValueStore> std::iter::FusedIterator for BookScan<'_, S> {}
