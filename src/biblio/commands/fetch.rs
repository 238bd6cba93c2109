use crate::error::Result;
use crate::model::Book;
use crate::store::{KeyValueStore, Keyspace};

/// Read a single book by id.
///
/// Returns `None` when the key is absent or its value is not a valid book.
pub fn run<S: KeyValueStore>(
    store: &mut S,
    keyspace: &Keyspace,
    id: &str,
) -> Result<Option<Book>> {
    read(store, &keyspace.key_for(id.trim()))
}

/// Read the book stored under an already built `key`.
pub fn read<S: KeyValueStore>(store: &mut S, key: &str) -> Result<Option<Book>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_slice(&raw) {
        Ok(book) => Ok(Some(book)),
        Err(e) => {
            tracing::warn!(%key, error = %e, "ignoring unparseable record");
            Ok(None)
        }
    }
}
