use crate::error::Result;
use crate::store::{KeyValueStore, Keyspace};

/// Remove a book by id. Returns whether a record existed.
pub fn run<S: KeyValueStore>(store: &mut S, keyspace: &Keyspace, id: &str) -> Result<bool> {
    let removed = store.delete(&keyspace.key_for(id.trim()))?;
    tracing::debug!(id = %id.trim(), removed, "delete");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fetch;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn second_delete_reports_not_found() {
        let mut fx = StoreFixture::new().with_book("Dune", "Herbert", "scifi");
        let id = fx.id(0);

        assert!(run(&mut fx.store, &fx.keyspace, &id).unwrap());
        assert!(!run(&mut fx.store, &fx.keyspace, &id).unwrap());
        assert_eq!(fetch::run(&mut fx.store, &fx.keyspace, &id).unwrap(), None);
    }

    #[test]
    fn only_removes_the_given_record() {
        let mut fx = StoreFixture::new().with_books(3);
        let id = fx.id(1);
        run(&mut fx.store, &fx.keyspace, &id).unwrap();
        assert_eq!(fx.store.len(), 2);
    }
}
