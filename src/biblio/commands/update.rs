use crate::error::{BiblioError, Result};
use crate::model::{Book, BookFields, Status};
use crate::store::{KeyValueStore, Keyspace};
use crate::validate::validate;

use super::fetch;

/// Result of an update that found its record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// At least one field changed; carries the stored record.
    Updated(Book),
    /// Every supplied field already matched. Nothing was written.
    Unchanged(Book),
}

/// Apply the supplied fields of `changes` that differ from the stored book.
///
/// The record is written back under the key it was read from, whatever
/// form its stored `id` takes.
///
/// Fails with [`BiblioError::BookNotFound`] when there is no such record and
/// with a validation error when a changed field breaks the field rules.
pub fn run<S: KeyValueStore>(
    store: &mut S,
    keyspace: &Keyspace,
    id: &str,
    changes: BookFields,
) -> Result<UpdateOutcome> {
    let id = id.trim();
    let key = keyspace.key_for(id);
    let mut book =
        fetch::read(store, &key)?.ok_or_else(|| BiblioError::BookNotFound(id.to_string()))?;

    let staged = stage(&book, changes);
    if staged.is_empty() {
        tracing::debug!(id = %book.id, "update has no changes");
        return Ok(UpdateOutcome::Unchanged(book));
    }

    validate(&staged, true)?;

    if let Some(title) = staged.title {
        book.title = title;
    }
    if let Some(author) = staged.author {
        book.author = author;
    }
    if let Some(genre) = staged.genre {
        book.genre = genre;
    }
    if let Some(status) = staged.status.as_deref().and_then(|s| s.parse().ok()) {
        book.status = status;
    }
    book.touch();

    let json = serde_json::to_string(&book)?;
    store.set(&key, &json)?;

    tracing::debug!(%key, "book updated");
    Ok(UpdateOutcome::Updated(book))
}

/// Keep only the fields whose value differs from `current`.
///
/// Status is compared after normalization, so `"Leyendo"` does not count
/// as a change from `leyendo`. Unparseable statuses are always staged so
/// validation can reject them.
fn stage(current: &Book, changes: BookFields) -> BookFields {
    BookFields {
        title: changes.title.filter(|t| *t != current.title),
        author: changes.author.filter(|a| *a != current.author),
        genre: changes.genre.filter(|g| *g != current.genre),
        status: changes
            .status
            .filter(|s| s.parse::<Status>().ok() != Some(current.status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::store::memory::fixtures::StoreFixture;

    fn fixture() -> StoreFixture {
        StoreFixture::new().with_book("Dune", "Herbert", "scifi")
    }

    fn stored(fx: &mut StoreFixture, id: &str) -> Book {
        fetch::run(&mut fx.store, &fx.keyspace, id).unwrap().unwrap()
    }

    #[test]
    fn changes_title_and_refreshes_timestamp() {
        let mut fx = fixture();
        let id = fx.id(0);
        let before = stored(&mut fx, &id);

        let outcome = run(
            &mut fx.store,
            &fx.keyspace,
            &id,
            BookFields::new().title("X"),
        )
        .unwrap();
        assert!(matches!(outcome, UpdateOutcome::Updated(_)));

        let after = stored(&mut fx, &id);
        assert_eq!(after.title, "X");
        assert_eq!(after.author, "Herbert");
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
    }

    #[test]
    fn empty_changes_are_a_no_op() {
        let mut fx = fixture();
        let id = fx.id(0);
        let before = stored(&mut fx, &id);

        let outcome = run(&mut fx.store, &fx.keyspace, &id, BookFields::new()).unwrap();
        assert_eq!(outcome, UpdateOutcome::Unchanged(before.clone()));
        assert_eq!(stored(&mut fx, &id).updated_at, before.updated_at);
    }

    #[test]
    fn identical_values_are_a_no_op() {
        let mut fx = fixture();
        let id = fx.id(0);
        let before = stored(&mut fx, &id);
        let same = BookFields::new()
            .title("Dune")
            .author("Herbert")
            .genre("scifi")
            .status("Pendiente");

        let outcome = run(&mut fx.store, &fx.keyspace, &id, same).unwrap();
        assert!(matches!(outcome, UpdateOutcome::Unchanged(_)));
        assert_eq!(stored(&mut fx, &id), before);
    }

    #[test]
    fn status_is_normalized() {
        let mut fx = fixture();
        let id = fx.id(0);
        run(
            &mut fx.store,
            &fx.keyspace,
            &id,
            BookFields::new().status(" TERMINADO"),
        )
        .unwrap();
        assert_eq!(stored(&mut fx, &id).status, Status::Finished);
    }

    #[test]
    fn invalid_change_leaves_record_untouched() {
        let mut fx = fixture();
        let id = fx.id(0);
        let before = stored(&mut fx, &id);

        let err = run(
            &mut fx.store,
            &fx.keyspace,
            &id,
            BookFields::new().title("Arrakis").status("abandonado"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BiblioError::Validation(ValidationError::InvalidStatus)
        ));
        assert_eq!(stored(&mut fx, &id), before);
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut fx = fixture();
        let id = fx.id(0);
        let err = run(
            &mut fx.store,
            &fx.keyspace,
            &id,
            BookFields::new().title("   "),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BiblioError::Validation(ValidationError::EmptyField("titulo"))
        ));
    }

    #[test]
    fn writes_back_to_the_key_it_read() {
        let legacy = r#"{
            "id": "6f1c1d1e00004000800000000000000a",
            "titulo": "Dune",
            "autor": "Herbert",
            "genero": "scifi",
            "estado": "pendiente",
            "creado_en": "2024-03-01T10:00:00.000000Z",
            "actualizado_en": "2024-03-01T10:00:00.000000Z"
        }"#;
        let mut fx = StoreFixture::new().with_raw("libro:legacy", legacy);

        let outcome = run(
            &mut fx.store,
            &fx.keyspace,
            " legacy ",
            BookFields::new().title("X"),
        )
        .unwrap();
        assert!(matches!(outcome, UpdateOutcome::Updated(_)));
        assert_eq!(fx.store.len(), 1);
        assert_eq!(stored(&mut fx, "legacy").title, "X");
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut fx = fixture();
        let err = run(
            &mut fx.store,
            &fx.keyspace,
            "missing",
            BookFields::new().title("X"),
        )
        .unwrap_err();
        assert!(matches!(err, BiblioError::BookNotFound(id) if id == "missing"));
    }
}
