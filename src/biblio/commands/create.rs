use crate::error::Result;
use crate::model::{Book, BookFields, Status};
use crate::store::{KeyValueStore, Keyspace};
use crate::validate::validate;

/// Validate `fields` as a complete record and store it under a fresh id.
///
/// Nothing is written when validation fails.
pub fn run<S: KeyValueStore>(
    store: &mut S,
    keyspace: &Keyspace,
    fields: BookFields,
) -> Result<Book> {
    validate(&fields, false)?;

    let status = fields
        .status
        .as_deref()
        .and_then(|s| s.parse::<Status>().ok())
        .unwrap_or_default();
    let book = Book::new(
        fields.title.unwrap_or_default(),
        fields.author.unwrap_or_default(),
        fields.genre.unwrap_or_default(),
        status,
    );

    let json = serde_json::to_string(&book)?;
    store.set(&keyspace.key_for(&book.id.to_string()), &json)?;

    tracing::debug!(id = %book.id, title = %book.title, "book created");
    Ok(book)
}
