//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for the interactive shell (or any other client).
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the store connection and the keyspace, constructed once
//! - **Dispatches** to the appropriate command function
//! - **Translates outcomes** into a [`CmdResult`]: records plus leveled messages
//!
//! ## Errors vs. Messages
//!
//! Outcomes the user can act on (validation failures, unknown ids, updates
//! with nothing to change) come back as messages inside `Ok(CmdResult)`.
//! `Err` is reserved for the store or the connection failing, which the
//! caller should treat as fatal.
//!
//! ## Generic Over KeyValueStore
//!
//! `BiblioApi<S: KeyValueStore>` is generic over the storage backend:
//! - Production: `BiblioApi<RedisStore>`
//! - Testing: `BiblioApi<InMemoryStore>`

use crate::commands::{self, update::UpdateOutcome};
use crate::error::{BiblioError, Result};
use crate::model::{Book, BookFields};
use crate::store::{KeyValueStore, Keyspace};

/// The main API facade for book operations.
pub struct BiblioApi<S: KeyValueStore> {
    store: S,
    keyspace: Keyspace,
}

impl<S: KeyValueStore> BiblioApi<S> {
    pub fn new(store: S, keyspace: Keyspace) -> Self {
        Self { store, keyspace }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn add_book(&mut self, fields: BookFields) -> Result<CmdResult> {
        match commands::create::run(&mut self.store, &self.keyspace, fields) {
            Ok(book) => Ok(CmdResult::default()
                .with_message(CmdMessage::success(format!(
                    "Book added with id: {}",
                    book.id
                )))
                .with_affected_books(vec![book])),
            Err(BiblioError::Validation(e)) => Ok(rejected(e)),
            Err(e) => Err(e),
        }
    }

    pub fn get_book(&mut self, id: &str) -> Result<Option<Book>> {
        commands::fetch::run(&mut self.store, &self.keyspace, id)
    }

    pub fn update_book(&mut self, id: &str, changes: BookFields) -> Result<CmdResult> {
        match commands::update::run(&mut self.store, &self.keyspace, id, changes) {
            Ok(UpdateOutcome::Updated(book)) => Ok(CmdResult::default()
                .with_message(CmdMessage::success("Book updated."))
                .with_affected_books(vec![book])),
            Ok(UpdateOutcome::Unchanged(_)) => {
                Ok(CmdResult::default().with_message(CmdMessage::info("No changes to apply.")))
            }
            Err(BiblioError::BookNotFound(_)) => Ok(not_found()),
            Err(BiblioError::Validation(e)) => Ok(rejected(e)),
            Err(e) => Err(e),
        }
    }

    pub fn delete_book(&mut self, id: &str) -> Result<CmdResult> {
        if commands::delete::run(&mut self.store, &self.keyspace, id)? {
            Ok(CmdResult::default().with_message(CmdMessage::success("Book deleted.")))
        } else {
            Ok(not_found())
        }
    }

    pub fn list_books(&mut self) -> Result<CmdResult> {
        let books = commands::list::run(&mut self.store, &self.keyspace)
            .collect::<Result<Vec<_>>>()?;
        let mut result = CmdResult::default();
        if books.is_empty() {
            result.add_message(CmdMessage::info("(no records)"));
        }
        Ok(result.with_listed_books(books))
    }

    pub fn search_books(&mut self, filter: &SearchFilter) -> Result<CmdResult> {
        let books = commands::list::run(&mut self.store, &self.keyspace);
        let found = commands::search::run(books, filter)?;

        let message = if found.is_empty() {
            CmdMessage::warning("No results found.")
        } else {
            CmdMessage::info(format!("Found {} result(s):", found.len()))
        };
        Ok(CmdResult::default()
            .with_message(message)
            .with_listed_books(found))
    }
}

fn not_found() -> CmdResult {
    CmdResult::default().with_message(CmdMessage::error("No book found with that id."))
}

fn rejected(e: crate::error::ValidationError) -> CmdResult {
    CmdResult::default().with_message(CmdMessage::error(e.to_string()))
}

pub use crate::commands::search::SearchFilter;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
