use crate::error::Result;
use crate::model::Book;

/// Case-insensitive substring filters. Blank or absent filters match
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.title = Some(value.into());
        self
    }

    pub fn author(mut self, value: impl Into<String>) -> Self {
        self.author = Some(value.into());
        self
    }

    pub fn genre(mut self, value: impl Into<String>) -> Self {
        self.genre = Some(value.into());
        self
    }

    pub fn matches(&self, book: &Book) -> bool {
        contains(&book.title, self.title.as_deref())
            && contains(&book.author, self.author.as_deref())
            && contains(&book.genre, self.genre.as_deref())
    }
}

fn contains(value: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) if !needle.trim().is_empty() => {
            value.to_lowercase().contains(&needle.to_lowercase())
        }
        _ => true,
    }
}

/// Linear scan over `books`, keeping those matching `filter`.
///
/// The first error in the sequence aborts the search.
pub fn run<I>(books: I, filter: &SearchFilter) -> Result<Vec<Book>>
where
    I: IntoIterator<Item = Result<Book>>,
{
    let mut found = Vec::new();
    for book in books {
        let book = book?;
        if filter.matches(&book) {
            found.push(book);
        }
    }
    Ok(found)
}
