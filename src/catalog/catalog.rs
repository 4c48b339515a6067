use anyhow::{bail, Result};
use std::collections::HashSet;

use super::Book;

/// The book collection. Read-only after construction; listing preserves
/// insertion order.
#[derive(Debug, Clone)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Ids must be unique; duplicates are a construction error.
    pub fn new(books: Vec<Book>) -> Result<Self> {
        let mut seen = HashSet::new();
        for book in &books {
            if !seen.insert(book.id.as_str()) {
                bail!("Duplicate book id {:?} in catalog", book.id);
            }
        }
        Ok(Self { books })
    }

    /// The demo catalog served when no other data is configured.
    pub fn builtin() -> Self {
        let books = vec![
            Book::new("1", "The Hitchhiker's Guide to the Galaxy", "Douglas Adams"),
            Book::new("2", "Dune", "Frank Herbert"),
        ];
        Self::new(books).expect("builtin catalog ids are unique")
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn get_book(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_expected_books() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.book_count(), 2);
        assert_eq!(
            catalog.get_book("1").unwrap().title,
            "The Hitchhiker's Guide to the Galaxy"
        );
        assert_eq!(catalog.get_book("2").unwrap().author, "Frank Herbert");
    }

    #[test]
    fn listing_preserves_insertion_order() {
        let catalog = Catalog::new(vec![
            Book::new("b", "Second", "B"),
            Book::new("a", "First", "A"),
        ])
        .unwrap();
        let ids: Vec<&str> = catalog.books().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let result = Catalog::new(vec![
            Book::new("1", "One", "A"),
            Book::new("1", "Other One", "B"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn get_book_unknown_id() {
        assert!(Catalog::builtin().get_book("99").is_none());
    }
}
