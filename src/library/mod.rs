//! Read access to the catalog, gated by the authorizer.
//!
//! Both the HTTP handlers and the MCP tools go through [`Library`], so the
//! permission check lives in exactly one place. Authorization is always
//! decided before the collection is touched: a denied caller learns nothing
//! about whether an id exists.

use std::sync::Arc;
use thiserror::Error;

use crate::auth::{AccessError, Authorizer};
use crate::catalog::{Book, Catalog};

/// Route template the book-list endpoint is registered under.
pub const ROUTE_BOOKS: &str = "/books";
/// Route template the single-book endpoint is registered under.
pub const ROUTE_BOOK_BY_ID: &str = "/books/{id}";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    #[error("Invalid API Key")]
    Unauthenticated,
    #[error("API key does not have permission for this endpoint")]
    Forbidden,
    #[error("Book with ID '{0}' not found.")]
    BookNotFound(String),
}

impl From<AccessError> for LibraryError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => LibraryError::Unauthenticated,
            AccessError::Forbidden => LibraryError::Forbidden,
        }
    }
}

pub struct Library {
    catalog: Arc<Catalog>,
    authorizer: Authorizer,
}

impl Library {
    pub fn new(catalog: Arc<Catalog>, authorizer: Authorizer) -> Self {
        Self {
            catalog,
            authorizer,
        }
    }

    /// All books in insertion order.
    pub fn list_books(&self, api_key: Option<&str>) -> Result<&[Book], LibraryError> {
        self.authorizer.authorize(api_key, ROUTE_BOOKS)?;
        Ok(self.catalog.books())
    }

    /// A single book by id. The permission check comes first, so an
    /// unauthorized caller gets Forbidden even for ids that do not exist.
    pub fn get_book(&self, api_key: Option<&str>, id: &str) -> Result<&Book, LibraryError> {
        self.authorizer.authorize(api_key, ROUTE_BOOK_BY_ID)?;
        self.catalog
            .get_book(id)
            .ok_or_else(|| LibraryError::BookNotFound(id.to_string()))
    }
}
