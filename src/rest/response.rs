//! The result of a paginated traversal.
//!
//! [`Collection<T>`] holds every item gathered, in page order, together with
//! the error that ended the traversal early, if any. It implements
//! `Deref<Target = Vec<T>>`, so a collection can be used like the items
//! directly:
//!
//! ```rust
//! use bigcommerce_api::rest::Collection;
//!
//! let collection = Collection::complete(vec!["a", "b"], 1);
//! assert_eq!(collection.len(), 2);
//! assert_eq!(collection[0], "a");
//! assert!(collection.is_complete());
//! ```
//!
//! Callers that prefer all-or-nothing semantics use
//! [`into_result`](Collection::into_result).

use std::ops::{Deref, DerefMut};

use crate::rest::ApiError;

/// Items from a traversal plus its terminal error.
#[derive(Debug)]
pub struct Collection<T> {
    items: Vec<T>,
    error: Option<ApiError>,
    pages: u32,
}

impl<T> Collection<T> {
    /// A traversal that finished without error.
    #[must_use]
    pub const fn complete(items: Vec<T>, pages: u32) -> Self {
        Self {
            items,
            error: None,
            pages,
        }
    }

    /// A traversal that stopped on `error` after gathering `items`.
    #[must_use]
    pub const fn failed(items: Vec<T>, pages: u32, error: ApiError) -> Self {
        Self {
            items,
            error: Some(error),
            pages,
        }
    }

    /// Returns the error that ended the traversal, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    /// Returns `true` if no error was attached.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Returns the number of pages successfully decoded.
    #[must_use]
    pub const fn pages(&self) -> u32 {
        self.pages
    }

    /// Consumes the collection and returns the items, discarding any error.
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }

    /// Consumes the collection and returns items and error separately.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Option<ApiError>) {
        (self.items, self.error)
    }

    /// Converts to a `Result`, dropping the partial items on error.
    ///
    /// # Errors
    ///
    /// Returns the attached error, if any.
    pub fn into_result(self) -> Result<Vec<T>, ApiError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.items),
        }
    }
}

impl<T> Deref for Collection<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> DerefMut for Collection<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.items
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
