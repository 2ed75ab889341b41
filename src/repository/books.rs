//! Book store

use crate::{
    error::{AppError, AppResult},
    models::book::Book,
};

/// Books in insertion order. Identifiers are assigned by the caller.
#[derive(Debug, Default)]
pub struct BooksRepository {
    books: Vec<Book>,
}

impl BooksRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a book. Duplicate identifiers are not rejected.
    pub fn add(&mut self, book: Book) {
        self.books.push(book);
    }

    pub fn list(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Remove every book with this id. Returns whether anything was removed.
    pub fn remove(&mut self, id: i32) -> bool {
        let before = self.books.len();
        self.books.retain(|b| b.id != id);
        self.books.len() != before
    }

    pub fn find_by_id(&self, id: i32) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: i32) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| b.id == id)
    }

    pub fn get_by_id(&self, id: i32) -> AppResult<&Book> {
        self.find_by_id(id).ok_or_else(|| AppError::book_not_found(id))
    }

    #[cfg(test)]
    pub fn reset(&mut self) {
        self.books.clear();
    }
}
