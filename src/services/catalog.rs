//! Catalog (book) service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookAvailability},
    repository::SharedRepository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: SharedRepository,
}

impl CatalogService {
    pub fn new(repository: SharedRepository) -> Self {
        Self { repository }
    }

    pub async fn list_books(&self) -> Vec<Book> {
        self.repository.read().await.books.list().to_vec()
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.read().await.books.get_by_id(id).cloned()
    }

    /// Add a book to the catalog
    pub async fn add_book(&self, book: Book) -> Book {
        let mut repository = self.repository.write().await;
        if repository.books.find_by_id(book.id).is_some() {
            tracing::warn!("Adding book {} although that id is already in the catalog", book.id);
        }
        tracing::info!("Book {} added ({} copies)", book.id, book.inventory_count);
        repository.books.add(book.clone());
        book
    }

    /// Remove a book; `NotFound` if no book has this id
    pub async fn remove_book(&self, id: i32) -> AppResult<()> {
        let removed = self.repository.write().await.books.remove(id);
        if !removed {
            return Err(AppError::book_not_found(id));
        }
        tracing::info!("Book {} removed", id);
        Ok(())
    }

    pub async fn availability(&self, id: i32) -> AppResult<BookAvailability> {
        let repository = self.repository.read().await;
        let book = repository.books.get_by_id(id)?;
        Ok(BookAvailability {
            book_id: book.id,
            available: book.is_available(),
            inventory_count: book.inventory_count,
        })
    }

    pub async fn count(&self) -> usize {
        self.repository.read().await.books.len()
    }
}
