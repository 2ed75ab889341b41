//! Book model and inventory transitions

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::LoanError;

/// Availability of a book, derived from its inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    Available,
    Loaned,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::Loaned => "loaned",
        }
    }

    fn for_inventory(inventory_count: u32) -> Self {
        if inventory_count > 0 {
            BookStatus::Available
        } else {
            BookStatus::Loaned
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A catalog entry with its count of copies on the shelf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub inventory_count: u32,
    pub status: BookStatus,
}

impl Book {
    pub fn new(id: i32, title: impl Into<String>, author: impl Into<String>, inventory_count: u32) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            inventory_count,
            status: BookStatus::for_inventory(inventory_count),
        }
    }

    pub fn is_available(&self) -> bool {
        self.inventory_count > 0
    }

    /// Take one copy off the shelf.
    pub fn borrow(&mut self) -> Result<(), LoanError> {
        if self.inventory_count == 0 {
            return Err(LoanError::Unavailable { book_id: self.id });
        }
        self.inventory_count -= 1;
        if self.inventory_count == 0 {
            self.status = BookStatus::Loaned;
        }
        Ok(())
    }

    /// Put one copy back. Not bounded by the number of copies the book was added with.
    pub fn return_copy(&mut self) {
        self.inventory_count += 1;
        self.status = BookStatus::Available;
    }
}

/// Create book request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub inventory_count: u32,
}

impl From<CreateBook> for Book {
    fn from(request: CreateBook) -> Self {
        Book::new(request.id, request.title, request.author, request.inventory_count)
    }
}

/// Availability answer for a single book
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookAvailability {
    pub book_id: i32,
    pub available: bool,
    pub inventory_count: u32,
}
