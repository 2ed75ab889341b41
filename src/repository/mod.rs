//! In-memory record stores

pub mod books;
pub mod loans;
pub mod users;

use std::sync::Arc;

use tokio::sync::RwLock;

/// All record stores of one library. Nothing is persisted.
#[derive(Debug, Default)]
pub struct Repository {
    pub books: books::BooksRepository,
    pub users: users::UsersRepository,
    pub loans: loans::LoansRepository,
}

/// The repository behind the single lock every service shares.
pub type SharedRepository = Arc<RwLock<Repository>>;

impl Repository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> SharedRepository {
        Arc::new(RwLock::new(self))
    }

    #[cfg(test)]
    pub fn reset(&mut self) {
        self.books.reset();
        self.users.reset();
        self.loans.reset();
    }
}
