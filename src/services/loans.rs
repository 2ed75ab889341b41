//! Loan management service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::loan::Loan,
    repository::SharedRepository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: SharedRepository,
}

fn log_refusal(action: &str, user_id: i32, book_id: i32, error: &AppError) {
    match error {
        AppError::Loan(e) => tracing::warn!("{} refused for user {} / book {}: {}", action, user_id, book_id, e),
        other => tracing::debug!("{} rejected for user {} / book {}: {}", action, user_id, book_id, other),
    }
}

impl LoansService {
    pub fn new(repository: SharedRepository) -> Self {
        Self { repository }
    }

    /// Create a new loan (borrow a book)
    pub async fn create_loan(&self, user_id: i32, book_id: i32) -> AppResult<Loan> {
        let mut guard = self.repository.write().await;
        let repository = &mut *guard;
        let result = repository.loans.register_borrow(
            &repository.users,
            &mut repository.books,
            user_id,
            book_id,
            Utc::now(),
        );

        match &result {
            Ok(loan) => tracing::info!(
                "Loan {} created: user {} borrowed book {}",
                loan.loan_id,
                user_id,
                book_id
            ),
            Err(e) => log_refusal("Borrow", user_id, book_id, e),
        }
        result
    }

    /// Return a borrowed book
    pub async fn return_loan(&self, user_id: i32, book_id: i32) -> AppResult<Loan> {
        let mut guard = self.repository.write().await;
        let repository = &mut *guard;
        let result = repository.loans.register_return(
            &repository.users,
            &mut repository.books,
            user_id,
            book_id,
            Utc::now(),
        );

        match &result {
            Ok(loan) => tracing::info!(
                "Loan {} returned: user {} returned book {}",
                loan.loan_id,
                user_id,
                book_id
            ),
            Err(e) => log_refusal("Return", user_id, book_id, e),
        }
        result
    }

    pub async fn list_loans(&self) -> Vec<Loan> {
        self.repository.read().await.loans.list()
    }

    pub async fn get_loan(&self, loan_id: i32) -> AppResult<Loan> {
        self.repository.read().await.loans.get_by_id(loan_id).cloned()
    }

    /// Count active loans
    pub async fn count_active(&self) -> usize {
        self.repository.read().await.loans.count_active()
    }
}
