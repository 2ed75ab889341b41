//! Reporting over loans, users and books

use indexmap::IndexMap;

use crate::{
    models::{
        book::BookStatus,
        loan::Loan,
        report::{
            BookLoanCount, CollectionStatus, LoanBookSummary, LoanDetails, LoanProgress,
            LoanUserSummary, UserLoanCount, NOT_AVAILABLE, UNKNOWN_BOOK, UNKNOWN_USER,
        },
    },
    repository::{Repository, SharedRepository},
};

/// Read-only projections over one repository snapshot.
pub struct Reports<'a> {
    repository: &'a Repository,
}

/// Count occurrences of each key, sorted by count descending.
/// Ties keep the order in which keys were first seen.
fn ranked<I>(keys: I) -> Vec<(i32, u32)>
where
    I: Iterator<Item = i32>,
{
    let mut counts: IndexMap<i32, u32> = IndexMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    let mut ranking: Vec<(i32, u32)> = counts.into_iter().collect();
    ranking.sort_by(|a, b| b.1.cmp(&a.1));
    ranking
}

impl<'a> Reports<'a> {
    pub fn new(repository: &'a Repository) -> Self {
        Self { repository }
    }

    pub fn most_borrowed_books(&self) -> Vec<BookLoanCount> {
        ranked(self.repository.loans.iter().map(|l| l.book_id))
            .into_iter()
            .map(|(book_id, count)| match self.repository.books.find_by_id(book_id) {
                Some(book) => BookLoanCount {
                    book_id,
                    title: book.title.clone(),
                    author: book.author.clone(),
                    count,
                },
                None => BookLoanCount {
                    book_id,
                    title: UNKNOWN_BOOK.to_string(),
                    author: NOT_AVAILABLE.to_string(),
                    count,
                },
            })
            .collect()
    }

    pub fn most_active_users(&self) -> Vec<UserLoanCount> {
        ranked(self.repository.loans.iter().map(|l| l.user_id))
            .into_iter()
            .map(|(user_id, count)| match self.repository.users.find_by_id(user_id) {
                Some(user) => UserLoanCount {
                    user_id,
                    name: user.name.clone(),
                    registration_number: user.registration_number.clone(),
                    count,
                },
                None => UserLoanCount {
                    user_id,
                    name: UNKNOWN_USER.to_string(),
                    registration_number: user_id.to_string(),
                    count,
                },
            })
            .collect()
    }

    pub fn collection_status(&self) -> CollectionStatus {
        let books = self.repository.books.list();
        let mut status = CollectionStatus {
            total: books.len(),
            ..Default::default()
        };
        for book in books {
            match book.status {
                BookStatus::Available => status.available += 1,
                BookStatus::Loaned => status.loaned += 1,
            }
        }
        status
    }

    pub fn detailed_loans(&self) -> Vec<LoanDetails> {
        self.repository
            .loans
            .iter()
            .map(|loan| self.details(loan))
            .collect()
    }

    fn details(&self, loan: &Loan) -> LoanDetails {
        let user = match self.repository.users.find_by_id(loan.user_id) {
            Some(u) => LoanUserSummary {
                id: u.id,
                name: u.name.clone(),
                registration_number: u.registration_number.clone(),
            },
            None => LoanUserSummary {
                id: loan.user_id,
                name: UNKNOWN_USER.to_string(),
                registration_number: NOT_AVAILABLE.to_string(),
            },
        };
        let book = match self.repository.books.find_by_id(loan.book_id) {
            Some(b) => LoanBookSummary {
                id: b.id,
                title: b.title.clone(),
                author: b.author.clone(),
            },
            None => LoanBookSummary {
                id: loan.book_id,
                title: UNKNOWN_BOOK.to_string(),
                author: NOT_AVAILABLE.to_string(),
            },
        };

        LoanDetails {
            loan_id: loan.loan_id,
            user,
            book,
            borrowed_at: loan.borrowed_at,
            returned_at: loan.returned_at,
            status: if loan.is_active() {
                LoanProgress::InProgress
            } else {
                LoanProgress::Returned
            },
        }
    }

    /// Loans whose borrow day (UTC, `YYYY-MM-DD`) lies within `[start, end]`.
    ///
    /// Bounds are compared as strings, so any value orders lexicographically
    /// against the formatted day.
    pub fn loans_by_period(&self, start: &str, end: &str) -> Vec<Loan> {
        self.repository
            .loans
            .iter()
            .filter(|l| {
                let day = l.borrowed_at.date_naive().format("%Y-%m-%d").to_string();
                start <= day.as_str() && day.as_str() <= end
            })
            .cloned()
            .collect()
    }
}

#[derive(Clone)]
pub struct ReportsService {
    repository: SharedRepository,
}

impl ReportsService {
    pub fn new(repository: SharedRepository) -> Self {
        Self { repository }
    }

    pub async fn most_borrowed_books(&self) -> Vec<BookLoanCount> {
        let repository = self.repository.read().await;
        Reports::new(&repository).most_borrowed_books()
    }

    pub async fn most_active_users(&self) -> Vec<UserLoanCount> {
        let repository = self.repository.read().await;
        Reports::new(&repository).most_active_users()
    }

    pub async fn collection_status(&self) -> CollectionStatus {
        let repository = self.repository.read().await;
        Reports::new(&repository).collection_status()
    }

    pub async fn detailed_loans(&self) -> Vec<LoanDetails> {
        let repository = self.repository.read().await;
        Reports::new(&repository).detailed_loans()
    }

    pub async fn loans_by_period(&self, start: &str, end: &str) -> Vec<Loan> {
        tracing::debug!("Period report from {} to {}", start, end);
        let repository = self.repository.read().await;
        Reports::new(&repository).loans_by_period(start, end)
    }
}
