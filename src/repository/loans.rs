//! Loan ledger: borrow and return transitions over the user and book stores

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult, LoanError},
    models::{book::Book, loan::Loan},
};

use super::{books::BooksRepository, users::UsersRepository};

#[derive(Debug)]
pub struct LoansRepository {
    loans: IndexMap<i32, Loan>,
    next_id: i32,
}

impl Default for LoansRepository {
    fn default() -> Self {
        Self {
            loans: IndexMap::new(),
            next_id: 1,
        }
    }
}

/// Both ids must be positive, and both records must exist.
/// Hands back the book so the caller can apply its transition.
fn check_references<'b>(
    users: &UsersRepository,
    books: &'b mut BooksRepository,
    user_id: i32,
    book_id: i32,
) -> AppResult<&'b mut Book> {
    if user_id <= 0 || book_id <= 0 {
        return Err(AppError::Validation(
            "User and book identifiers must be positive integers".to_string(),
        ));
    }
    users.get_by_id(user_id)?;
    books
        .find_by_id_mut(book_id)
        .ok_or_else(|| AppError::book_not_found(book_id))
}

impl LoansRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lend one copy of `book_id` to `user_id`.
    ///
    /// Every check runs before anything is mutated, so a failed borrow leaves
    /// the ledger and the book untouched.
    pub fn register_borrow(
        &mut self,
        users: &UsersRepository,
        books: &mut BooksRepository,
        user_id: i32,
        book_id: i32,
        at: DateTime<Utc>,
    ) -> AppResult<Loan> {
        let book = check_references(users, books, user_id, book_id)?;
        book.borrow()?;

        let loan = Loan {
            loan_id: self.next_id,
            user_id,
            book_id,
            borrowed_at: at,
            returned_at: None,
        };
        self.next_id += 1;
        self.loans.insert(loan.loan_id, loan.clone());

        Ok(loan)
    }

    /// Close the earliest active loan of `book_id` held by `user_id`.
    pub fn register_return(
        &mut self,
        users: &UsersRepository,
        books: &mut BooksRepository,
        user_id: i32,
        book_id: i32,
        at: DateTime<Utc>,
    ) -> AppResult<Loan> {
        let book = check_references(users, books, user_id, book_id)?;

        let loan = self
            .loans
            .values_mut()
            .find(|l| l.matches(user_id, book_id) && l.is_active())
            .ok_or(LoanError::NoActiveLoan { user_id, book_id })?;

        loan.returned_at = Some(at);
        book.return_copy();

        Ok(loan.clone())
    }

    /// All loans in the order they were made, returned ones included.
    pub fn list(&self) -> Vec<Loan> {
        self.loans.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Loan> {
        self.loans.values()
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }

    pub fn count_active(&self) -> usize {
        self.loans.values().filter(|l| l.is_active()).count()
    }

    pub fn get_by_id(&self, loan_id: i32) -> AppResult<&Loan> {
        self.loans
            .get(&loan_id)
            .ok_or_else(|| AppError::loan_not_found(loan_id))
    }

    #[cfg(test)]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        book::BookStatus,
        user::{CreateUser, Role},
    };
    use chrono::Duration;

    struct Fixture {
        users: UsersRepository,
        books: BooksRepository,
        loans: LoansRepository,
        user_id: i32,
    }

    fn fixture(inventory: u32) -> Fixture {
        let mut users = UsersRepository::new();
        let user = users
            .register(CreateUser::new("Test User", "TST12345", Role::Student), Utc::now())
            .unwrap();
        let mut books = BooksRepository::new();
        books.add(Book::new(1, "Test Book", "Author", inventory));
        Fixture {
            users,
            books,
            loans: LoansRepository::new(),
            user_id: user.id,
        }
    }

    impl Fixture {
        fn borrow(&mut self, book_id: i32) -> AppResult<Loan> {
            self.loans
                .register_borrow(&self.users, &mut self.books, self.user_id, book_id, Utc::now())
        }

        fn give_back(&mut self, book_id: i32) -> AppResult<Loan> {
            self.loans
                .register_return(&self.users, &mut self.books, self.user_id, book_id, Utc::now())
        }

        fn inventory(&self, book_id: i32) -> u32 {
            self.books.find_by_id(book_id).unwrap().inventory_count
        }
    }

    #[test]
    fn test_borrow_exactly_inventory_times() {
        let mut f = fixture(3);
        for expected_id in 1..=3 {
            assert_eq!(f.borrow(1).unwrap().loan_id, expected_id);
        }
        let err = f.borrow(1).unwrap_err();
        assert!(matches!(err, AppError::Loan(LoanError::Unavailable { book_id: 1 })));

        let book = f.books.find_by_id(1).unwrap();
        assert_eq!(book.inventory_count, 0);
        assert_eq!(book.status, BookStatus::Loaned);
        assert_eq!(f.loans.len(), 3);
    }

    #[test]
    fn test_borrow_then_return_round_trip() {
        let mut f = fixture(2);
        let loan = f.borrow(1).unwrap();
        assert!(loan.is_active());
        assert_eq!(f.inventory(1), 1);

        let returned = f.give_back(1).unwrap();
        assert_eq!(returned.loan_id, loan.loan_id);
        assert!(returned.returned_at.is_some());
        assert_eq!(f.inventory(1), 2);

        let loans = f.loans.list();
        assert_eq!(loans.len(), 1);
        assert!(loans[0].returned_at.is_some());
    }

    #[test]
    fn test_invalid_ids_rejected_before_lookup() {
        let mut f = fixture(1);
        assert!(matches!(f.borrow(0), Err(AppError::Validation(_))));
        assert!(matches!(f.borrow(-4), Err(AppError::Validation(_))));
        assert!(f.loans.is_empty());
        assert_eq!(f.inventory(1), 1);
    }

    #[test]
    fn test_missing_user_or_book() {
        let mut f = fixture(1);
        assert!(matches!(f.borrow(9), Err(AppError::NotFound(..))));
        let err = f
            .loans
            .register_borrow(&f.users, &mut f.books, 77, 1, Utc::now())
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(..)));
        assert!(f.loans.is_empty());
        assert_eq!(f.inventory(1), 1);
    }

    #[test]
    fn test_return_without_active_loan() {
        let mut f = fixture(1);
        let err = f.give_back(1).unwrap_err();
        assert!(matches!(err, AppError::Loan(LoanError::NoActiveLoan { book_id: 1, .. })));

        f.borrow(1).unwrap();
        f.give_back(1).unwrap();
        assert!(matches!(f.give_back(1), Err(AppError::Loan(_))));
        assert_eq!(f.inventory(1), 1);
    }

    #[test]
    fn test_return_of_removed_book_keeps_loan_open() {
        let mut f = fixture(1);
        let loan = f.borrow(1).unwrap();
        f.books.remove(1);

        assert!(matches!(f.give_back(1), Err(AppError::NotFound(..))));
        assert!(f.loans.get_by_id(loan.loan_id).unwrap().is_active());
        assert_eq!(f.loans.count_active(), 1);
    }

    #[test]
    fn test_return_closes_earliest_active_loan() {
        let mut f = fixture(2);
        let t0 = Utc::now();
        let first = f
            .loans
            .register_borrow(&f.users, &mut f.books, f.user_id, 1, t0)
            .unwrap();
        let second = f
            .loans
            .register_borrow(&f.users, &mut f.books, f.user_id, 1, t0 + Duration::minutes(5))
            .unwrap();

        let returned = f.give_back(1).unwrap();
        assert_eq!(returned.loan_id, first.loan_id);
        assert!(f.loans.get_by_id(second.loan_id).unwrap().is_active());
        assert_eq!(f.loans.count_active(), 1);
    }

    #[test]
    fn test_get_by_id_and_reset() {
        let mut f = fixture(1);
        let loan = f.borrow(1).unwrap();
        assert_eq!(f.loans.get_by_id(loan.loan_id).unwrap(), &loan);
        assert!(matches!(f.loans.get_by_id(5), Err(AppError::NotFound(..))));

        f.loans.reset();
        assert!(f.loans.is_empty());
        f.books.find_by_id_mut(1).unwrap().return_copy();
        assert_eq!(f.borrow(1).unwrap().loan_id, 1);
    }
}
