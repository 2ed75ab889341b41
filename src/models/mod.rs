//! Data models for the library server

pub mod book;
pub mod loan;
pub mod report;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookStatus};
pub use loan::Loan;
pub use report::{BookLoanCount, CollectionStatus, LoanDetails, UserLoanCount};
pub use user::{Role, User, UserStatus};
