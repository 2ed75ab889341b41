//! Report rows produced by the report generator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const UNKNOWN_BOOK: &str = "Unknown Book";
pub const UNKNOWN_USER: &str = "Unknown User";
pub const NOT_AVAILABLE: &str = "N/A";

/// Loan count for one book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookLoanCount {
    pub book_id: i32,
    pub title: String,
    pub author: String,
    pub count: u32,
}

/// Loan count for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserLoanCount {
    pub user_id: i32,
    pub name: String,
    pub registration_number: String,
    pub count: u32,
}

/// Shelf status of the whole collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CollectionStatus {
    pub available: usize,
    pub loaned: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum LoanProgress {
    Returned,
    #[serde(rename = "In progress")]
    InProgress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanUserSummary {
    pub id: i32,
    pub name: String,
    pub registration_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LoanBookSummary {
    pub id: i32,
    pub title: String,
    pub author: String,
}

/// Loan with user and book resolved for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetails {
    pub loan_id: i32,
    pub user: LoanUserSummary,
    pub book: LoanBookSummary,
    pub borrowed_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub status: LoanProgress,
}

/// Query parameters for the period report. Both bounds are required.
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PeriodQuery {
    /// First day of the period (YYYY-MM-DD), inclusive
    pub start: Option<String>,
    /// Last day of the period (YYYY-MM-DD), inclusive
    pub end: Option<String>,
}
