//! Report endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{
        loan::Loan,
        report::{BookLoanCount, CollectionStatus, LoanDetails, PeriodQuery, UserLoanCount},
    },
    AppState,
};

/// Books ranked by number of loans
#[utoipa::path(
    get,
    path = "/reports/most-borrowed-books",
    tag = "reports",
    responses(
        (status = 200, description = "Most borrowed books", body = Vec<BookLoanCount>)
    )
)]
pub async fn most_borrowed_books(State(state): State<AppState>) -> Json<Vec<BookLoanCount>> {
    Json(state.services.reports.most_borrowed_books().await)
}

/// Users ranked by number of loans
#[utoipa::path(
    get,
    path = "/reports/most-active-users",
    tag = "reports",
    responses(
        (status = 200, description = "Most active users", body = Vec<UserLoanCount>)
    )
)]
pub async fn most_active_users(State(state): State<AppState>) -> Json<Vec<UserLoanCount>> {
    Json(state.services.reports.most_active_users().await)
}

/// Available vs loaned books
#[utoipa::path(
    get,
    path = "/reports/collection-status",
    tag = "reports",
    responses(
        (status = 200, description = "Collection status", body = CollectionStatus)
    )
)]
pub async fn collection_status(State(state): State<AppState>) -> Json<CollectionStatus> {
    Json(state.services.reports.collection_status().await)
}

/// Every loan with user and book details
#[utoipa::path(
    get,
    path = "/reports/loans",
    tag = "reports",
    responses(
        (status = 200, description = "Detailed loans", body = Vec<LoanDetails>)
    )
)]
pub async fn detailed_loans(State(state): State<AppState>) -> Json<Vec<LoanDetails>> {
    Json(state.services.reports.detailed_loans().await)
}

/// Loans borrowed within a date range
#[utoipa::path(
    get,
    path = "/reports/period",
    tag = "reports",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Loans in the period", body = Vec<Loan>),
        (status = 400, description = "Missing start or end")
    )
)]
pub async fn loans_by_period(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<Vec<Loan>>> {
    let (start, end) = match (query.start.as_deref(), query.end.as_deref()) {
        (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => (start, end),
        _ => {
            return Err(AppError::BadRequest(
                "Query parameters start and end are required".to_string(),
            ))
        }
    };

    Ok(Json(state.services.reports.loans_by_period(start, end).await))
}
