//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, loans, reports, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Server API",
        version = "0.1.0",
        description = "In-memory library management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Users
        users::list_users,
        users::get_user,
        users::get_user_by_registration_number,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::delete_book,
        books::get_availability,
        // Loans
        loans::list_loans,
        loans::get_loan,
        loans::create_loan,
        loans::return_loan,
        // Reports
        reports::most_borrowed_books,
        reports::most_active_users,
        reports::collection_status,
        reports::detailed_loans,
        reports::loans_by_period,
    ),
    components(
        schemas(
            // Users
            crate::models::user::User,
            crate::models::user::Role,
            crate::models::user::UserStatus,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Books
            crate::models::book::Book,
            crate::models::book::BookStatus,
            crate::models::book::CreateBook,
            crate::models::book::BookAvailability,
            // Loans
            crate::models::loan::Loan,
            crate::models::loan::LoanRequest,
            // Reports
            crate::models::report::BookLoanCount,
            crate::models::report::UserLoanCount,
            crate::models::report::CollectionStatus,
            crate::models::report::LoanDetails,
            crate::models::report::LoanUserSummary,
            crate::models::report::LoanBookSummary,
            crate::models::report::LoanProgress,
            // Health
            health::HealthResponse,
            health::ReadinessResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User management"),
        (name = "books", description = "Catalog management"),
        (name = "loans", description = "Loans and returns"),
        (name = "reports", description = "Reports over loans, users and books")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
