//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, customers, health, loans};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bibliotek API",
        version = "1.0.0",
        description = "Library Loan Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Customers
        customers::list_customers,
        customers::get_customer,
        customers::delete_customer,
        // Loans
        loans::borrow_book,
        loans::return_book,
        loans::list_loans,
        loans::list_late_loans,
        loans::get_customer_loans,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::CustomerInfo,
            // Books
            crate::models::book::Book,
            crate::models::book::BookQuery,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Customers
            crate::models::customer::Customer,
            crate::models::customer::CustomerQuery,
            crate::models::customer::RegisterCustomer,
            // Loans
            crate::models::loan::Loan,
            crate::models::loan::LateLoan,
            loans::BorrowResponse,
            loans::ReturnResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "books", description = "Catalog book management"),
        (name = "customers", description = "Customer management"),
        (name = "loans", description = "Loan lifecycle and reports")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
