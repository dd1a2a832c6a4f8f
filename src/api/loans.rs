//! Loan lifecycle endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::loan::{LateLoan, Loan},
};

use super::AuthenticatedCustomer;

/// Loan response with the computed due date
#[derive(Serialize, ToSchema)]
pub struct BorrowResponse {
    /// Loan ID
    pub loan_id: i32,
    /// Due date (ISO 8601 format)
    pub due_at: DateTime<Utc>,
    /// Status message
    pub message: String,
}

/// Return response with the closed loan
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    /// Return status
    pub status: String,
    /// Timestamp at which the loan was closed
    pub returned_at: DateTime<Utc>,
    /// Closed loan record
    pub loan: Loan,
}

#[derive(Deserialize)]
pub struct ReturnParams {
    /// Close the loan on behalf of the current holder (librarians only)
    pub override_holder: Option<bool>,
}

/// Borrow a book (the authenticated customer becomes its holder)
#[utoipa::path(
    post,
    path = "/books/{id}/loan",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 201, description = "Loan created", body = BorrowResponse),
        (status = 400, description = "Invalid book category"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book is already on loan")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    AuthenticatedCustomer(claims): AuthenticatedCustomer,
    Path(book_id): Path<i32>,
) -> AppResult<(StatusCode, Json<BorrowResponse>)> {
    let loan = state
        .services
        .loans
        .borrow_book(book_id, claims.customer_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BorrowResponse {
            loan_id: loan.id,
            due_at: loan.due_at,
            message: "Book loaned successfully".to_string(),
        }),
    ))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/books/{id}/return",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID"),
        ("override_holder" = Option<bool>, Query, description = "Return on behalf of the holder (librarians only)")
    ),
    responses(
        (status = 200, description = "Book returned", body = ReturnResponse),
        (status = 403, description = "Requester is not the holder"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book is not on loan")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    AuthenticatedCustomer(claims): AuthenticatedCustomer,
    Path(book_id): Path<i32>,
    Query(params): Query<ReturnParams>,
) -> AppResult<Json<ReturnResponse>> {
    let override_holder = params.override_holder.unwrap_or(false);
    if override_holder {
        claims.require_librarian()?;
    }

    let loan = state
        .services
        .loans
        .return_book(book_id, claims.customer_id, override_holder)
        .await?;

    let returned_at = loan.returned_at.unwrap_or_else(Utc::now);

    Ok(Json(ReturnResponse {
        status: "returned".to_string(),
        returned_at,
        loan,
    }))
}

/// Get the full loan ledger
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All loan records", body = Vec<Loan>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_loans(
    State(state): State<crate::AppState>,
    AuthenticatedCustomer(_claims): AuthenticatedCustomer,
) -> AppResult<Json<Vec<Loan>>> {
    let loans = state.services.loans.list_loans().await?;
    Ok(Json(loans))
}

/// Get overdue open loans with their day counts
#[utoipa::path(
    get,
    path = "/loans/late",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Overdue loans", body = Vec<LateLoan>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_late_loans(
    State(state): State<crate::AppState>,
    AuthenticatedCustomer(_claims): AuthenticatedCustomer,
) -> AppResult<Json<Vec<LateLoan>>> {
    let late = state.services.loans.list_late_loans().await?;
    Ok(Json(late))
}

/// Get the open loans of a specific customer
#[utoipa::path(
    get,
    path = "/customers/{id}/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer's open loans", body = Vec<Loan>),
        (status = 403, description = "Not the customer nor a librarian"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_customer_loans(
    State(state): State<crate::AppState>,
    AuthenticatedCustomer(claims): AuthenticatedCustomer,
    Path(customer_id): Path<i32>,
) -> AppResult<Json<Vec<Loan>>> {
    if claims.customer_id != customer_id {
        claims.require_librarian()?;
    }

    let loans = state.services.loans.get_customer_loans(customer_id).await?;
    Ok(Json(loans))
}
