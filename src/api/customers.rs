//! Customer management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::customer::{Customer, CustomerQuery},
};

use super::{AuthenticatedCustomer, PaginatedResponse};

/// List customers with search and pagination
#[utoipa::path(
    get,
    path = "/customers",
    tag = "customers",
    security(("bearer_auth" = [])),
    params(
        ("name" = Option<String>, Query, description = "Search by name or username"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "List of customers", body = PaginatedResponse<Customer>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_customers(
    State(state): State<crate::AppState>,
    AuthenticatedCustomer(_claims): AuthenticatedCustomer,
    Query(query): Query<CustomerQuery>,
) -> AppResult<Json<PaginatedResponse<Customer>>> {
    let (customers, total) = state.services.customers.search_customers(&query).await?;

    Ok(Json(PaginatedResponse {
        items: customers,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Get customer details by ID
#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "customers",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer details", body = Customer),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_customer(
    State(state): State<crate::AppState>,
    AuthenticatedCustomer(_claims): AuthenticatedCustomer,
    Path(id): Path<i32>,
) -> AppResult<Json<Customer>> {
    let customer = state.services.customers.get_by_id(id).await?;
    Ok(Json(customer))
}

#[derive(Deserialize)]
pub struct DeleteCustomerParams {
    pub force: Option<bool>,
}

/// Delete a customer (self, or any customer for librarians)
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "customers",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Customer ID"),
        ("force" = Option<bool>, Query, description = "Force delete even with open loans")
    ),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 403, description = "Not the customer nor a librarian"),
        (status = 404, description = "Customer not found"),
        (status = 409, description = "Customer has open loans")
    )
)]
pub async fn delete_customer(
    State(state): State<crate::AppState>,
    AuthenticatedCustomer(claims): AuthenticatedCustomer,
    Path(id): Path<i32>,
    Query(params): Query<DeleteCustomerParams>,
) -> AppResult<StatusCode> {
    if claims.customer_id != id {
        claims.require_librarian()?;
    }

    state
        .services
        .customers
        .delete_customer(id, params.force.unwrap_or(false))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
