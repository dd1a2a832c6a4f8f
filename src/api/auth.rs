//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::customer::{Customer, RegisterCustomer},
};

use super::AuthenticatedCustomer;

/// Login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response with a bearer token
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub customer: CustomerInfo,
}

/// Identity of the authenticated customer
#[derive(Serialize, ToSchema)]
pub struct CustomerInfo {
    pub id: i32,
    pub username: String,
    pub is_librarian: bool,
}

/// Register a new customer account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterCustomer,
    responses(
        (status = 201, description = "Customer registered", body = Customer),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(payload): Json<RegisterCustomer>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let created = state.services.customers.register(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Log in and receive a JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, customer) = state
        .services
        .customers
        .authenticate(&payload.username, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        customer: CustomerInfo {
            id: customer.id,
            username: customer.username,
            is_librarian: customer.is_librarian,
        },
    }))
}

/// Get the current authenticated customer
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current customer", body = Customer),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedCustomer(claims): AuthenticatedCustomer,
) -> AppResult<Json<Customer>> {
    let customer = state.services.customers.get_by_id(claims.customer_id).await?;
    Ok(Json(customer))
}
