//! Customer model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::AppError;

/// Customer model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Customer {
    pub id: i32,
    pub username: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password: String,
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<i32>,
    /// Librarian role, granting catalog-mutation rights
    pub is_librarian: bool,
}

/// Customer search query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct CustomerQuery {
    pub name: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterCustomer {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<i32>,
    #[serde(default)]
    pub is_librarian: bool,
}

/// JWT claims for authenticated customers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerClaims {
    pub sub: String,
    pub customer_id: i32,
    pub librarian: bool,
    pub exp: i64,
    pub iat: i64,
}

impl CustomerClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Require the librarian role
    pub fn require_librarian(&self) -> Result<(), AppError> {
        if self.librarian {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Librarian privileges required".to_string(),
            ))
        }
    }
}
