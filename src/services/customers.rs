//! Customer account and authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::customer::{Customer, CustomerClaims, CustomerQuery, RegisterCustomer},
    repository::Repository,
};

#[derive(Clone)]
pub struct CustomersService {
    repository: Repository,
    config: AuthConfig,
}

impl CustomersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new customer
    pub async fn register(&self, customer: RegisterCustomer) -> AppResult<Customer> {
        if self
            .repository
            .customers
            .username_exists(&customer.username)
            .await?
        {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let password_hash = self.hash_password(&customer.password)?;
        let created = self
            .repository
            .customers
            .create(&customer, &password_hash)
            .await?;

        tracing::info!(customer_id = created.id, username = %created.username, "customer registered");

        Ok(created)
    }

    /// Authenticate a customer by username and return a JWT token
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<(String, Customer)> {
        let customer = self
            .repository
            .customers
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !self.verify_password(&customer, password)? {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        let token = self.create_token(&customer)?;

        Ok((token, customer))
    }

    /// Create a JWT token for a customer
    fn create_token(&self, customer: &Customer) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = CustomerClaims {
            sub: customer.username.clone(),
            customer_id: customer.id,
            librarian: customer.is_librarian,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify a customer's password against its stored hash
    fn verify_password(&self, customer: &Customer, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&customer.password)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Get customer by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Customer> {
        self.repository.customers.get_by_id(id).await
    }

    /// Search customers
    pub async fn search_customers(&self, query: &CustomerQuery) -> AppResult<(Vec<Customer>, i64)> {
        self.repository.customers.search(query).await
    }

    /// Delete a customer. Refused while the customer still holds books,
    /// unless `force` is set.
    pub async fn delete_customer(&self, id: i32, force: bool) -> AppResult<()> {
        self.repository.customers.get_by_id(id).await?;

        if !force && self.repository.loans.customer_has_open_loans(id).await? {
            return Err(AppError::Conflict(format!(
                "Customer {} has open loans and cannot be deleted",
                id
            )));
        }

        self.repository.customers.delete(id).await
    }
}
