//! Loan lifecycle service

use chrono::Utc;

use crate::{
    error::AppResult,
    models::loan::{LateLoan, Loan},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Issue a loan: the caller becomes the holder of the book
    pub async fn borrow_book(&self, book_id: i32, borrower_id: i32) -> AppResult<Loan> {
        // Verify borrower exists
        self.repository.customers.get_by_id(borrower_id).await?;

        let loan = self
            .repository
            .loans
            .issue(book_id, borrower_id, Utc::now())
            .await?;

        tracing::info!(
            book_id,
            borrower_id,
            due_at = %loan.due_at,
            "book loaned"
        );

        Ok(loan)
    }

    /// Return a book.
    ///
    /// `override_holder` allows closing a loan on behalf of the holder; the
    /// API layer only grants it to librarians.
    pub async fn return_book(
        &self,
        book_id: i32,
        requester_id: i32,
        override_holder: bool,
    ) -> AppResult<Loan> {
        let loan = self
            .repository
            .loans
            .close(book_id, requester_id, override_holder, Utc::now())
            .await?;

        tracing::info!(book_id, requester_id, "book returned");

        Ok(loan)
    }

    /// Get the full loan ledger
    pub async fn list_loans(&self) -> AppResult<Vec<Loan>> {
        self.repository.loans.list_all().await
    }

    /// Get overdue open loans with their day counts
    pub async fn list_late_loans(&self) -> AppResult<Vec<LateLoan>> {
        let now = Utc::now();
        let loans = self.repository.loans.list_late(now).await?;
        Ok(loans.iter().map(|l| LateLoan::from_loan(l, now)).collect())
    }

    /// Get the open loans of a customer
    pub async fn get_customer_loans(&self, customer_id: i32) -> AppResult<Vec<Loan>> {
        // Verify customer exists
        self.repository.customers.get_by_id(customer_id).await?;
        self.repository.loans.open_for_customer(customer_id).await
    }
}
