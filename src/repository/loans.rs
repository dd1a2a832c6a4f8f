//! Loans repository: the transactional loan lifecycle engine
//!
//! Every state transition of a book (available -> on loan -> available) goes
//! through this module and nowhere else. The book row is locked for the
//! duration of each transaction, so the holder flag and the loan ledger can
//! never be observed out of step.

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{book::BookCategory, loan::Loan},
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Issue a loan for a book.
    ///
    /// The `SELECT ... FOR UPDATE` serializes concurrent attempts on the same
    /// book: of two racing callers, one commits and the other observes the
    /// holder already set and fails with `AlreadyOnLoan`.
    pub async fn issue(
        &self,
        book_id: i32,
        borrower_id: i32,
        now: DateTime<Utc>,
    ) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query("SELECT category, holder_id FROM books WHERE id = $1 FOR UPDATE")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        if book.get::<Option<i32>, _>("holder_id").is_some() {
            return Err(AppError::AlreadyOnLoan(book_id));
        }

        let category = BookCategory::from_raw(book.get("category"))?;
        let due_at = category.due_date(now);

        sqlx::query("UPDATE books SET holder_id = $1 WHERE id = $2")
            .bind(borrower_id)
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (book_id, customer_id, loaned_at, due_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(borrower_id)
        .bind(now)
        .bind(due_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(loan)
    }

    /// Close the open loan for a book.
    ///
    /// `bypass_holder_check` skips the requester-is-holder test; callers only
    /// set it for librarian-approved returns on behalf of the holder.
    ///
    /// If the book carries a holder but no open loan row exists, the holder
    /// is cleared anyway (the book must not stay stuck) and the mismatch is
    /// reported as `LedgerInconsistency`.
    pub async fn close(
        &self,
        book_id: i32,
        requester_id: i32,
        bypass_holder_check: bool,
        now: DateTime<Utc>,
    ) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query("SELECT holder_id FROM books WHERE id = $1 FOR UPDATE")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        let holder_id: i32 = book
            .get::<Option<i32>, _>("holder_id")
            .ok_or(AppError::NotOnLoan(book_id))?;

        if holder_id != requester_id && !bypass_holder_check {
            return Err(AppError::Forbidden(
                "Only the current holder may return this book".to_string(),
            ));
        }

        sqlx::query("UPDATE books SET holder_id = NULL WHERE id = $1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        let closed = sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans SET returned_at = $1
            WHERE book_id = $2 AND customer_id = $3 AND returned_at IS NULL
            RETURNING *
            "#,
        )
        .bind(now)
        .bind(book_id)
        .bind(holder_id)
        .fetch_optional(&mut *tx)
        .await?;

        match closed {
            Some(loan) => {
                tx.commit().await?;
                Ok(loan)
            }
            None => {
                // Commit so the holder flag is cleared even though the ledger
                // had no matching open row, then surface the mismatch.
                tx.commit().await?;
                Err(AppError::LedgerInconsistency(format!(
                    "Book {} was held by customer {} but no open loan exists",
                    book_id, holder_id
                )))
            }
        }
    }

    /// Get the full loan ledger
    pub async fn list_all(&self) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>("SELECT * FROM loans ORDER BY loaned_at")
            .fetch_all(&self.pool)
            .await?;
        Ok(loans)
    }

    /// Get every open loan whose due date has passed at `now`
    pub async fn list_late(&self, now: DateTime<Utc>) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE returned_at IS NULL AND due_at < $1 ORDER BY due_at",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    /// Get the open loans of a customer
    pub async fn open_for_customer(&self, customer_id: i32) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE customer_id = $1 AND returned_at IS NULL ORDER BY due_at",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    /// Check whether a customer still has open loans
    pub async fn customer_has_open_loans(&self, customer_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM loans WHERE customer_id = $1 AND returned_at IS NULL)",
        )
        .bind(customer_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
