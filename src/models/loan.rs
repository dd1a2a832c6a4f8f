//! Loan ledger model and lateness types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Loan model from database
///
/// A loan is open while `returned_at` is null. Rows are closed exactly once
/// and never deleted or reopened.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i32,
    pub book_id: i32,
    pub customer_id: i32,
    pub loaned_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

impl Loan {
    /// Still outstanding (book not yet returned)
    pub fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }

    /// Open and past its due date at `now`
    pub fn is_late(&self, now: DateTime<Utc>) -> bool {
        self.is_open() && self.due_at < now
    }

    /// Whole days past the due date at `now`, clamped at zero
    pub fn days_late(&self, now: DateTime<Utc>) -> i64 {
        (now - self.due_at).num_days().max(0)
    }
}

/// Overdue loan with its day count, as reported by the lateness query
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LateLoan {
    pub id: i32,
    pub book_id: i32,
    pub customer_id: i32,
    pub loaned_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub days_late: i64,
}

impl LateLoan {
    pub fn from_loan(loan: &Loan, now: DateTime<Utc>) -> Self {
        Self {
            id: loan.id,
            book_id: loan.book_id,
            customer_id: loan.customer_id,
            loaned_at: loan.loaned_at,
            due_at: loan.due_at,
            days_late: loan.days_late(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn loan_due_at(due_at: DateTime<Utc>) -> Loan {
        Loan {
            id: 1,
            book_id: 7,
            customer_id: 42,
            loaned_at: due_at - Duration::days(5),
            due_at,
            returned_at: None,
        }
    }

    #[test]
    fn test_not_late_before_due_date() {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        // 5-day loan issued at t0, checked 4 days in
        let loan = loan_due_at(t0 + Duration::days(5));
        assert!(!loan.is_late(t0 + Duration::days(4)));
    }

    #[test]
    fn test_late_one_day_past_due() {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let loan = loan_due_at(t0 + Duration::days(5));
        let now = t0 + Duration::days(6);
        assert!(loan.is_late(now));
        assert_eq!(loan.days_late(now), 1);
    }

    #[test]
    fn test_days_late_clamped_at_zero() {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let loan = loan_due_at(t0 + Duration::days(5));
        assert_eq!(loan.days_late(t0), 0);
    }

    #[test]
    fn test_returned_loan_is_never_late() {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut loan = loan_due_at(t0 + Duration::days(2));
        loan.returned_at = Some(t0 + Duration::days(1));
        assert!(!loan.is_late(t0 + Duration::days(30)));
    }

    #[test]
    fn test_days_late_truncates_partial_days() {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let loan = loan_due_at(t0);
        assert_eq!(loan.days_late(t0 + Duration::hours(36)), 1);
    }
}
