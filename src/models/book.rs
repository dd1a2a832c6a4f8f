//! Book model and the category-based loan policy

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Book category, the closed set controlling how long a book may stay out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum BookCategory {
    Regular = 1,
    NewRelease = 2,
    HighDemand = 3,
}

impl BookCategory {
    /// Resolve the raw category column. Anything outside the closed set,
    /// including an unset column, is rejected.
    pub fn from_raw(raw: Option<i16>) -> AppResult<Self> {
        match raw {
            Some(1) => Ok(BookCategory::Regular),
            Some(2) => Ok(BookCategory::NewRelease),
            Some(3) => Ok(BookCategory::HighDemand),
            other => Err(AppError::InvalidCategory(other)),
        }
    }

    /// Maximum loan duration for this category
    pub fn loan_period(&self) -> Duration {
        match self {
            BookCategory::Regular => Duration::days(10),
            BookCategory::NewRelease => Duration::days(5),
            BookCategory::HighDemand => Duration::days(2),
        }
    }

    /// Due date of a loan issued at `issued_at`
    pub fn due_date(&self, issued_at: DateTime<Utc>) -> DateTime<Utc> {
        issued_at + self.loan_period()
    }
}

impl From<BookCategory> for i16 {
    fn from(c: BookCategory) -> Self {
        c as i16
    }
}

/// Book model from database
///
/// `holder_id` is a projection maintained by the loan engine: it is set
/// exactly when an open loan exists for the book. No other code path writes
/// it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub year_published: Option<i32>,
    /// Raw category value; validated against the closed set at loan time
    pub category: Option<i16>,
    /// Opaque cover image reference
    pub cover: Option<String>,
    /// Customer currently holding the book, if any
    pub holder_id: Option<i32>,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.holder_id.is_none()
    }
}

/// Book search query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    pub year_published: Option<i32>,
    pub category: Option<i16>,
    pub cover: Option<String>,
}

/// Update book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: Option<String>,
    pub year_published: Option<i32>,
    pub category: Option<i16>,
    pub cover: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_loan_periods() {
        assert_eq!(BookCategory::Regular.loan_period(), Duration::days(10));
        assert_eq!(BookCategory::NewRelease.loan_period(), Duration::days(5));
        assert_eq!(BookCategory::HighDemand.loan_period(), Duration::days(2));
    }

    #[test]
    fn test_from_raw_known_values() {
        assert_eq!(BookCategory::from_raw(Some(1)).unwrap(), BookCategory::Regular);
        assert_eq!(BookCategory::from_raw(Some(2)).unwrap(), BookCategory::NewRelease);
        assert_eq!(BookCategory::from_raw(Some(3)).unwrap(), BookCategory::HighDemand);
    }

    #[test]
    fn test_from_raw_rejects_unknown() {
        assert!(matches!(
            BookCategory::from_raw(Some(0)),
            Err(AppError::InvalidCategory(Some(0)))
        ));
        assert!(matches!(
            BookCategory::from_raw(Some(4)),
            Err(AppError::InvalidCategory(Some(4)))
        ));
        assert!(matches!(
            BookCategory::from_raw(None),
            Err(AppError::InvalidCategory(None))
        ));
    }

    #[test]
    fn test_due_date_adds_loan_period() {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(BookCategory::Regular.due_date(t0), t0 + Duration::days(10));
        assert_eq!(BookCategory::NewRelease.due_date(t0), t0 + Duration::days(5));
        assert_eq!(BookCategory::HighDemand.due_date(t0), t0 + Duration::days(2));
    }
}
