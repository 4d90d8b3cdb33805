//! Billing error types.

use chrono::NaiveDate;
use pondok_shared::AppError;
use thiserror::Error;

/// Errors that can occur during segmentation and bill-item generation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BillingError {
    /// The period's end date precedes its start date.
    #[error("Invalid period: end date {end} is before start date {start}")]
    InvalidRange {
        /// Start of the rejected period.
        start: NaiveDate,
        /// End of the rejected period.
        end: NaiveDate,
    },
}

impl BillingError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRange { .. } => "INVALID_RANGE",
        }
    }
}

impl From<BillingError> for AppError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::InvalidRange { .. } => Self::Validation(err.to_string()),
        }
    }
}
