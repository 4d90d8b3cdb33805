//! Payment error types.

use pondok_shared::AppError;
use pondok_shared::types::BillId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during payment allocation and transaction planning.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
    /// Manual per-bill amounts do not sum to the payment amount.
    #[error("Manual allocations sum to {actual}, payment amount is {expected}")]
    AllocationMismatch {
        /// The payment amount the allocations must cover exactly.
        expected: Decimal,
        /// The sum of the supplied per-bill amounts.
        actual: Decimal,
    },

    /// A referenced bill does not exist in the provided snapshot.
    #[error("Bill not found: {0}")]
    BillNotFound(BillId),

    /// A deposit portion was computed but no deposit was supplied.
    #[error("Deposit not found for deposit portion of payment")]
    DepositNotFound,
}

impl PaymentError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AllocationMismatch { .. } => "ALLOCATION_MISMATCH",
            Self::BillNotFound(_) => "BILL_NOT_FOUND",
            Self::DepositNotFound => "DEPOSIT_NOT_FOUND",
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::AllocationMismatch { .. } => Self::BusinessRule(err.to_string()),
            PaymentError::BillNotFound(_) | PaymentError::DepositNotFound => {
                Self::NotFound(err.to_string())
            }
        }
    }
}
