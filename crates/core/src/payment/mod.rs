//! Payment-to-bill allocation and ledger transaction planning.
//!
//! This module implements the payment half of the core:
//! - Oldest-due-first allocation of a balance across outstanding bills
//! - Full re-striping of a booking's payment history after bill edits
//! - Deposit-first splitting of a payment between deposit and rent
//! - Idempotent upsert planning for income ledger transactions

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use error::PaymentError;
pub use service::PaymentService;
pub use types::{
    AllocationOutcome, Bill, Deposit, DepositSplit, DepositStatus, LedgerTransaction, Payment,
    PaymentAllocation, RelatedPayment, TransactionCategory, TransactionKind, TransactionPlan,
    TransactionUpdate,
};
