//! Payment domain types.
//!
//! These are in-memory snapshots of persisted rows plus the pure outputs the
//! persistence layer executes: allocations to write and a transaction plan
//! (creates, amount overwrites, stale deletes).

use chrono::NaiveDate;
use pondok_shared::types::{BillId, DepositId, LocationId, Money, PaymentId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A persisted invoice snapshot.
///
/// The due date is always the last calendar day of the bill's month; bills
/// for one booking are ordered by due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    /// Unique identifier.
    pub id: BillId,
    /// Last calendar day of the billed month.
    pub due_date: NaiveDate,
    /// Total billed amount.
    pub amount: Decimal,
    /// Sum of allocations already applied to this bill.
    pub paid_amount: Decimal,
}

impl Bill {
    /// Amount still owed on this bill.
    #[must_use]
    pub fn outstanding(&self) -> Decimal {
        self.amount - self.paid_amount
    }

    /// True once the bill is fully covered.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.outstanding() <= Decimal::ZERO
    }
}

/// A recorded payment, immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier.
    pub id: PaymentId,
    /// Amount paid.
    pub amount: Decimal,
    /// Date the payment was received.
    pub payment_date: NaiveDate,
}

/// How much of one payment was applied to one bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAllocation {
    /// The contributing payment.
    pub payment_id: PaymentId,
    /// The bill receiving the funds.
    pub bill_id: BillId,
    /// Amount applied.
    pub amount: Decimal,
}

/// Result of allocating a balance across bills.
///
/// Any balance left after the bills run out is surfaced here as
/// `remaining_balance` (an overpayment); the core never silently drops it
/// and leaves its interpretation to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationOutcome {
    /// Balance not consumed by any bill.
    pub remaining_balance: Decimal,
    /// Allocations in bill order, oldest due date first.
    pub allocations: Vec<PaymentAllocation>,
}

impl AllocationOutcome {
    /// Sum of all allocated amounts.
    #[must_use]
    pub fn allocated_total(&self) -> Decimal {
        self.allocations.iter().map(|a| a.amount).sum()
    }
}

/// Lifecycle of a security deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DepositStatus {
    /// Not yet fully paid in.
    Unpaid,
    /// Fully collected and held.
    Held,
    /// Returned at checkout (set by the checkout flow, not this core).
    Refunded,
}

/// A security deposit snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    /// Unique identifier.
    pub id: DepositId,
    /// Full deposit amount owed.
    pub amount: Decimal,
    /// Current lifecycle status.
    pub status: DepositStatus,
}

/// Ledger transaction category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionCategory {
    /// Rent income.
    Rent,
    /// Deposit income.
    Deposit,
}

impl TransactionCategory {
    /// The fixed label persisted and shown in the ledger.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rent => "Biaya Sewa",
            Self::Deposit => "Deposit",
        }
    }
}

/// Direction of a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

/// Back-reference from a ledger transaction to the payment (and deposit)
/// that produced it. Persisted as JSON by the caller; the pair
/// `(payment_id, category)` identifies the transaction during upserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedPayment {
    /// The originating payment.
    pub payment_id: PaymentId,
    /// The deposit satisfied, for deposit-category transactions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_id: Option<DepositId>,
}

/// A category-tagged income movement in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTransaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Rent or deposit income.
    pub category: TransactionCategory,
    /// Direction; always income for payment-produced transactions.
    pub kind: TransactionKind,
    /// Amount moved.
    pub amount: Decimal,
    /// Property location the income belongs to.
    pub location_id: LocationId,
    /// Back-reference to the originating payment.
    pub related: RelatedPayment,
}

impl LedgerTransaction {
    /// The moved amount as typed money (all ledger income is Rupiah).
    #[must_use]
    pub fn money(&self) -> Money {
        Money::idr(self.amount)
    }
}

/// Overwrite of an existing transaction's amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionUpdate {
    /// The transaction to overwrite.
    pub id: TransactionId,
    /// The new amount.
    pub amount: Decimal,
}

/// Pure output of the idempotent transaction upsert computation.
///
/// The persistence layer executes the three lists inside one database
/// transaction; re-running the planner against the resulting state yields
/// only updates with unchanged amounts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPlan {
    /// Transactions to insert.
    pub creates: Vec<LedgerTransaction>,
    /// Existing transactions whose amount is overwritten.
    pub updates: Vec<TransactionUpdate>,
    /// Stale same-payment transactions to remove.
    pub deletes: Vec<TransactionId>,
}

/// Deposit-first split of a single payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositSplit {
    /// Portion satisfying the deposit item, capped at its amount.
    pub deposit_portion: Decimal,
    /// Remainder going to rent.
    pub rent_portion: Decimal,
}

impl DepositSplit {
    /// The full payment amount the split was derived from.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.deposit_portion + self.rent_portion
    }
}
