//! Payment service: allocation, reconciliation, and transaction planning.
//!
//! All functions are pure and synchronous; the caller reads the snapshots,
//! runs these computations, and executes the returned rows/plans inside its
//! own database transaction. Determinism lets the whole sequence be safely
//! re-run if that transaction retries.

use pondok_shared::types::{BillId, DepositId, LocationId, PaymentId, TransactionId};
use rust_decimal::Decimal;
use tracing::debug;

use super::error::PaymentError;
use super::types::{
    AllocationOutcome, Bill, Deposit, DepositSplit, DepositStatus, LedgerTransaction, Payment,
    PaymentAllocation, RelatedPayment, TransactionCategory, TransactionKind, TransactionPlan,
    TransactionUpdate,
};

/// Payment service for allocation business logic.
pub struct PaymentService;

impl PaymentService {
    /// Applies a single payment's balance across bills, oldest due first.
    ///
    /// Bills must be sorted by due date ascending. Settled bills are
    /// skipped. When the balance cannot cover a bill's outstanding amount,
    /// the entire remaining balance goes to that bill and allocation stops;
    /// otherwise the bill is settled and the walk continues. Balance left
    /// after the last bill is returned as `remaining_balance`.
    ///
    /// Conservation: `allocated_total() + remaining_balance == balance`,
    /// and no allocation exceeds its bill's outstanding amount.
    #[must_use]
    pub fn allocate(
        balance: Decimal,
        bills: &[Bill],
        payment_id: PaymentId,
    ) -> AllocationOutcome {
        let mut remaining = balance;
        let mut allocations = Vec::new();

        for bill in bills {
            if remaining <= Decimal::ZERO {
                break;
            }
            let outstanding = bill.outstanding();
            if outstanding <= Decimal::ZERO {
                continue;
            }

            let applied = remaining.min(outstanding);
            allocations.push(PaymentAllocation {
                payment_id,
                bill_id: bill.id,
                amount: applied,
            });
            remaining -= applied;
        }

        AllocationOutcome {
            remaining_balance: remaining,
            allocations,
        }
    }

    /// Re-stripes a booking's full payment history against its bills.
    ///
    /// Used after an edit changes bill amounts: every payment is re-applied
    /// oldest first against a working copy of the bills' full amounts, so a
    /// bill may end up funded by several payments. No allocation exceeds
    /// either its payment's amount or its bill's original amount.
    ///
    /// Payments must be sorted by payment date, bills by due date.
    #[must_use]
    pub fn reconcile(payments: &[Payment], bills: &[Bill]) -> Vec<PaymentAllocation> {
        let mut outstanding: Vec<Decimal> = bills.iter().map(|b| b.amount).collect();
        let mut allocations = Vec::new();

        for payment in payments {
            let mut remaining = payment.amount;

            for (bill, balance) in bills.iter().zip(outstanding.iter_mut()) {
                if remaining <= Decimal::ZERO {
                    break;
                }
                if *balance <= Decimal::ZERO {
                    continue;
                }

                let applied = remaining.min(*balance);
                allocations.push(PaymentAllocation {
                    payment_id: payment.id,
                    bill_id: bill.id,
                    amount: applied,
                });
                *balance -= applied;
                remaining -= applied;
            }
        }

        debug!(
            payments = payments.len(),
            bills = bills.len(),
            allocations = allocations.len(),
            "reconciled payment history"
        );

        allocations
    }

    /// Splits a payment deposit-first.
    ///
    /// The deposit item is satisfied before rent, capped at its own amount;
    /// the remainder goes to rent. Not proportional.
    #[must_use]
    pub fn split_deposit_first(
        payment_amount: Decimal,
        deposit_item_amount: Decimal,
    ) -> DepositSplit {
        let deposit_portion = payment_amount.min(deposit_item_amount);
        DepositSplit {
            deposit_portion,
            rent_portion: payment_amount - deposit_portion,
        }
    }

    /// Plans the idempotent ledger-transaction upsert for one payment.
    ///
    /// At most two income transactions exist per payment: one per category.
    /// Existing transactions are matched by `(related.payment_id, category)`
    /// and get their amount overwritten; missing categories are created
    /// (rent only when its portion is positive); same-payment transactions
    /// whose category no longer applies are deleted as stale.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::DepositNotFound` if the split carries a
    /// deposit portion but no deposit id was supplied.
    pub fn plan_transactions(
        payment: &Payment,
        split: DepositSplit,
        deposit_id: Option<DepositId>,
        existing: &[LedgerTransaction],
        location_id: LocationId,
    ) -> Result<TransactionPlan, PaymentError> {
        let mut desired: Vec<(TransactionCategory, Decimal, Option<DepositId>)> = Vec::new();

        if split.deposit_portion > Decimal::ZERO {
            let deposit_id = deposit_id.ok_or(PaymentError::DepositNotFound)?;
            desired.push((
                TransactionCategory::Deposit,
                split.deposit_portion,
                Some(deposit_id),
            ));
        }
        if split.rent_portion > Decimal::ZERO {
            desired.push((TransactionCategory::Rent, split.rent_portion, None));
        }

        let mut plan = TransactionPlan::default();

        for (category, amount, deposit_id) in &desired {
            match existing
                .iter()
                .filter(|tx| tx.related.payment_id == payment.id)
                .find(|tx| tx.category == *category)
            {
                Some(tx) => plan.updates.push(TransactionUpdate {
                    id: tx.id,
                    amount: *amount,
                }),
                None => plan.creates.push(LedgerTransaction {
                    id: TransactionId::new(),
                    category: *category,
                    kind: TransactionKind::Income,
                    amount: *amount,
                    location_id,
                    related: RelatedPayment {
                        payment_id: payment.id,
                        deposit_id: *deposit_id,
                    },
                }),
            }
        }

        // stale shapes from a previous allocation of this payment
        for tx in existing
            .iter()
            .filter(|tx| tx.related.payment_id == payment.id)
        {
            if !desired.iter().any(|(category, _, _)| *category == tx.category) {
                plan.deletes.push(tx.id);
            }
        }

        debug!(
            payment = %payment.id,
            creates = plan.creates.len(),
            updates = plan.updates.len(),
            deletes = plan.deletes.len(),
            "planned ledger transactions"
        );

        Ok(plan)
    }

    /// Decides the deposit status from the summed deposit-category total.
    ///
    /// Deposits can be paid incrementally, so the decision reads the
    /// cumulative allocated total, never a single payment in isolation.
    /// A refunded deposit never regresses (refunds belong to the external
    /// checkout flow).
    #[must_use]
    pub fn deposit_status_after(
        deposit: &Deposit,
        total_deposit_allocated: Decimal,
    ) -> DepositStatus {
        if deposit.status == DepositStatus::Refunded {
            DepositStatus::Refunded
        } else if total_deposit_allocated >= deposit.amount {
            DepositStatus::Held
        } else {
            DepositStatus::Unpaid
        }
    }

    /// Validates user-specified per-bill amounts before any write happens.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::AllocationMismatch` if the amounts do not sum
    /// to the payment amount, or `PaymentError::BillNotFound` if an amount
    /// references a bill missing from the snapshot.
    pub fn check_manual_allocations(
        payment_amount: Decimal,
        allocations: &[(BillId, Decimal)],
        bills: &[Bill],
    ) -> Result<(), PaymentError> {
        for (bill_id, _) in allocations {
            if !bills.iter().any(|b| b.id == *bill_id) {
                return Err(PaymentError::BillNotFound(*bill_id));
            }
        }

        let total: Decimal = allocations.iter().map(|(_, amount)| *amount).sum();
        if total != payment_amount {
            return Err(PaymentError::AllocationMismatch {
                expected: payment_amount,
                actual: total,
            });
        }

        Ok(())
    }
}
