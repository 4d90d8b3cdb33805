//! Property-based tests for payment allocation.

use chrono::NaiveDate;
use pondok_shared::types::{BillId, PaymentId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::PaymentService;
use super::types::{Bill, Payment};

/// Strategy to generate a non-negative amount (0.00 to 10,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a positive amount (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a list of bills sorted by due date, each with a
/// paid amount no larger than its total.
fn bills() -> impl Strategy<Value = Vec<Bill>> {
    prop::collection::vec((1i64..1_000_000, 0i64..1_000_000), 0..8).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (total_cents, paid_seed))| {
                let paid_cents = paid_seed % (total_cents + 1);
                let month = u32::try_from(i % 12).unwrap() + 1;
                let year = 2025 + i32::try_from(i / 12).unwrap();
                Bill {
                    id: BillId::new(),
                    due_date: NaiveDate::from_ymd_opt(year, month, 28).unwrap(),
                    amount: Decimal::new(total_cents, 2),
                    paid_amount: Decimal::new(paid_cents, 2),
                }
            })
            .collect()
    })
}

/// Strategy to generate a payment history sorted by payment date.
fn payments() -> impl Strategy<Value = Vec<Payment>> {
    prop::collection::vec(positive_amount(), 0..8).prop_map(|amounts| {
        amounts
            .into_iter()
            .enumerate()
            .map(|(i, amount)| Payment {
                id: PaymentId::new(),
                amount,
                payment_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
                    + chrono::Duration::days(i64::try_from(i).unwrap() * 7),
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Conservation: allocated total plus remaining balance equals the
    /// original balance, and nothing is negative.
    #[test]
    fn prop_allocation_conserves_balance(balance in amount(), bills in bills()) {
        let outcome = PaymentService::allocate(balance, &bills, PaymentId::new());

        prop_assert_eq!(outcome.allocated_total() + outcome.remaining_balance, balance);
        prop_assert!(outcome.remaining_balance >= Decimal::ZERO);
        for allocation in &outcome.allocations {
            prop_assert!(allocation.amount > Decimal::ZERO);
        }
    }

    /// No allocation exceeds its target bill's outstanding amount.
    #[test]
    fn prop_allocation_never_exceeds_outstanding(balance in amount(), bills in bills()) {
        let outcome = PaymentService::allocate(balance, &bills, PaymentId::new());

        for allocation in &outcome.allocations {
            let bill = bills.iter().find(|b| b.id == allocation.bill_id).unwrap();
            prop_assert!(allocation.amount <= bill.outstanding());
        }
    }

    /// At most one bill receives a partial allocation, and it is the last
    /// one touched (the walk stops there).
    #[test]
    fn prop_only_last_allocation_is_partial(balance in amount(), bills in bills()) {
        let outcome = PaymentService::allocate(balance, &bills, PaymentId::new());

        for allocation in outcome.allocations.iter().rev().skip(1) {
            let bill = bills.iter().find(|b| b.id == allocation.bill_id).unwrap();
            prop_assert_eq!(allocation.amount, bill.outstanding());
        }
    }

    /// Re-striping conservation: per payment, allocations never exceed the
    /// payment amount; per bill, contributions never exceed the bill amount.
    #[test]
    fn prop_reconcile_respects_both_caps(payments in payments(), bills in bills()) {
        let allocations = PaymentService::reconcile(&payments, &bills);

        for payment in &payments {
            let from_payment: Decimal = allocations
                .iter()
                .filter(|a| a.payment_id == payment.id)
                .map(|a| a.amount)
                .sum();
            prop_assert!(from_payment <= payment.amount);
        }
        for bill in &bills {
            let to_bill: Decimal = allocations
                .iter()
                .filter(|a| a.bill_id == bill.id)
                .map(|a| a.amount)
                .sum();
            prop_assert!(to_bill <= bill.amount);
        }
    }

    /// Re-striping exhausts the smaller side: total allocated equals the
    /// lesser of total payments and total billed.
    #[test]
    fn prop_reconcile_exhausts_smaller_side(payments in payments(), bills in bills()) {
        let allocations = PaymentService::reconcile(&payments, &bills);

        let allocated: Decimal = allocations.iter().map(|a| a.amount).sum();
        let paid: Decimal = payments.iter().map(|p| p.amount).sum();
        let billed: Decimal = bills.iter().map(|b| b.amount).sum();
        prop_assert_eq!(allocated, paid.min(billed));
    }

    /// Deposit-first law: deposit portion is min(payment, deposit item),
    /// rent portion is the rest, and the split always sums back.
    #[test]
    fn prop_deposit_first_split_law(payment in amount(), deposit_item in amount()) {
        let split = PaymentService::split_deposit_first(payment, deposit_item);

        prop_assert_eq!(split.deposit_portion, payment.min(deposit_item));
        prop_assert_eq!(split.rent_portion, (payment - deposit_item).max(Decimal::ZERO));
        prop_assert_eq!(split.total(), payment);
    }
}
