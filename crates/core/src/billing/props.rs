//! Property-based tests for month segmentation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::calendar::{days_inclusive, first_of_next_month, last_day_of_month};
use super::service::BillingService;
use super::types::{BookingPeriod, StayPeriod};

/// Strategy to generate an arbitrary calendar date in 2020-2030.
fn any_date() -> impl Strategy<Value = NaiveDate> {
    (2020i32..=2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Strategy to generate a valid stay (start <= end, up to ~2 years long).
fn any_stay() -> impl Strategy<Value = StayPeriod> {
    (any_date(), 0i64..730, 1i64..1_000_000).prop_map(|(start, len, fee)| {
        let end = start + chrono::Duration::days(len);
        StayPeriod::new(start, end, Decimal::from(fee)).unwrap()
    })
}

/// Strategy to generate a valid monthly-rate booking.
fn any_booking() -> impl Strategy<Value = BookingPeriod> {
    (any_date(), 0i64..730, 1i64..10_000_000).prop_map(|(start, len, fee)| {
        let end = start + chrono::Duration::days(len);
        BookingPeriod::new(start, end, Decimal::from(fee)).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Segments reconstruct the stay exactly: contiguous, no gaps, no
    /// overlaps, first starts at the stay start, last ends at the stay end.
    #[test]
    fn prop_segments_cover_stay_exactly(stay in any_stay()) {
        let segments = BillingService::segment_stay(&stay);

        prop_assert!(!segments.is_empty());
        prop_assert_eq!(segments[0].start_date, stay.start_date());
        prop_assert_eq!(segments[segments.len() - 1].end_date, stay.end_date());
        for pair in segments.windows(2) {
            prop_assert_eq!(pair[1].start_date, first_of_next_month(pair[0].end_date));
            prop_assert_eq!(pair[1].start_date, pair[0].end_date + chrono::Duration::days(1));
        }
    }

    /// No segment crosses a calendar-month boundary, and every interior
    /// segment spans its full month.
    #[test]
    fn prop_interior_segments_are_full_months(stay in any_stay()) {
        let segments = BillingService::segment_stay(&stay);

        for segment in &segments {
            prop_assert_eq!(
                last_day_of_month(segment.start_date),
                last_day_of_month(segment.end_date),
                "segment crosses a month boundary"
            );
        }
        if segments.len() > 2 {
            for segment in &segments[1..segments.len() - 1] {
                prop_assert!(segment.is_full_month());
            }
        }
    }

    /// Total fee over all segments equals daily_fee * inclusive day count.
    #[test]
    fn prop_stay_fee_sum_is_exact(stay in any_stay()) {
        let segments = BillingService::segment_stay(&stay);

        let total: Decimal = segments.iter().map(|s| s.total_fee).sum();
        let days: i64 = segments.iter().map(super::types::MonthSegment::days).sum();
        prop_assert_eq!(days, stay.total_days());
        prop_assert_eq!(total, stay.daily_fee() * Decimal::from(stay.total_days()));
    }

    /// Booking segments share the stay segmenter's boundaries, and full
    /// months bill the monthly fee exactly.
    #[test]
    fn prop_booking_full_months_bill_monthly_fee(booking in any_booking()) {
        let segments = BillingService::segment_booking(&booking);

        prop_assert_eq!(segments[0].start_date, booking.start_date());
        prop_assert_eq!(segments[segments.len() - 1].end_date, booking.end_date());
        for segment in &segments {
            if segment.is_full_month() {
                prop_assert_eq!(segment.total_fee, booking.monthly_fee());
            } else {
                prop_assert!(segment.total_fee <= booking.monthly_fee());
            }
        }
    }

    /// Drafted guest items carry exactly the segment fees: grouping by month
    /// loses and invents nothing.
    #[test]
    fn prop_guest_items_conserve_fees(stay in any_stay()) {
        let drafts = BillingService::guest_stay_items(std::slice::from_ref(&stay));

        let drafted: Decimal = drafts.values().flatten().map(|d| d.amount).sum();
        prop_assert_eq!(drafted, stay.daily_fee() * Decimal::from(stay.total_days()));

        let item_count: usize = drafts.values().map(Vec::len).sum();
        prop_assert_eq!(item_count, BillingService::segment_stay(&stay).len());
    }

    /// Month keys round-trip through a bill's due date: the key derived from
    /// the due date is the key the bill was drafted under.
    #[test]
    fn prop_month_key_rederivable_from_due_date(date in any_date()) {
        let key = super::types::MonthKey::from_date(date);
        let due = BillingService::bill_due_date(key);
        prop_assert_eq!(super::types::MonthKey::from_date(due), key);
        prop_assert_eq!(due, last_day_of_month(date));
    }

    /// Inclusive day counts agree with segment day sums for any subrange.
    #[test]
    fn prop_days_inclusive_symmetry(start in any_date(), len in 0i64..100) {
        let end = start + chrono::Duration::days(len);
        prop_assert_eq!(days_inclusive(start, end), len + 1);
    }
}
