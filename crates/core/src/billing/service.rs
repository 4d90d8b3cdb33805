//! Billing service: month segmentation and bill-item drafting.
//!
//! This service contains pure calendar/decimal arithmetic with no database
//! dependencies. Inverted ranges are rejected when periods are constructed,
//! so every function here operates on intervals known to be well-formed and
//! always terminates.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::{Decimal, RoundingStrategy};

use super::calendar::{days_in_month, days_inclusive, first_of_next_month, last_day_of_month};
use super::types::{BillItemDraft, BookingPeriod, MonthKey, MonthSegment, StayPeriod};

/// Decimal places kept when prorating a monthly fee.
const PRORATION_DP: u32 = 2;

/// Billing service for segmentation and bill-item generation.
pub struct BillingService;

impl BillingService {
    /// Splits a daily-rate stay into calendar-month segments.
    ///
    /// Walks from the stay's start date, cutting each segment at the earlier
    /// of the month's last day and the stay's end date. The inclusive day
    /// count of each segment is multiplied by the daily fee with no
    /// intermediate rounding.
    ///
    /// A stay fully inside one month yields one segment equal to the stay
    /// bounds; `start == end` yields a single 1-day segment.
    #[must_use]
    pub fn segment_stay(stay: &StayPeriod) -> Vec<MonthSegment> {
        let mut segments = Vec::new();
        let mut cursor = stay.start_date();

        loop {
            let end = last_day_of_month(cursor).min(stay.end_date());
            let days = days_inclusive(cursor, end);
            segments.push(MonthSegment {
                start_date: cursor,
                end_date: end,
                daily_fee: stay.daily_fee(),
                total_fee: stay.daily_fee() * Decimal::from(days),
            });

            if end == stay.end_date() {
                break;
            }
            cursor = first_of_next_month(end);
        }

        segments
    }

    /// Splits a monthly-rate booking into calendar-month segments.
    ///
    /// A segment spanning its full calendar month is billed the monthly fee
    /// exactly. A partial first or last month is prorated by day count over
    /// the month's length and banker's-rounded to two decimal places, e.g.
    /// July 5-31 at 2,000,000/month bills 27/31 of the fee: 1,741,935.48.
    #[must_use]
    pub fn segment_booking(booking: &BookingPeriod) -> Vec<MonthSegment> {
        let mut segments = Vec::new();
        let mut cursor = booking.start_date();

        loop {
            let end = last_day_of_month(cursor).min(booking.end_date());
            let days = days_inclusive(cursor, end);
            let month_days = days_in_month(cursor);

            let total_fee = if days == month_days {
                booking.monthly_fee()
            } else {
                (booking.monthly_fee() * Decimal::from(days) / Decimal::from(month_days))
                    .round_dp_with_strategy(PRORATION_DP, RoundingStrategy::MidpointNearestEven)
            };

            segments.push(MonthSegment {
                start_date: cursor,
                end_date: end,
                daily_fee: booking.monthly_fee() / Decimal::from(month_days),
                total_fee,
            });

            if end == booking.end_date() {
                break;
            }
            cursor = first_of_next_month(end);
        }

        segments
    }

    /// Drafts extra-guest line items for a batch of stays, grouped by month.
    ///
    /// Stays landing in the same month append to that month's draft list in
    /// input order, so regeneration from the same input is byte-identical.
    #[must_use]
    pub fn guest_stay_items(stays: &[StayPeriod]) -> BTreeMap<MonthKey, Vec<BillItemDraft>> {
        let mut drafts: BTreeMap<MonthKey, Vec<BillItemDraft>> = BTreeMap::new();

        for stay in stays {
            for segment in Self::segment_stay(stay) {
                let key = segment.month_key();
                let description = format!(
                    "Biaya Menginap Tamu Tambahan ({} {} - {} {})",
                    MonthKey::from_date(segment.start_date).month_name(),
                    segment.start_date.day(),
                    MonthKey::from_date(segment.end_date).month_name(),
                    segment.end_date.day(),
                );
                drafts.entry(key).or_default().push(BillItemDraft {
                    description,
                    amount: segment.total_fee,
                    month_key: key,
                });
            }
        }

        drafts
    }

    /// Drafts room-fee line items for a booking, grouped by month.
    #[must_use]
    pub fn room_fee_items(booking: &BookingPeriod) -> BTreeMap<MonthKey, Vec<BillItemDraft>> {
        let mut drafts: BTreeMap<MonthKey, Vec<BillItemDraft>> = BTreeMap::new();

        for segment in Self::segment_booking(booking) {
            let key = segment.month_key();
            let description = format!(
                "Sewa Kamar ({} {} {} - {} {} {})",
                segment.start_date.day(),
                MonthKey::from_date(segment.start_date).month_name(),
                segment.start_date.year(),
                segment.end_date.day(),
                MonthKey::from_date(segment.end_date).month_name(),
                segment.end_date.year(),
            );
            drafts.entry(key).or_default().push(BillItemDraft {
                description,
                amount: segment.total_fee,
                month_key: key,
            });
        }

        drafts
    }

    /// Description for a newly created bill covering the keyed month.
    #[must_use]
    pub fn bill_description(key: MonthKey) -> String {
        format!("Tagihan untuk Bulan {} {}", key.month_name(), key.year)
    }

    /// Due date for a bill covering the keyed month (its last calendar day).
    #[must_use]
    pub fn bill_due_date(key: MonthKey) -> chrono::NaiveDate {
        key.last_day()
    }
}
