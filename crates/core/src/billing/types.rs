//! Billing domain types.
//!
//! Periods are inclusive-end date intervals. A `StayPeriod` carries a daily
//! fee (extra-guest stays are billed per day); a `BookingPeriod` carries a
//! monthly fee that gets prorated for partial months.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calendar::{days_inclusive, last_day_of_month, month_name};
use super::error::BillingError;

/// A guest stay billed at a daily rate.
///
/// Inclusive on both ends: a stay with `start_date == end_date` is one
/// billable day. Construction rejects inverted ranges, so every held value
/// satisfies `start_date <= end_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayPeriod {
    start_date: NaiveDate,
    end_date: NaiveDate,
    daily_fee: Decimal,
}

impl StayPeriod {
    /// Creates a stay period.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvalidRange` if `end_date < start_date`.
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        daily_fee: Decimal,
    ) -> Result<Self, BillingError> {
        if end_date < start_date {
            return Err(BillingError::InvalidRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
            daily_fee,
        })
    }

    /// First day of the stay.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of the stay (inclusive).
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Fee charged per occupied day.
    #[must_use]
    pub fn daily_fee(&self) -> Decimal {
        self.daily_fee
    }

    /// Total inclusive day count of the stay.
    #[must_use]
    pub fn total_days(&self) -> i64 {
        days_inclusive(self.start_date, self.end_date)
    }
}

/// A room booking billed at a monthly rate.
///
/// Full calendar months are billed at `monthly_fee`; partial first/last
/// months are prorated by day count over the month's length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPeriod {
    start_date: NaiveDate,
    end_date: NaiveDate,
    monthly_fee: Decimal,
}

impl BookingPeriod {
    /// Creates a booking period.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvalidRange` if `end_date < start_date`.
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        monthly_fee: Decimal,
    ) -> Result<Self, BillingError> {
        if end_date < start_date {
            return Err(BillingError::InvalidRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
            monthly_fee,
        })
    }

    /// First day of the booking.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of the booking (inclusive).
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Fee charged per full calendar month.
    #[must_use]
    pub fn monthly_fee(&self) -> Decimal {
        self.monthly_fee
    }
}

/// One calendar-month slice of a stay or booking.
///
/// Never crosses a month boundary; for a given period, segments are
/// contiguous, non-overlapping, and cover the period exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSegment {
    /// First day of the segment.
    pub start_date: NaiveDate,
    /// Last day of the segment (inclusive).
    pub end_date: NaiveDate,
    /// The originating period's daily fee (derived for bookings).
    pub daily_fee: Decimal,
    /// Fee for this segment.
    pub total_fee: Decimal,
}

impl MonthSegment {
    /// Inclusive day count of the segment.
    #[must_use]
    pub fn days(&self) -> i64 {
        days_inclusive(self.start_date, self.end_date)
    }

    /// The month key this segment bills under.
    #[must_use]
    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.start_date)
    }

    /// True if the segment spans its entire calendar month.
    #[must_use]
    pub fn is_full_month(&self) -> bool {
        self.start_date.day() == 1 && self.end_date == last_day_of_month(self.start_date)
    }
}

/// Composite `(year, zero-based month)` billing key.
///
/// Replaces the legacy `"<year>-<month0>"` string key; `Display` still
/// renders that form for logs. Derivable from any due date and never
/// persisted verbatim.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MonthKey {
    /// Calendar year.
    pub year: i32,
    /// Zero-based month index (January = 0).
    pub month0: u32,
}

impl MonthKey {
    /// Derives the key from any date inside the month.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    /// First day of the keyed month.
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1)
            .expect("month key always names a valid month")
    }

    /// Last day of the keyed month; bills for this month fall due here.
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        last_day_of_month(self.first_day())
    }

    /// Indonesian name of the keyed month.
    #[must_use]
    pub fn month_name(&self) -> &'static str {
        month_name(self.month0 + 1)
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.year, self.month0)
    }
}

/// A billable line item awaiting persistence.
///
/// Several drafts can share a month key (room fee, extra-guest fee, and
/// deposit can all land on the same bill).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillItemDraft {
    /// Human-readable Indonesian description.
    pub description: String,
    /// Amount billed by this item.
    pub amount: Decimal,
    /// Month the item bills under.
    pub month_key: MonthKey,
}
