//! Calendar-month segmentation and bill-item generation.
//!
//! This module implements the billing half of the core:
//! - Splitting a date-bounded stay or booking into calendar-month segments
//! - Prorating fees for partial months
//! - Turning segments into bill-item drafts keyed by `(year, month)`
//! - Fixed Indonesian description templates for bills and line items

pub mod calendar;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use calendar::{days_inclusive, first_of_next_month, last_day_of_month, month_name};
pub use error::BillingError;
pub use service::BillingService;
pub use types::{BillItemDraft, BookingPeriod, MonthKey, MonthSegment, StayPeriod};
