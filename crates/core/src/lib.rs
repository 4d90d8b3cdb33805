//! Core billing logic for Pondok.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here; the persistence layer executes the plans this crate produces inside
//! its own transactions.
//!
//! # Modules
//!
//! - `billing` - Calendar-month segmentation, fee proration, bill-item drafts
//! - `payment` - Payment-to-bill allocation, deposit-first split, ledger
//!   transaction planning

pub mod billing;
pub mod payment;
