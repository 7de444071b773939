//! Core time and error types.
//!
//! This module provides:
//! - `time`: `Date` and `DayCountConvention` for turning calendar dates into year fractions
//! - `error`: Structured error types for pricing and date operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`], [`DayCountConvention`], [`year_fraction_364`] from `time`
//! - [`PricingError`], [`DateError`] from `error`

pub mod error;
pub mod time;

// Re-export commonly used types at module level
pub use error::{DateError, PricingError};
pub use time::{year_fraction_364, Date, DayCountConvention};
