//! # pricer_core: Foundation Types for Lattice Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Error types: `PricingError`, `DateError` (`types::error`)
//! - Time types: `Date`, `DayCountConvention` (`types::time`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - chrono: Date arithmetic
//! - thiserror: Error derives
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{Date, DayCountConvention};
//!
//! // Quote date to expiration, measured on the 364-day year
//! let quote = Date::from_ymd(2021, 1, 4).unwrap();
//! let expiry = Date::from_ymd(2021, 3, 19).unwrap();
//! let years = DayCountConvention::Actual364.year_fraction_dates(quote, expiry);
//! assert!((years - 74.0 / 364.0).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `Date`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod types;
