//! # Pricer Models (L2: Business Logic)
//!
//! Inputs to the binomial lattice pricer.
//!
//! This crate provides:
//! - Option parameter records (spot, strike, expiry, volatility, rate, kind)
//! - Call/put option kinds with intrinsic value
//! - Discrete cash dividend schedules, including conversion from dated
//!   historical dividends
//!
//! ## Design Principles
//!
//! - **Validated construction**: every record is checked once when built and
//!   is immutable afterwards
//! - **Years from valuation**: all times are year fractions measured from the
//!   valuation date

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod instruments;
