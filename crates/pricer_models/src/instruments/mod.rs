//! Option instrument definitions.
//!
//! # Instrument Types
//!
//! - [`OptionParameters`]: immutable description of a single option
//! - [`OptionType`]: call or put, with intrinsic value
//! - [`Dividend`], [`DividendSchedule`]: discrete cash dividends in years
//!   from the valuation date
//! - [`HistoricalDividend`]: a dated dividend, converted into a
//!   [`Dividend`] relative to a valuation date
//! - [`OptionQuote`]: a dated market quote, convertible into
//!   [`OptionParameters`]
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{Dividend, DividendSchedule, OptionParameters, OptionType};
//!
//! let params = OptionParameters::new(100.0, 95.0, 0.5, 0.25, 0.012, OptionType::Put).unwrap();
//! assert_eq!(params.intrinsic(90.0), 5.0);
//!
//! let schedule = DividendSchedule::new(vec![Dividend::new(0.2, 1.4).unwrap()]);
//! assert_eq!(schedule.first_in_step(0.1, 0.25).map(|d| d.amount()), Some(1.4));
//! ```

mod dividend;
mod error;
mod option_type;
mod params;
mod quote;

// Re-export all public types
pub use dividend::{Dividend, DividendSchedule, HistoricalDividend};
pub use error::InstrumentError;
pub use option_type::OptionType;
pub use params::OptionParameters;
pub use quote::OptionQuote;
