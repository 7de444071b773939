//! Instrument error types.
//!
//! This module provides structured error handling for option parameter,
//! option type and dividend construction.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `InvalidSpot`: Spot price is non-positive or not finite
/// - `InvalidStrike`: Strike price is non-positive or not finite
/// - `InvalidExpiry`: Time to expiry is non-positive or not finite
/// - `InvalidVolatility`: Volatility is negative or not finite
/// - `InvalidRate`: Interest rate is not finite
/// - `InvalidDividend`: Dividend time or amount is negative or not finite
/// - `UnknownOptionType`: Option type code could not be parsed
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid spot price.
    #[error("Invalid spot: S = {spot}")]
    InvalidSpot {
        /// The invalid spot value
        spot: f64,
    },

    /// Invalid strike price.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid time to expiry.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Invalid volatility.
    #[error("Invalid volatility: sigma = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid interest rate.
    #[error("Invalid interest rate: r = {rate}")]
    InvalidRate {
        /// The invalid rate value
        rate: f64,
    },

    /// Invalid dividend entry.
    #[error("Invalid dividend: time = {time}, amount = {amount}")]
    InvalidDividend {
        /// Payment time in years
        time: f64,
        /// Cash amount
        amount: f64,
    },

    /// Unparseable option type code.
    #[error("Unable to parse '{code}' into put or call")]
    UnknownOptionType {
        /// The code that failed to parse
        code: String,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        match err {
            InstrumentError::UnknownOptionType { .. } => {
                PricingError::MalformedInput(err.to_string())
            }
            other => PricingError::InvalidInput(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_strike_display() {
        let err = InstrumentError::InvalidStrike { strike: -100.0 };
        assert_eq!(format!("{}", err), "Invalid strike: K = -100");
    }

    #[test]
    fn test_invalid_dividend_display() {
        let err = InstrumentError::InvalidDividend {
            time: -0.5,
            amount: 1.2,
        };
        assert_eq!(
            format!("{}", err),
            "Invalid dividend: time = -0.5, amount = 1.2"
        );
    }

    #[test]
    fn test_unknown_option_type_is_malformed_input() {
        let err: PricingError = InstrumentError::UnknownOptionType {
            code: "X".to_string(),
        }
        .into();
        assert_eq!(
            err,
            PricingError::MalformedInput("Unable to parse 'X' into put or call".to_string())
        );
    }

    #[test]
    fn test_range_errors_are_invalid_input() {
        let err: PricingError = InstrumentError::InvalidVolatility { volatility: -0.2 }.into();
        assert_eq!(
            err,
            PricingError::InvalidInput("Invalid volatility: sigma = -0.2".to_string())
        );
    }
}
