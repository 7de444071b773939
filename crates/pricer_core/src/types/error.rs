//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from lattice construction and valuation
//! - `DateError`: Errors from date construction and parsing

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every failure aborts the pricing call it occurred in. No variant is ever
/// replaced by a NaN or zero price.
///
/// # Variants
/// - `InvalidConfiguration`: Lattice configuration rejected (e.g. zero steps)
/// - `DegenerateLattice`: Up and down factors collapse, or the up-move
///   probability is unusable
/// - `MalformedInput`: Caller-side data could not be interpreted
/// - `InvalidInput`: Option parameters outside their valid range
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidConfiguration("steps must be >= 1 but was 0".to_string());
/// assert_eq!(format!("{}", err), "Invalid configuration: steps must be >= 1 but was 0");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Lattice configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Lattice collapsed or produced an unusable up-move probability.
    #[error("Degenerate lattice: {0}")]
    DegenerateLattice(String),

    /// Caller-side data (option codes, dates) could not be interpreted.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Option parameters outside their valid range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PricingError {
    /// Returns whether the error was raised while building the lattice.
    #[inline]
    pub fn is_lattice_error(&self) -> bool {
        matches!(
            self,
            PricingError::InvalidConfiguration(_) | PricingError::DegenerateLattice(_)
        )
    }
}

/// Date-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),
}

impl From<DateError> for PricingError {
    fn from(err: DateError) -> Self {
        PricingError::MalformedInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::DegenerateLattice("u == d".to_string());
        assert_eq!(format!("{}", err), "Degenerate lattice: u == d");

        let err = PricingError::MalformedInput("option type 'X'".to_string());
        assert_eq!(format!("{}", err), "Malformed input: option type 'X'");

        let err = PricingError::InvalidInput("spot must be positive".to_string());
        assert_eq!(format!("{}", err), "Invalid input: spot must be positive");
    }

    #[test]
    fn test_is_lattice_error() {
        assert!(PricingError::InvalidConfiguration(String::new()).is_lattice_error());
        assert!(PricingError::DegenerateLattice(String::new()).is_lattice_error());
        assert!(!PricingError::MalformedInput(String::new()).is_lattice_error());
        assert!(!PricingError::InvalidInput(String::new()).is_lattice_error());
    }

    #[test]
    fn test_date_error_into_pricing_error() {
        let err: PricingError = DateError::ParseError("blank".to_string()).into();
        assert_eq!(
            err,
            PricingError::MalformedInput("Date parse error: blank".to_string())
        );
    }

    #[test]
    fn test_error_trait_object() {
        let err: Box<dyn std::error::Error> =
            Box::new(PricingError::InvalidConfiguration("steps".to_string()));
        assert!(err.to_string().contains("steps"));
    }
}
