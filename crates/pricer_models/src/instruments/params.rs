//! Option parameter record.
//!
//! This module provides the immutable, validated description of a single
//! option that the lattice pricer consumes.

use super::error::InstrumentError;
use super::option_type::OptionType;

/// Parameters of a single option.
///
/// Times are in years from the valuation date; volatility and rate are
/// annualised. All values are validated at construction:
/// spot, strike and expiry must be positive, volatility non-negative, and
/// every value finite.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionParameters, OptionType};
///
/// let params = OptionParameters::new(100.0, 100.0, 1.0, 0.2, 0.012, OptionType::Call).unwrap();
/// assert_eq!(params.spot(), 100.0);
/// assert_eq!(params.option_type(), OptionType::Call);
///
/// // Negative strike is rejected
/// assert!(OptionParameters::new(100.0, -1.0, 1.0, 0.2, 0.012, OptionType::Call).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawOptionParameters"))]
pub struct OptionParameters {
    spot: f64,
    strike: f64,
    expiry: f64,
    volatility: f64,
    rate: f64,
    option_type: OptionType,
}

impl OptionParameters {
    /// Creates validated option parameters.
    ///
    /// # Arguments
    /// * `spot` - Underlying price (must be positive)
    /// * `strike` - Strike price (must be positive)
    /// * `expiry` - Time to expiration in years (must be positive)
    /// * `volatility` - Annualised volatility (must be non-negative)
    /// * `rate` - Annualised risk-free rate (any finite value)
    /// * `option_type` - Call or put
    pub fn new(
        spot: f64,
        strike: f64,
        expiry: f64,
        volatility: f64,
        rate: f64,
        option_type: OptionType,
    ) -> Result<Self, InstrumentError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(InstrumentError::InvalidSpot { spot });
        }
        if !(strike.is_finite() && strike > 0.0) {
            return Err(InstrumentError::InvalidStrike { strike });
        }
        if !(expiry.is_finite() && expiry > 0.0) {
            return Err(InstrumentError::InvalidExpiry { expiry });
        }
        if !(volatility.is_finite() && volatility >= 0.0) {
            return Err(InstrumentError::InvalidVolatility { volatility });
        }
        if !rate.is_finite() {
            return Err(InstrumentError::InvalidRate { rate });
        }

        Ok(Self {
            spot,
            strike,
            expiry,
            volatility,
            rate,
            option_type,
        })
    }

    /// Returns the underlying spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the time to expiration in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Returns the annualised volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the annualised risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the option kind.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Immediate exercise value at `spot`.
    #[inline]
    pub fn intrinsic(&self, spot: f64) -> f64 {
        self.option_type.intrinsic(spot, self.strike)
    }

    /// Copy of these parameters with a different risk-free rate.
    ///
    /// Pricing methods that pin the rate (instead of taking it from the
    /// quote) go through here.
    pub fn with_rate(&self, rate: f64) -> Result<Self, InstrumentError> {
        Self::new(
            self.spot,
            self.strike,
            self.expiry,
            self.volatility,
            rate,
            self.option_type,
        )
    }

    /// Copy of these parameters with a different spot price.
    pub fn with_spot(&self, spot: f64) -> Result<Self, InstrumentError> {
        Self::new(
            spot,
            self.strike,
            self.expiry,
            self.volatility,
            self.rate,
            self.option_type,
        )
    }

    /// Copy of these parameters with a different strike price.
    pub fn with_strike(&self, strike: f64) -> Result<Self, InstrumentError> {
        Self::new(
            self.spot,
            strike,
            self.expiry,
            self.volatility,
            self.rate,
            self.option_type,
        )
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawOptionParameters {
    spot: f64,
    strike: f64,
    expiry: f64,
    volatility: f64,
    rate: f64,
    option_type: OptionType,
}

#[cfg(feature = "serde")]
impl TryFrom<RawOptionParameters> for OptionParameters {
    type Error = InstrumentError;

    fn try_from(raw: RawOptionParameters) -> Result<Self, Self::Error> {
        OptionParameters::new(
            raw.spot,
            raw.strike,
            raw.expiry,
            raw.volatility,
            raw.rate,
            raw.option_type,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call() -> OptionParameters {
        OptionParameters::new(100.0, 100.0, 1.0, 0.2, 0.012, OptionType::Call).unwrap()
    }

    #[test]
    fn test_new_valid_params() {
        let params = call();
        assert_eq!(params.spot(), 100.0);
        assert_eq!(params.strike(), 100.0);
        assert_eq!(params.expiry(), 1.0);
        assert_eq!(params.volatility(), 0.2);
        assert_eq!(params.rate(), 0.012);
        assert_eq!(params.option_type(), OptionType::Call);
    }

    #[test]
    fn test_new_invalid_spot() {
        let result = OptionParameters::new(0.0, 100.0, 1.0, 0.2, 0.012, OptionType::Call);
        assert!(matches!(result, Err(InstrumentError::InvalidSpot { .. })));
    }

    #[test]
    fn test_new_invalid_strike_negative() {
        let result = OptionParameters::new(100.0, -100.0, 1.0, 0.2, 0.012, OptionType::Put);
        match result {
            Err(InstrumentError::InvalidStrike { strike }) => assert_eq!(strike, -100.0),
            _ => panic!("Expected InvalidStrike error"),
        }
    }

    #[test]
    fn test_new_invalid_expiry_zero() {
        let result = OptionParameters::new(100.0, 100.0, 0.0, 0.2, 0.012, OptionType::Call);
        assert!(matches!(result, Err(InstrumentError::InvalidExpiry { .. })));
    }

    #[test]
    fn test_zero_volatility_is_accepted() {
        // Rejected later by the lattice builder, not here.
        assert!(OptionParameters::new(100.0, 100.0, 1.0, 0.0, 0.012, OptionType::Call).is_ok());
    }

    #[test]
    fn test_new_invalid_volatility_negative() {
        let result = OptionParameters::new(100.0, 100.0, 1.0, -0.1, 0.012, OptionType::Call);
        assert!(matches!(
            result,
            Err(InstrumentError::InvalidVolatility { .. })
        ));
    }

    #[test]
    fn test_negative_rate_is_accepted() {
        assert!(OptionParameters::new(100.0, 100.0, 1.0, 0.2, -0.005, OptionType::Put).is_ok());
    }

    #[test]
    fn test_non_finite_values_rejected() {
        assert!(OptionParameters::new(f64::NAN, 100.0, 1.0, 0.2, 0.0, OptionType::Call).is_err());
        assert!(
            OptionParameters::new(100.0, f64::INFINITY, 1.0, 0.2, 0.0, OptionType::Call).is_err()
        );
        assert!(matches!(
            OptionParameters::new(100.0, 100.0, 1.0, 0.2, f64::NAN, OptionType::Call),
            Err(InstrumentError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_with_rate_keeps_other_fields() {
        let params = call().with_rate(0.015).unwrap();
        assert_eq!(params.rate(), 0.015);
        assert_eq!(params.spot(), 100.0);
        assert_eq!(params.option_type(), OptionType::Call);
    }

    #[test]
    fn test_with_spot_and_strike_validate() {
        assert_eq!(call().with_spot(105.0).unwrap().spot(), 105.0);
        assert_eq!(call().with_strike(95.0).unwrap().strike(), 95.0);
        assert!(call().with_spot(-1.0).is_err());
        assert!(call().with_strike(0.0).is_err());
    }

    #[test]
    fn test_intrinsic_uses_kind() {
        let put = OptionParameters::new(100.0, 110.0, 1.0, 0.2, 0.0, OptionType::Put).unwrap();
        assert_eq!(put.intrinsic(100.0), 10.0);
        assert_eq!(call().intrinsic(120.0), 20.0);
    }
}
