//! Dated market quote for a listed option.

use pricer_core::types::{year_fraction_364, Date};

use super::dividend::{DividendSchedule, HistoricalDividend};
use super::error::InstrumentError;
use super::option_type::OptionType;
use super::params::OptionParameters;

/// One observed option quote.
///
/// Carries calendar dates and the underlying's bid/ask rather than year
/// fractions and a single spot; [`OptionQuote::parameters`] converts it into
/// the pricer's input.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionQuote {
    /// Date the quote was observed (valuation date).
    pub quote_date: Date,
    /// Expiration date.
    pub expiration: Date,
    /// Strike price.
    pub strike: f64,
    /// Underlying bid.
    pub underlying_bid: f64,
    /// Underlying ask.
    pub underlying_ask: f64,
    /// Quoted implied volatility.
    pub implied_volatility: f64,
    /// Call or put.
    pub option_type: OptionType,
}

impl OptionQuote {
    /// Mid price of the underlying.
    #[inline]
    pub fn underlying_mid(&self) -> f64 {
        (self.underlying_bid + self.underlying_ask) / 2.0
    }

    /// Years from quote date to expiration, ACT/364.
    #[inline]
    pub fn time_to_expiry(&self) -> f64 {
        year_fraction_364(self.quote_date, self.expiration)
    }

    /// Option parameters for this quote at the given `rate`.
    ///
    /// # Errors
    /// Any validation error from [`OptionParameters::new`]; a quote on or
    /// after its expiration yields `InstrumentError::InvalidExpiry`.
    ///
    /// ```
    /// use pricer_core::types::Date;
    /// use pricer_models::instruments::{OptionQuote, OptionType};
    ///
    /// let quote = OptionQuote {
    ///     quote_date: Date::from_ymd(2021, 3, 19).unwrap(),
    ///     expiration: Date::from_ymd(2021, 9, 17).unwrap(),
    ///     strike: 140.0,
    ///     underlying_bid: 137.9,
    ///     underlying_ask: 138.1,
    ///     implied_volatility: 0.22,
    ///     option_type: OptionType::Put,
    /// };
    ///
    /// let params = quote.parameters(0.012).unwrap();
    /// assert!((params.spot() - 138.0).abs() < 1e-12);
    /// assert_eq!(params.expiry(), 0.5);
    /// ```
    pub fn parameters(&self, rate: f64) -> Result<OptionParameters, InstrumentError> {
        OptionParameters::new(
            self.underlying_mid(),
            self.strike,
            self.time_to_expiry(),
            self.implied_volatility,
            rate,
            self.option_type,
        )
    }

    /// Dividend schedule for this quote, relative to its quote date.
    pub fn dividends(
        &self,
        history: &[HistoricalDividend],
    ) -> Result<DividendSchedule, InstrumentError> {
        DividendSchedule::from_historical(history, self.quote_date)
    }
}
