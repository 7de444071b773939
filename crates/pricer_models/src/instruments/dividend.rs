//! Discrete cash dividends.
//!
//! A [`Dividend`] is an absolute cash amount paid at a time measured in years
//! from the valuation date. A [`DividendSchedule`] keeps dividends in the
//! order they were supplied; the lattice asks it for the dividend paid inside
//! each time step.

use pricer_core::types::{year_fraction_364, Date};

use super::error::InstrumentError;

/// A single cash dividend.
///
/// # Examples
/// ```
/// use pricer_models::instruments::Dividend;
///
/// let div = Dividend::new(0.25, 1.428).unwrap();
/// assert_eq!(div.time(), 0.25);
/// assert_eq!(div.amount(), 1.428);
///
/// assert!(Dividend::new(-0.1, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDividend"))]
pub struct Dividend {
    time: f64,
    amount: f64,
}

impl Dividend {
    /// Creates a dividend paid `time` years from valuation.
    ///
    /// Both `time` and `amount` must be finite and non-negative.
    pub fn new(time: f64, amount: f64) -> Result<Self, InstrumentError> {
        if !(time.is_finite() && time >= 0.0 && amount.is_finite() && amount >= 0.0) {
            return Err(InstrumentError::InvalidDividend { time, amount });
        }
        Ok(Self { time, amount })
    }

    /// Payment time in years from valuation.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Cash amount (currency units, not a yield).
    #[inline]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Returns whether the payment falls in the step `(start, end]`.
    #[inline]
    pub fn is_paid_within(&self, start: f64, end: f64) -> bool {
        start < self.time && self.time <= end
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawDividend {
    time: f64,
    amount: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDividend> for Dividend {
    type Error = InstrumentError;

    fn try_from(raw: RawDividend) -> Result<Self, Self::Error> {
        Dividend::new(raw.time, raw.amount)
    }
}

/// A dividend identified by its ex-dividend date.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoricalDividend {
    /// Ex-dividend (effective) date.
    pub ex_date: Date,
    /// Cash amount.
    pub amount: f64,
}

impl HistoricalDividend {
    /// Creates a dated dividend.
    pub fn new(ex_date: Date, amount: f64) -> Self {
        Self { ex_date, amount }
    }
}

/// Ordered collection of cash dividends.
///
/// Order is significant: when several dividends fall inside one lattice step
/// only the first one in schedule order is applied. Schedules spaced more
/// finely than the lattice step therefore lose data; price such schedules
/// with more steps.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{Dividend, DividendSchedule};
///
/// let schedule: DividendSchedule = vec![
///     Dividend::new(0.30, 2.0).unwrap(),
///     Dividend::new(0.40, 5.0).unwrap(),
/// ]
/// .into_iter()
/// .collect();
///
/// // Both fall in (0.25, 0.5]; the first listed wins.
/// assert_eq!(schedule.first_in_step(0.25, 0.5).unwrap().amount(), 2.0);
/// assert!(schedule.first_in_step(0.5, 0.75).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DividendSchedule {
    dividends: Vec<Dividend>,
}

impl DividendSchedule {
    /// Creates a schedule, keeping the supplied order.
    pub fn new(dividends: Vec<Dividend>) -> Self {
        Self { dividends }
    }

    /// Creates an empty schedule.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Converts dated dividends into a schedule relative to `valuation_date`.
    ///
    /// Times use the 364-day year. Dividends whose ex-date precedes the
    /// valuation date cannot fall inside any lattice step and are dropped.
    ///
    /// # Errors
    /// `InstrumentError::InvalidDividend` if an amount is negative or not
    /// finite.
    ///
    /// ```
    /// use pricer_core::types::Date;
    /// use pricer_models::instruments::{DividendSchedule, HistoricalDividend};
    ///
    /// let history = [
    ///     HistoricalDividend::new(Date::from_ymd(2021, 9, 17).unwrap(), 1.428),
    ///     HistoricalDividend::new(Date::from_ymd(2021, 6, 18).unwrap(), 1.376),
    /// ];
    /// let quote_date = Date::from_ymd(2021, 7, 2).unwrap();
    ///
    /// let schedule = DividendSchedule::from_historical(&history, quote_date).unwrap();
    /// assert_eq!(schedule.len(), 1);
    /// assert!((schedule.dividends()[0].time() - 77.0 / 364.0).abs() < 1e-12);
    /// ```
    pub fn from_historical(
        history: &[HistoricalDividend],
        valuation_date: Date,
    ) -> Result<Self, InstrumentError> {
        let mut dividends = Vec::with_capacity(history.len());
        for entry in history {
            let time = year_fraction_364(valuation_date, entry.ex_date);
            if time < 0.0 {
                continue;
            }
            dividends.push(Dividend::new(time, entry.amount)?);
        }
        Ok(Self { dividends })
    }

    /// The dividends in schedule order.
    #[inline]
    pub fn dividends(&self) -> &[Dividend] {
        &self.dividends
    }

    /// Iterates over the dividends in schedule order.
    pub fn iter(&self) -> std::slice::Iter<'_, Dividend> {
        self.dividends.iter()
    }

    /// Number of dividends.
    #[inline]
    pub fn len(&self) -> usize {
        self.dividends.len()
    }

    /// Returns whether the schedule is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dividends.is_empty()
    }

    /// First dividend in schedule order paid in `(start, end]`.
    pub fn first_in_step(&self, start: f64, end: f64) -> Option<&Dividend> {
        self.dividends.iter().find(|d| d.is_paid_within(start, end))
    }

    /// Cash amount paid in `(start, end]`, zero when nothing is paid.
    #[inline]
    pub fn amount_in_step(&self, start: f64, end: f64) -> f64 {
        self.first_in_step(start, end)
            .map(Dividend::amount)
            .unwrap_or(0.0)
    }
}

impl FromIterator<Dividend> for DividendSchedule {
    fn from_iter<I: IntoIterator<Item = Dividend>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DividendSchedule {
    type Item = &'a Dividend;
    type IntoIter = std::slice::Iter<'a, Dividend>;

    fn into_iter(self) -> Self::IntoIter {
        self.dividends.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_dividend_validation() {
        assert!(Dividend::new(0.0, 0.0).is_ok());
        assert!(matches!(
            Dividend::new(0.5, -1.0),
            Err(InstrumentError::InvalidDividend { .. })
        ));
        assert!(Dividend::new(f64::NAN, 1.0).is_err());
        assert!(Dividend::new(0.5, f64::INFINITY).is_err());
    }

    #[test]
    fn test_step_interval_is_open_closed() {
        let div = Dividend::new(0.5, 1.0).unwrap();
        assert!(div.is_paid_within(0.25, 0.5));
        assert!(!div.is_paid_within(0.5, 0.75));

        // A dividend at time zero is never inside a step.
        let at_zero = Dividend::new(0.0, 1.0).unwrap();
        assert!(!at_zero.is_paid_within(0.0, 0.25));
    }

    #[test]
    fn test_first_in_step_uses_schedule_order() {
        let late_first = DividendSchedule::new(vec![
            Dividend::new(0.4, 5.0).unwrap(),
            Dividend::new(0.3, 2.0).unwrap(),
        ]);
        assert_relative_eq!(late_first.amount_in_step(0.25, 0.5), 5.0);

        let early_first = DividendSchedule::new(vec![
            Dividend::new(0.3, 2.0).unwrap(),
            Dividend::new(0.4, 5.0).unwrap(),
        ]);
        assert_relative_eq!(early_first.amount_in_step(0.25, 0.5), 2.0);
    }

    #[test]
    fn test_amount_in_step_defaults_to_zero() {
        let schedule = DividendSchedule::empty();
        assert!(schedule.is_empty());
        assert_eq!(schedule.amount_in_step(0.0, 1.0), 0.0);
    }

    #[test]
    fn test_from_historical_drops_past_dividends() {
        let history = [
            HistoricalDividend::new(date(2021, 9, 17), 1.428),
            HistoricalDividend::new(date(2021, 6, 18), 1.376),
            HistoricalDividend::new(date(2021, 3, 19), 1.278),
        ];
        let schedule = DividendSchedule::from_historical(&history, date(2021, 3, 19)).unwrap();

        // Same-day dividend sits at t = 0 and is kept, but never applied.
        assert_eq!(schedule.len(), 3);
        let times: Vec<f64> = schedule.iter().map(Dividend::time).collect();
        assert_relative_eq!(times[0], 182.0 / 364.0, epsilon = 1e-12);
        assert_relative_eq!(times[1], 91.0 / 364.0, epsilon = 1e-12);
        assert_relative_eq!(times[2], 0.0);

        let later = DividendSchedule::from_historical(&history, date(2021, 6, 19)).unwrap();
        assert_eq!(later.len(), 1);
        assert_relative_eq!(later.dividends()[0].amount(), 1.428);
    }

    #[test]
    fn test_from_historical_rejects_negative_amount() {
        let history = [HistoricalDividend::new(date(2021, 9, 17), -1.0)];
        let result = DividendSchedule::from_historical(&history, date(2021, 1, 4));
        assert!(matches!(
            result,
            Err(InstrumentError::InvalidDividend { .. })
        ));
    }

    #[test]
    fn test_collect_and_iterate() {
        let schedule: DividendSchedule = [(0.1, 1.0), (0.6, 1.1)]
            .into_iter()
            .map(|(t, a)| Dividend::new(t, a).unwrap())
            .collect();
        let total: f64 = (&schedule).into_iter().map(Dividend::amount).sum();
        assert_relative_eq!(total, 2.1);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// Step bounds built the way the lattice builds them, by adding `dt`.
        fn accumulated_grid(steps: usize) -> Vec<f64> {
            let dt = 1.0 / steps as f64;
            let mut grid = Vec::with_capacity(steps + 1);
            let mut t = 0.0;
            grid.push(t);
            for _ in 0..steps {
                t += dt;
                grid.push(t);
            }
            grid
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_paid_in_exactly_one_step(steps in 1usize..60, time in 0.001f64..0.999) {
                let dividend = Dividend::new(time, 1.0).unwrap();
                let grid = accumulated_grid(steps);
                let hits = grid
                    .windows(2)
                    .filter(|w| dividend.is_paid_within(w[0], w[1]))
                    .count();
                prop_assert_eq!(hits, 1);
            }

            #[test]
            fn test_time_zero_never_paid(start in 0.0f64..1.0, width in 0.0f64..1.0) {
                let dividend = Dividend::new(0.0, 2.5).unwrap();
                prop_assert!(!dividend.is_paid_within(start, start + width));
            }

            #[test]
            fn test_amount_in_step_is_first_match(
                entries in prop::collection::vec((0.0f64..1.0, 0.0f64..5.0), 0..6),
                start in 0.0f64..1.0,
                width in 0.01f64..0.5,
            ) {
                let schedule: DividendSchedule = entries
                    .iter()
                    .map(|&(t, a)| Dividend::new(t, a).unwrap())
                    .collect();
                let end = start + width;
                let amount = schedule.amount_in_step(start, end);
                prop_assert!(amount >= 0.0);

                match schedule.iter().position(|d| d.is_paid_within(start, end)) {
                    Some(i) => prop_assert_eq!(amount, schedule.dividends()[i].amount()),
                    None => prop_assert_eq!(amount, 0.0),
                }
            }
        }
    }
}
