//! Named pricing methods.
//!
//! A [`PricingMethod`] bundles a lattice configuration under a label so that
//! several configurations can be run side by side over the same options.
//!
//! # Available Methods
//!
//! - [`BinomialMethod`]: one lattice with a fixed step count
//! - [`AveragedBinomialMethod`]: mean of two lattices at `n` and `n + 1`
//!   steps, which damps the odd/even oscillation of binomial prices

use pricer_core::types::PricingError;
use pricer_models::instruments::{
    DividendSchedule, HistoricalDividend, OptionParameters, OptionQuote,
};

use crate::american::american;
use crate::lattice::{ExerciseRule, LatticeConfig, ProbabilityPolicy};

/// Step count used by [`BinomialMethod::default`].
pub const DEFAULT_STEPS: usize = 11;

/// Interest rate used when pricing quotes, which carry no rate of their own.
pub const DEFAULT_INTEREST_RATE: f64 = 0.012;

/// A labelled way of pricing an option.
pub trait PricingMethod: Send + Sync {
    /// Human-readable label, stable across runs.
    fn name(&self) -> String;

    /// Prices `option` under `dividends`.
    fn price(
        &self,
        option: &OptionParameters,
        dividends: &DividendSchedule,
    ) -> Result<f64, PricingError>;

    /// Prices a market quote against a dated dividend history.
    ///
    /// The quote is converted at [`DEFAULT_INTEREST_RATE`]; methods with a
    /// rate override replace it in [`price`](Self::price).
    fn price_quote(
        &self,
        quote: &OptionQuote,
        history: &[HistoricalDividend],
    ) -> Result<f64, PricingError> {
        let option = quote.parameters(DEFAULT_INTEREST_RATE)?;
        let dividends = quote.dividends(history)?;
        self.price(&option, &dividends)
    }
}

/// Single binomial lattice.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{DividendSchedule, OptionParameters, OptionType};
/// use pricer_pricing::methods::{BinomialMethod, PricingMethod};
///
/// let method = BinomialMethod::new(11);
/// assert_eq!(method.name(), "binomial (periods: 11)");
///
/// let option = OptionParameters::new(100.0, 100.0, 1.0, 0.2, 0.012, OptionType::Call).unwrap();
/// let price = method.price(&option, &DividendSchedule::empty()).unwrap();
/// assert!((price - 8.6788).abs() < 1e-4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BinomialMethod {
    steps: usize,
    interest_rate: Option<f64>,
    exercise: ExerciseRule,
    probability: ProbabilityPolicy,
}

impl BinomialMethod {
    /// Creates a method with `steps` periods and default policies.
    pub fn new(steps: usize) -> Self {
        Self {
            steps,
            interest_rate: None,
            exercise: ExerciseRule::default(),
            probability: ProbabilityPolicy::default(),
        }
    }

    /// Replaces every option's rate with `rate` before pricing.
    pub fn with_interest_rate(mut self, rate: f64) -> Self {
        self.interest_rate = Some(rate);
        self
    }

    /// Sets the early-exercise rule.
    pub fn with_exercise(mut self, exercise: ExerciseRule) -> Self {
        self.exercise = exercise;
        self
    }

    /// Sets the probability policy.
    pub fn with_probability(mut self, probability: ProbabilityPolicy) -> Self {
        self.probability = probability;
        self
    }

    /// Number of periods.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Rate override, if any.
    #[inline]
    pub fn interest_rate(&self) -> Option<f64> {
        self.interest_rate
    }

    fn lattice_config(&self, dividends: &DividendSchedule) -> LatticeConfig {
        LatticeConfig::new(self.steps, dividends.clone())
            .with_exercise(self.exercise)
            .with_probability(self.probability)
    }
}

impl Default for BinomialMethod {
    fn default() -> Self {
        Self::new(DEFAULT_STEPS)
    }
}

impl PricingMethod for BinomialMethod {
    fn name(&self) -> String {
        format!("binomial (periods: {})", self.steps)
    }

    fn price(
        &self,
        option: &OptionParameters,
        dividends: &DividendSchedule,
    ) -> Result<f64, PricingError> {
        let option = match self.interest_rate {
            Some(rate) => option.with_rate(rate)?,
            None => *option,
        };
        american(&option, &self.lattice_config(dividends))
    }
}

/// Mean of two binomial lattices with `steps` and `steps + 1` periods.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::methods::{AveragedBinomialMethod, PricingMethod};
///
/// let method = AveragedBinomialMethod::new(11).with_interest_rate(0.012);
/// assert_eq!(method.name(), "avg 2 binomials (p=11, i=0.012)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AveragedBinomialMethod {
    lower: BinomialMethod,
    upper: BinomialMethod,
}

impl AveragedBinomialMethod {
    /// Creates a method averaging `steps` and `steps + 1` periods.
    pub fn new(steps: usize) -> Self {
        Self {
            lower: BinomialMethod::new(steps),
            upper: BinomialMethod::new(steps + 1),
        }
    }

    /// Replaces every option's rate with `rate` before pricing.
    pub fn with_interest_rate(self, rate: f64) -> Self {
        Self {
            lower: self.lower.with_interest_rate(rate),
            upper: self.upper.with_interest_rate(rate),
        }
    }

    /// Sets the early-exercise rule on both lattices.
    pub fn with_exercise(self, exercise: ExerciseRule) -> Self {
        Self {
            lower: self.lower.with_exercise(exercise),
            upper: self.upper.with_exercise(exercise),
        }
    }

    /// Sets the probability policy on both lattices.
    pub fn with_probability(self, probability: ProbabilityPolicy) -> Self {
        Self {
            lower: self.lower.with_probability(probability),
            upper: self.upper.with_probability(probability),
        }
    }

    /// Smaller of the two step counts.
    #[inline]
    pub fn steps(&self) -> usize {
        self.lower.steps()
    }
}

impl Default for AveragedBinomialMethod {
    fn default() -> Self {
        Self::new(DEFAULT_STEPS)
    }
}

impl PricingMethod for AveragedBinomialMethod {
    fn name(&self) -> String {
        match self.lower.interest_rate() {
            Some(rate) => format!("avg 2 binomials (p={}, i={})", self.steps(), rate),
            None => format!("avg 2 binomials (p={})", self.steps()),
        }
    }

    fn price(
        &self,
        option: &OptionParameters,
        dividends: &DividendSchedule,
    ) -> Result<f64, PricingError> {
        let lower = self.lower.price(option, dividends)?;
        let upper = self.upper.price(option, dividends)?;
        Ok((lower + upper) / 2.0)
    }
}
