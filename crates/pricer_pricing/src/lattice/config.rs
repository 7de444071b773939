//! Lattice configuration.
//!
//! This module provides the step count, dividend schedule and valuation
//! policies for a single lattice, plus a builder that validates at build time.

use pricer_core::types::PricingError;
use pricer_models::instruments::DividendSchedule;
use serde::Deserialize;

/// Where early exercise is allowed during backward induction.
///
/// # Variants
/// - `TerminalOnly`: exercise value is taken at the leaves only; interior
///   nodes hold the discounted expectation. This reproduces the reference
///   prices and is the default.
/// - `EveryNode`: interior nodes take `max(intrinsic, continuation)`, the
///   textbook American recurrence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseRule {
    /// Exercise at the leaves only.
    #[default]
    TerminalOnly,

    /// Compare against immediate exercise at every node.
    EveryNode,
}

/// Treatment of an up-move probability outside `[0, 1]`.
///
/// A non-finite probability is always rejected; this only governs finite
/// values outside the unit interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProbabilityPolicy {
    /// Fail with `PricingError::DegenerateLattice`.
    #[default]
    UnitInterval,

    /// Price anyway and emit a warning.
    Unchecked,
}

/// Configuration of one lattice.
///
/// `new` does not validate; the lattice builder does, so a zero step count
/// surfaces as `PricingError::InvalidConfiguration` from the pricing call.
/// Use [`LatticeConfig::builder`] to validate up front.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{Dividend, DividendSchedule};
/// use pricer_pricing::lattice::{ExerciseRule, LatticeConfig};
///
/// let config = LatticeConfig::builder()
///     .steps(12)
///     .dividends(DividendSchedule::new(vec![Dividend::new(0.25, 1.4).unwrap()]))
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.steps(), 12);
/// assert_eq!(config.exercise(), ExerciseRule::TerminalOnly);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LatticeConfig {
    steps: usize,
    dividends: DividendSchedule,
    exercise: ExerciseRule,
    probability: ProbabilityPolicy,
}

impl LatticeConfig {
    /// Creates a configuration with default policies.
    pub fn new(steps: usize, dividends: DividendSchedule) -> Self {
        Self {
            steps,
            dividends,
            ..Self::default()
        }
    }

    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> LatticeConfigBuilder {
        LatticeConfigBuilder::default()
    }

    /// Number of time steps `n`.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Dividend schedule.
    #[inline]
    pub fn dividends(&self) -> &DividendSchedule {
        &self.dividends
    }

    /// Early-exercise rule for valuation.
    #[inline]
    pub fn exercise(&self) -> ExerciseRule {
        self.exercise
    }

    /// Policy for an out-of-range up-move probability.
    #[inline]
    pub fn probability(&self) -> ProbabilityPolicy {
        self.probability
    }

    /// Copy with a different exercise rule.
    pub fn with_exercise(mut self, exercise: ExerciseRule) -> Self {
        self.exercise = exercise;
        self
    }

    /// Copy with a different probability policy.
    pub fn with_probability(mut self, probability: ProbabilityPolicy) -> Self {
        self.probability = probability;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidConfiguration` if `steps` is 0.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.steps == 0 {
            return Err(PricingError::InvalidConfiguration(format!(
                "steps must be >= 1 but was {}",
                self.steps
            )));
        }
        Ok(())
    }
}

/// Builder for [`LatticeConfig`].
#[derive(Clone, Debug, Default)]
pub struct LatticeConfigBuilder {
    steps: Option<usize>,
    dividends: DividendSchedule,
    exercise: ExerciseRule,
    probability: ProbabilityPolicy,
}

impl LatticeConfigBuilder {
    /// Sets the number of time steps.
    #[inline]
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Sets the dividend schedule.
    #[inline]
    pub fn dividends(mut self, dividends: DividendSchedule) -> Self {
        self.dividends = dividends;
        self
    }

    /// Sets the early-exercise rule.
    #[inline]
    pub fn exercise(mut self, exercise: ExerciseRule) -> Self {
        self.exercise = exercise;
        self
    }

    /// Sets the probability policy.
    #[inline]
    pub fn probability(mut self, probability: ProbabilityPolicy) -> Self {
        self.probability = probability;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidConfiguration` if `steps` is missing or 0.
    pub fn build(self) -> Result<LatticeConfig, PricingError> {
        let steps = self.steps.ok_or_else(|| {
            PricingError::InvalidConfiguration("steps must be specified".to_string())
        })?;

        let config = LatticeConfig {
            steps,
            dividends: self.dividends,
            exercise: self.exercise,
            probability: self.probability,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_models::instruments::Dividend;

    #[test]
    fn test_builder_valid() {
        let config = LatticeConfig::builder().steps(11).build().unwrap();

        assert_eq!(config.steps(), 11);
        assert!(config.dividends().is_empty());
        assert_eq!(config.exercise(), ExerciseRule::TerminalOnly);
        assert_eq!(config.probability(), ProbabilityPolicy::UnitInterval);
    }

    #[test]
    fn test_builder_with_policies() {
        let config = LatticeConfig::builder()
            .steps(50)
            .dividends(DividendSchedule::new(vec![Dividend::new(0.5, 1.0).unwrap()]))
            .exercise(ExerciseRule::EveryNode)
            .probability(ProbabilityPolicy::Unchecked)
            .build()
            .unwrap();

        assert_eq!(config.dividends().len(), 1);
        assert_eq!(config.exercise(), ExerciseRule::EveryNode);
        assert_eq!(config.probability(), ProbabilityPolicy::Unchecked);
    }

    #[test]
    fn test_builder_zero_steps() {
        let result = LatticeConfig::builder().steps(0).build();
        assert!(matches!(
            result,
            Err(PricingError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_builder_missing_steps() {
        let result = LatticeConfig::builder().build();
        assert_eq!(
            result,
            Err(PricingError::InvalidConfiguration(
                "steps must be specified".to_string()
            ))
        );
    }

    #[test]
    fn test_new_defers_validation() {
        let config = LatticeConfig::new(0, DividendSchedule::empty());
        assert_eq!(config.steps(), 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_methods() {
        let config = LatticeConfig::new(11, DividendSchedule::empty())
            .with_exercise(ExerciseRule::EveryNode)
            .with_probability(ProbabilityPolicy::Unchecked);
        assert_eq!(config.exercise(), ExerciseRule::EveryNode);
        assert_eq!(config.probability(), ProbabilityPolicy::Unchecked);
    }
}
