//! Pricing configuration.
//!
//! Handles loading a [`PricingConfig`] from TOML and from environment
//! variables, and turning it into a [`PricingMethod`].

use std::path::Path;

use pricer_core::types::PricingError;
use serde::Deserialize;
use thiserror::Error;

use crate::lattice::{ExerciseRule, ProbabilityPolicy};
use crate::methods::{
    AveragedBinomialMethod, BinomialMethod, PricingMethod, DEFAULT_INTEREST_RATE, DEFAULT_STEPS,
};

/// Environment variable overriding [`PricingConfig::steps`].
pub const ENV_STEPS: &str = "LATTICE_STEPS";
/// Environment variable overriding [`PricingConfig::interest_rate`].
pub const ENV_INTEREST_RATE: &str = "LATTICE_INTEREST_RATE";
/// Environment variable overriding [`PricingConfig::averaged`].
pub const ENV_AVERAGED: &str = "LATTICE_AVERAGED";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// TOML was malformed or had unknown keys.
    #[error("Failed to parse TOML: {0}")]
    ParseError(String),

    /// An environment override could not be parsed.
    #[error("Environment variable error: {name} = {value:?}")]
    EnvError {
        /// Variable name
        name: String,
        /// Raw value
        value: String,
    },

    /// Values parsed but are not usable.
    #[error(transparent)]
    Invalid(#[from] PricingError),
}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid(inner) => inner,
            other => PricingError::InvalidConfiguration(other.to_string()),
        }
    }
}

/// Pricing configuration.
///
/// Every field has a default, so an empty TOML document is valid.
///
/// ```toml
/// steps = 50
/// interest_rate = 0.012
/// averaged = true
/// exercise = "every-node"
/// probability = "unchecked"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingConfig {
    /// Lattice periods (the smaller count when averaged)
    pub steps: usize,
    /// Rate applied to every option, `None` to keep each option's own rate
    pub interest_rate: Option<f64>,
    /// Average the `steps` and `steps + 1` lattices
    pub averaged: bool,
    /// Early-exercise rule
    pub exercise: ExerciseRule,
    /// Treatment of an up-move probability outside `[0, 1]`
    pub probability: ProbabilityPolicy,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            interest_rate: Some(DEFAULT_INTEREST_RATE),
            averaged: false,
            exercise: ExerciseRule::default(),
            probability: ProbabilityPolicy::default(),
        }
    }
}

impl PricingConfig {
    /// Create a new PricingConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PricingConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from `lookup`, keyed by the `ENV_*` names.
    ///
    /// An empty `LATTICE_INTEREST_RATE` clears the rate override.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_STEPS) {
            self.steps = value.trim().parse().map_err(|_| env_error(ENV_STEPS, &value))?;
        }

        if let Some(value) = lookup(ENV_INTEREST_RATE) {
            self.interest_rate = match value.trim() {
                "" => None,
                rate => Some(
                    rate.parse()
                        .map_err(|_| env_error(ENV_INTEREST_RATE, &value))?,
                ),
            };
        }

        if let Some(value) = lookup(ENV_AVERAGED) {
            self.averaged = match value.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => return Err(env_error(ENV_AVERAGED, &value)),
            };
        }

        self.validate()?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.steps == 0 {
            return Err(PricingError::InvalidConfiguration(format!(
                "steps must be >= 1 but was {}",
                self.steps
            )));
        }
        if let Some(rate) = self.interest_rate {
            if !rate.is_finite() {
                return Err(PricingError::InvalidConfiguration(format!(
                    "interest_rate must be finite but was {}",
                    rate
                )));
            }
        }
        Ok(())
    }

    /// The pricing method this configuration describes.
    pub fn method(&self) -> Box<dyn PricingMethod> {
        if self.averaged {
            let mut method = AveragedBinomialMethod::new(self.steps)
                .with_exercise(self.exercise)
                .with_probability(self.probability);
            if let Some(rate) = self.interest_rate {
                method = method.with_interest_rate(rate);
            }
            Box::new(method)
        } else {
            let mut method = BinomialMethod::new(self.steps)
                .with_exercise(self.exercise)
                .with_probability(self.probability);
            if let Some(rate) = self.interest_rate {
                method = method.with_interest_rate(rate);
            }
            Box::new(method)
        }
    }
}

fn env_error(name: &str, value: &str) -> ConfigError {
    ConfigError::EnvError {
        name: name.to_string(),
        value: value.to_string(),
    }
}
