//! Recombining binomial lattice with discrete cash dividends.
//!
//! Construction and valuation are separate passes:
//!
//! 1. [`build_lattice`] grows the price tree forward from the spot, applying
//!    at most one cash dividend per step and merging paths that land on the
//!    same whole-cent price at the same depth.
//! 2. [`value_lattice`] walks the finished lattice from the leaves back to
//!    the root, valuing each distinct node once.
//!
//! Nodes live in an arena owned by [`Lattice`] and refer to their children
//! by [`NodeId`].
//!
//! # Example
//!
//! ```rust
//! use pricer_models::instruments::{DividendSchedule, OptionParameters, OptionType};
//! use pricer_pricing::lattice::{build_lattice, price_american, LatticeConfig};
//!
//! let params = OptionParameters::new(100.0, 100.0, 1.0, 0.2, 0.012, OptionType::Call).unwrap();
//! let config = LatticeConfig::new(11, DividendSchedule::empty());
//!
//! let lattice = build_lattice(&params, &config).unwrap();
//! let price = price_american(&lattice, &params);
//! assert!((price - 8.6788).abs() < 1e-4);
//! ```

mod builder;
mod config;
mod node;
mod tree;
mod valuation;

pub use builder::build_lattice;
pub use config::{ExerciseRule, LatticeConfig, LatticeConfigBuilder, ProbabilityPolicy};
pub use node::{floor_cents, round_down_cents, Children, NodeId, PricingNode};
pub use tree::Lattice;
pub use valuation::{price_american, value_lattice, value_lattice_with_stats, LatticeValuation};
