//! # pricer_pricing: Binomial Lattice Engine
//!
//! ## Layer 3 Role
//!
//! pricer_pricing prices American puts and calls on a recombining binomial
//! lattice that subtracts discrete cash dividends at the step in which they
//! are paid:
//! - Lattice construction and backward valuation (`lattice`)
//! - One-call pricing (`american`)
//! - Named pricing methods, single and averaged (`methods`)
//! - Parallel batch pricing on rayon (`batch`)
//! - TOML and environment configuration (`config`)
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_models::instruments::{Dividend, DividendSchedule, OptionParameters, OptionType};
//! use pricer_pricing::{american, LatticeConfig};
//!
//! let params = OptionParameters::new(100.0, 100.0, 1.0, 0.2, 0.012, OptionType::Put).unwrap();
//! let config = LatticeConfig::builder()
//!     .steps(50)
//!     .dividends(DividendSchedule::new(vec![Dividend::new(0.25, 1.5).unwrap()]))
//!     .build()
//!     .unwrap();
//!
//! let price = american(&params, &config).unwrap();
//! assert!(price > 0.0);
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events (lattice statistics at `debug`, an
//! out-of-range up-move probability at `warn`) and never installs a
//! subscriber.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod american;
pub mod batch;
pub mod config;
pub mod lattice;
pub mod methods;

pub use american::{american, american_with_lattice};
pub use batch::{price_batch, PricingRequest};
pub use config::{ConfigError, PricingConfig};
pub use lattice::{ExerciseRule, Lattice, LatticeConfig, ProbabilityPolicy};
pub use methods::{AveragedBinomialMethod, BinomialMethod, PricingMethod};
