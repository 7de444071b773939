//! One-call American option pricing.

use pricer_core::types::PricingError;
use pricer_models::instruments::OptionParameters;
use tracing::debug;

use crate::lattice::{build_lattice, value_lattice_with_stats, Lattice, LatticeConfig};

/// Prices an American option on a fresh lattice.
///
/// Builds the lattice for `params` under `config` and values it with
/// `config.exercise()`. The lattice and its memo table are dropped before
/// returning.
///
/// # Errors
///
/// Any construction error from [`build_lattice`] is returned unchanged and
/// no valuation is attempted.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{Dividend, DividendSchedule, OptionParameters, OptionType};
/// use pricer_pricing::{american, LatticeConfig};
///
/// let params = OptionParameters::new(100.0, 100.0, 1.0, 0.2, 0.012, OptionType::Call).unwrap();
/// let plain = american(&params, &LatticeConfig::new(11, DividendSchedule::empty())).unwrap();
///
/// let dividends = DividendSchedule::new(vec![Dividend::new(0.5, 2.0).unwrap()]);
/// let with_dividend = american(&params, &LatticeConfig::new(11, dividends)).unwrap();
///
/// assert!(with_dividend < plain);
/// ```
pub fn american(params: &OptionParameters, config: &LatticeConfig) -> Result<f64, PricingError> {
    american_with_lattice(params, config).map(|(price, _)| price)
}

/// Like [`american`], also returning the lattice for inspection.
pub fn american_with_lattice(
    params: &OptionParameters,
    config: &LatticeConfig,
) -> Result<(f64, Lattice), PricingError> {
    let lattice = build_lattice(params, config)?;
    let valuation = value_lattice_with_stats(&lattice, params, config.exercise());

    debug!(
        price = valuation.price,
        evaluated_nodes = valuation.evaluated_nodes,
        exercise = ?config.exercise(),
        option_type = %params.option_type(),
        "valued american option"
    );

    Ok((valuation.price, lattice))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::instruments::{Dividend, DividendSchedule, OptionType};

    #[test]
    fn test_single_step_with_dividend() {
        let params =
            OptionParameters::new(100.0, 100.0, 1.0, 0.2, 0.012, OptionType::Call).unwrap();
        let config = LatticeConfig::new(
            1,
            DividendSchedule::new(vec![Dividend::new(0.5, 2.0).unwrap()]),
        );

        let (price, lattice) = american_with_lattice(&params, &config).unwrap();
        let children = lattice.node(lattice.root()).children().unwrap();

        assert_eq!(lattice.node(children.up).spot(), 119.69);
        assert_eq!(lattice.node(children.down).spot(), 80.23);
        assert_relative_eq!(price, 9.337820032248308, epsilon = 1e-10);
    }

    #[test]
    fn test_construction_error_is_propagated() {
        let params = OptionParameters::new(100.0, 100.0, 1.0, 0.0, 0.012, OptionType::Call).unwrap();
        let result = american(&params, &LatticeConfig::new(11, DividendSchedule::empty()));
        assert!(matches!(result, Err(PricingError::DegenerateLattice(_))));
    }

    #[test]
    fn test_put_with_dividend() {
        let params = OptionParameters::new(100.0, 100.0, 1.0, 0.2, 0.012, OptionType::Put).unwrap();
        let config = LatticeConfig::new(
            11,
            DividendSchedule::new(vec![Dividend::new(0.3, 1.5).unwrap()]),
        );
        assert_relative_eq!(
            american(&params, &config).unwrap(),
            8.227084976306005,
            epsilon = 1e-9
        );
    }
}
