//! Batch pricing on the rayon thread pool.
//!
//! Every request owns its lattice and memo table, so requests run without
//! shared state. A failing request yields an `Err` in its own slot and does
//! not affect the others.

use pricer_core::types::PricingError;
use pricer_models::instruments::{DividendSchedule, OptionParameters};
use rayon::prelude::*;
use tracing::debug;

use crate::methods::PricingMethod;

/// Default minimum batch length before work is spread across threads.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 8;

/// One option to price, with its dividends.
#[derive(Clone, Debug, PartialEq)]
pub struct PricingRequest {
    /// Option to price.
    pub option: OptionParameters,
    /// Dividends for this option.
    pub dividends: DividendSchedule,
}

impl PricingRequest {
    /// Creates a request.
    pub fn new(option: OptionParameters, dividends: DividendSchedule) -> Self {
        Self { option, dividends }
    }
}

/// Configuration for batch execution.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Minimum requests before using parallelism
    pub parallel_threshold: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl BatchConfig {
    /// Creates a batch configuration.
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    /// Returns whether to use parallel processing for the given request count.
    #[inline]
    pub fn should_parallelize(&self, n_requests: usize) -> bool {
        n_requests >= self.parallel_threshold
    }
}

/// Prices every request with `method`, results in input order.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{DividendSchedule, OptionParameters, OptionType};
/// use pricer_pricing::batch::{price_batch, PricingRequest};
/// use pricer_pricing::methods::BinomialMethod;
///
/// let call = OptionParameters::new(100.0, 100.0, 1.0, 0.2, 0.012, OptionType::Call).unwrap();
/// let flat = OptionParameters::new(100.0, 100.0, 1.0, 0.0, 0.012, OptionType::Call).unwrap();
///
/// let results = price_batch(
///     &BinomialMethod::new(11),
///     &[
///         PricingRequest::new(call, DividendSchedule::empty()),
///         PricingRequest::new(flat, DividendSchedule::empty()),
///     ],
/// );
///
/// assert!(results[0].is_ok());
/// assert!(results[1].is_err());
/// ```
pub fn price_batch<M>(method: &M, requests: &[PricingRequest]) -> Vec<Result<f64, PricingError>>
where
    M: PricingMethod + ?Sized,
{
    price_batch_with_config(method, requests, &BatchConfig::default())
}

/// Like [`price_batch`], with an explicit [`BatchConfig`].
pub fn price_batch_with_config<M>(
    method: &M,
    requests: &[PricingRequest],
    config: &BatchConfig,
) -> Vec<Result<f64, PricingError>>
where
    M: PricingMethod + ?Sized,
{
    let price_one = |(index, request): (usize, &PricingRequest)| {
        let result = method.price(&request.option, &request.dividends);
        if let Err(err) = &result {
            debug!(index, method = %method.name(), error = %err, "batch element failed");
        }
        result
    };

    if config.should_parallelize(requests.len()) {
        requests.par_iter().enumerate().map(price_one).collect()
    } else {
        requests.iter().enumerate().map(price_one).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::{AveragedBinomialMethod, BinomialMethod};
    use approx::assert_relative_eq;
    use pricer_models::instruments::OptionType;

    fn request(spot: f64, volatility: f64) -> PricingRequest {
        PricingRequest::new(
            OptionParameters::new(spot, 100.0, 1.0, volatility, 0.012, OptionType::Call).unwrap(),
            DividendSchedule::empty(),
        )
    }

    #[test]
    fn test_batch_config_threshold() {
        let config = BatchConfig::default();
        assert!(!config.should_parallelize(DEFAULT_PARALLEL_THRESHOLD - 1));
        assert!(config.should_parallelize(DEFAULT_PARALLEL_THRESHOLD));
    }

    #[test]
    fn test_empty_batch() {
        assert!(price_batch(&BinomialMethod::default(), &[]).is_empty());
    }

    #[test]
    fn test_order_and_isolation_parallel() {
        let requests: Vec<PricingRequest> = (0..20)
            .map(|i| {
                if i % 5 == 3 {
                    request(100.0, 0.0)
                } else {
                    request(80.0 + i as f64, 0.2)
                }
            })
            .collect();
        let method = BinomialMethod::new(11);

        let parallel = price_batch_with_config(&method, &requests, &BatchConfig::new(1));
        let sequential =
            price_batch_with_config(&method, &requests, &BatchConfig::new(usize::MAX));

        assert_eq!(parallel.len(), requests.len());
        for (i, (par, seq)) in parallel.iter().zip(&sequential).enumerate() {
            if i % 5 == 3 {
                assert!(matches!(par, Err(PricingError::DegenerateLattice(_))));
            } else {
                assert_relative_eq!(*par.as_ref().unwrap(), *seq.as_ref().unwrap());
            }
        }
    }

    #[test]
    fn test_trait_object_method() {
        let method: Box<dyn PricingMethod> = Box::new(AveragedBinomialMethod::new(12));
        let results = price_batch(method.as_ref(), &[request(100.0, 0.2)]);
        assert_relative_eq!(
            *results[0].as_ref().unwrap(),
            8.494027564602344,
            epsilon = 1e-9
        );
    }
}
