//! Forward construction of the recombining lattice.
//!
//! The lattice is grown depth-first from the root with an explicit stack.
//! Every child price is `floor_cents((parent - dividend) * factor)`, and a
//! child is reused whenever another path already produced the same cents at
//! the same depth. Node identity is therefore a function of (depth, cents)
//! alone, independent of visit order.
//!
//! Node times accumulate as `parent.time + dt` rather than `depth * dt`; the
//! two can differ in the last bit, which decides the step a dividend sitting
//! on a grid point falls into.

use std::collections::HashMap;

use pricer_core::types::PricingError;
use pricer_models::instruments::OptionParameters;
use tracing::{debug, warn};

use super::config::{LatticeConfig, ProbabilityPolicy};
use super::node::{floor_cents, Children, NodeId, PricingNode};
use super::tree::Lattice;

/// Node arena plus the construction-only recombination index.
struct Arena {
    nodes: Vec<PricingNode>,
    /// `index[depth][cents]` for every node created so far.
    index: Vec<HashMap<i64, NodeId>>,
    /// Node ids per depth, in creation order.
    levels: Vec<Vec<NodeId>>,
}

impl Arena {
    fn new(root_spot: f64, steps: usize) -> Self {
        let mut levels = vec![Vec::new(); steps + 1];
        levels[0].push(NodeId(0));
        Self {
            nodes: vec![PricingNode::new(root_spot, 0, 0.0)],
            index: vec![HashMap::new(); steps + 1],
            levels,
        }
    }

    /// Returns the node for (`depth`, floored `raw_spot`), creating it if
    /// needed. The flag is true when the node is new.
    fn get_or_insert(&mut self, depth: usize, time: f64, raw_spot: f64) -> (NodeId, bool) {
        let cents = floor_cents(raw_spot);
        if let Some(&id) = self.index[depth].get(&cents) {
            return (id, false);
        }
        let id = NodeId(self.nodes.len());
        self.nodes
            .push(PricingNode::new(cents as f64 / 100.0, depth, time));
        self.index[depth].insert(cents, id);
        self.levels[depth].push(id);
        (id, true)
    }
}

/// Builds the recombining lattice for `params` under `config`.
///
/// Up factor `u = exp(sigma * sqrt(T / n))`, down factor `d = 1 / u`, and
/// up-move probability `p = (1 + r T / n - d) / (u - d)`.
///
/// When stepping from `t` to `t + dt`, the first dividend in schedule order
/// paid in `(t, t + dt]` is subtracted from the parent price before the
/// up/down factor is applied. Later dividends in the same step are ignored.
///
/// # Errors
///
/// - `PricingError::InvalidConfiguration` if `config.steps()` is 0
/// - `PricingError::DegenerateLattice` if `u == d`, if `p` is not finite, or
///   if `p` lies outside `[0, 1]` under [`ProbabilityPolicy::UnitInterval`]
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{DividendSchedule, OptionParameters, OptionType};
/// use pricer_pricing::lattice::{build_lattice, LatticeConfig};
///
/// let params = OptionParameters::new(100.0, 100.0, 1.0, 0.2, 0.012, OptionType::Call).unwrap();
/// let lattice = build_lattice(&params, &LatticeConfig::new(2, DividendSchedule::empty())).unwrap();
///
/// // up-down and down-up both land on 99.99 and share one node
/// assert_eq!(lattice.level_sizes(), vec![1, 2, 3]);
/// ```
pub fn build_lattice(
    params: &OptionParameters,
    config: &LatticeConfig,
) -> Result<Lattice, PricingError> {
    config.validate()?;

    let steps = config.steps();
    let n = steps as f64;
    let expiry = params.expiry();
    let rate = params.rate();

    let up_factor = (params.volatility() * (expiry / n).sqrt()).exp();
    let down_factor = 1.0 / up_factor;
    if up_factor == down_factor {
        return Err(PricingError::DegenerateLattice(format!(
            "up factor equals down factor (u = d = {}) for volatility {}, expiry {}, steps {}",
            up_factor,
            params.volatility(),
            expiry,
            steps
        )));
    }

    let probability = (1.0 + rate * expiry / n - down_factor) / (up_factor - down_factor);
    if !probability.is_finite() {
        return Err(PricingError::DegenerateLattice(format!(
            "up-move probability is not finite (p = {})",
            probability
        )));
    }
    if !(0.0..=1.0).contains(&probability) {
        match config.probability() {
            ProbabilityPolicy::UnitInterval => {
                return Err(PricingError::DegenerateLattice(format!(
                    "up-move probability {} outside [0, 1] (u = {}, d = {}, r = {})",
                    probability, up_factor, down_factor, rate
                )));
            }
            ProbabilityPolicy::Unchecked => {
                warn!(
                    probability,
                    up_factor, down_factor, rate, "up-move probability outside [0, 1]"
                );
            }
        }
    }

    let dt = expiry / n;
    let pv_factor = (-rate * dt).exp();
    let dividends = config.dividends();

    let mut arena = Arena::new(params.spot(), steps);
    let mut stack = vec![NodeId(0)];

    while let Some(id) = stack.pop() {
        let (spot, depth, start) = {
            let node = &arena.nodes[id.0];
            (node.spot(), node.depth(), node.time())
        };
        if depth >= steps {
            continue;
        }

        let child_depth = depth + 1;
        let end = start + dt;
        let ex_dividend = spot - dividends.amount_in_step(start, end);

        let (up, up_is_new) = arena.get_or_insert(child_depth, end, ex_dividend * up_factor);
        let (down, down_is_new) =
            arena.get_or_insert(child_depth, end, ex_dividend * down_factor);
        arena.nodes[id.0].children = Some(Children { up, down });

        // Existing nodes were expanded when they were created.
        if up_is_new {
            stack.push(up);
        }
        if down_is_new {
            stack.push(down);
        }
    }

    debug!(
        steps,
        nodes = arena.nodes.len(),
        probability,
        pv_factor,
        dividends = dividends.len(),
        "built binomial lattice"
    );

    Ok(Lattice {
        nodes: arena.nodes,
        levels: arena.levels,
        steps,
        probability,
        pv_factor,
        dt,
        up_factor,
        down_factor,
    })
}
