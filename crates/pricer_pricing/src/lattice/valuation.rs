//! Backward valuation over a built lattice.
//!
//! Each distinct node is valued exactly once. The traversal is an explicit
//! post-order stack, so deep lattices cannot overflow the call stack, and
//! values are memoized by [`NodeId`](super::NodeId) so shared subtrees are
//! not revisited.

use pricer_models::instruments::OptionParameters;

use super::config::ExerciseRule;
use super::tree::Lattice;

/// Price and traversal statistics from one valuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeValuation {
    /// Option value at the root.
    pub price: f64,
    /// Number of nodes whose value was computed.
    pub evaluated_nodes: usize,
}

/// Values `params` on `lattice` and returns the root value.
///
/// Leaves take the intrinsic value at the leaf price. Interior nodes take
/// `(p * V_up + (1 - p) * V_down) * exp(-r * dt)`; under
/// [`ExerciseRule::EveryNode`] the result is floored at the intrinsic value.
pub fn value_lattice(lattice: &Lattice, params: &OptionParameters, exercise: ExerciseRule) -> f64 {
    value_lattice_with_stats(lattice, params, exercise).price
}

/// Like [`value_lattice`], also reporting how many nodes were evaluated.
pub fn value_lattice_with_stats(
    lattice: &Lattice,
    params: &OptionParameters,
    exercise: ExerciseRule,
) -> LatticeValuation {
    let p = lattice.probability();
    let pv = lattice.pv_factor();
    let nodes = lattice.nodes();

    let mut values = vec![0.0_f64; nodes.len()];
    let mut done = vec![false; nodes.len()];
    let mut evaluated_nodes = 0;

    // (node index, children already pushed)
    let mut stack = vec![(lattice.root().index(), false)];

    while let Some((index, expanded)) = stack.pop() {
        if done[index] {
            continue;
        }
        let node = &nodes[index];

        let value = match node.children() {
            None => params.intrinsic(node.spot()),
            Some(children) => {
                let (up, down) = (children.up.index(), children.down.index());
                if !expanded {
                    stack.push((index, true));
                    if !done[down] {
                        stack.push((down, false));
                    }
                    if !done[up] {
                        stack.push((up, false));
                    }
                    continue;
                }
                let continuation = (p * values[up] + (1.0 - p) * values[down]) * pv;
                match exercise {
                    ExerciseRule::TerminalOnly => continuation,
                    ExerciseRule::EveryNode => continuation.max(params.intrinsic(node.spot())),
                }
            }
        };

        values[index] = value;
        done[index] = true;
        evaluated_nodes += 1;
    }

    LatticeValuation {
        price: values[lattice.root().index()],
        evaluated_nodes,
    }
}

/// Values an American option on `lattice` with exercise at the leaves only.
#[inline]
pub fn price_american(lattice: &Lattice, params: &OptionParameters) -> f64 {
    value_lattice(lattice, params, ExerciseRule::TerminalOnly)
}
