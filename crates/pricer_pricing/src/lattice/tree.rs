//! The built lattice: a node arena plus the per-step constants.

use super::node::{NodeId, PricingNode};

/// Recombining binomial lattice.
///
/// Nodes live in an arena addressed by [`NodeId`]; the root is always the
/// first entry. Children are referenced by id, so shared nodes need no
/// reference counting. A lattice is built for one pricing call and dropped
/// afterwards.
#[derive(Debug, Clone)]
pub struct Lattice {
    pub(crate) nodes: Vec<PricingNode>,
    pub(crate) levels: Vec<Vec<NodeId>>,
    pub(crate) steps: usize,
    pub(crate) probability: f64,
    pub(crate) pv_factor: f64,
    pub(crate) dt: f64,
    pub(crate) up_factor: f64,
    pub(crate) down_factor: f64,
}

impl Lattice {
    /// Id of the root node (depth 0).
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Node with the given id.
    ///
    /// # Panics
    /// Panics if `id` was issued by another lattice and is out of range.
    #[inline]
    pub fn node(&self, id: NodeId) -> &PricingNode {
        &self.nodes[id.0]
    }

    /// All nodes in creation order.
    #[inline]
    pub fn nodes(&self) -> &[PricingNode] {
        &self.nodes
    }

    /// Total number of distinct nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a lattice has at least its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes at `depth`, in creation order.
    ///
    /// Empty when `depth` exceeds the step count.
    pub fn nodes_at_depth(&self, depth: usize) -> impl Iterator<Item = &PricingNode> + '_ {
        self.level(depth).iter().map(move |id| &self.nodes[id.0])
    }

    /// Number of distinct nodes at each depth, indexed by depth.
    pub fn level_sizes(&self) -> Vec<usize> {
        self.levels.iter().map(Vec::len).collect()
    }

    /// Looks up the node at `depth` whose price is `cents` whole cents.
    pub fn find(&self, depth: usize, cents: i64) -> Option<NodeId> {
        self.level(depth)
            .iter()
            .copied()
            .find(|id| self.nodes[id.0].cents() == cents)
    }

    fn level(&self, depth: usize) -> &[NodeId] {
        self.levels.get(depth).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of time steps `n` (depth of the leaves).
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Risk-neutral up-move probability `p`, not clamped.
    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// One-step discount factor `exp(-r * dt)`.
    #[inline]
    pub fn pv_factor(&self) -> f64 {
        self.pv_factor
    }

    /// Step length in years.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Up-move factor `u`.
    #[inline]
    pub fn up_factor(&self) -> f64 {
        self.up_factor
    }

    /// Down-move factor `d = 1 / u`.
    #[inline]
    pub fn down_factor(&self) -> f64 {
        self.down_factor
    }
}
