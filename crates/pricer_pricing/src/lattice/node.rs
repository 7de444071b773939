//! Lattice nodes and the cent-flooring rule that keys them.

/// Index of a node inside a [`Lattice`](super::Lattice) arena.
///
/// Ids are only meaningful for the lattice that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// The two successors of an interior node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Children {
    /// Successor after an up move.
    pub up: NodeId,
    /// Successor after a down move.
    pub down: NodeId,
}

/// One reachable (step, underlying price) pair.
///
/// Nodes are shared by every path that reaches the same rounded price at the
/// same depth, so the lattice is a DAG rather than a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingNode {
    spot: f64,
    depth: usize,
    time: f64,
    pub(crate) children: Option<Children>,
}

impl PricingNode {
    pub(crate) fn new(spot: f64, depth: usize, time: f64) -> Self {
        Self {
            spot,
            depth,
            time,
            children: None,
        }
    }

    /// Underlying price at this node.
    ///
    /// Floored to whole cents everywhere except the root, which carries the
    /// caller's spot unchanged.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Step index, 0 at the root.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Elapsed time in years (`depth * dt`).
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Successors, `None` for a leaf.
    #[inline]
    pub fn children(&self) -> Option<Children> {
        self.children
    }

    /// Returns whether this node is a leaf (depth equals the step count).
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// This node's price in whole cents.
    ///
    /// Prices below the root already sit on the cent grid, so this rounds
    /// rather than floors: flooring `c / 100 * 100` can land one cent low.
    #[inline]
    pub fn cents(&self) -> i64 {
        (self.spot * 100.0).round() as i64
    }
}

/// Whole cents in `price`, rounding toward negative infinity.
///
/// This truncation decides which paths recombine. It is deliberately not
/// round-to-nearest. Apply it to raw products only, never to a price that
/// was already floored.
#[inline]
pub fn floor_cents(price: f64) -> i64 {
    (price * 100.0).floor() as i64
}

/// `price` floored to two decimal places.
///
/// ```
/// use pricer_pricing::lattice::round_down_cents;
///
/// assert_eq!(round_down_cents(122.1402), 122.14);
/// assert_eq!(round_down_cents(81.8730), 81.87);
/// assert_eq!(round_down_cents(-0.001), -0.01);
/// ```
#[inline]
pub fn round_down_cents(price: f64) -> f64 {
    floor_cents(price) as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_down_truncates() {
        assert_eq!(round_down_cents(99.999), 99.99);
        assert_eq!(round_down_cents(100.0), 100.0);
        assert_eq!(round_down_cents(0.019), 0.01);
    }

    #[test]
    fn test_floor_cents_key() {
        assert_eq!(floor_cents(89.0912), 8909);
        assert_eq!(floor_cents(-0.5), -50);
    }

    #[test]
    fn test_cents_is_stable_on_the_grid() {
        // 0.29 * 100 evaluates just below 29.0
        let node = PricingNode::new(0.29, 1, 0.1);
        assert_eq!(node.cents(), 29);
    }

    #[test]
    fn test_leaf_has_no_children() {
        let mut node = PricingNode::new(100.0, 0, 0.0);
        assert!(node.is_leaf());

        node.children = Some(Children {
            up: NodeId(1),
            down: NodeId(2),
        });
        assert!(!node.is_leaf());
        assert_eq!(node.children().unwrap().up.index(), 1);
        assert_eq!(node.cents(), 10000);
    }
}
