//! Core scalar types shared by the graph, the engines and the forwarder.
//!
//! Costs are unsigned integers with a reserved [`INFINITY`] value that never
//! appears as a real edge weight. Arithmetic on costs must go through
//! [`cost_add`] so that an infinite operand never wraps into a small number.

/// Dense node identifier in `0..n`.
pub type NodeId = usize;

/// Edge or path cost.
pub type Cost = u32;

/// Marker for "no edge" / "unreachable".
pub const INFINITY: Cost = Cost::MAX;

/// Largest supported node count. The cost matrix holds `n * n` entries.
pub const MAX_NODES: usize = 4096;

/// Input cost value that means "remove this edge" rather than a literal weight.
pub const REMOVE_EDGE: i64 = -999;

/// Add two costs, treating [`INFINITY`] as absorbing.
///
/// Finite sums that would overflow saturate at `INFINITY - 1` so that a
/// very long but real path is never confused with an unreachable one.
pub fn cost_add(a: Cost, b: Cost) -> Cost {
    if a == INFINITY || b == INFINITY {
        return INFINITY;
    }
    a.checked_add(b)
        .filter(|sum| *sum != INFINITY)
        .unwrap_or(INFINITY - 1)
}

/// Returns true if the cost denotes a real, reachable distance.
pub fn is_finite(cost: Cost) -> bool {
    cost != INFINITY
}

/// Requested change to a single undirected edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum EdgeCost {
    /// Set the edge to a finite weight
    Weight(Cost),
    /// Remove the edge entirely
    Remove,
}

impl EdgeCost {
    /// Interpret a raw input cost, mapping [`REMOVE_EDGE`] to [`EdgeCost::Remove`].
    ///
    /// Returns `None` for any other negative value or one that collides with
    /// the infinity marker.
    pub fn from_raw(raw: i64) -> Option<Self> {
        if raw == REMOVE_EDGE {
            return Some(EdgeCost::Remove);
        }
        match Cost::try_from(raw) {
            Ok(cost) if cost != INFINITY => Some(EdgeCost::Weight(cost)),
            _ => None,
        }
    }

    /// Weight stored in the cost matrix for this update.
    pub fn as_matrix_cost(&self) -> Cost {
        match self {
            EdgeCost::Weight(cost) => *cost,
            EdgeCost::Remove => INFINITY,
        }
    }
}

impl std::fmt::Display for EdgeCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeCost::Weight(cost) => write!(f, "{}", cost),
            EdgeCost::Remove => write!(f, "{}", REMOVE_EDGE),
        }
    }
}

/// One `(src, dst, cost)` record from the topology or changes input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EdgeUpdate {
    pub source: NodeId,
    pub target: NodeId,
    pub cost: EdgeCost,
}

/// One `(src, dst, payload)` record from the messages input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    pub source: NodeId,
    pub destination: NodeId,
    pub payload: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_add_absorbs_infinity() {
        assert_eq!(cost_add(INFINITY, 0), INFINITY);
        assert_eq!(cost_add(3, INFINITY), INFINITY);
        assert_eq!(cost_add(INFINITY, INFINITY), INFINITY);
        assert_eq!(cost_add(2, 3), 5);
    }

    #[test]
    fn test_cost_add_saturates_below_infinity() {
        assert_eq!(cost_add(INFINITY - 1, 1), INFINITY - 1);
        assert_eq!(cost_add(INFINITY - 2, 5), INFINITY - 1);
        assert!(is_finite(cost_add(INFINITY - 2, 5)));
    }

    #[test]
    fn test_edge_cost_from_raw() {
        assert_eq!(EdgeCost::from_raw(-999), Some(EdgeCost::Remove));
        assert_eq!(EdgeCost::from_raw(0), Some(EdgeCost::Weight(0)));
        assert_eq!(EdgeCost::from_raw(42), Some(EdgeCost::Weight(42)));
        assert_eq!(EdgeCost::from_raw(-1), None);
        assert_eq!(EdgeCost::from_raw(INFINITY as i64), None);
        assert_eq!(EdgeCost::from_raw(i64::MAX), None);
    }

    #[test]
    fn test_edge_cost_display() {
        assert_eq!(EdgeCost::Weight(7).to_string(), "7");
        assert_eq!(EdgeCost::Remove.to_string(), "-999");
    }
}
