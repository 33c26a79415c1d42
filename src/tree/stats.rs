//! Construction diagnostics
//!
//! Mirrors the opt-in profiling of the evaluator: counters are only kept
//! when requested, and structural statistics are computed on demand.

use std::fmt;

#[cfg(feature = "visualize")]
use serde::Serialize;

/// Shape of a tree at its current frontier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(Serialize))]
pub struct TreeStats {
    /// Buffer length
    pub symbols: usize,
    /// Nodes excluding the root
    pub nodes: usize,
    /// Non-root nodes with a closed edge
    pub internal_nodes: usize,
    /// Nodes with an open edge
    pub leaves: usize,
    /// Largest string depth of any node
    pub max_depth: usize,
}

impl TreeStats {
    /// Classic suffix-tree bound: at most `2n - 1` non-root nodes.
    pub fn within_node_bound(&self) -> bool {
        (self.symbols == 0 && self.nodes == 0) || self.nodes < 2 * self.symbols
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "symbols={}\tnodes={}\tinternal={}\tleaves={}\tmax_depth={}",
            self.symbols, self.nodes, self.internal_nodes, self.leaves, self.max_depth
        )
    }
}

/// Counters accumulated across extension steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(Serialize))]
pub struct ConstructionProfile {
    /// Symbols absorbed
    pub extension_steps: usize,
    /// Leaves attached (one per explicit suffix)
    pub leaves_created: usize,
    /// Edges split by a new internal node
    pub splits: usize,
    /// Steps ended because the symbol was already implicitly present
    pub implicit_stops: usize,
    /// Whole edges skipped while walking down
    pub walk_steps: usize,
    /// Suffix links followed
    pub suffix_link_hops: usize,
}

impl ConstructionProfile {
    /// Add another profile's counters to this one.
    pub fn absorb(&mut self, other: &ConstructionProfile) {
        self.extension_steps += other.extension_steps;
        self.leaves_created += other.leaves_created;
        self.splits += other.splits;
        self.implicit_stops += other.implicit_stops;
        self.walk_steps += other.walk_steps;
        self.suffix_link_hops += other.suffix_link_hops;
    }

    /// Generate report
    pub fn report(&self) -> String {
        format!(
            "Extension steps: {}\n  Leaves: {}\n  Splits: {}\n  Implicit stops: {}\n  Walk steps: {}\n  Suffix-link hops: {}",
            self.extension_steps,
            self.leaves_created,
            self.splits,
            self.implicit_stops,
            self.walk_steps,
            self.suffix_link_hops
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_bound() {
        let empty = TreeStats::default();
        assert!(empty.within_node_bound());

        let stats = TreeStats {
            symbols: 3,
            nodes: 5,
            ..TreeStats::default()
        };
        assert!(stats.within_node_bound());
        assert!(!TreeStats { nodes: 6, ..stats }.within_node_bound());
    }

    #[test]
    fn test_absorb_sums_counters() {
        let mut total = ConstructionProfile::default();
        let step = ConstructionProfile {
            extension_steps: 1,
            leaves_created: 2,
            splits: 1,
            implicit_stops: 0,
            walk_steps: 3,
            suffix_link_hops: 1,
        };
        total.absorb(&step);
        total.absorb(&step);
        assert_eq!(total.leaves_created, 4);
        assert_eq!(total.walk_steps, 6);
        assert!(total.report().contains("Splits: 2"));
    }
}
