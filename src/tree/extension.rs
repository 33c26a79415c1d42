//! Active-point extension engine
//!
//! One call to [`ExtensionEngine::extend`] absorbs one appended symbol:
//! it inserts every suffix still owed to the tree, starting from the active
//! point, until a suffix turns out to be implicitly present already.
//!
//! The active point `(node, bias)` counts `bias` symbols of the oldest owed
//! suffix below `node`, including the freshly appended one. Owed suffixes
//! therefore number `depth(node) + bias`; following a suffix link drops the
//! first symbol of `node`'s string, so `bias` is kept, while at the root the
//! owed suffix shrinks by consuming one unit of `bias`.

use tracing::trace;

use super::arena::{EdgeEnd, NodeArena, NodeId};
use super::buffer::SymbolBuffer;
use super::stats::ConstructionProfile;

/// Insertion cursor carried across extension steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePoint {
    /// Node the owed suffix is measured from
    pub node: NodeId,
    /// Owed symbols below `node`
    pub bias: usize,
}

impl ActivePoint {
    /// Cursor at the root with nothing owed.
    pub fn root() -> Self {
        Self {
            node: NodeId::ROOT,
            bias: 0,
        }
    }
}

/// Ukkonen-style construction state for one tree.
#[derive(Debug, Clone)]
pub struct ExtensionEngine {
    active: ActivePoint,
    profile: Option<ConstructionProfile>,
}

impl ExtensionEngine {
    /// Fresh engine; `profile` enables construction counters.
    pub fn new(profile: bool) -> Self {
        Self {
            active: ActivePoint::root(),
            profile: profile.then(ConstructionProfile::default),
        }
    }

    /// Current cursor.
    pub fn active_point(&self) -> ActivePoint {
        self.active
    }

    /// Suffixes appended so far that are still implicit in the tree.
    pub fn pending(&self, arena: &NodeArena, frontier: usize) -> usize {
        arena.string_depth(self.active.node, frontier) + self.active.bias
    }

    /// Counters, when profiling is enabled.
    pub fn profile(&self) -> Option<&ConstructionProfile> {
        self.profile.as_ref()
    }

    /// Absorb the symbol at `pos`, which must be the last one in `buffer`.
    pub fn extend(&mut self, arena: &mut NodeArena, buffer: &SymbolBuffer, pos: usize) {
        debug_assert_eq!(pos + 1, buffer.len(), "extension must follow the frontier");

        let frontier = buffer.len();
        let symbol_slot = buffer.slot_at(pos);
        let mut step = ConstructionProfile {
            extension_steps: 1,
            ..ConstructionProfile::default()
        };

        let mut node = self.active.node;
        let mut bias = self.active.bias + 1;
        // Internal node created by the previous insertion of this step
        let mut awaiting_link: Option<NodeId> = None;

        while bias > 0 {
            let edge_slot = loop {
                let slot = buffer.slot_at(pos + 1 - bias);
                match arena.child_of(node, slot) {
                    Some(child) if bias > arena.edge_length(child, frontier) => {
                        bias -= arena.edge_length(child, frontier);
                        node = child;
                        step.walk_steps += 1;
                    }
                    _ => break slot,
                }
            };

            match arena.child_of(node, edge_slot) {
                None => {
                    let leaf = arena.allocate_node(node, pos + 1 - bias, EdgeEnd::Open);
                    arena.set_child(node, edge_slot, leaf);
                    if let Some(last) = awaiting_link.take() {
                        arena.set_suffix_link(last, node);
                    }
                    step.leaves_created += 1;
                }
                Some(child) => {
                    let next_slot = buffer.slot_at(arena.node(child).start() + bias - 1);
                    if next_slot == symbol_slot {
                        if let Some(last) = awaiting_link.take() {
                            arena.set_suffix_link(last, node);
                        }
                        step.implicit_stops += 1;
                        break;
                    }

                    let mid = arena.split_edge(child, bias - 1, edge_slot, next_slot);
                    let leaf = arena.allocate_node(mid, pos, EdgeEnd::Open);
                    arena.set_child(mid, symbol_slot, leaf);
                    if let Some(last) = awaiting_link.replace(mid) {
                        arena.set_suffix_link(last, mid);
                    }
                    step.splits += 1;
                    step.leaves_created += 1;
                }
            }

            if node.is_root() {
                bias -= 1;
            } else {
                node = match arena.node(node).suffix_link() {
                    Some(link) => link,
                    None => unreachable!("internal node {node} has no suffix link"),
                };
                step.suffix_link_hops += 1;
            }
        }

        self.active = ActivePoint { node, bias };
        trace!(
            pos,
            active = %node,
            bias,
            leaves = step.leaves_created,
            splits = step.splits,
            "extension step complete"
        );
        if let Some(profile) = self.profile.as_mut() {
            profile.absorb(&step);
        }
    }
}
