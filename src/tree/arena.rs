//! Node arena
//!
//! Owns every node of the tree. Parent pointers and suffix links are plain
//! handles, never ownership, so the cyclic-looking link graph needs no
//! reference counting. Handles are never reused: nodes are only appended.

use std::fmt;

/// Stable handle of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The root, created with the arena and never removed.
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    /// True for the root handle.
    #[inline]
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Upper bound of an edge label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEnd {
    /// Tracks the live buffer length (leaf edges)
    Open,
    /// Frozen exclusive bound (internal edges)
    Closed(usize),
}

impl EdgeEnd {
    /// Resolve against the current frontier: `min(r, frontier)`.
    #[inline]
    pub fn resolve(self, frontier: usize) -> usize {
        match self {
            EdgeEnd::Open => frontier,
            EdgeEnd::Closed(end) => end.min(frontier),
        }
    }
}

/// A tree node together with its incoming edge.
#[derive(Debug, Clone)]
pub struct Node {
    parent: Option<NodeId>,
    start: usize,
    end: EdgeEnd,
    suffix_link: Option<NodeId>,
    children: Box<[Option<NodeId>]>,
    /// String depth where the incoming edge begins
    depth: usize,
}

impl Node {
    fn new(
        parent: Option<NodeId>,
        start: usize,
        end: EdgeEnd,
        depth: usize,
        width: usize,
    ) -> Self {
        Self {
            parent,
            start,
            end,
            suffix_link: None,
            children: vec![None; width].into_boxed_slice(),
            depth,
        }
    }

    /// Parent handle, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Buffer index of the first label symbol.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Upper bound of the label.
    #[inline]
    pub fn end(&self) -> EdgeEnd {
        self.end
    }

    /// Suffix link, set on internal nodes once the next insertion is placed.
    pub fn suffix_link(&self) -> Option<NodeId> {
        self.suffix_link
    }

    /// Leaves are exactly the nodes with an open edge.
    pub fn is_leaf(&self) -> bool {
        self.end == EdgeEnd::Open
    }

    /// String depth of the parent, i.e. where this node's label begins.
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn closed_len(&self) -> usize {
        match self.end {
            EdgeEnd::Closed(end) => end - self.start,
            // Leaves never get children.
            EdgeEnd::Open => 0,
        }
    }

    /// Occupied child slots with their handles.
    pub fn children(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(slot, child)| child.map(|id| (slot, id)))
    }
}

/// Append-only storage for nodes.
#[derive(Debug, Clone)]
pub struct NodeArena {
    nodes: Vec<Node>,
    width: usize,
}

impl NodeArena {
    /// Create an arena holding only the root. `width` is the alphabet size.
    pub fn new(width: usize) -> Self {
        Self {
            nodes: vec![Node::new(None, 0, EdgeEnd::Closed(0), 0, width)],
            width,
        }
    }

    /// Allocate a node hanging below `parent` with label `[start, end)`.
    ///
    /// The parent's child slot is not touched; callers wire it with
    /// [`NodeArena::set_child`].
    pub fn allocate_node(&mut self, parent: NodeId, start: usize, end: EdgeEnd) -> NodeId {
        let parent_node = &self.nodes[parent.0];
        let depth = match parent_node.parent {
            None => 0,
            Some(_) => parent_node.depth + parent_node.closed_len(),
        };
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(Some(parent), start, end, depth, self.width));
        id
    }

    /// Child of `node` whose label starts with the symbol in `slot`.
    #[inline]
    pub fn child_of(&self, node: NodeId, slot: usize) -> Option<NodeId> {
        self.nodes[node.0].children[slot]
    }

    /// Point `slot` of `node` at `child`.
    #[inline]
    pub fn set_child(&mut self, node: NodeId, slot: usize, child: NodeId) {
        self.nodes[node.0].children[slot] = Some(child);
    }

    /// Materialized label length `min(r, frontier) - l`.
    #[inline]
    pub fn edge_length(&self, node: NodeId, frontier: usize) -> usize {
        let n = &self.nodes[node.0];
        n.end.resolve(frontier).saturating_sub(n.start)
    }

    /// String depth of `node` when the buffer holds `frontier` symbols.
    pub fn string_depth(&self, node: NodeId, frontier: usize) -> usize {
        if node.is_root() {
            return 0;
        }
        self.nodes[node.0].depth + self.edge_length(node, frontier)
    }

    /// Insert a closed node on the edge into `child`, `offset` symbols below
    /// its parent. Returns the new node, which takes over the child's slot.
    pub(crate) fn split_edge(
        &mut self,
        child: NodeId,
        offset: usize,
        parent_slot: usize,
        child_slot: usize,
    ) -> NodeId {
        let (parent, start, depth) = {
            let c = &self.nodes[child.0];
            debug_assert!(offset > 0 && offset < self.edge_length_closed_or_max(child));
            (c.parent.unwrap_or(NodeId::ROOT), c.start, c.depth)
        };
        let mid = NodeId(self.nodes.len());
        self.nodes.push(Node::new(
            Some(parent),
            start,
            EdgeEnd::Closed(start + offset),
            depth,
            self.width,
        ));
        self.nodes[parent.0].children[parent_slot] = Some(mid);
        self.nodes[mid.0].children[child_slot] = Some(child);

        let c = &mut self.nodes[child.0];
        c.parent = Some(mid);
        c.start = start + offset;
        c.depth = depth + offset;
        mid
    }

    fn edge_length_closed_or_max(&self, node: NodeId) -> usize {
        match self.nodes[node.0].end {
            EdgeEnd::Open => usize::MAX,
            EdgeEnd::Closed(end) => end - self.nodes[node.0].start,
        }
    }

    /// Record the suffix link of `node`.
    #[inline]
    pub fn set_suffix_link(&mut self, node: NodeId, target: NodeId) {
        self.nodes[node.0].suffix_link = Some(target);
    }

    /// Borrow a node.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Number of nodes including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true: the root always exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Child-table width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Iterate nodes in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_only_arena() {
        let arena = NodeArena::new(4);
        assert_eq!(arena.len(), 1);
        assert!(arena.node(NodeId::ROOT).parent().is_none());
        assert_eq!(arena.child_of(NodeId::ROOT, 3), None);
        assert_eq!(arena.string_depth(NodeId::ROOT, 10), 0);
    }

    #[test]
    fn test_open_edge_tracks_frontier() {
        let mut arena = NodeArena::new(4);
        let leaf = arena.allocate_node(NodeId::ROOT, 2, EdgeEnd::Open);
        arena.set_child(NodeId::ROOT, 1, leaf);

        assert_eq!(arena.child_of(NodeId::ROOT, 1), Some(leaf));
        assert_eq!(arena.edge_length(leaf, 3), 1);
        assert_eq!(arena.edge_length(leaf, 7), 5);
        assert!(arena.node(leaf).is_leaf());
    }

    #[test]
    fn test_closed_edge_clamps_to_frontier() {
        assert_eq!(EdgeEnd::Closed(5).resolve(3), 3);
        assert_eq!(EdgeEnd::Closed(5).resolve(9), 5);
        assert_eq!(EdgeEnd::Open.resolve(9), 9);
    }

    #[test]
    fn test_split_rewires_parent_and_child() {
        let mut arena = NodeArena::new(4);
        let leaf = arena.allocate_node(NodeId::ROOT, 0, EdgeEnd::Open);
        arena.set_child(NodeId::ROOT, 0, leaf);

        let mid = arena.split_edge(leaf, 2, 0, 3);

        assert_eq!(arena.child_of(NodeId::ROOT, 0), Some(mid));
        assert_eq!(arena.child_of(mid, 3), Some(leaf));
        assert_eq!(arena.node(mid).end(), EdgeEnd::Closed(2));
        assert_eq!(arena.node(leaf).start(), 2);
        assert_eq!(arena.node(leaf).parent(), Some(mid));
        assert_eq!(arena.string_depth(mid, 6), 2);
        assert_eq!(arena.string_depth(leaf, 6), 6);

        let below = arena.allocate_node(mid, 5, EdgeEnd::Open);
        assert_eq!(arena.node(below).depth(), 2);
    }
}
