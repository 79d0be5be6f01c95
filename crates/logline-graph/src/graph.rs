//! Commit-graph container.
//!
//! Nodes are dense indices `0..node_count`. Every node keeps its down edges in insertion order
//! plus the list of nodes pointing at it. Both lists are updated eagerly by every mutation, so
//! `in_degree` / `predecessors` never scan the edge set.

pub mod alg;
mod edge;

pub use edge::{DownEdge, Edge, EdgeKind, NodeIndex};

#[derive(Debug, Clone, Default)]
struct NodeEntry {
    down: Vec<DownEdge>,
    up: Vec<NodeIndex>,
}

#[derive(Debug, Clone, Default)]
pub struct CommitGraph {
    nodes: Vec<NodeEntry>,
    edge_count: usize,
}

impl PartialEq for CommitGraph {
    fn eq(&self, other: &Self) -> bool {
        // Predecessor order depends on mutation history; compare down adjacency only.
        self.nodes.len() == other.nodes.len()
            && self
                .nodes
                .iter()
                .zip(&other.nodes)
                .all(|(a, b)| a.down == b.down)
    }
}

impl Eq for CommitGraph {}

impl CommitGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nodes(node_count: usize) -> Self {
        Self {
            nodes: vec![NodeEntry::default(); node_count],
            edge_count: 0,
        }
    }

    /// Builds a graph from `(source, target)` pairs; every edge is [`EdgeKind::Normal`].
    pub fn from_edges(
        node_count: usize,
        edges: impl IntoIterator<Item = (NodeIndex, NodeIndex)>,
    ) -> Self {
        let mut g = Self::with_nodes(node_count);
        for (v, w) in edges {
            g.set_edge(v, w);
        }
        g
    }

    pub fn ensure_node(&mut self, ix: NodeIndex) -> &mut Self {
        if ix >= self.nodes.len() {
            self.nodes.resize_with(ix + 1, NodeEntry::default);
        }
        self
    }

    pub fn has_node(&self, ix: NodeIndex) -> bool {
        ix < self.nodes.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> std::ops::Range<NodeIndex> {
        0..self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes.iter().enumerate().flat_map(|(v, n)| {
            n.down
                .iter()
                .map(move |e| Edge::new(v, e.target, e.kind))
        })
    }

    pub fn set_edge(&mut self, v: NodeIndex, w: NodeIndex) -> &mut Self {
        self.set_edge_with_kind(v, w, EdgeKind::Normal)
    }

    /// Adds `v -> w`. If the edge already exists only its kind is updated, in place.
    pub fn set_edge_with_kind(&mut self, v: NodeIndex, w: NodeIndex, kind: EdgeKind) -> &mut Self {
        self.ensure_node(v);
        self.ensure_node(w);

        if let Some(existing) = self.nodes[v].down.iter_mut().find(|e| e.target == w) {
            existing.kind = kind;
            return self;
        }

        self.nodes[v].down.push(DownEdge::new(w, kind));
        self.nodes[w].up.push(v);
        self.edge_count += 1;
        self
    }

    pub fn set_path(&mut self, nodes: &[NodeIndex]) -> &mut Self {
        for pair in nodes.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }

    pub fn has_edge(&self, v: NodeIndex, w: NodeIndex) -> bool {
        self.edge_kind(v, w).is_some()
    }

    pub fn edge_kind(&self, v: NodeIndex, w: NodeIndex) -> Option<EdgeKind> {
        self.down_edges(v)
            .iter()
            .find(|e| e.target == w)
            .map(|e| e.kind)
    }

    pub fn remove_edge(&mut self, v: NodeIndex, w: NodeIndex) -> bool {
        let Some(pos) = self.down_position(v, w) else {
            return false;
        };
        self.nodes[v].down.remove(pos);
        self.unlink_up(v, w);
        self.edge_count -= 1;
        true
    }

    /// Rewires `v -> old` into `v -> new` with `kind`, keeping the edge's slot in `v`'s
    /// adjacency. Returns `false` (and changes nothing) if `v -> old` does not exist.
    ///
    /// If `v -> new` already exists the two collapse into the rewired slot.
    pub fn replace_edge(
        &mut self,
        v: NodeIndex,
        old: NodeIndex,
        new: NodeIndex,
        kind: EdgeKind,
    ) -> bool {
        let Some(pos) = self.down_position(v, old) else {
            return false;
        };
        if old == new {
            self.nodes[v].down[pos].kind = kind;
            return true;
        }
        self.ensure_node(new);
        if let Some(dup) = self.down_position(v, new) {
            self.nodes[v].down.remove(dup);
            self.unlink_up(v, new);
            self.edge_count -= 1;
        }
        let Some(pos) = self.down_position(v, old) else {
            return false;
        };
        self.nodes[v].down[pos] = DownEdge::new(new, kind);
        self.unlink_up(v, old);
        self.nodes[new].up.push(v);
        true
    }

    pub fn down_edges(&self, v: NodeIndex) -> &[DownEdge] {
        self.nodes.get(v).map_or(&[], |n| n.down.as_slice())
    }

    pub fn successors(&self, v: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.down_edges(v).iter().map(|e| e.target)
    }

    pub fn predecessors(&self, v: NodeIndex) -> &[NodeIndex] {
        self.nodes.get(v).map_or(&[], |n| n.up.as_slice())
    }

    pub fn out_degree(&self, v: NodeIndex) -> usize {
        self.down_edges(v).len()
    }

    pub fn in_degree(&self, v: NodeIndex) -> usize {
        self.predecessors(v).len()
    }

    fn down_position(&self, v: NodeIndex, w: NodeIndex) -> Option<usize> {
        self.down_edges(v).iter().position(|e| e.target == w)
    }

    fn unlink_up(&mut self, v: NodeIndex, w: NodeIndex) {
        let up = &mut self.nodes[w].up;
        if let Some(pos) = up.iter().position(|&u| u == v) {
            up.remove(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_edge_is_idempotent_and_updates_kind() {
        let mut g = CommitGraph::new();
        g.set_edge(0, 1);
        g.set_edge_with_kind(0, 1, EdgeKind::Dotted);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.in_degree(1), 1);
        assert_eq!(g.edge_kind(0, 1), Some(EdgeKind::Dotted));
    }

    #[test]
    fn replace_edge_keeps_adjacency_slot() {
        let mut g = CommitGraph::from_edges(4, [(0, 1), (0, 2)]);
        assert!(g.replace_edge(0, 1, 3, EdgeKind::Dotted));
        assert_eq!(
            g.down_edges(0),
            &[
                DownEdge::new(3, EdgeKind::Dotted),
                DownEdge::new(2, EdgeKind::Normal)
            ]
        );
        assert_eq!(g.in_degree(1), 0);
        assert_eq!(g.predecessors(3), &[0]);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn replace_edge_onto_existing_target_merges() {
        let mut g = CommitGraph::from_edges(3, [(0, 1), (0, 2)]);
        assert!(g.replace_edge(0, 1, 2, EdgeKind::Normal));
        assert_eq!(g.down_edges(0), &[DownEdge::new(2, EdgeKind::Normal)]);
        assert_eq!(g.predecessors(2), &[0]);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn replace_missing_edge_is_a_no_op() {
        let mut g = CommitGraph::from_edges(3, [(0, 1)]);
        assert!(!g.replace_edge(0, 2, 1, EdgeKind::Dotted));
        assert_eq!(g.edge_kind(0, 1), Some(EdgeKind::Normal));
    }
}
