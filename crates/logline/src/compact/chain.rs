//! Resolved chains: maximal runs of single-parent, single-child nodes.

use logline_graph::{CommitGraph, NodeIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChainEnd {
    /// The head already has another incoming edge, so no chain starts there.
    Opaque,
    DeadEnd,
    /// The tail still has two or more down edges after its own resolution.
    Fork,
    /// The tail's only child has other parents too.
    Join { merge: NodeIndex },
}

#[derive(Debug, Clone)]
pub(crate) struct Chain {
    pub(crate) nodes: Vec<NodeIndex>,
    pub(crate) end: ChainEnd,
}

impl Chain {
    pub(crate) fn opaque() -> Self {
        Self {
            nodes: Vec::new(),
            end: ChainEnd::Opaque,
        }
    }

    pub(crate) fn tail(&self) -> Option<NodeIndex> {
        self.nodes.last().copied()
    }

    pub(crate) fn contains(&self, v: NodeIndex) -> bool {
        self.nodes.contains(&v)
    }

    /// Whether `target` is a chain member or a direct child of the tail, i.e. reachable from
    /// the head without leaving the chain.
    pub(crate) fn reaches(&self, g: &CommitGraph, target: NodeIndex) -> bool {
        if self.end == ChainEnd::Opaque {
            return false;
        }
        if self.contains(target) {
            return true;
        }
        self.tail()
            .is_some_and(|tail| g.successors(tail).any(|w| w == target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_chains_reach_nothing() {
        let g = CommitGraph::from_edges(2, [(0, 1)]);
        assert!(!Chain::opaque().reaches(&g, 1));
    }

    #[test]
    fn chains_reach_members_and_children_of_the_tail() {
        let g = CommitGraph::from_edges(5, [(0, 1), (1, 2), (1, 3)]);
        let chain = Chain {
            nodes: vec![0, 1],
            end: ChainEnd::Fork,
        };
        assert!(chain.reaches(&g, 1));
        assert!(chain.reaches(&g, 3));
        assert!(!chain.reaches(&g, 4));
        assert_eq!(chain.tail(), Some(1));
    }
}
