//! Linear bubble collapsing.
//!
//! Forks are visited in layout order. At a fork the branch whose head comes first in the layout
//! is the primary one; every other branch is compared against the chain that the primary head
//! resolves into:
//!
//! - if the primary chain already reaches the secondary head, the fork edge is redundant and
//!   removed;
//! - if the secondary branch is a simple chain that rejoins the primary chain at its merge node
//!   (and nothing else enters that node), the secondary chain is spliced after the primary one
//!   through a dotted edge;
//! - otherwise the fork is left as it is.
//!
//! Forks met while walking a chain are resolved before the walk continues, so nested bubbles are
//! linearized inside out. Every fork is decided once per invocation. Pending forks live on an
//! explicit stack; nesting depth is bounded by memory, not by the thread stack.

mod chain;

use crate::error::{Error, Result};
use crate::layout::{LayoutOrder, sort_by_layout};
use crate::validate;
use chain::{Chain, ChainEnd};
use logline_graph::{CommitGraph, EdgeKind, NodeIndex};
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct CompactOptions {
    /// Fold simple reconverging branches into the main line.
    pub collapse_bubbles: bool,
    /// Drop fork edges whose target the primary chain already reaches.
    pub drop_redundant_edges: bool,
    /// Longest secondary chain that may be collapsed. Longer branches stay visible.
    pub max_bubble_len: usize,
}

impl Default for CompactOptions {
    fn default() -> Self {
        Self {
            collapse_bubbles: true,
            drop_redundant_edges: true,
            max_bubble_len: 200,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeepReason {
    /// The primary head has other parents besides the fork.
    OpaquePrimary,
    /// The primary chain ends without reaching a merge node.
    PrimaryNotJoined,
    /// The secondary head has other parents besides the fork.
    SecondaryShared,
    /// The secondary branch forks again or dead-ends before merging.
    SecondaryNotSimple,
    /// Both branches merge, but not into the same node.
    DifferentMerge,
    /// The merge node has parents outside the two branches.
    ExtraIncoming,
    BubbleTooLong,
    /// The matching strategy is turned off in [`CompactOptions`].
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum ForkDecision {
    /// `primary_tail -> secondary_head` became dotted; `fork -> secondary_head` and
    /// `primary_tail -> merge` are gone.
    Collapsed {
        fork: NodeIndex,
        primary_tail: NodeIndex,
        secondary_head: NodeIndex,
        secondary_tail: NodeIndex,
        merge: NodeIndex,
    },
    /// `fork -> target` was removed.
    Redundant { fork: NodeIndex, target: NodeIndex },
    /// `fork -> target` stays visible.
    Kept {
        fork: NodeIndex,
        target: NodeIndex,
        reason: KeepReason,
    },
}

impl ForkDecision {
    pub fn fork(&self) -> NodeIndex {
        match *self {
            ForkDecision::Collapsed { fork, .. }
            | ForkDecision::Redundant { fork, .. }
            | ForkDecision::Kept { fork, .. } => fork,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Compaction {
    pub graph: CommitGraph,
    /// Decisions in the order they were taken.
    pub decisions: Vec<ForkDecision>,
}

impl Compaction {
    pub fn collapsed(&self) -> impl Iterator<Item = &ForkDecision> {
        self.decisions
            .iter()
            .filter(|d| matches!(d, ForkDecision::Collapsed { .. }))
    }

    pub fn is_unchanged(&self) -> bool {
        self.decisions
            .iter()
            .all(|d| matches!(d, ForkDecision::Kept { .. }))
    }
}

/// Compacts `g` with the default options.
pub fn compact<L>(g: &CommitGraph, layout: &L) -> Result<CommitGraph>
where
    L: LayoutOrder + ?Sized,
{
    Ok(compact_with(g, layout, &CompactOptions::default())?.graph)
}

pub fn compact_with<L>(g: &CommitGraph, layout: &L, options: &CompactOptions) -> Result<Compaction>
where
    L: LayoutOrder + ?Sized,
{
    validate::check(g, layout)?;
    let _span = tracing::debug_span!(
        "compact",
        nodes = g.node_count(),
        edges = g.edge_count()
    )
    .entered();

    let mut order: Vec<NodeIndex> = g.nodes().collect();
    sort_by_layout(&mut order, layout);

    let mut compactor = Compactor::new(g.clone(), layout, options);
    for v in order {
        compactor.resolve(v);
    }
    Ok(compactor.finish())
}

/// Resolves only `fork` (plus the forks its branches run into), leaving the rest of the graph
/// untouched.
pub fn compact_fork<L>(
    g: &CommitGraph,
    layout: &L,
    fork: NodeIndex,
    options: &CompactOptions,
) -> Result<Compaction>
where
    L: LayoutOrder + ?Sized,
{
    if !g.has_node(fork) {
        return Err(Error::UnknownNode { node: fork });
    }
    validate::check(g, layout)?;
    let _span = tracing::debug_span!("compact_fork", fork).entered();

    let mut compactor = Compactor::new(g.clone(), layout, options);
    compactor.resolve(fork);
    Ok(compactor.finish())
}

/// A walk ran into a fork that has not been decided yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Unresolved {
    fork: NodeIndex,
}

/// A fork whose secondary targets are being decided, `next` being the first one still open.
#[derive(Debug)]
struct ForkTask {
    fork: NodeIndex,
    primary: NodeIndex,
    secondaries: Vec<NodeIndex>,
    next: usize,
}

struct Compactor<'a, L: ?Sized> {
    graph: CommitGraph,
    layout: &'a L,
    options: &'a CompactOptions,
    resolved: Vec<bool>,
    decisions: Vec<ForkDecision>,
}

impl<'a, L> Compactor<'a, L>
where
    L: LayoutOrder + ?Sized,
{
    fn new(graph: CommitGraph, layout: &'a L, options: &'a CompactOptions) -> Self {
        let resolved = vec![false; graph.node_count()];
        Self {
            graph,
            layout,
            options,
            resolved,
            decisions: Vec::new(),
        }
    }

    fn finish(self) -> Compaction {
        Compaction {
            graph: self.graph,
            decisions: self.decisions,
        }
    }

    fn is_pending_fork(&self, v: NodeIndex) -> bool {
        self.graph.out_degree(v) > 1 && self.resolved.get(v).is_some_and(|done| !done)
    }

    /// Decides `root` and every fork its branches run into. A task that meets an undecided fork
    /// is parked until that fork is done, then retried from the same secondary target.
    fn resolve(&mut self, root: NodeIndex) {
        if !self.is_pending_fork(root) {
            return;
        }
        let mut pending = vec![self.begin(root)];
        while let Some(task) = pending.last_mut() {
            match self.advance(task) {
                Ok(()) => {
                    pending.pop();
                }
                Err(Unresolved { fork }) => {
                    trace!(fork, depth = pending.len(), "fork parked behind a nested fork");
                    pending.push(self.begin(fork));
                }
            }
        }
    }

    fn begin(&mut self, fork: NodeIndex) -> ForkTask {
        if let Some(done) = self.resolved.get_mut(fork) {
            *done = true;
        }
        let mut targets: Vec<NodeIndex> = self.graph.successors(fork).collect();
        sort_by_layout(&mut targets, self.layout);
        let (primary, secondaries) = match targets.split_first() {
            Some((&primary, rest)) => (primary, rest.to_vec()),
            None => (fork, Vec::new()),
        };
        ForkTask {
            fork,
            primary,
            secondaries,
            next: 0,
        }
    }

    fn advance(&mut self, task: &mut ForkTask) -> std::result::Result<(), Unresolved> {
        while let Some(&secondary) = task.secondaries.get(task.next) {
            if self.graph.has_edge(task.fork, secondary) {
                let decision = self.resolve_pair(task.fork, task.primary, secondary)?;
                debug!(
                    fork = task.fork,
                    primary = task.primary,
                    secondary,
                    ?decision,
                    "fork resolved"
                );
                self.decisions.push(decision);
            }
            task.next += 1;
        }
        Ok(())
    }

    /// Nothing is mutated before both walks succeed, so a pair interrupted by an undecided fork
    /// can be retried from scratch.
    fn resolve_pair(
        &mut self,
        fork: NodeIndex,
        primary_head: NodeIndex,
        secondary_head: NodeIndex,
    ) -> std::result::Result<ForkDecision, Unresolved> {
        let keep = |reason| -> std::result::Result<ForkDecision, Unresolved> {
            Ok(ForkDecision::Kept {
                fork,
                target: secondary_head,
                reason,
            })
        };

        let primary = self.walk(primary_head)?;
        if primary.end == ChainEnd::Opaque {
            return keep(KeepReason::OpaquePrimary);
        }

        if primary.reaches(&self.graph, secondary_head) {
            if !self.options.drop_redundant_edges {
                return keep(KeepReason::Disabled);
            }
            self.graph.remove_edge(fork, secondary_head);
            return Ok(ForkDecision::Redundant {
                fork,
                target: secondary_head,
            });
        }

        if !self.options.collapse_bubbles {
            return keep(KeepReason::Disabled);
        }
        let ChainEnd::Join { merge } = primary.end else {
            return keep(KeepReason::PrimaryNotJoined);
        };

        let secondary = self.walk(secondary_head)?;
        match secondary.end {
            ChainEnd::Opaque => return keep(KeepReason::SecondaryShared),
            ChainEnd::DeadEnd | ChainEnd::Fork => return keep(KeepReason::SecondaryNotSimple),
            ChainEnd::Join { merge: other } if other != merge => {
                return keep(KeepReason::DifferentMerge);
            }
            ChainEnd::Join { .. } => {}
        }
        if self.graph.in_degree(merge) != 2 {
            return keep(KeepReason::ExtraIncoming);
        }
        if secondary.nodes.len() > self.options.max_bubble_len {
            return keep(KeepReason::BubbleTooLong);
        }

        let primary_nodes: FxHashSet<NodeIndex> = primary.nodes.iter().copied().collect();
        if secondary.nodes.iter().any(|v| primary_nodes.contains(v)) {
            return keep(KeepReason::SecondaryNotSimple);
        }
        let (Some(primary_tail), Some(secondary_tail)) = (primary.tail(), secondary.tail()) else {
            return keep(KeepReason::SecondaryNotSimple);
        };

        self.graph.remove_edge(fork, secondary_head);
        self.graph
            .replace_edge(primary_tail, merge, secondary_head, EdgeKind::Dotted);
        Ok(ForkDecision::Collapsed {
            fork,
            primary_tail,
            secondary_head,
            secondary_tail,
            merge,
        })
    }

    /// Follows single down edges from `head`. Stops with [`Unresolved`] at the first fork that
    /// still has to be decided; the graph is left untouched.
    fn walk(&self, head: NodeIndex) -> std::result::Result<Chain, Unresolved> {
        if self.graph.in_degree(head) > 1 {
            trace!(head, "chain head is a join");
            return Ok(Chain::opaque());
        }

        let mut nodes = vec![head];
        let mut cur = head;
        let end = loop {
            if self.is_pending_fork(cur) {
                return Err(Unresolved { fork: cur });
            }
            match self.graph.down_edges(cur) {
                [] => break ChainEnd::DeadEnd,
                [only] => {
                    let next = only.target;
                    if self.graph.in_degree(next) > 1 {
                        break ChainEnd::Join { merge: next };
                    }
                    nodes.push(next);
                    cur = next;
                }
                _ => break ChainEnd::Fork,
            }
        };
        trace!(head, len = nodes.len(), ?end, "chain walked");
        Ok(Chain { nodes, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::IndexOrder;

    fn options() -> CompactOptions {
        CompactOptions::default()
    }

    #[test]
    fn walk_stops_at_join_and_reports_merge() {
        let g = CommitGraph::from_edges(4, [(0, 1), (1, 3), (0, 2), (2, 3)]);
        let opts = options();
        let c = Compactor::new(g, &IndexOrder, &opts);
        let chain = c.walk(1).unwrap();
        assert_eq!(chain.nodes, vec![1]);
        assert_eq!(chain.end, ChainEnd::Join { merge: 3 });
    }

    #[test]
    fn walk_treats_shared_head_as_opaque() {
        let g = CommitGraph::from_edges(3, [(0, 2), (1, 2)]);
        let opts = options();
        let c = Compactor::new(g, &IndexOrder, &opts);
        assert_eq!(c.walk(2).unwrap().end, ChainEnd::Opaque);
    }

    #[test]
    fn walk_waits_for_undecided_forks_then_continues_through_them() {
        // 1 forks into a simple bubble (2 | 3) that merges at 4.
        let g = CommitGraph::from_edges(6, [(0, 1), (1, 2), (1, 3), (2, 4), (3, 4), (4, 5)]);
        let opts = options();
        let mut c = Compactor::new(g, &IndexOrder, &opts);
        assert_eq!(c.walk(0).unwrap_err(), Unresolved { fork: 1 });
        assert!(c.decisions.is_empty());

        c.resolve(1);
        let chain = c.walk(0).unwrap();
        assert_eq!(chain.nodes, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(chain.end, ChainEnd::DeadEnd);
        assert!(c.resolved[1]);
    }

    #[test]
    fn parked_forks_resume_at_the_open_secondary() {
        // Fork 0 has three targets; deciding 0 -> 2 first needs the nested fork at 1.
        let g = CommitGraph::from_edges(
            7,
            [(0, 1), (0, 2), (0, 3), (1, 4), (1, 5), (4, 6), (5, 6), (2, 6), (3, 6)],
        );
        let opts = options();
        let mut c = Compactor::new(g, &IndexOrder, &opts);
        c.resolve(0);
        assert_eq!(c.decisions.iter().filter(|d| d.fork() == 0).count(), 2);
        assert_eq!(c.decisions.iter().filter(|d| d.fork() == 1).count(), 1);
        assert_eq!(c.decisions[0].fork(), 1);
    }

    #[test]
    fn forks_are_resolved_once() {
        let g = CommitGraph::from_edges(3, [(0, 1), (0, 2)]);
        let opts = options();
        let mut c = Compactor::new(g, &IndexOrder, &opts);
        c.resolve(0);
        c.resolve(0);
        assert_eq!(c.decisions.len(), 1);
    }
}
