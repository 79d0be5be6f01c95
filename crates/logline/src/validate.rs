//! Preconditions of the compactor.
//!
//! The input must be acyclic and every edge must point forward in the layout order. Both are
//! contract violations: they are reported as errors before any rewriting happens.

use crate::error::{Error, Result};
use crate::layout::LayoutOrder;
use logline_graph::{CommitGraph, alg};
use std::cmp::Ordering;

pub fn check<L>(g: &CommitGraph, layout: &L) -> Result<()>
where
    L: LayoutOrder + ?Sized,
{
    if let Some(nodes) = alg::find_cycles(g).into_iter().next() {
        return Err(Error::Cycle { nodes });
    }

    if let Some(covered) = layout.covered_nodes() {
        if covered != g.node_count() {
            return Err(Error::LayoutSize {
                layout: covered,
                graph: g.node_count(),
            });
        }
    }

    for e in g.edges() {
        if layout.compare(e.source, e.target) != Ordering::Less {
            return Err(Error::BackwardEdge {
                from: e.source,
                to: e.target,
            });
        }
    }
    Ok(())
}
