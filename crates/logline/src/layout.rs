//! Layout-order capability consumed by the compactor.
//!
//! The compactor never computes a layout. It only asks which of two nodes comes first, so any
//! total order consistent with edge direction (every edge points forward) can be plugged in.

use crate::error::{Error, Result};
use logline_graph::NodeIndex;
use std::cmp::Ordering;

pub trait LayoutOrder {
    fn compare(&self, a: NodeIndex, b: NodeIndex) -> Ordering;

    /// Number of nodes the order is defined for, when it is backed by a finite table.
    fn covered_nodes(&self) -> Option<usize> {
        None
    }
}

impl<F> LayoutOrder for F
where
    F: Fn(NodeIndex, NodeIndex) -> Ordering,
{
    fn compare(&self, a: NodeIndex, b: NodeIndex) -> Ordering {
        self(a, b)
    }
}

/// Orders nodes by their index.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexOrder;

impl LayoutOrder for IndexOrder {
    fn compare(&self, a: NodeIndex, b: NodeIndex) -> Ordering {
        a.cmp(&b)
    }
}

/// An explicit row assignment: a permutation of `0..n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    positions: Vec<usize>,
}

impl RowLayout {
    /// `rows[i]` is the node drawn on row `i`.
    pub fn from_rows(rows: &[NodeIndex]) -> Result<Self> {
        let mut positions: Vec<Option<usize>> = vec![None; rows.len()];
        for (row, &node) in rows.iter().enumerate() {
            let Some(slot) = positions.get_mut(node) else {
                return Err(Error::InvalidLayout {
                    message: format!("node {node} is out of range for {} rows", rows.len()),
                });
            };
            if slot.replace(row).is_some() {
                return Err(Error::InvalidLayout {
                    message: format!("node {node} appears on more than one row"),
                });
            }
        }
        // `rows.len()` distinct in-range nodes fill every slot.
        Ok(Self {
            positions: positions.into_iter().flatten().collect(),
        })
    }

    /// `positions[node]` is the row of `node`.
    pub fn from_positions(positions: Vec<usize>) -> Result<Self> {
        let mut taken = vec![false; positions.len()];
        for (node, &row) in positions.iter().enumerate() {
            match taken.get_mut(row) {
                Some(seen) if !*seen => *seen = true,
                Some(_) => {
                    return Err(Error::InvalidLayout {
                        message: format!("row {row} is assigned to more than one node"),
                    });
                }
                None => {
                    return Err(Error::InvalidLayout {
                        message: format!("row {row} of node {node} is out of range"),
                    });
                }
            }
        }
        Ok(Self { positions })
    }

    pub fn position(&self, node: NodeIndex) -> Option<usize> {
        self.positions.get(node).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl LayoutOrder for RowLayout {
    fn compare(&self, a: NodeIndex, b: NodeIndex) -> Ordering {
        self.position(a).cmp(&self.position(b))
    }

    fn covered_nodes(&self) -> Option<usize> {
        Some(self.positions.len())
    }
}

/// Sorts `nodes` into layout order. Ties keep their relative order.
pub fn sort_by_layout<L>(nodes: &mut [NodeIndex], layout: &L)
where
    L: LayoutOrder + ?Sized,
{
    nodes.sort_by(|&a, &b| layout.compare(a, b));
}
