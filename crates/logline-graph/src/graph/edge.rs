//! Edge value types.
//!
//! A node owns its down edges as [`DownEdge`] entries; [`Edge`] is the flattened
//! `(source, target, kind)` view handed out by edge iteration.

use serde::{Deserialize, Serialize};

pub type NodeIndex = usize;

/// How a renderer should draw an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// A plain, visible connector.
    #[default]
    Normal,
    /// A hidden connector standing in for a branch folded into the main line.
    Dotted,
}

impl EdgeKind {
    pub fn is_dotted(self) -> bool {
        matches!(self, EdgeKind::Dotted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DownEdge {
    pub target: NodeIndex,
    pub kind: EdgeKind,
}

impl DownEdge {
    pub fn new(target: NodeIndex, kind: EdgeKind) -> Self {
        Self { target, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new(source: NodeIndex, target: NodeIndex, kind: EdgeKind) -> Self {
        Self {
            source,
            target,
            kind,
        }
    }

    pub fn normal(source: NodeIndex, target: NodeIndex) -> Self {
        Self::new(source, target, EdgeKind::Normal)
    }

    pub fn dotted(source: NodeIndex, target: NodeIndex) -> Self {
        Self::new(source, target, EdgeKind::Dotted)
    }
}
