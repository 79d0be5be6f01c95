#![forbid(unsafe_code)]

//! Commit-graph compaction for log rendering.
//!
//! `logline` takes a commit DAG plus a layout order and folds branches that reconverge into a
//! single linear sequence. A folded branch is joined to the main line through a
//! [`EdgeKind::Dotted`](logline_graph::EdgeKind::Dotted) edge instead of being drawn as a
//! separate column; fork edges that add nothing to reachability are dropped.
//!
//! ```
//! use logline::{IndexOrder, compact, graph::notation};
//!
//! let g = notation::parse("0(1, 2) 1(3) 2(3) 3()").unwrap();
//! let out = compact(&g, &IndexOrder).unwrap();
//! assert_eq!(notation::format(&out), "0(1) 1(2.dot) 2(3) 3()");
//! ```

pub mod compact;
pub mod error;
pub mod layout;
pub mod validate;

pub use logline_graph as graph;

pub use compact::{
    CompactOptions, Compaction, ForkDecision, KeepReason, compact, compact_fork, compact_with,
};
pub use error::{Error, Result};
pub use layout::{IndexOrder, LayoutOrder, RowLayout};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
