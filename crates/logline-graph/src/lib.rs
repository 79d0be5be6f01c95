//! Commit-graph container APIs used by `logline`.
//!
//! Nodes live in an arena addressed by [`NodeIndex`]; each node owns its down edges (toward
//! ancestors in history). Predecessor lists are kept in sync so in-degree queries are cheap.
//!
//! This crate contains the core [`CommitGraph`] container, a small set of traversal helpers
//! under [`alg`], and the compact text [`notation`] used by tests and the CLI.

mod graph;
pub mod notation;

pub use graph::alg;
pub use graph::{CommitGraph, DownEdge, Edge, EdgeKind, NodeIndex};
