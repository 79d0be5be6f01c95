//! Traversal helpers over [`CommitGraph`](super::CommitGraph).

use super::{CommitGraph, NodeIndex};
use rustc_hash::FxBuildHasher;

type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// Every node reachable from `v` through one or more edges.
pub fn reachable_from(g: &CommitGraph, v: NodeIndex) -> HashSet<NodeIndex> {
    let mut seen: HashSet<NodeIndex> = HashSet::default();
    let mut stack: Vec<NodeIndex> = g.successors(v).collect();
    while let Some(w) = stack.pop() {
        if seen.insert(w) {
            stack.extend(g.successors(w));
        }
    }
    seen
}

pub fn is_reachable(g: &CommitGraph, from: NodeIndex, to: NodeIndex) -> bool {
    let mut seen: HashSet<NodeIndex> = HashSet::default();
    let mut stack: Vec<NodeIndex> = g.successors(from).collect();
    while let Some(w) = stack.pop() {
        if w == to {
            return true;
        }
        if seen.insert(w) {
            stack.extend(g.successors(w));
        }
    }
    false
}

/// Strongly connected components with more than one node, plus self-loops.
///
/// Each cycle is sorted by node index; cycles are ordered by their smallest node. Tarjan's
/// algorithm runs on an explicit call stack, so long histories do not exhaust the thread stack.
pub fn find_cycles(g: &CommitGraph) -> Vec<Vec<NodeIndex>> {
    struct Frame {
        v: NodeIndex,
        next_child: usize,
    }

    let n = g.node_count();
    let mut index = 0usize;
    let mut indices: Vec<Option<usize>> = vec![None; n];
    let mut lowlink: Vec<usize> = vec![0; n];
    let mut on_stack: Vec<bool> = vec![false; n];
    let mut stack: Vec<NodeIndex> = Vec::new();
    let mut sccs: Vec<Vec<NodeIndex>> = Vec::new();
    let mut calls: Vec<Frame> = Vec::new();

    for root in g.nodes() {
        if indices[root].is_some() {
            continue;
        }
        indices[root] = Some(index);
        lowlink[root] = index;
        index += 1;
        stack.push(root);
        on_stack[root] = true;
        calls.push(Frame {
            v: root,
            next_child: 0,
        });

        while let Some(frame) = calls.last_mut() {
            let v = frame.v;
            if let Some(edge) = g.down_edges(v).get(frame.next_child) {
                frame.next_child += 1;
                let w = edge.target;
                match indices[w] {
                    None => {
                        indices[w] = Some(index);
                        lowlink[w] = index;
                        index += 1;
                        stack.push(w);
                        on_stack[w] = true;
                        calls.push(Frame {
                            v: w,
                            next_child: 0,
                        });
                    }
                    Some(w_idx) if on_stack[w] => {
                        lowlink[v] = lowlink[v].min(w_idx);
                    }
                    Some(_) => {}
                }
                continue;
            }

            calls.pop();
            if let Some(parent) = calls.last() {
                lowlink[parent.v] = lowlink[parent.v].min(lowlink[v]);
            }
            if Some(lowlink[v]) == indices[v] {
                let mut scc: Vec<NodeIndex> = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    scc.push(w);
                    if w == v {
                        break;
                    }
                }
                sccs.push(scc);
            }
        }
    }

    let mut cycles: Vec<Vec<NodeIndex>> = Vec::new();
    for mut scc in sccs {
        if scc.len() > 1 {
            scc.sort_unstable();
            cycles.push(scc);
        } else if let &[v] = scc.as_slice() {
            if g.has_edge(v, v) {
                cycles.push(vec![v]);
            }
        }
    }

    cycles.sort_by(|a, b| a.first().cmp(&b.first()));
    cycles
}
