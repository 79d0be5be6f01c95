use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use logline::graph::CommitGraph;
use logline::{CompactOptions, IndexOrder, compact_with};
use std::hint::black_box;
use std::time::Duration;

/// `bubbles` consecutive forks, each with two branches of `branch_len` commits that merge again.
/// Every `shortcut_every`-th fork also gets an edge straight to its merge node.
fn build_history(bubbles: usize, branch_len: usize, shortcut_every: usize) -> CommitGraph {
    let mut g = CommitGraph::new();
    let mut fork = 0usize;
    for i in 0..bubbles {
        let left_head = fork + 1;
        let right_head = left_head + branch_len;
        let merge = right_head + branch_len;

        for (head, tail) in [(left_head, right_head - 1), (right_head, merge - 1)] {
            g.set_edge(fork, head);
            for v in head..tail {
                g.set_edge(v, v + 1);
            }
            g.set_edge(tail, merge);
        }
        if shortcut_every > 0 && i % shortcut_every == 0 {
            g.set_edge(fork, merge);
        }
        fork = merge;
    }
    g
}

fn bench_compact(c: &mut Criterion) {
    let mut group = c.benchmark_group("compact");
    group.measurement_time(Duration::from_secs(10));

    let cases = [
        ("bubbles_100_len_3", 100usize, 3usize, 0usize),
        ("bubbles_1000_len_5", 1000, 5, 0),
        ("bubbles_1000_len_5_shortcuts", 1000, 5, 7),
    ];

    let options = CompactOptions::default();
    for (name, bubbles, branch_len, shortcut_every) in cases {
        let g = build_history(bubbles, branch_len, shortcut_every);
        group.bench_with_input(BenchmarkId::new("compact_with", name), &g, |b, g| {
            b.iter(|| {
                let out = compact_with(black_box(g), &IndexOrder, &options)
                    .expect("bench graphs are well-formed");
                black_box(out.decisions.len());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compact);
criterion_main!(benches);
