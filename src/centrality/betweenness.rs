/*!
# Betweenness Centrality

Brandes' algorithm, grounded on the teacher's `centrality::betweenness`
BFS-layering and σ/δ accumulation, adapted to the engine's own
[`Graph`] instead of `BaseGraph`. Two adaptations on top of the teacher's
version:

1. The teacher's Brandes pass is written for directed graphs: summing
   dependencies over every node as a source counts each undirected shortest
   path twice, once from each endpoint. Two divisions are applied to the raw
   accumulation: `/2` to undo that double count, and `/(n-1)(n-2)` to bring
   the result into `[0, 1]`. A path of four nodes (`a-b-c-d`) is the
   reference case: the raw accumulation at `b` and `c` is `4`, halved to the
   conventional single-counted betweenness of `2`, normalized to `1/3`.
2. Unweighted BFS shortest paths are used throughout (the engine does not do
   weighted shortest-path betweenness).
*/

use std::collections::VecDeque;
use std::hash::Hash;

use crate::core::graph::Graph;
use crate::core::progress::Progress;

/// Normalized betweenness centrality for every node, in dense-index order.
pub fn betweenness_centrality<Id>(graph: &Graph<Id>, progress: &Progress<'_>) -> Vec<f64>
where
    Id: Eq + Hash + Clone,
{
    let n = graph.node_count();
    let mut centrality = vec![0.0; n];
    if n < 3 {
        return centrality;
    }

    for s in graph.node_indices() {
        let mut stack = Vec::with_capacity(n);
        let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0_f64; n];
        let mut dist = vec![-1_i64; n];
        let mut delta = vec![0.0_f64; n];

        sigma[s] = 1.0;
        dist[s] = 0;

        let mut queue = VecDeque::new();
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &(w, _weight) in graph.neighbors(v) {
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    preds[w].push(v);
                }
            }
        }

        while let Some(w) = stack.pop() {
            for &v in &preds[w] {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }
            if w != s {
                centrality[w] += delta[w];
            }
        }

        progress.report((s + 1) as f64 / n as f64);
    }

    // Raw sums are double the conventional single-counted value (each
    // undirected shortest path is seen once from each endpoint), so halve
    // first, then normalize into [0, 1].
    let norm = 1.0 / (2.0 * ((n - 1) * (n - 2)) as f64);
    for value in &mut centrality {
        *value *= norm;
    }
    centrality
}
