/*!
# Modularity

`Q = (1/2m) Σ_ij [A_ij − k_i k_j / 2m] δ(c_i, c_j)`, computed directly from a
[`Graph`]'s adjacency and strength data rather than by materializing the
adjacency matrix `A` (`spec.md` §4.7).
*/

use std::hash::Hash;

use crate::core::graph::Graph;

/// Computes the modularity `Q` of a partition, where `communities[i]` is the
/// community label of node `i`. Returns `0.0` for the empty graph or a graph
/// with no edges, matching `spec.md` §4.7's edge case.
pub fn modularity<Id>(graph: &Graph<Id>, communities: &[usize]) -> f64
where
    Id: Eq + Hash + Clone,
{
    let m = graph.total_weight();
    if m <= 0.0 {
        return 0.0;
    }

    let mut internal_weight = 0.0;
    for i in graph.node_indices() {
        let ci = communities[i];
        internal_weight += graph.self_loop_weight(i);
        for &(j, weight) in graph.neighbors(i) {
            if j > i && communities[j] == ci {
                internal_weight += weight;
            }
        }
    }

    let mut degree_sum = vec![0.0; communities.iter().copied().max().map_or(0, |m| m + 1)];
    for i in graph.node_indices() {
        degree_sum[communities[i]] += graph.strength(i);
    }
    let expected: f64 = degree_sum.iter().map(|k| k * k).sum::<f64>() / (4.0 * m * m);

    internal_weight / m - expected
}
