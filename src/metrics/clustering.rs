/*!
# Local Clustering Coefficient

Grounded on the teacher's `metrics::node_metrics::clustering_coefficient` and
`triangles` pair: same O(d²) neighbor-pair scan per node, generalized from a
single-node query into a whole-graph kernel that returns every node's
coefficient at once (`spec.md` §4.5).
*/

use std::collections::HashSet;
use std::hash::Hash;

use crate::core::graph::Graph;
use crate::core::progress::Progress;

/// Local clustering coefficient `C_i = 2 t_i / (d_i (d_i - 1))` for every
/// node, in dense-index order. Nodes with degree `< 2` have `C_i = 0`
/// (`spec.md` §4.5's edge case).
pub fn clustering_coefficient<Id>(graph: &Graph<Id>, progress: &Progress<'_>) -> Vec<f64>
where
    Id: Eq + Hash + Clone,
{
    let n = graph.node_count();
    let mut coefficients = vec![0.0; n];

    for i in graph.node_indices() {
        let neighbors: HashSet<usize> = graph.neighbors(i).iter().map(|&(j, _)| j).collect();
        let degree = neighbors.len();
        if degree < 2 {
            progress.report((i + 1) as f64 / n.max(1) as f64);
            continue;
        }

        let mut triangles = 0usize;
        for &neighbor in &neighbors {
            for &(candidate, _) in graph.neighbors(neighbor) {
                if candidate > neighbor && neighbors.contains(&candidate) {
                    triangles += 1;
                }
            }
        }

        let possible = degree * (degree - 1) / 2;
        coefficients[i] = triangles as f64 / possible as f64;
        progress.report((i + 1) as f64 / n.max(1) as f64);
    }

    coefficients
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::Edge;

    #[test]
    fn triangle_has_coefficient_one() {
        let graph = Graph::build([
            Edge::unit("a", "b"),
            Edge::unit("b", "c"),
            Edge::unit("a", "c"),
        ])
        .unwrap();
        let progress = Progress::none();
        let result = clustering_coefficient(&graph, &progress);
        assert!(result.iter().all(|&c| (c - 1.0).abs() < 1e-12));
    }

    #[test]
    fn degree_below_two_is_zero() {
        let graph = Graph::build([Edge::unit("a", "b")]).unwrap();
        let progress = Progress::none();
        let result = clustering_coefficient(&graph, &progress);
        assert_eq!(result, vec![0.0, 0.0]);
    }

    #[test]
    fn star_hub_has_coefficient_zero() {
        // hub's neighbors (leaves) share no edges among themselves.
        let graph = Graph::build([
            Edge::unit("hub", "a"),
            Edge::unit("hub", "b"),
            Edge::unit("hub", "c"),
        ])
        .unwrap();
        let progress = Progress::none();
        let result = clustering_coefficient(&graph, &progress);
        let hub = graph.index_of(&"hub").unwrap();
        assert_eq!(result[hub], 0.0);
    }
}
