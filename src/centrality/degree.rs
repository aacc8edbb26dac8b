/*!
# Degree Centrality

The cheapest of the six kernels: unweighted degree (neighbor count) and
weighted degree (node strength) are already materialized on [`Graph`] at
build time, so this module is a thin, allocation-free read-out rather than
a traversal (`spec.md` §4.2).
*/

use crate::core::graph::Graph;
use std::hash::Hash;

/// Unweighted degree `d_i`: the number of distinct neighbors of each node, in
/// dense-index order. Self-loops do not contribute (`spec.md` §4.2).
pub fn degree<Id>(graph: &Graph<Id>) -> Vec<usize>
where
    Id: Eq + Hash + Clone,
{
    graph.node_indices().map(|i| graph.degree(i)).collect()
}

/// Weighted degree, i.e. node strength `k_i`, in dense-index order.
/// Self-loops contribute twice, matching [`Graph::strength`].
pub fn weighted_degree<Id>(graph: &Graph<Id>) -> Vec<f64>
where
    Id: Eq + Hash + Clone,
{
    graph.node_indices().map(|i| graph.strength(i)).collect()
}
