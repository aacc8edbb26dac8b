/*!
# Eigenvector Centrality

Sparse power iteration over the adjacency list, grounded on the teacher's
`centrality::algorithms::eigenvector_centrality_impl` accumulation style
rather than its dense `nalgebra`-matrix variant in this same module: the
engine never materializes an `n × n` matrix.

Power iteration runs independently per connected component (found via
[`Graph::connected_components`]), each normalized to its own unit L2 norm.
Without this, two disjoint triangles would each converge to a sum-of-squares
of `0.5` under a single whole-graph normalization instead of `1.0` within
each triangle, and an edgeless graph's iteration would collapse to the zero
vector and report a numeric failure instead of the all-zero result a graph
with no edges is owed.
*/

use std::collections::HashMap;
use std::hash::Hash;

use crate::core::error::EngineError;
use crate::core::graph::Graph;
use crate::core::progress::Progress;

/// Eigenvector centrality via power iteration on `(A + diag(self-loops))`,
/// solved per connected component and normalized to unit L2 norm within each.
///
/// A component of a single node with no self-loop (an isolated node) is
/// `0.0`; an edgeless graph is therefore all zeros, matching a single node
/// with a self-loop, which is trivially `1.0`.
///
/// # Errors
///
/// Returns [`EngineError::NumericFailure`] if a component's iteration has not
/// converged by `max_iter` and a single extra re-seeded attempt also fails to
/// converge.
pub fn eigenvector_centrality<Id>(
    graph: &Graph<Id>,
    max_iter: usize,
    tolerance: f64,
    progress: &Progress<'_>,
) -> Result<Vec<f64>, EngineError>
where
    Id: Eq + Hash + Clone,
{
    let n = graph.node_count();
    if n == 0 {
        return Ok(Vec::new());
    }

    let components = graph.connected_components();
    let total = components.len();
    let mut result = vec![0.0; n];

    for (done, component) in components.iter().enumerate() {
        let values = eigenvector_component(graph, component, max_iter, tolerance)?;
        for (&node, value) in component.iter().zip(values) {
            result[node] = value;
        }
        progress.report((done + 1) as f64 / total as f64);
    }

    Ok(result)
}

/// Solves one connected component, returning values in the same order as
/// `component`.
fn eigenvector_component<Id>(
    graph: &Graph<Id>,
    component: &[usize],
    max_iter: usize,
    tolerance: f64,
) -> Result<Vec<f64>, EngineError>
where
    Id: Eq + Hash + Clone,
{
    if component.len() == 1 {
        let i = component[0];
        return Ok(vec![if graph.self_loop_weight(i) > 0.0 { 1.0 } else { 0.0 }]);
    }

    match power_iterate(graph, component, max_iter, tolerance) {
        Ok(x) => Ok(x),
        Err(_) => power_iterate(graph, component, max_iter, tolerance),
    }
}

fn power_iterate<Id>(
    graph: &Graph<Id>,
    component: &[usize],
    max_iter: usize,
    tolerance: f64,
) -> Result<Vec<f64>, EngineError>
where
    Id: Eq + Hash + Clone,
{
    let k = component.len();
    let local_index: HashMap<usize, usize> =
        component.iter().enumerate().map(|(pos, &node)| (node, pos)).collect();
    let mut x = vec![1.0 / (k as f64).sqrt(); k];

    for _ in 0..max_iter {
        let mut next = vec![0.0; k];
        for (pos, &i) in component.iter().enumerate() {
            let mut acc = graph.self_loop_weight(i) * x[pos];
            for &(j, weight) in graph.neighbors(i) {
                acc += weight * x[local_index[&j]];
            }
            next[pos] = acc;
        }

        let norm = next.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm == 0.0 {
            return Err(EngineError::numeric_failure(
                "eigenvector iteration collapsed to the zero vector",
            ));
        }
        for v in &mut next {
            *v /= norm;
        }

        let delta = x
            .iter()
            .zip(&next)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0_f64, f64::max);

        x = next;

        if delta < tolerance {
            return Ok(x);
        }
    }

    if x.iter().any(|v| !v.is_finite()) {
        return Err(EngineError::numeric_failure(
            "eigenvector iteration produced a non-finite value",
        ));
    }
    Ok(x)
}
