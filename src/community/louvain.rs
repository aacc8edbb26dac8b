/*!
# Louvain Community Detection

Two-phase Louvain, grounded on the teacher's `community::louvain::louvain`
for the local-moving ΔQ bookkeeping (`comm_weights`, `total_degree`-style
community strength accumulation), diverging from it in three ways the
teacher's version doesn't need to care about (`spec.md` §4.7):

1. **Determinism.** The teacher shuffles the sweep order with a seeded
   `rand::StdRng` for better empirical optimization; this engine always
   sweeps nodes `0..n` in ascending index order so the same input always
   yields the same partition, with ties broken towards the lower community
   label.
2. **Real Phase 2.** The teacher's "aggregate nodes by community" step
   regroups the *original* community assignment into output groups and
   stops; it never folds the community graph and re-enters Phase 1. This
   module folds the graph into a community-induced [`Graph<usize>`] and
   recurses until folding stops improving modularity.
3. **Self-loop-inclusive modularity.** [`crate::community::modularity`]
   accounts for self-loops in both `Q` and the folded graph's edge weights,
   which the teacher's delta computation does not.
*/

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::core::config::AnalysisConfig;
use crate::core::error::EngineError;
use crate::core::graph::{Edge, Graph};
use crate::core::progress::Progress;

use super::modularity::modularity;

/// Runs Louvain community detection and returns each original node's final
/// community label as a dense, zero-based integer (`spec.md` §4.7).
///
/// # Errors
///
/// Never fails for a valid [`Graph`]; the `Result` exists so this composes
/// with the rest of the facade's fallible pipeline.
pub fn detect_communities<Id>(
    graph: &Graph<Id>,
    config: &AnalysisConfig,
) -> Result<HashMap<Id, usize>, EngineError>
where
    Id: Eq + Hash + Clone,
{
    let progress = Progress::none();
    detect_communities_with_progress(graph, config, &progress)
}

/// Same as [`detect_communities`], but reports `[0, 1]` progress across the
/// recursive folding passes.
pub fn detect_communities_with_progress<Id>(
    graph: &Graph<Id>,
    config: &AnalysisConfig,
    progress: &Progress<'_>,
) -> Result<HashMap<Id, usize>, EngineError>
where
    Id: Eq + Hash + Clone,
{
    let n = graph.node_count();
    if n == 0 {
        return Ok(HashMap::new());
    }

    let initial = initial_labels(n, &config.louvain.initial_partition);
    let labels = run_levels(graph, initial, config.louvain.tolerance, progress);

    let mut result = HashMap::with_capacity(n);
    for i in graph.node_indices() {
        result.insert(graph.external_id(i).clone(), labels[i]);
    }
    Ok(result)
}

fn initial_labels(n: usize, partition: &Option<BTreeMap<usize, usize>>) -> Vec<usize> {
    match partition {
        Some(map) => (0..n).map(|i| *map.get(&i).unwrap_or(&i)).collect(),
        None => (0..n).collect(),
    }
}

/// Recursively runs local moving followed by folding until folding produces
/// no further modularity improvement, composing each level's labels back to
/// the original node indices.
fn run_levels<Id>(
    graph: &Graph<Id>,
    initial: Vec<usize>,
    tolerance: f64,
    progress: &Progress<'_>,
) -> Vec<usize>
where
    Id: Eq + Hash + Clone,
{
    let moved = local_moving(graph, initial);
    let q_before = modularity(graph, &moved);

    let folded = fold(graph, &moved);
    if folded.node_count() == graph.node_count() {
        // Folding collapsed to one community per node: nothing more to merge.
        progress.report(1.0);
        return compact(&moved);
    }

    let folded_initial: Vec<usize> = folded.node_indices().collect();
    let next_labels_on_folded = local_moving(&folded, folded_initial);
    let q_after = modularity(&folded, &next_labels_on_folded);

    if q_after - q_before < tolerance {
        progress.report(1.0);
        return compact(&moved);
    }

    let deeper = run_levels(&folded, next_labels_on_folded, tolerance, progress);

    // Compose this level's community labels with the folded graph's labels:
    // node i's label at this level indexes into `folded`, whose own label
    // (from the recursive call) is the final answer for node i.
    let composed: Vec<usize> = graph
        .node_indices()
        .map(|i| {
            let community_label = moved[i];
            let folded_index = folded
                .index_of(&community_label)
                .expect("fold preserves every community label");
            deeper[folded_index]
        })
        .collect();

    progress.report(1.0);
    compact(&composed)
}

/// Phase 1: local moving. Repeatedly sweeps nodes `0..n` in ascending order,
/// moving each to the neighboring community (including its own) that
/// yields the largest ΔQ, with ties broken towards the lower community
/// label. Returns a (possibly non-contiguous) community label per node.
fn local_moving<Id>(graph: &Graph<Id>, initial: Vec<usize>) -> Vec<usize>
where
    Id: Eq + Hash + Clone,
{
    let n = graph.node_count();
    if n == 0 {
        return initial;
    }
    let m2 = 2.0 * graph.total_weight();
    if m2 <= 0.0 {
        return initial;
    }

    let mut community = initial;
    let mut sigma_tot: HashMap<usize, f64> = HashMap::new();
    for i in graph.node_indices() {
        *sigma_tot.entry(community[i]).or_insert(0.0) += graph.strength(i);
    }

    let mut improved = true;
    while improved {
        improved = false;
        for i in graph.node_indices() {
            let current = community[i];
            let k_i = graph.strength(i);

            let mut weight_to: BTreeMap<usize, f64> = BTreeMap::new();
            for &(j, weight) in graph.neighbors(i) {
                *weight_to.entry(community[j]).or_insert(0.0) += weight;
            }

            *sigma_tot.get_mut(&current).expect("current community is tracked") -= k_i;
            let gain = |target: usize, w_in: f64, sigma_tot: &HashMap<usize, f64>| {
                w_in - sigma_tot.get(&target).copied().unwrap_or(0.0) * k_i / m2
            };

            let stay_gain = gain(current, *weight_to.get(&current).unwrap_or(&0.0), &sigma_tot);
            let mut best_comm = current;
            let mut best_gain = stay_gain;

            for (&target, &w_in) in &weight_to {
                if target == current {
                    continue;
                }
                let candidate_gain = gain(target, w_in, &sigma_tot);
                if candidate_gain > best_gain
                    || (candidate_gain == best_gain && target < best_comm)
                {
                    best_gain = candidate_gain;
                    best_comm = target;
                }
            }

            *sigma_tot.entry(best_comm).or_insert(0.0) += k_i;
            if best_comm != current {
                community[i] = best_comm;
                improved = true;
            }
        }
    }

    community
}

/// Phase 2: folds nodes sharing a community label into a single node of a
/// new, smaller graph, summing internal edges into self-loops and inter-
/// community edges into the new graph's edges. The new graph's `Id` is the
/// old community label, so [`Graph::index_of`] maps old labels to new dense
/// indices for composing levels.
///
/// Every distinct label in `communities` is registered as a node up front
/// via [`Graph::build_with_isolated`], even ones with no internal or
/// inter-community edge (a singleton community made of one isolated node):
/// otherwise such a label never becomes a node of the folded graph, and the
/// next level's composed-mapping lookup in [`run_levels`] has nothing to
/// find it by.
fn fold<Id>(graph: &Graph<Id>, communities: &[usize]) -> Graph<usize>
where
    Id: Eq + Hash + Clone,
{
    let mut labels: Vec<usize> = communities.to_vec();
    labels.sort_unstable();
    labels.dedup();

    let mut edges = Vec::new();
    for i in graph.node_indices() {
        let ci = communities[i];
        let self_weight = graph.self_loop_weight(i);
        if self_weight > 0.0 {
            edges.push(Edge::new(ci, ci, self_weight));
        }
        for &(j, weight) in graph.neighbors(i) {
            if j > i {
                edges.push(Edge::new(ci, communities[j], weight));
            }
        }
    }
    Graph::build_with_isolated(labels, edges)
        .expect("folded edge weights are inherited from an already-validated graph")
}

/// Remaps arbitrary community labels to a dense `0..k` range, preserving
/// the relative order of first appearance.
fn compact(labels: &[usize]) -> Vec<usize> {
    let mut seen = HashMap::new();
    labels
        .iter()
        .map(|&label| {
            let next = seen.len();
            *seen.entry(label).or_insert(next)
        })
        .collect()
}

/// Builder surface mirroring `spec.md` §4.7's setter-based API, for callers
/// that want to assemble a graph incrementally (including isolated nodes)
/// before running detection.
pub struct Louvain<Id> {
    nodes: Option<Vec<Id>>,
    edges: Option<Vec<Edge<Id>>>,
    partition_init: Option<BTreeMap<usize, usize>>,
}

impl<Id> Default for Louvain<Id> {
    fn default() -> Self {
        Self { nodes: None, edges: None, partition_init: None }
    }
}

impl<Id> Louvain<Id>
where
    Id: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the full node set, including nodes with no incident edges.
    /// Must be called before [`Louvain::set_edges`].
    pub fn set_nodes(mut self, nodes: Vec<Id>) -> Self {
        self.nodes = Some(nodes);
        self
    }

    /// Registers the edge list. Fails with [`EngineError::PreconditionError`]
    /// if called before [`Louvain::set_nodes`].
    pub fn set_edges(mut self, edges: Vec<Edge<Id>>) -> Result<Self, EngineError> {
        if self.nodes.is_none() {
            return Err(EngineError::precondition(
                "set_edges was called before set_nodes",
            ));
        }
        self.edges = Some(edges);
        Ok(self)
    }

    /// Supplies a starting partition, keyed by dense node index. Optional;
    /// defaults to every node in its own singleton community.
    pub fn set_partition_init(mut self, partition: BTreeMap<usize, usize>) -> Self {
        self.partition_init = Some(partition);
        self
    }

    /// Builds the graph from the registered nodes/edges and runs detection.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PreconditionError`] if [`Louvain::set_edges`]
    /// was never called, or an error from [`Graph::build_with_isolated`] if
    /// an edge weight is invalid.
    pub fn execute(self) -> Result<HashMap<Id, usize>, EngineError> {
        let nodes = self.nodes.unwrap_or_default();
        let edges = self
            .edges
            .ok_or_else(|| EngineError::precondition("execute was called before set_edges"))?;
        let graph = Graph::build_with_isolated(nodes, edges)?;

        let mut config = AnalysisConfig::default();
        config.louvain.initial_partition = self.partition_init;
        detect_communities(&graph, &config)
    }
}
