/*!
# Analysis Facade

A single entry point, [`analyse`], that builds the canonical [`Graph`] once
and runs only the requested [`Feature`] kernels against it, combining their
progress reports into one callback (`spec.md` §4.8, §9's feature-enum
REDESIGN FLAG).
*/

use std::cell::RefCell;
use std::hash::Hash;

use crate::centrality::{betweenness, degree, eigenvector};
use crate::community::louvain;
use crate::community::modularity::modularity;
use crate::core::config::{AnalysisConfig, Feature};
use crate::core::error::EngineError;
use crate::core::graph::{Edge, Graph};
use crate::core::progress::{Progress, WeightedProgress};
use crate::metrics::{cliques, clustering};

/// One node's requested metrics. Fields for features that weren't
/// requested are `None`, unless [`AnalysisConfig::zero_fill`] is set, in
/// which case they default to a zero value instead (`spec.md` §9's
/// zero-fill Open Question).
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord<Id> {
    pub node: Id,
    pub degree: Option<usize>,
    pub weighted_degree: Option<f64>,
    pub eigenvector: Option<f64>,
    pub betweenness: Option<f64>,
    pub clustering: Option<f64>,
    /// Community label from Louvain detection, present when
    /// [`Feature::Modularity`] is requested.
    pub community: Option<usize>,
    /// Number of maximal cliques (of at least `cliques_min_size`) this node
    /// belongs to, present when [`Feature::Cliques`] is requested.
    pub clique_count: Option<usize>,
}

/// Parses feature names against the closed [`Feature`] set and runs
/// [`analyse`], surfacing [`EngineError::UnknownFeature`] before any
/// kernel runs (`spec.md` §7).
pub fn analyse_named<Id>(
    edges: Vec<Edge<Id>>,
    feature_names: &[&str],
    config: &AnalysisConfig,
    progress: Option<&dyn Fn(f64)>,
) -> Result<Vec<MetricRecord<Id>>, EngineError>
where
    Id: Eq + Hash + Clone,
{
    let mut features = Vec::with_capacity(feature_names.len());
    for name in feature_names {
        match Feature::parse(name) {
            Some(feature) => features.push(feature),
            None => return Err(EngineError::unknown_feature(*name)),
        }
    }
    analyse(edges, &features, config, progress)
}

/// Builds the graph and runs every kernel in `features`, producing one
/// [`MetricRecord`] per node.
///
/// # Errors
///
/// Propagates [`EngineError::InvalidWeight`] from graph construction and
/// [`EngineError::NumericFailure`] from eigenvector centrality.
pub fn analyse<Id>(
    edges: Vec<Edge<Id>>,
    features: &[Feature],
    config: &AnalysisConfig,
    progress: Option<&dyn Fn(f64)>,
) -> Result<Vec<MetricRecord<Id>>, EngineError>
where
    Id: Eq + Hash + Clone,
{
    let graph = Graph::build(edges)?;
    if config.verbose {
        tracing::debug!(nodes = graph.node_count(), features = features.len(), "analyse: graph built");
    }
    let outer = Progress::new(progress);
    let n = graph.node_count();

    let weights: Vec<f64> = features.iter().map(|f| f.cost_weight()).collect();
    let weighted = RefCell::new(WeightedProgress::new(&outer, weights));

    let mut degrees = None;
    let mut weighted_degrees = None;
    let mut eigen = None;
    let mut betw = None;
    let mut clust = None;
    let mut communities = None;
    let mut clique_membership: Option<Vec<usize>> = None;

    for (index, feature) in features.iter().enumerate() {
        let _span = config.verbose.then(|| tracing::debug_span!("kernel", feature = feature.name()).entered());
        // Routes the kernel's own incremental progress reports into this
        // feature's slot of the weighted combination, rather than only
        // learning the kernel finished after it already has.
        let report_local = |fraction: f64| weighted.borrow_mut().update(index, fraction);
        let local = Progress::new(Some(&report_local));
        match feature {
            Feature::Degree => {
                degrees = Some(degree::degree(&graph));
                weighted_degrees = Some(degree::weighted_degree(&graph));
                weighted.borrow_mut().update(index, 1.0);
            }
            Feature::Eigenvector => {
                let values = eigenvector::eigenvector_centrality(
                    &graph,
                    config.eigenvector.max_iter,
                    config.eigenvector.tolerance,
                    &local,
                )?;
                eigen = Some(values);
                weighted.borrow_mut().update(index, 1.0);
            }
            Feature::Betweenness => {
                betw = Some(betweenness::betweenness_centrality(&graph, &local));
                weighted.borrow_mut().update(index, 1.0);
            }
            Feature::Clustering => {
                clust = Some(clustering::clustering_coefficient(&graph, &local));
                weighted.borrow_mut().update(index, 1.0);
            }
            Feature::Cliques => {
                let found = cliques::maximal_cliques(&graph, config.cliques_min_size, &local);
                let mut membership = vec![0usize; n];
                for clique in &found {
                    for &node in clique {
                        membership[node] += 1;
                    }
                }
                clique_membership = Some(membership);
                weighted.borrow_mut().update(index, 1.0);
            }
            Feature::Modularity => {
                let by_id =
                    louvain::detect_communities_with_progress(&graph, config, &local)?;
                let mut labels = vec![0usize; n];
                for i in graph.node_indices() {
                    labels[i] = by_id[graph.external_id(i)];
                }
                if config.verbose {
                    let score = modularity(&graph, &labels);
                    tracing::debug!(modularity = score, "computed modularity score");
                }
                communities = Some(labels);
                weighted.borrow_mut().update(index, 1.0);
            }
        }
    }

    let zero_fill = config.zero_fill;
    let records = graph
        .node_indices()
        .map(|i| MetricRecord {
            node: graph.external_id(i).clone(),
            degree: pick(&degrees, i, zero_fill, 0),
            weighted_degree: pick(&weighted_degrees, i, zero_fill, 0.0),
            eigenvector: pick(&eigen, i, zero_fill, 0.0),
            betweenness: pick(&betw, i, zero_fill, 0.0),
            clustering: pick(&clust, i, zero_fill, 0.0),
            community: pick(&communities, i, zero_fill, 0),
            clique_count: pick(&clique_membership, i, zero_fill, 0),
        })
        .collect();

    Ok(records)
}

fn pick<T: Copy>(source: &Option<Vec<T>>, index: usize, zero_fill: bool, zero: T) -> Option<T> {
    match source {
        Some(values) => Some(values[index]),
        None if zero_fill => Some(zero),
        None => None,
    }
}
