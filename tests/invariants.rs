//! Property-based invariants over arbitrary edge lists: build idempotence,
//! strength/weight bookkeeping, adjacency symmetry, Louvain totality, and the
//! output ranges/shapes of the other centrality and community kernels.

use std::collections::HashMap;

use graphmetrics::centrality::betweenness::betweenness_centrality;
use graphmetrics::centrality::eigenvector::eigenvector_centrality;
use graphmetrics::community::louvain::detect_communities;
use graphmetrics::community::modularity::modularity;
use graphmetrics::core::config::AnalysisConfig;
use graphmetrics::core::graph::{Edge, Graph};
use graphmetrics::core::progress::Progress;
use graphmetrics::metrics::clustering::clustering_coefficient;
use proptest::prelude::*;

/// Generates a small edge list over a bounded node-id alphabet, with
/// nonnegative finite weights, so parallel edges and self-loops both occur
/// with reasonable probability.
fn arb_edges() -> impl Strategy<Value = Vec<Edge<u8>>> {
    prop::collection::vec((0u8..8, 0u8..8, 0.0f64..5.0), 0..30)
        .prop_map(|triples| triples.into_iter().map(|(s, t, w)| Edge::new(s, t, w)).collect())
}

proptest! {
    #[test]
    fn strength_sums_to_twice_total_weight(edges in arb_edges()) {
        let graph = Graph::build(edges).unwrap();
        let sum_k: f64 = graph.node_indices().map(|i| graph.strength(i)).sum();
        prop_assert!((sum_k - 2.0 * graph.total_weight()).abs() < 1e-9);
    }

    #[test]
    fn adjacency_is_mirrored(edges in arb_edges()) {
        let graph = Graph::build(edges).unwrap();
        for i in graph.node_indices() {
            for &(j, weight) in graph.neighbors(i) {
                let back = graph.neighbors(j).iter().find(|&&(k, _)| k == i);
                prop_assert!(back.is_some());
                prop_assert!((back.unwrap().1 - weight).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn build_is_idempotent_on_its_own_edges(edges in arb_edges()) {
        let graph = Graph::build(edges.clone()).unwrap();

        let mut canonical_edges = Vec::new();
        for i in graph.node_indices() {
            if graph.self_loop_weight(i) > 0.0 {
                canonical_edges.push(Edge::new(i, i, graph.self_loop_weight(i)));
            }
            for &(j, weight) in graph.neighbors(i) {
                if j > i {
                    canonical_edges.push(Edge::new(i, j, weight));
                }
            }
        }
        let rebuilt = Graph::build(canonical_edges).unwrap();

        prop_assert_eq!(rebuilt.node_count(), graph.node_count());
        prop_assert!((rebuilt.total_weight() - graph.total_weight()).abs() < 1e-9);
        for i in graph.node_indices() {
            prop_assert!((rebuilt.strength(i) - graph.strength(i)).abs() < 1e-9);
        }
    }

    #[test]
    fn louvain_output_is_total(edges in arb_edges()) {
        let graph = Graph::build(edges).unwrap();
        let config = AnalysisConfig::default();
        let communities = detect_communities(&graph, &config).unwrap();
        prop_assert_eq!(communities.len(), graph.node_count());
        for i in graph.node_indices() {
            prop_assert!(communities.contains_key(graph.external_id(i)));
        }
    }

    #[test]
    fn relabelling_nodes_permutes_but_preserves_strengths(edges in arb_edges()) {
        let graph = Graph::build(edges.clone()).unwrap();

        // Relabel every node id by adding 100 -- an injective bijection over u8
        // would overflow, so shift into a disjoint u16 range instead.
        let relabelled: Vec<Edge<u16>> = edges
            .into_iter()
            .map(|e| Edge::new(e.source as u16 + 100, e.target as u16 + 100, e.weight))
            .collect();
        let relabelled_graph = Graph::build(relabelled).unwrap();

        prop_assert_eq!(relabelled_graph.node_count(), graph.node_count());

        let mut strengths: HashMap<u8, f64> = HashMap::new();
        for i in graph.node_indices() {
            strengths.insert(*graph.external_id(i), graph.strength(i));
        }
        for i in relabelled_graph.node_indices() {
            let original_id = (*relabelled_graph.external_id(i) - 100) as u8;
            let expected = strengths[&original_id];
            prop_assert!((relabelled_graph.strength(i) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn clustering_coefficient_stays_within_unit_interval(edges in arb_edges()) {
        let graph = Graph::build(edges).unwrap();
        let progress = Progress::none();
        let coefficients = clustering_coefficient(&graph, &progress);
        for &c in &coefficients {
            prop_assert!((0.0..=1.0).contains(&c), "{} outside [0, 1]", c);
        }
    }

    #[test]
    fn betweenness_is_nonnegative(edges in arb_edges()) {
        let graph = Graph::build(edges).unwrap();
        let progress = Progress::none();
        let result = betweenness_centrality(&graph, &progress);
        for &b in &result {
            prop_assert!(b >= 0.0, "{} is negative", b);
        }
    }

    #[test]
    fn betweenness_on_a_path_peaks_in_the_interior(n in 3u8..8) {
        let mut edges = Vec::new();
        for i in 0..n - 1 {
            edges.push(Edge::unit(i, i + 1));
        }
        let graph = Graph::build(edges).unwrap();
        let progress = Progress::none();
        let result = betweenness_centrality(&graph, &progress);

        let first = graph.index_of(&0).unwrap();
        let last = graph.index_of(&(n - 1)).unwrap();
        prop_assert_eq!(result[first], 0.0);
        prop_assert_eq!(result[last], 0.0);
        for node in graph.node_indices() {
            if node != first && node != last {
                prop_assert!(result[node] > 0.0, "interior node {} has zero betweenness", node);
            }
        }
    }

    #[test]
    fn eigenvector_values_are_finite_and_nonnegative(edges in arb_edges()) {
        let graph = Graph::build(edges).unwrap();
        let progress = Progress::none();
        if let Ok(result) = eigenvector_centrality(&graph, 1000, 1e-9, &progress) {
            for &v in &result {
                prop_assert!(v.is_finite());
                prop_assert!(v >= 0.0, "{} is negative", v);
            }
        }
    }

    #[test]
    fn eigenvector_normalizes_to_unit_norm_per_component_with_an_edge(edges in arb_edges()) {
        let graph = Graph::build(edges).unwrap();
        let progress = Progress::none();
        if let Ok(result) = eigenvector_centrality(&graph, 1000, 1e-9, &progress) {
            for component in graph.connected_components() {
                let has_edge = component
                    .iter()
                    .any(|&i| graph.degree(i) > 0 || graph.self_loop_weight(i) > 0.0);
                if !has_edge {
                    continue;
                }
                let sum_sq: f64 = component.iter().map(|&i| result[i] * result[i]).sum();
                prop_assert!((sum_sq - 1.0).abs() < 1e-3, "component sum-of-squares {} != 1.0", sum_sq);
            }
        }
    }

    #[test]
    fn louvain_never_does_worse_than_the_singleton_partition(edges in arb_edges()) {
        let graph = Graph::build(edges).unwrap();
        let config = AnalysisConfig::default();
        let communities = detect_communities(&graph, &config).unwrap();

        let mut labels = vec![0usize; graph.node_count()];
        for i in graph.node_indices() {
            labels[i] = communities[graph.external_id(i)];
        }
        let achieved = modularity(&graph, &labels);

        let singleton: Vec<usize> = graph.node_indices().collect();
        let baseline = modularity(&graph, &singleton);

        prop_assert!(achieved >= baseline - 1e-9, "{} < singleton baseline {}", achieved, baseline);
    }
}
