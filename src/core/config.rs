/*!
# Analysis Configuration

`spec.md` §9 calls for replacing the source's dynamic module-path dispatch with
"a tagged enum of feature kinds and a static dispatch table"; [`Feature`] is
that enum. [`AnalysisConfig`] collects every option enumerated in `spec.md` §6.
*/

use std::collections::BTreeMap;

/// The closed set of per-node metrics the facade can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Degree,
    Eigenvector,
    Betweenness,
    Clustering,
    Cliques,
    Modularity,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::Degree,
        Feature::Eigenvector,
        Feature::Betweenness,
        Feature::Clustering,
        Feature::Cliques,
        Feature::Modularity,
    ];

    /// Parses a feature name from the closed set, used by the facade to
    /// validate caller-supplied feature names before any work starts
    /// (`spec.md` §7: `UnknownFeature` is "surfaced from the facade before
    /// any work").
    pub fn parse(name: &str) -> Option<Feature> {
        match name {
            "degree" => Some(Feature::Degree),
            "eigenvector" => Some(Feature::Eigenvector),
            "betweenness" => Some(Feature::Betweenness),
            "clustering" => Some(Feature::Clustering),
            "cliques" => Some(Feature::Cliques),
            "modularity" => Some(Feature::Modularity),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Feature::Degree => "degree",
            Feature::Eigenvector => "eigenvector",
            Feature::Betweenness => "betweenness",
            Feature::Clustering => "clustering",
            Feature::Cliques => "cliques",
            Feature::Modularity => "modularity",
        }
    }

    /// Empirical cost weight used to combine per-kernel progress into one
    /// overall fraction (`spec.md` §4.8: "betweenness ≫ Louvain ≫
    /// eigenvector ≫ others").
    pub(crate) fn cost_weight(self) -> f64 {
        match self {
            Feature::Betweenness => 100.0,
            Feature::Modularity => 20.0,
            Feature::Eigenvector => 5.0,
            Feature::Degree | Feature::Clustering | Feature::Cliques => 1.0,
        }
    }
}

/// Tuning knobs for the Louvain detector, mirroring `spec.md` §6's
/// `louvain.*` options.
#[derive(Debug, Clone, PartialEq)]
pub struct LouvainConfig {
    pub tolerance: f64,
    /// Optional initial partition, keyed by the node's dense index (§4.7:
    /// `P₀: node → community label`).
    pub initial_partition: Option<BTreeMap<usize, usize>>,
}

impl Default for LouvainConfig {
    fn default() -> Self {
        Self { tolerance: 1e-7, initial_partition: None }
    }
}

/// Tuning knobs for eigenvector centrality, mirroring `spec.md` §6's
/// `eigenvector.*` options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenvectorConfig {
    pub max_iter: usize,
    pub tolerance: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self { max_iter: 1000, tolerance: 1e-6 }
    }
}

/// Full configuration surface for [`crate::facade::analyse`], matching every
/// option `spec.md` §6 enumerates.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Whether kernels emit `tracing` diagnostic spans/events.
    pub verbose: bool,
    pub louvain: LouvainConfig,
    pub eigenvector: EigenvectorConfig,
    /// Minimum clique size counted by the cliques kernel (§4.6 default: 3).
    pub cliques_min_size: usize,
    /// Whether unrequested metric fields are zero-filled or left absent
    /// (§9's Open Question; resolved in DESIGN.md: defaults to `true`).
    pub zero_fill: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            louvain: LouvainConfig::default(),
            eigenvector: EigenvectorConfig::default(),
            cliques_min_size: 3,
            zero_fill: true,
        }
    }
}
