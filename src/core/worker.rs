/*!
# Worker Task Envelope

`spec.md` §6 documents a host-process task envelope as an external contract
this crate does not itself interpret: a harness can serialize a request,
hand it to a worker, and deserialize the reply, while the engine's own
[`crate::facade::analyse`] is called directly in-process. These types exist
so such a harness has a shared, serde-compatible shape to adopt; nothing in
this crate parses or dispatches on them.
*/

use serde::{Deserialize, Serialize};

use crate::core::config::Feature;
use crate::core::graph::Edge;

/// A serializable request a host process might send to a worker running
/// this engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskEnvelope {
    pub task_id: String,
    pub edges: Vec<SerializableEdge>,
    pub features: Vec<Feature>,
    pub verbose: bool,
}

/// A serializable reply a worker might send back, mirroring `analyse`'s
/// success/failure shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskReply {
    pub task_id: String,
    pub outcome: TaskOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TaskOutcome {
    Ok { records: Vec<SerializableRecord> },
    Err { message: String },
}

/// A serde-friendly mirror of [`crate::core::graph::Edge`] with a `String`
/// node identifier, since `Edge<Id>` is generic over the caller's own `Id`
/// type and generic types don't round-trip through a wire format on their
/// own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializableEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

impl From<SerializableEdge> for Edge<String> {
    fn from(edge: SerializableEdge) -> Self {
        Edge::new(edge.source, edge.target, edge.weight)
    }
}

/// A serde-friendly mirror of [`crate::facade::MetricRecord`] with a
/// `String` node identifier, for the same reason as [`SerializableEdge`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializableRecord {
    pub node: String,
    pub degree: Option<usize>,
    pub weighted_degree: Option<f64>,
    pub eigenvector: Option<f64>,
    pub betweenness: Option<f64>,
    pub clustering: Option<f64>,
    pub community: Option<usize>,
    pub clique_count: Option<usize>,
}

impl From<crate::facade::MetricRecord<String>> for SerializableRecord {
    fn from(record: crate::facade::MetricRecord<String>) -> Self {
        Self {
            node: record.node,
            degree: record.degree,
            weighted_degree: record.weighted_degree,
            eigenvector: record.eigenvector,
            betweenness: record.betweenness,
            clustering: record.clustering,
            community: record.community,
            clique_count: record.clique_count,
        }
    }
}
