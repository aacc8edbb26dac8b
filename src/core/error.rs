/*!
# Engine Error Type

A single closed error enum for every fallible operation the engine exposes,
following the teacher crate's unified-error pattern: manual `Display` and
`std::error::Error` impls, plus small constructor helpers per variant instead
of pulling in a derive macro for four variants.
*/

use std::error::Error;
use std::fmt;

/// Unified error type for all engine operations.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// An edge weight was negative or non-finite (`NaN`/`inf`). Surfaced from
    /// [`crate::core::graph::Graph::build`].
    InvalidWeight(String),

    /// An API was used out of order, e.g. `set_edges` before `set_nodes` on
    /// the [`crate::community::louvain::Louvain`] builder.
    PreconditionError(String),

    /// Eigenvector power iteration diverged or produced `NaN` after a retry.
    NumericFailure(String),

    /// A requested feature name is not a member of the closed feature set.
    UnknownFeature(String),
}

impl EngineError {
    pub fn invalid_weight(message: impl Into<String>) -> Self {
        EngineError::InvalidWeight(message.into())
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        EngineError::PreconditionError(message.into())
    }

    pub fn numeric_failure(message: impl Into<String>) -> Self {
        EngineError::NumericFailure(message.into())
    }

    pub fn unknown_feature(message: impl Into<String>) -> Self {
        EngineError::UnknownFeature(message.into())
    }

    /// Alias used by the Louvain setter-based surface (`spec.md` §4.7), where
    /// the same failure is named `BadGraph` rather than `InvalidWeight`.
    pub fn bad_graph(message: impl Into<String>) -> Self {
        EngineError::InvalidWeight(message.into())
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidWeight(msg) => write!(f, "invalid edge weight: {msg}"),
            EngineError::PreconditionError(msg) => write!(f, "precondition violated: {msg}"),
            EngineError::NumericFailure(msg) => write!(f, "numeric failure: {msg}"),
            EngineError::UnknownFeature(msg) => write!(f, "unknown feature: {msg}"),
        }
    }
}

impl Error for EngineError {}
