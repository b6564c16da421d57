use std::io;

use thiserror::Error;

/// Errors that can occur when building, loading, or evaluating a predictor.
#[derive(Debug, Error)]
pub enum Error {
    #[error("ensemble has no members")]
    EmptyEnsemble,

    #[error("tree has no nodes")]
    EmptyTree,

    #[error("tree node {node} references feature {feature}, but only 3 are available")]
    UnknownFeature { node: usize, feature: usize },

    #[error("tree node {node} has child {child} outside (node, {len})")]
    InvalidChild { node: usize, child: usize, len: usize },

    #[error("network has no layers")]
    EmptyNetwork,

    #[error("layer {layer}: {reason}")]
    LayerShape { layer: usize, reason: String },

    #[error("failed to read predictor parameters")]
    Io(#[from] io::Error),

    #[error("failed to parse predictor parameters")]
    Json(#[from] serde_json::Error),
}
