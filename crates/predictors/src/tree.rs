use std::convert::Infallible;

use rangeland_core::{Conditions, Predictor, Slope};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Number of input features: biomass, soil depth, grazing pressure.
const FEATURES: usize = 3;

/// A node of a flattened binary regression tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// Routes to `left` when `features[feature] <= threshold`, else `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },

    /// A terminal node holding `[dB/dt, dD/dt]`.
    Leaf { value: [f64; 2] },
}

/// A regression tree stored as a flat node array rooted at index 0.
///
/// Children always come after their parent, so traversal terminates. This is
/// checked when the tree is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Node>", into = "Vec<Node>")]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Creates a tree from its flattened nodes.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree is empty, a split references an unknown
    /// feature, or a child index does not point forward within the tree.
    pub fn new(nodes: Vec<Node>) -> Result<Self, Error> {
        if nodes.is_empty() {
            return Err(Error::EmptyTree);
        }

        let len = nodes.len();
        for (node, n) in nodes.iter().enumerate() {
            if let Node::Split {
                feature,
                left,
                right,
                ..
            } = *n
            {
                if feature >= FEATURES {
                    return Err(Error::UnknownFeature { node, feature });
                }
                for child in [left, right] {
                    if child <= node || child >= len {
                        return Err(Error::InvalidChild { node, child, len });
                    }
                }
            }
        }

        Ok(Self { nodes })
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the leaf value reached by `features`.
    #[must_use]
    pub fn evaluate(&self, features: [f64; FEATURES]) -> [f64; 2] {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                Node::Leaf { value } => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[feature] <= threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

impl TryFrom<Vec<Node>> for RegressionTree {
    type Error = Error;

    fn try_from(nodes: Vec<Node>) -> Result<Self, Self::Error> {
        Self::new(nodes)
    }
}

impl From<RegressionTree> for Vec<Node> {
    fn from(tree: RegressionTree) -> Self {
        tree.nodes
    }
}

impl Predictor for RegressionTree {
    type Error = Infallible;

    fn predict(&self, conditions: &Conditions) -> Result<Slope, Self::Error> {
        Ok(Slope::from(self.evaluate(conditions.features())))
    }
}
