use std::convert::Infallible;

use ndarray::{Array1, Array2, ArrayView1};
use rangeland_core::{Conditions, Predictor, Slope};
use serde::{Deserialize, Serialize};

use crate::Error;

const INPUTS: usize = 3;
const OUTPUTS: usize = 2;

/// Elementwise activation applied after a layer's affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Relu,
    Tanh,
    #[default]
    Linear,
}

impl Activation {
    fn apply(self, x: f64) -> f64 {
        match self {
            Self::Relu => x.max(0.0),
            Self::Tanh => x.tanh(),
            Self::Linear => x,
        }
    }
}

/// Serialized parameters of one dense layer.
///
/// `kernel` has one row per input and one column per output, matching the
/// usual `inputs × units` export layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub kernel: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    #[serde(default)]
    pub activation: Activation,
}

#[derive(Debug, Clone, PartialEq)]
struct Dense {
    kernel: Array2<f64>,
    bias: Array1<f64>,
    activation: Activation,
}

impl Dense {
    fn forward(&self, input: ArrayView1<'_, f64>) -> Array1<f64> {
        let activation = self.activation;
        (input.dot(&self.kernel) + &self.bias).mapv_into(|x| activation.apply(x))
    }
}

/// A fully connected feed-forward network mapping `[B, D, g]` to
/// `[dB/dt, dD/dt]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Layer>", into = "Vec<Layer>")]
pub struct DenseNetwork {
    layers: Vec<Dense>,
}

impl DenseNetwork {
    /// Builds a network from its layer parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no layers, a kernel is ragged, or layer
    /// widths do not chain from 3 inputs to 2 outputs.
    pub fn new(layers: Vec<Layer>) -> Result<Self, Error> {
        if layers.is_empty() {
            return Err(Error::EmptyNetwork);
        }

        let last = layers.len() - 1;
        let mut inputs = INPUTS;
        let mut dense = Vec::with_capacity(layers.len());

        for (index, layer) in layers.into_iter().enumerate() {
            let shape_error = |reason: String| Error::LayerShape {
                layer: index,
                reason,
            };

            if layer.kernel.len() != inputs {
                return Err(shape_error(format!(
                    "kernel has {} rows, expected {inputs}",
                    layer.kernel.len()
                )));
            }
            let units = layer.bias.len();
            if let Some(row) = layer.kernel.iter().find(|row| row.len() != units) {
                return Err(shape_error(format!(
                    "kernel row has {} columns, expected {units} to match the bias",
                    row.len()
                )));
            }
            if index == last && units != OUTPUTS {
                return Err(shape_error(format!(
                    "output layer has {units} units, expected {OUTPUTS}"
                )));
            }

            let flat: Vec<f64> = layer.kernel.into_iter().flatten().collect();
            let kernel = Array2::from_shape_vec((inputs, units), flat)
                .map_err(|err| shape_error(err.to_string()))?;

            dense.push(Dense {
                kernel,
                bias: Array1::from(layer.bias),
                activation: layer.activation,
            });
            inputs = units;
        }

        Ok(Self { layers: dense })
    }

    /// Returns the number of layers.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Runs a forward pass.
    #[must_use]
    pub fn forward(&self, features: [f64; INPUTS]) -> [f64; OUTPUTS] {
        let mut x = Array1::from(features.to_vec());
        for layer in &self.layers {
            x = layer.forward(x.view());
        }
        [x[0], x[1]]
    }
}

impl TryFrom<Vec<Layer>> for DenseNetwork {
    type Error = Error;

    fn try_from(layers: Vec<Layer>) -> Result<Self, Self::Error> {
        Self::new(layers)
    }
}

impl From<DenseNetwork> for Vec<Layer> {
    fn from(network: DenseNetwork) -> Self {
        network
            .layers
            .into_iter()
            .map(|dense| Layer {
                kernel: dense.kernel.outer_iter().map(|row| row.to_vec()).collect(),
                bias: dense.bias.to_vec(),
                activation: dense.activation,
            })
            .collect()
    }
}

impl Predictor for DenseNetwork {
    type Error = Infallible;

    fn predict(&self, conditions: &Conditions) -> Result<Slope, Self::Error> {
        Ok(Slope::from(self.forward(conditions.features())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use rangeland_core::State;

    /// One relu hidden layer of width 2, then a linear output layer.
    fn small_network() -> DenseNetwork {
        DenseNetwork::new(vec![
            Layer {
                kernel: vec![vec![1.0, -1.0], vec![0.0, 2.0], vec![-1.0, 0.0]],
                bias: vec![0.0, 1.0],
                activation: Activation::Relu,
            },
            Layer {
                kernel: vec![vec![1.0, 0.5], vec![-1.0, 0.0]],
                bias: vec![0.25, -0.25],
                activation: Activation::Linear,
            },
        ])
        .unwrap()
    }

    #[test]
    fn forward_pass_matches_hand_computation() {
        let network = small_network();

        // hidden = relu([B - g, -B + 2D + 1]) = relu([2, 0]) = [2, 0]
        // output = [2 - 0 + 0.25, 1 + 0 - 0.25]
        let slope = network
            .predict(&Conditions::new(State::new(3.0, 1.0), 1.0))
            .unwrap();

        assert_relative_eq!(slope.biomass, 2.25);
        assert_relative_eq!(slope.soil_depth, 0.75);
    }

    #[test]
    fn relu_zeroes_negative_hidden_units() {
        let network = small_network();

        // hidden = relu([0 - 5, 0 + 0 + 1]) = [0, 1]
        let slope = network
            .predict(&Conditions::new(State::new(0.0, 0.0), 5.0))
            .unwrap();

        assert_relative_eq!(slope.biomass, -0.75);
        assert_relative_eq!(slope.soil_depth, -0.25);
    }

    #[test]
    fn rejects_mismatched_shapes() {
        assert!(matches!(DenseNetwork::new(vec![]), Err(Error::EmptyNetwork)));

        let wrong_inputs = Layer {
            kernel: vec![vec![1.0, 1.0]; 2],
            bias: vec![0.0, 0.0],
            activation: Activation::Linear,
        };
        assert!(matches!(
            DenseNetwork::new(vec![wrong_inputs]),
            Err(Error::LayerShape { layer: 0, .. })
        ));

        let ragged = Layer {
            kernel: vec![vec![1.0, 1.0], vec![1.0], vec![1.0, 1.0]],
            bias: vec![0.0, 0.0],
            activation: Activation::Linear,
        };
        assert!(matches!(
            DenseNetwork::new(vec![ragged]),
            Err(Error::LayerShape { layer: 0, .. })
        ));

        let three_outputs = Layer {
            kernel: vec![vec![1.0, 1.0, 1.0]; 3],
            bias: vec![0.0; 3],
            activation: Activation::Linear,
        };
        assert!(matches!(
            DenseNetwork::new(vec![three_outputs]),
            Err(Error::LayerShape { layer: 0, .. })
        ));
    }

    #[test]
    fn round_trips_through_json() {
        let network = small_network();

        let json = serde_json::to_string(&network).unwrap();
        let loaded: DenseNetwork = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded, network);
        assert_eq!(loaded.depth(), 2);
    }

    #[test]
    fn activation_defaults_to_linear() {
        let json = r#"[{"kernel": [[1.0, 0.0], [0.0, 1.0], [0.0, 0.0]], "bias": [-1.0, -1.0]}]"#;
        let network: DenseNetwork = serde_json::from_str(json).unwrap();

        let slope = network
            .predict(&Conditions::new(State::new(0.0, 0.5), 0.0))
            .unwrap();

        assert_relative_eq!(slope.biomass, -1.0);
        assert_relative_eq!(slope.soil_depth, -0.5);
    }
}
