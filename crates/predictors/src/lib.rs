//! Derivative predictors for rangeland dynamics.
//!
//! Every type here implements [`Predictor`] and can be deserialized from JSON
//! parameters exported by a training pipeline:
//!
//! - [`MedianEnsemble`] — component-wise median over member predictions
//! - [`RegressionTree`] and [`Forest`] — a median-aggregated tree ensemble
//! - [`DenseNetwork`] — a fully connected feed-forward network
//!
//! Training is not part of this crate.
//!
//! [`Predictor`]: rangeland_core::Predictor

mod error;
mod median;
mod network;
mod tree;

use std::{fs::File, io::BufReader, path::Path};

use serde::de::DeserializeOwned;

pub use error::Error;
pub use median::MedianEnsemble;
pub use network::{Activation, DenseNetwork, Layer};
pub use tree::{Node, RegressionTree};

/// A median-aggregated ensemble of regression trees.
pub type Forest = MedianEnsemble<RegressionTree>;

/// Loads a predictor from a JSON parameter file.
///
/// Parameters are validated during deserialization, so a loaded predictor is
/// always well-formed.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not describe a valid
/// predictor.
pub fn from_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
