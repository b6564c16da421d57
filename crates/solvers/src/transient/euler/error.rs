use std::error::Error as StdError;

use thiserror::Error;

use super::config::ConfigError;

/// Errors that can occur during Euler integration.
///
/// Any of these aborts the run; no partial solution is produced.
#[derive(Debug, Error)]
pub enum Error {
    #[error("ground-truth trajectory is empty")]
    EmptyTrajectory,

    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] ConfigError),

    #[error("predictor `{label}` failed at step {step}")]
    Predictor {
        label: String,
        step: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("run aborted by observer at step {step}")]
    Aborted { step: usize },
}

impl Error {
    pub(crate) fn predictor<E: StdError + Send + Sync + 'static>(
        label: &str,
        step: usize,
        err: E,
    ) -> Self {
        Self::Predictor {
            label: label.to_owned(),
            step,
            source: Box::new(err),
        }
    }
}
