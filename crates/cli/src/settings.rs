use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rangeland_data::RawConfig;
use rangeland_solvers::transient::euler::Config;
use serde::Deserialize;

/// Run configuration, read from a TOML file.
///
/// Every field has a default, so an empty file (or no file at all) is a valid
/// configuration:
///
/// ```toml
/// time_step = 0.5
/// max_years = 1000.0
/// progress_frequency = 0.1
///
/// [paths]
/// data_dir = "data/processed"
/// output_dir = "results"
///
/// [raw]
/// skip_head = 25
/// block_len = 26
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Simulated years per integration step.
    pub time_step: f64,

    /// Upper bound on the simulated span, in years.
    pub max_years: f64,

    /// Fraction of a run between progress log lines.
    pub progress_frequency: f64,

    pub labels: Labels,
    pub paths: Paths,
    pub raw: RawConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_step: 0.5,
            max_years: 1000.0,
            progress_frequency: 0.1,
            labels: Labels::default(),
            paths: Paths::default(),
            raw: RawConfig::default(),
        }
    }
}

/// Labels naming each predictor's output columns and correlations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Labels {
    pub forest: String,
    pub network: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            forest: "for".to_owned(),
            network: "nn".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Paths {
    /// Processed `<scenario>.csv` trajectories.
    pub data_dir: PathBuf,

    /// Raw per-scenario time series.
    pub raw_dir: PathBuf,

    /// Median forest parameters (JSON).
    pub forest_model: PathBuf,

    /// Dense network parameters (JSON).
    pub network_model: PathBuf,

    /// Destination of `fwd_sim_<scenario>.csv` files.
    pub output_dir: PathBuf,

    /// Run report that summaries are appended to.
    pub report: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/processed"),
            raw_dir: PathBuf::from("data/raw"),
            forest_model: PathBuf::from("models/forest.json"),
            network_model: PathBuf::from("models/network.json"),
            output_dir: PathBuf::from("results"),
            report: PathBuf::from("results/run_summary.txt"),
        }
    }
}

impl Settings {
    /// Reads settings from `path`, or returns the defaults if `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid settings TOML.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    /// Returns the validated integrator configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the time step or horizon is invalid.
    pub fn euler(&self) -> Result<Config> {
        Config::new(self.time_step, self.max_years).context("invalid integrator settings")
    }
}
