use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use rangeland_core::{Sample, Trajectory};
use serde::Deserialize;
use statrs::statistics::{Data, Median};

use crate::{Error, Loaded, MissingJumpData, TrajectorySource};

/// Hours in a year, converting hourly grazing rates to yearly ones.
const HOURS_PER_YEAR: f64 = 24.0 * 365.0;

/// Preprocessing parameters for raw time series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// Name of the run subdirectory inside each scenario directory.
    pub run: String,

    /// Leading rows dropped as spin-up.
    pub skip_head: usize,

    /// Rows pooled into one sample.
    pub block_len: usize,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            run: "1".to_owned(),
            skip_head: 25,
            block_len: 26,
        }
    }
}

/// Loads trajectories from raw per-variable time series.
///
/// Each scenario lives in `<dir>/<scenario>/<run>/` with the files
/// `biomass.tss`, `soildepth.tss`, `grazing.tss`, and optionally
/// `statevars_jumped.tss`. Every file holds `<timestep> <value>` rows.
///
/// Loading drops the first `skip_head` rows and the final row, converts
/// grazing from per-hour to per-year, and pools each block of `block_len`
/// rows into one sample by per-column median. A block's jump flag is the flag
/// of its first row.
#[derive(Debug, Clone)]
pub struct RawSource {
    dir: PathBuf,
    config: RawConfig,
}

impl RawSource {
    pub fn new(dir: impl Into<PathBuf>, config: RawConfig) -> Self {
        Self {
            dir: dir.into(),
            config,
        }
    }

    /// Returns the directory holding a scenario's raw series.
    #[must_use]
    pub fn scenario_dir(&self, scenario: &str) -> PathBuf {
        self.dir.join(scenario).join(&self.config.run)
    }

    /// Drops spin-up rows and the final row.
    fn trim<'a, T>(&self, series: &'a [T]) -> &'a [T] {
        let end = series.len().saturating_sub(1);
        let start = self.config.skip_head.min(end);
        &series[start..end]
    }
}

impl TrajectorySource for RawSource {
    fn load(&self, scenario: &str) -> Result<Loaded, Error> {
        let folder = self.scenario_dir(scenario);

        let biomass = read_series(&folder.join("biomass.tss"))?;
        let soil_depth = read_series(&folder.join("soildepth.tss"))?;
        let grazing: Vec<f64> = read_series(&folder.join("grazing.tss"))?
            .into_iter()
            .map(|g| g * HOURS_PER_YEAR)
            .collect();

        let expected = biomass.len();
        check_length("soildepth", &soil_depth, expected)?;
        check_length("grazing", &grazing, expected)?;

        let (jumps, missing_jumps) = match read_series(&folder.join("statevars_jumped.tss")) {
            Ok(flags) => {
                check_length("statevars_jumped", &flags, expected)?;
                (flags.into_iter().map(|f| f != 0.0).collect(), None)
            }
            Err(Error::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                let missing = MissingJumpData {
                    scenario: scenario.to_owned(),
                };
                warn!("{missing} (no jumps file in {})", folder.display());
                (vec![false; expected], Some(missing))
            }
            Err(err) => return Err(err),
        };

        let rows: Vec<Sample> = self
            .trim(&biomass)
            .iter()
            .zip(self.trim(&soil_depth))
            .zip(self.trim(&grazing))
            .zip(self.trim(&jumps))
            .map(|(((&b, &d), &g), &jump)| Sample::new(b, d, g, jump))
            .collect();

        let trajectory = pool_blocks(&rows, self.config.block_len)?;
        debug!(
            "pooled {} raw rows of `{scenario}` into {} samples",
            rows.len(),
            trajectory.len()
        );

        Ok(Loaded {
            trajectory,
            missing_jumps,
        })
    }
}

fn check_length<T>(name: &str, series: &[T], expected: usize) -> Result<(), Error> {
    if series.len() == expected {
        Ok(())
    } else {
        Err(Error::SeriesLength {
            name: name.to_owned(),
            len: series.len(),
            expected,
        })
    }
}

/// Reads the value column of a whitespace-delimited time series file.
///
/// Data rows hold at least two numeric fields, `<timestep> <value> ...`, and
/// the second is returned. Any other line, such as a header, is skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds no data rows.
pub fn read_series(path: &Path) -> Result<Vec<f64>, Error> {
    let contents = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;

    let values: Vec<f64> = contents
        .lines()
        .filter_map(|line| {
            let fields: Vec<f64> = line
                .split_whitespace()
                .map(str::parse)
                .collect::<Result<_, _>>()
                .ok()?;
            (fields.len() >= 2).then(|| fields[1])
        })
        .collect();

    if values.is_empty() {
        return Err(Error::EmptySeries {
            path: path.to_owned(),
        });
    }
    Ok(values)
}

/// Pools consecutive rows into blocks of `block_len`, one sample per block.
///
/// Biomass, soil depth, and grazing take the block median; the jump flag is
/// taken from the block's first row. A trailing partial block is dropped.
///
/// # Errors
///
/// Returns [`Error::BlockLength`] if `block_len` is zero.
pub fn pool_blocks(rows: &[Sample], block_len: usize) -> Result<Trajectory, Error> {
    if block_len == 0 {
        return Err(Error::BlockLength);
    }

    let median = |block: &[Sample], field: fn(&Sample) -> f64| {
        Data::new(block.iter().map(field).collect::<Vec<_>>()).median()
    };

    Ok(rows
        .chunks_exact(block_len)
        .map(|block| {
            Sample::new(
                median(block, |s| s.biomass),
                median(block, |s| s.soil_depth),
                median(block, |s| s.grazing),
                block[0].jump,
            )
        })
        .collect())
}
