use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, Trim, Writer};
use log::{debug, warn};
use rangeland_core::{Sample, Trajectory};
use serde::{Deserialize, Serialize};

use crate::{Error, Loaded, MissingJumpData, TrajectorySource};

/// Loads processed trajectories from `<dir>/<scenario>.csv`.
///
/// Files have a `B,D,g,jumps` header. The `jumps` column holds a 0/1 flag in
/// any numeric format; it may be absent or empty, in which case no jumps are
/// assumed and a [`MissingJumpData`] warning is returned.
#[derive(Debug, Clone)]
pub struct CsvSource {
    dir: PathBuf,
}

impl CsvSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the file a scenario is loaded from.
    #[must_use]
    pub fn path(&self, scenario: &str) -> PathBuf {
        self.dir.join(format!("{scenario}.csv"))
    }
}

impl TrajectorySource for CsvSource {
    fn load(&self, scenario: &str) -> Result<Loaded, Error> {
        read_processed(&self.path(scenario), scenario)
    }
}

#[derive(Debug, Deserialize)]
struct InputRow {
    #[serde(rename = "B")]
    biomass: f64,
    #[serde(rename = "D")]
    soil_depth: f64,
    #[serde(rename = "g")]
    grazing: f64,
    #[serde(default)]
    jumps: Option<f64>,
}

#[derive(Debug, Serialize)]
struct OutputRow {
    #[serde(rename = "B")]
    biomass: f64,
    #[serde(rename = "D")]
    soil_depth: f64,
    #[serde(rename = "g")]
    grazing: f64,
    jumps: u8,
}

/// Reads a processed `B,D,g,jumps` trajectory file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a row is malformed.
pub fn read_processed(path: &Path, scenario: &str) -> Result<Loaded, Error> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .map_err(|err| Error::csv(path, err))?;

    let mut samples = Vec::new();
    let mut jumps_missing = false;
    for row in reader.deserialize() {
        let row: InputRow = row.map_err(|err| Error::csv(path, err))?;
        let jump = match row.jumps {
            Some(flag) => flag != 0.0,
            None => {
                jumps_missing = true;
                false
            }
        };
        samples.push(Sample::new(row.biomass, row.soil_depth, row.grazing, jump));
    }

    let missing_jumps = jumps_missing.then(|| MissingJumpData {
        scenario: scenario.to_owned(),
    });
    if let Some(missing) = &missing_jumps {
        warn!("{missing}");
    }

    debug!("loaded {} samples from {}", samples.len(), path.display());

    Ok(Loaded {
        trajectory: Trajectory::new(samples),
        missing_jumps,
    })
}

/// Writes a trajectory in the processed `B,D,g,jumps` form.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_processed(path: &Path, trajectory: &Trajectory) -> Result<(), Error> {
    let file = File::create(path).map_err(|err| Error::io(path, err))?;
    let mut writer = Writer::from_writer(BufWriter::new(file));

    for sample in trajectory.samples() {
        writer
            .serialize(OutputRow {
                biomass: sample.biomass,
                soil_depth: sample.soil_depth,
                grazing: sample.grazing,
                jumps: u8::from(sample.jump),
            })
            .map_err(|err| Error::csv(path, err))?;
    }

    writer.flush().map_err(|err| Error::io(path, err))
}
