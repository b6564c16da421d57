//! Serialization of simulation results.
//!
//! A finished run produces two artifacts:
//!
//! - a trajectory CSV with the time vector, ground truth, and both simulated
//!   tracks ([`write_trajectories`])
//! - a plain-text summary block with the run parameters and correlations
//!   ([`summary`]), appended to a run report by the caller
//!   ([`append_summary`])

use std::{
    fmt::Write as _,
    fs::{self, File, OpenOptions},
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use csv::Writer;
use log::debug;
use rangeland_solvers::{compare::Comparison, transient::euler::Solution};

use crate::Error;

/// Returns the trajectory file path for a scenario inside `dir`.
#[must_use]
pub fn trajectory_path(dir: &Path, scenario: &str) -> PathBuf {
    dir.join(format!("fwd_sim_{scenario}.csv"))
}

/// Returns the column names of a solution's trajectory file.
///
/// Simulated columns are named after each track's label, for example
/// `t,B_true,D_true,g,B_for,D_for,B_nn,D_nn`.
#[must_use]
pub fn header(solution: &Solution) -> Vec<String> {
    let mut columns: Vec<String> = ["t", "B_true", "D_true", "g"]
        .into_iter()
        .map(str::to_owned)
        .collect();
    for track in &solution.tracks {
        columns.push(format!("B_{}", track.label));
        columns.push(format!("D_{}", track.label));
    }
    columns
}

/// Writes the time vector, ground truth, and both tracks as CSV.
///
/// The file is written to a temporary sibling and renamed into place, so
/// `path` either holds a complete result or is left untouched.
///
/// # Errors
///
/// Returns an error if the file cannot be written or renamed.
pub fn write_trajectories(path: &Path, solution: &Solution) -> Result<(), Error> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let result = write_rows(&tmp, solution).and_then(|()| {
        fs::rename(&tmp, path).map_err(|err| Error::io(path, err))
    });

    if result.is_err() {
        // Best effort; the write error is the one worth reporting.
        let _ = fs::remove_file(&tmp);
    } else {
        debug!("wrote {} rows to {}", solution.steps(), path.display());
    }
    result
}

fn write_rows(path: &Path, solution: &Solution) -> Result<(), Error> {
    let file = File::create(path).map_err(|err| Error::io(path, err))?;
    let mut writer = Writer::from_writer(BufWriter::new(file));

    writer
        .write_record(header(solution))
        .map_err(|err| Error::csv(path, err))?;

    let [first, second] = &solution.tracks;
    for (step, sample) in solution.truth.samples().iter().enumerate() {
        let row = [
            solution.time[step],
            sample.biomass,
            sample.soil_depth,
            sample.grazing,
            first.biomass[step],
            first.soil_depth[step],
            second.biomass[step],
            second.soil_depth[step],
        ];
        writer
            .write_record(row.iter().map(f64::to_string))
            .map_err(|err| Error::csv(path, err))?;
    }

    writer.flush().map_err(|err| Error::io(path, err))
}

/// Formats the summary block of one scenario.
///
/// ```text
///
///
/// Simulation scenario_0:
/// time_step = 0.5
/// n_years = 500
/// pearson_corr_for = (0.93, 0.88)
/// pearson_corr_nn = (0.97, NaN)
/// ```
#[must_use]
pub fn summary(scenario: &str, solution: &Solution, comparison: &Comparison) -> String {
    let mut block = format!(
        "\n\nSimulation {scenario}:\ntime_step = {}\nn_years = {}",
        solution.time_step,
        solution.horizon()
    );
    for agreement in &comparison.agreements {
        // Writing to a String cannot fail.
        let _ = write!(
            block,
            "\npearson_corr_{} = ({}, {})",
            agreement.label, agreement.biomass, agreement.soil_depth
        );
    }
    block
}

/// Appends a block of text to a run report, creating the file if needed.
///
/// # Errors
///
/// Returns an error if the report cannot be opened or written.
pub fn append_summary(path: &Path, block: &str) -> Result<(), Error> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| Error::io(path, err))?;
    file.write_all(block.as_bytes())
        .map_err(|err| Error::io(path, err))
}
