use std::{
    fmt::Write as _,
    fs,
    sync::atomic::{AtomicBool, Ordering},
    time::Instant,
};

use anyhow::{Context, Result};
use log::{debug, error, info};
use rangeland_data::{CsvSource, TrajectorySource, report};
use rangeland_observers::Progress;
use rangeland_predictors::{DenseNetwork, Forest, from_json_file};
use rangeland_solvers::{
    compare::compare,
    transient::euler::{self, Config, Labeled},
};
use rayon::prelude::*;

use crate::settings::Settings;

/// Predictors shared read-only by every scenario run.
pub(crate) struct Models {
    pub(crate) forest: Forest,
    pub(crate) network: DenseNetwork,
}

impl Models {
    pub(crate) fn load(settings: &Settings) -> Result<Self> {
        let paths = &settings.paths;
        let forest = from_json_file(&paths.forest_model)
            .with_context(|| format!("failed to load forest {}", paths.forest_model.display()))?;
        let network = from_json_file(&paths.network_model).with_context(|| {
            format!("failed to load network {}", paths.network_model.display())
        })?;
        Ok(Self { forest, network })
    }
}

/// Everything a scenario run reads.
pub(crate) struct Batch<'a> {
    pub(crate) settings: &'a Settings,
    pub(crate) models: &'a Models,
    pub(crate) config: Config,
    pub(crate) source: CsvSource,
}

/// The result of one scenario, in input order.
#[derive(Debug)]
pub(crate) struct Outcome {
    pub(crate) scenario: String,
    /// The scenario's summary block.
    pub(crate) result: Result<String>,
}

impl<'a> Batch<'a> {
    pub(crate) fn new(settings: &'a Settings, models: &'a Models) -> Result<Self> {
        Ok(Self {
            settings,
            models,
            config: settings.euler()?,
            source: CsvSource::new(&settings.paths.data_dir),
        })
    }

    /// Loads, simulates, and writes the trajectories of one scenario.
    ///
    /// Returns the scenario's summary block.
    pub(crate) fn run_scenario(&self, scenario: &str) -> Result<String> {
        let labels = &self.settings.labels;

        let loaded = self
            .source
            .load(scenario)
            .with_context(|| format!("failed to load scenario `{scenario}`"))?;

        let progress = Progress::new(scenario, self.settings.progress_frequency);
        let solution = euler::simulate(
            &loaded.trajectory,
            Labeled::new(&labels.forest, &self.models.forest),
            Labeled::new(&labels.network, &self.models.network),
            &self.config,
            progress,
        )
        .with_context(|| format!("failed to simulate scenario `{scenario}`"))?;

        let path = report::trajectory_path(&self.settings.paths.output_dir, scenario);
        report::write_trajectories(&path, &solution)?;
        info!("{scenario}: wrote {}", path.display());

        Ok(report::summary(scenario, &solution, &compare(&solution)))
    }

    /// Runs every scenario and returns the outcomes in input order.
    ///
    /// With `fail_fast`, scenarios not yet started when one fails are skipped
    /// and have no outcome.
    pub(crate) fn run(
        &self,
        scenarios: &[String],
        parallel: bool,
        fail_fast: bool,
    ) -> Vec<Outcome> {
        let failed = AtomicBool::new(false);

        let run_one = |scenario: &String| {
            if fail_fast && failed.load(Ordering::Relaxed) {
                debug!("{scenario}: skipped after an earlier failure");
                return None;
            }
            let result = self.run_scenario(scenario);
            if result.is_err() {
                failed.store(true, Ordering::Relaxed);
            }
            Some(Outcome {
                scenario: scenario.clone(),
                result,
            })
        };

        if parallel {
            scenarios.par_iter().filter_map(run_one).collect()
        } else {
            scenarios.iter().filter_map(run_one).collect()
        }
    }
}

/// Assembles the run report from outcomes, logging each failure.
///
/// Returns the report text and the number of failed scenarios.
pub(crate) fn evolution_report(outcomes: &[Outcome], elapsed_minutes: f64) -> (String, usize) {
    let mut text = String::from("\n\n***SYSTEM EVOLUTION***");
    let mut failures = 0;

    for outcome in outcomes {
        match &outcome.result {
            Ok(block) => text.push_str(block),
            Err(err) => {
                error!("{}: {err:#}", outcome.scenario);
                failures += 1;
            }
        }
    }

    // Writing to a String cannot fail.
    let _ = write!(
        text,
        "\n\n***\nExecution time: {elapsed_minutes:.3} minutes.\n***\n"
    );
    (text, failures)
}

/// Runs the `simulate` command and returns the number of failed scenarios.
pub(crate) fn execute(
    settings: &Settings,
    scenarios: &[String],
    parallel: bool,
    fail_fast: bool,
) -> Result<usize> {
    let start = Instant::now();

    let models = Models::load(settings)?;
    let batch = Batch::new(settings, &models)?;

    let output_dir = &settings.paths.output_dir;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    if let Some(parent) = settings.paths.report.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    info!(
        "simulating {} scenarios{}",
        scenarios.len(),
        if parallel { " in parallel" } else { "" }
    );
    let outcomes = batch.run(scenarios, parallel, fail_fast);

    let elapsed = start.elapsed().as_secs_f64() / 60.0;
    let (text, failures) = evolution_report(&outcomes, elapsed);
    report::append_summary(&settings.paths.report, &text)?;

    let skipped = scenarios.len() - outcomes.len();
    info!(
        "finished in {elapsed:.3} minutes: {} succeeded, {failures} failed, {skipped} skipped",
        outcomes.len() - failures
    );
    Ok(failures)
}
