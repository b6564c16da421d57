use std::fs;

use anyhow::{Context, Result};
use log::{error, info};
use rangeland_data::{CsvSource, RawSource, TrajectorySource, write_processed};

use crate::settings::Settings;

/// Pools one scenario's raw series and writes the processed trajectory.
fn preprocess_scenario(raw: &RawSource, processed: &CsvSource, scenario: &str) -> Result<()> {
    let loaded = raw
        .load(scenario)
        .with_context(|| format!("failed to read raw series of `{scenario}`"))?;

    let path = processed.path(scenario);
    write_processed(&path, &loaded.trajectory)?;
    info!(
        "{scenario}: wrote {} samples to {}",
        loaded.trajectory.len(),
        path.display()
    );
    Ok(())
}

/// Runs the `preprocess` command and returns the number of failed scenarios.
pub(crate) fn execute(settings: &Settings, scenarios: &[String]) -> Result<usize> {
    let paths = &settings.paths;
    fs::create_dir_all(&paths.data_dir)
        .with_context(|| format!("failed to create {}", paths.data_dir.display()))?;

    let raw = RawSource::new(&paths.raw_dir, settings.raw.clone());
    let processed = CsvSource::new(&paths.data_dir);

    let mut failures = 0;
    for scenario in scenarios {
        if let Err(err) = preprocess_scenario(&raw, &processed, scenario) {
            error!("{scenario}: {err:#}");
            failures += 1;
        }
    }
    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fmt::Write as _;

    use rangeland_data::{RawConfig, read_processed};

    #[test]
    fn raw_scenarios_become_processed_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.paths.raw_dir = dir.path().join("raw");
        settings.paths.data_dir = dir.path().join("processed");
        settings.raw = RawConfig {
            run: "1".into(),
            skip_head: 1,
            block_len: 2,
        };

        let folder = settings.paths.raw_dir.join("s0").join("1");
        fs::create_dir_all(&folder).unwrap();
        for name in ["biomass", "soildepth", "grazing"] {
            let mut contents = String::new();
            for step in 1..=6 {
                writeln!(contents, "{step} {}", f64::from(step)).unwrap();
            }
            fs::write(folder.join(format!("{name}.tss")), contents).unwrap();
        }

        let failures = execute(&settings, &["s0".to_owned(), "missing".to_owned()]).unwrap();
        assert_eq!(failures, 1);

        let path = CsvSource::new(&settings.paths.data_dir).path("s0");
        let loaded = read_processed(&path, "s0").unwrap();
        // Rows 2..=5 survive trimming and pool into two blocks.
        assert_eq!(loaded.trajectory.len(), 2);
        assert!(loaded.missing_jumps.is_none());
        assert_eq!(loaded.trajectory.jumps(), vec![false, false]);
    }
}
