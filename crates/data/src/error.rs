use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur while loading trajectories or writing reports.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed CSV in {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} contains no data rows", path.display())]
    EmptySeries { path: PathBuf },

    #[error("series `{name}` has {len} rows, expected {expected}")]
    SeriesLength {
        name: String,
        len: usize,
        expected: usize,
    },

    #[error("block length must be at least 1")]
    BlockLength,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
