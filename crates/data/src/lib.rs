//! Loading ground-truth trajectories and reporting simulation results.
//!
//! - [`TrajectorySource`] — loads a scenario's fixed-cadence trajectory
//!   - [`CsvSource`] — the processed `B,D,g,jumps` form
//!   - [`RawSource`] — raw per-variable time series, pooled by block median
//! - [`report`] — trajectory CSV output and plain-text summary blocks

mod csv_source;
mod error;
mod raw;
pub mod report;
mod source;

pub use csv_source::{CsvSource, read_processed, write_processed};
pub use error::Error;
pub use raw::{RawConfig, RawSource, pool_blocks, read_series};
pub use source::{Loaded, MissingJumpData, TrajectorySource};
