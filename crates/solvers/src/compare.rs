//! Agreement metrics between simulated tracks and ground truth.
//!
//! Metrics never fail. Undefined values, such as a correlation against a
//! constant series, are reported as `f64::NAN`.

use statrs::statistics::Statistics;

use crate::transient::euler::{Solution, Track};

/// Pearson correlation of one track against the ground truth.
#[derive(Debug, Clone, PartialEq)]
pub struct Agreement {
    /// The track's predictor label.
    pub label: String,

    /// Correlation of simulated and true biomass.
    pub biomass: f64,

    /// Correlation of simulated and true soil depth.
    pub soil_depth: f64,
}

/// Agreement of each track in a [`Solution`], in track order.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub agreements: [Agreement; 2],
}

/// Computes the Pearson correlation coefficient of two series.
///
/// Returns `NaN` if the series differ in length, have fewer than two points,
/// or if either series is constant.
#[must_use]
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 || is_constant(x) || is_constant(y) {
        return f64::NAN;
    }

    let r = x.covariance(y) / (x.std_dev() * y.std_dev());

    // Rounding can push perfectly correlated series just past ±1.
    r.clamp(-1.0, 1.0)
}

/// Compares both tracks of a solution against its ground truth.
#[must_use]
pub fn compare(solution: &Solution) -> Comparison {
    let biomass = solution.truth.biomass();
    let soil_depth = solution.truth.soil_depth();

    let agreement = |track: &Track| Agreement {
        label: track.label.clone(),
        biomass: pearson(&track.biomass, &biomass),
        soil_depth: pearson(&track.soil_depth, &soil_depth),
    };

    Comparison {
        agreements: [
            agreement(&solution.tracks[0]),
            agreement(&solution.tracks[1]),
        ],
    }
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}
