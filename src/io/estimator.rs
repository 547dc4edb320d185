//! Auxiliary estimator state: velocity and IMU biases.

use std::path::Path;

use nalgebra::{Vector3, Vector4};
use tracing::debug;

use super::matches::MatchTable;
use super::table::read_stamped_csv;
use crate::error::Result;
use crate::join::inner_join_by_key;
use crate::trajectory::{TimestampNs, vector3_at, vector4_at};

// Payload column layout after the timestamp:
// p(0..3) q(3..7) v(7..10) b_gyr(10..13) b_acc(13..17)
const VELOCITY_OFFSET: usize = 7;
const BIAS_GYR_OFFSET: usize = 10;
const BIAS_ACC_OFFSET: usize = 13;
const STATE_COLUMNS: usize = 17;

/// Per-row estimator state for stamps that have a ground-truth match.
///
/// The accelerometer bias carries four values, one more than the gyroscope
/// bias. That is how the results files are written and it is kept as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EstimatorResults {
    pub stamps: Vec<TimestampNs>,
    pub velocity: Vec<Vector3<f64>>,
    pub bias_gyr: Vec<Vector3<f64>>,
    pub bias_acc: Vec<Vector4<f64>>,
}

impl EstimatorResults {
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }
}

/// Extracts velocity and biases for every row whose stamp is a key of `matches`.
///
/// Rows keep their file order.
pub fn load_estimator_results(
    filename: impl AsRef<Path>,
    matches: &MatchTable,
) -> Result<EstimatorResults> {
    let table = read_stamped_csv(filename.as_ref(), STATE_COLUMNS)?;

    let joined = inner_join_by_key(table.iter(), matches.as_map(), |(stamp, _)| Some(*stamp));

    let mut results = EstimatorResults::default();
    for ((stamp, row), _, _) in joined {
        results.stamps.push(stamp);
        results.velocity.push(vector3_at(row, VELOCITY_OFFSET));
        results.bias_gyr.push(vector3_at(row, BIAS_GYR_OFFSET));
        results.bias_acc.push(vector4_at(row, BIAS_ACC_OFFSET));
    }

    debug!(
        "Estimator results {}: {} of {} rows matched",
        filename.as_ref().display(),
        results.len(),
        table.len()
    );
    Ok(results)
}
