//! Precomputed relative-error tables, one file per segment length.
//!
//! Column layout of `<prefix>_<segment_length>.csv`:
//!
//! | col  | content                         |
//! |------|---------------------------------|
//! | 0    | start index of the segment      |
//! | 1..4 | position error x, y, z          |
//! | 4..7 | rotation error roll, pitch, yaw |
//! | 7    | segment length                  |
//! | 8    | (unused here)                   |
//! | 9    | scale error                     |

use std::path::{Path, PathBuf};

use nalgebra::{Vector2, Vector3};

use super::table::{check_file_exists, parse_fields, read_csv_records};
use crate::error::{LoadError, Result};

/// Default file prefix of relative-error tables.
pub const DEFAULT_PREFIX: &str = "traj_relative_errors";

const COLUMNS: usize = 10;
const SEGMENT_LENGTH_COL: usize = 7;
const SCALE_ERROR_COL: usize = 9;

/// Scalar error magnitudes per segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelativeErrors {
    /// Euclidean norm of the absolute position error.
    pub pos_error_norms: Vec<f64>,
    /// Combined magnitude of roll and pitch errors.
    pub roll_pitch_errors: Vec<f64>,
    pub yaw_errors: Vec<f64>,
    pub scale_errors: Vec<f64>,
    pub start_indices: Vec<i64>,
}

impl RelativeErrors {
    pub fn len(&self) -> usize {
        self.start_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.start_indices.is_empty()
    }

    fn push_row(&mut self, row: &[f64]) {
        let pos = Vector3::new(row[1], row[2], row[3]).abs();
        let roll_pitch = Vector2::new(row[4], row[5]).abs();

        self.pos_error_norms.push(pos.norm());
        self.roll_pitch_errors.push(roll_pitch.norm());
        self.yaw_errors.push(row[6].abs());
        self.scale_errors.push(row[SCALE_ERROR_COL]);
        self.start_indices.push(row[0] as i64);
    }
}

/// Path of the table for `segment_length`. The length is printed with
/// `Display`, so `10.0` maps to `<prefix>_10.csv`.
pub fn relative_errors_path(data_dir: &Path, prefix: &str, segment_length: f64) -> PathBuf {
    data_dir.join(format!("{}_{}.csv", prefix, segment_length))
}

/// Loads the relative-error table for `segment_length` from `data_dir`.
///
/// The segment length recorded in the first data row must equal the requested
/// one, which guards against a file that was renamed or mislabelled.
pub fn load_relative_errors_from_file(
    data_dir: impl AsRef<Path>,
    segment_length: f64,
    filename_result_prefix: &str,
) -> Result<RelativeErrors> {
    let path = check_file_exists(relative_errors_path(
        data_dir.as_ref(),
        filename_result_prefix,
        segment_length,
    ))?;

    let mut errors = RelativeErrors::default();
    for (line, rec) in read_csv_records(&path)? {
        if rec.len() < COLUMNS {
            return Err(LoadError::parse(
                &path,
                line,
                format!("expected {} columns, got {}", COLUMNS, rec.len()),
            ));
        }
        let row = parse_fields(&path, line, rec.iter().take(COLUMNS))?;

        if errors.is_empty() && row[SEGMENT_LENGTH_COL] != segment_length {
            return Err(LoadError::SegmentLengthMismatch {
                expected: segment_length,
                found: row[SEGMENT_LENGTH_COL],
            });
        }
        errors.push_row(&row);
    }

    if errors.is_empty() {
        return Err(LoadError::parse(&path, 1, "relative-error table has no rows"));
    }
    Ok(errors)
}
