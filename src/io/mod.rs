//! Dataset file readers.

pub mod dataset;
pub mod estimator;
pub mod hand_eye;
pub mod legacy;
pub mod matches;
pub mod relative_errors;
pub mod table;

pub use dataset::{CsvDataset, load_dataset_csv};
pub use estimator::{EstimatorResults, load_estimator_results};
pub use hand_eye::load_hand_eye_calib_from_file;
pub use matches::MatchTable;
pub use relative_errors::{RelativeErrors, load_relative_errors_from_file};
