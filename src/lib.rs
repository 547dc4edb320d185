//! Loading and synchronization of estimated vs. ground-truth trajectories for
//! offline accuracy evaluation.
//!
//! The main entry point is [`io::load_dataset_csv`], which joins an estimate
//! table and a ground-truth table through a timestamp match table and returns
//! index-aligned position / quaternion arrays.

pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod join;
pub mod matching;
pub mod trajectory;

#[cfg(test)]
mod test_utils;

pub use config::{DatasetFiles, LoaderConfig};
pub use error::{LoadError, Result};
pub use matching::{CorrespondenceProvider, ExternalMatcher, MatchRequest, MatcherConfig};
pub use trajectory::{PoseSample, SyncedTrajectory, TimestampNs};
