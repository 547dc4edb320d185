//! Loader configuration.
//!
//! Every field has a default, so a YAML file only needs to list what differs:
//!
//! ```yaml
//! dataset:
//!   filename_es: traj_es.csv
//!   rematch_timestamps: true
//!   match_max_difference_sec: 0.01
//! matcher:
//!   program: match_stamps
//!   args: []
//! ```

use std::fs::File;
use std::path::Path;

use serde::Deserialize;

use crate::error::{LoadError, Result};
use crate::io::relative_errors::DEFAULT_PREFIX;
use crate::matching::MatcherConfig;

/// File names and matching parameters of a CSV trajectory dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatasetFiles {
    pub filename_gt: String,
    pub filename_es: String,
    pub filename_matches: String,
    /// Recompute the match file even if it already exists.
    pub rematch_timestamps: bool,
    pub match_offset_sec: f64,
    pub match_max_difference_sec: f64,
}

impl Default for DatasetFiles {
    fn default() -> Self {
        Self {
            filename_gt: "traj_gt.csv".to_string(),
            filename_es: "traj_es.csv".to_string(),
            filename_matches: "traj_es_gt_matches.csv".to_string(),
            rematch_timestamps: false,
            match_offset_sec: 0.0,
            match_max_difference_sec: 0.02,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub dataset: DatasetFiles,
    pub matcher: MatcherConfig,
    /// Prefix of relative-error tables, `<prefix>_<segment_length>.csv`.
    pub relative_errors_prefix: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetFiles::default(),
            matcher: MatcherConfig::default(),
            relative_errors_prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl LoaderConfig {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::FileNotFound(path.to_path_buf())
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        serde_yaml::from_reader(file).map_err(|source| LoadError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}
