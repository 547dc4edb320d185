//! Producing the timestamp match file.
//!
//! The correspondence search itself lives outside this crate. Loaders only need
//! something that, given a [`MatchRequest`], leaves a match file on disk; that
//! something is a [`CorrespondenceProvider`].

use std::path::Path;
use std::process::Command;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{LoadError, Result};

/// Inputs of one matching run. Filenames are relative to `data_dir`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRequest<'a> {
    pub data_dir: &'a Path,
    pub filename_es: &'a str,
    pub filename_gt: &'a str,
    pub filename_matches: &'a str,
    /// Offset added to estimate stamps before matching, in seconds.
    pub offset_sec: f64,
    /// Largest accepted stamp difference, in seconds.
    pub max_difference_sec: f64,
}

/// Writes `request.filename_matches` inside `request.data_dir`.
pub trait CorrespondenceProvider {
    fn compute_matches(&self, request: &MatchRequest<'_>) -> Result<()>;
}

/// Command line of the external matcher.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub program: String,
    /// Arguments placed before the generated `--name=value` flags.
    pub args: Vec<String>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            program: "rosrun".to_string(),
            args: vec![
                "ze_trajectory_analysis".to_string(),
                "match_stamps".to_string(),
            ],
        }
    }
}

/// Runs the external `match_stamps` tool and waits for it to exit.
#[derive(Debug, Clone, Default)]
pub struct ExternalMatcher {
    config: MatcherConfig,
}

impl ExternalMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Full argument list for `request`, leading arguments first.
    ///
    /// Seconds are written with `{:?}` so whole values keep their decimal
    /// point (`--offset_sec=0.0`).
    pub fn arguments(&self, request: &MatchRequest<'_>) -> Vec<String> {
        let mut args = self.config.args.clone();
        args.extend([
            format!("--data_dir={}", request.data_dir.display()),
            format!("--filename_es={}", request.filename_es),
            format!("--filename_gt={}", request.filename_gt),
            format!("--filename_matches={}", request.filename_matches),
            format!("--offset_sec={:?}", request.offset_sec),
            format!("--max_difference_sec={:?}", request.max_difference_sec),
        ]);
        args
    }
}

impl CorrespondenceProvider for ExternalMatcher {
    fn compute_matches(&self, request: &MatchRequest<'_>) -> Result<()> {
        let args = self.arguments(request);
        let command_line = format!("{} {}", self.config.program, args.join(" "));
        info!("Executing command: {}", command_line);

        let status = Command::new(&self.config.program)
            .args(&args)
            .status()
            .map_err(|e| LoadError::Matcher {
                command: command_line.clone(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(LoadError::Matcher {
                command: command_line,
                reason: format!("exited with {}", status),
            });
        }
        debug!("matcher finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(dir: &Path) -> MatchRequest<'_> {
        MatchRequest {
            data_dir: dir,
            filename_es: "traj_es.csv",
            filename_gt: "traj_gt.csv",
            filename_matches: "traj_es_gt_matches.csv",
            offset_sec: 0.0,
            max_difference_sec: 0.02,
        }
    }

    #[test]
    fn test_default_command_line() {
        let matcher = ExternalMatcher::default();
        let args = matcher.arguments(&request(Path::new("/data/run1")));
        assert_eq!(
            args,
            vec![
                "ze_trajectory_analysis",
                "match_stamps",
                "--data_dir=/data/run1",
                "--filename_es=traj_es.csv",
                "--filename_gt=traj_gt.csv",
                "--filename_matches=traj_es_gt_matches.csv",
                "--offset_sec=0.0",
                "--max_difference_sec=0.02",
            ]
        );
    }

    #[test]
    fn test_seconds_keep_decimal_point() {
        let mut req = request(Path::new("/data"));
        req.offset_sec = -1.0;
        req.max_difference_sec = 1.0;
        let args = ExternalMatcher::default().arguments(&req);
        assert!(args.contains(&"--offset_sec=-1.0".to_string()));
        assert!(args.contains(&"--max_difference_sec=1.0".to_string()));
    }

    #[test]
    fn test_missing_program_is_matcher_error() {
        let matcher = ExternalMatcher::new(MatcherConfig {
            program: "definitely-not-a-real-matcher-binary".to_string(),
            args: Vec::new(),
        });
        let err = matcher.compute_matches(&request(Path::new("."))).unwrap_err();
        assert!(matches!(err, LoadError::Matcher { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_matcher_error() {
        let matcher = ExternalMatcher::new(MatcherConfig {
            program: "false".to_string(),
            args: Vec::new(),
        });
        let err = matcher.compute_matches(&request(Path::new("."))).unwrap_err();
        assert!(matches!(err, LoadError::Matcher { .. }));
    }
}
