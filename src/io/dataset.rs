//! Comma-separated trajectory datasets keyed by nanosecond timestamps.
//!
//! A dataset directory holds:
//! - `traj_gt.csv`: `timestamp, px, py, pz, qw, qx, qy, qz, ...`
//! - `traj_es.csv`: `timestamp, px, py, pz, qx, qy, qz, qw, ...`
//! - `traj_es_gt_matches.csv`: `es_timestamp, gt_timestamp`
//!
//! The match file is produced on demand by a [`CorrespondenceProvider`].

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use super::matches::{MatchTable, read_match_csv};
use super::table::{check_file_exists, read_stamped_csv};
use crate::config::DatasetFiles;
use crate::error::Result;
use crate::join::inner_join_by_key;
use crate::matching::{CorrespondenceProvider, MatchRequest};
use crate::trajectory::{
    PoseSample, SyncedTrajectory, TimestampNs, vector3_at, vector4_at, wxyz_to_xyzw,
};

/// Payload columns needed for position + quaternion.
const POSE_COLUMNS: usize = 7;

/// Synchronized trajectory together with the match table used to build it.
///
/// The match table can be handed on to [`load_estimator_results`] for files that
/// share the same estimate stamps.
///
/// [`load_estimator_results`]: super::estimator::load_estimator_results
#[derive(Debug, Clone)]
pub struct CsvDataset {
    pub trajectory: SyncedTrajectory<TimestampNs>,
    pub matches: MatchTable,
}

/// Loads and synchronizes the estimate and ground-truth tables in `data_dir`.
///
/// The match file is (re)computed through `provider` when it is missing or when
/// `files.rematch_timestamps` is set. Estimate rows without a match, or whose
/// matched stamp has no ground-truth row, are dropped.
pub fn load_dataset_csv(
    data_dir: impl AsRef<Path>,
    files: &DatasetFiles,
    provider: &dyn CorrespondenceProvider,
) -> Result<CsvDataset> {
    let data_dir = data_dir.as_ref();
    let matches_path = data_dir.join(&files.filename_matches);

    if !matches_path.exists() || files.rematch_timestamps {
        info!("Find timestamp matches.");
        provider.compute_matches(&MatchRequest {
            data_dir,
            filename_es: &files.filename_es,
            filename_gt: &files.filename_gt,
            filename_matches: &files.filename_matches,
            offset_sec: files.match_offset_sec,
            max_difference_sec: files.match_max_difference_sec,
        })?;
    }

    let gt_path = check_file_exists(data_dir.join(&files.filename_gt))?;
    let es_path = check_file_exists(data_dir.join(&files.filename_es))?;

    let table_gt = read_stamped_csv(&gt_path, POSE_COLUMNS)?;
    let table_es = read_stamped_csv(&es_path, POSE_COLUMNS)?;
    let matches = read_match_csv(&matches_path)?;

    let groundtruth: HashMap<TimestampNs, &[f64]> = table_gt.iter().collect();

    let joined = inner_join_by_key(table_es.iter(), &groundtruth, |(t_es, _)| {
        matches.get(*t_es)
    });

    let mut trajectory = SyncedTrajectory::with_capacity(joined.len());
    for ((t_es, row_es), t_gt, row_gt) in joined {
        trajectory.push(
            PoseSample {
                stamp: t_es,
                position: vector3_at(row_es, 0),
                quaternion: vector4_at(row_es, 3),
            },
            PoseSample {
                stamp: t_gt,
                position: vector3_at(row_gt, 0),
                quaternion: wxyz_to_xyzw(&vector4_at(row_gt, 3)),
            },
        );
    }

    info!(
        "Loaded {} synchronized poses from {} ({} estimates, {} ground-truth rows)",
        trajectory.len(),
        data_dir.display(),
        table_es.len(),
        table_gt.len()
    );

    Ok(CsvDataset {
        trajectory,
        matches,
    })
}
