//! Whitespace-separated trajectory layouts from older evaluation runs.
//!
//! These formats predate the CSV layout of [`super::dataset`] and are only
//! kept so that existing result directories can still be read.

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use super::matches::read_match_whitespace;
use super::table::read_whitespace_table;
use crate::error::{LoadError, Result};
use crate::join::inner_join_by_key;
use crate::trajectory::{PoseSample, SyncedTrajectory, vector3_at, vector4_at};

/// Loads an SVO-GTSAM trace directory.
///
/// Only the rows of the last optimizer state are used. Frames are keyed by
/// frame id; frames without a ground-truth match are removed and the result is
/// sorted by frame id. Both stamp vectors hold the frame ids.
#[deprecated(note = "legacy SVO-GTSAM layout, use load_dataset_csv")]
pub fn load_data_svo_gtsam(trace_dir: impl AsRef<Path>) -> Result<SyncedTrajectory<i64>> {
    let trace_dir = trace_dir.as_ref();
    info!("Loading SVO-GTSAM data...");

    // state id (0), frame id (1), ..., pose (11..18)
    let estimate_csv = trace_dir.join("estimate_states.csv");
    let states_path = if estimate_csv.exists() {
        estimate_csv
    } else {
        trace_dir.join("trace_states.txt")
    };
    let states = read_whitespace_table(&states_path, 18)?;
    let Some(last_state) = states.last().map(|row| row[0] as i64) else {
        return Err(LoadError::parse(&states_path, 0, "no estimator states"));
    };
    let last_rows: Vec<&Vec<f64>> = states
        .iter()
        .filter(|row| row[0] as i64 == last_state)
        .collect();
    let frame_ids: Vec<i64> = last_rows.iter().map(|row| row[1] as i64).collect();
    let traj_es: HashMap<i64, &[f64]> = last_rows
        .iter()
        .map(|row| (row[1] as i64, &row[11..18]))
        .collect();

    // key (0), ..., pose (2..9)
    let gt_rows = read_whitespace_table(trace_dir.join("groundtruth.txt"), 9)?;
    let groundtruth: HashMap<i64, &[f64]> = gt_rows
        .iter()
        .map(|row| (row[0] as i64, &row[2..9]))
        .collect();

    let matches = read_match_whitespace(trace_dir.join("groundtruth_matches.txt"))?;
    info!("done.");

    let mut joined = inner_join_by_key(frame_ids.iter().copied(), &groundtruth, |id| {
        matches.get(*id)
    });
    let n_removed = frame_ids.len() - joined.len();
    info!(
        "removed {} frames because no groundtruth available",
        n_removed
    );

    joined.sort_by_key(|(id, _, _)| *id);
    joined.dedup_by_key(|(id, _, _)| *id);

    let mut trajectory = SyncedTrajectory::with_capacity(joined.len());
    for (id, _, gt) in joined {
        let es = traj_es[&id];
        trajectory.push(
            PoseSample {
                stamp: id,
                position: vector3_at(es, 0),
                quaternion: vector4_at(es, 3),
            },
            PoseSample {
                stamp: id,
                position: vector3_at(gt, 0),
                quaternion: vector4_at(gt, 3),
            },
        );
    }
    Ok(trajectory)
}

/// Loads `traj_estimate.txt` / `groundtruth.txt` / `groundtruth_matches.txt`
/// keyed by image id.
///
/// `cam_delay` is only reported. Both stamp vectors hold the ground-truth
/// timestamp of each pair, since the estimate file carries image ids only.
#[deprecated(note = "legacy image-id layout, use load_dataset_csv")]
pub fn load_dataset(results_dir: impl AsRef<Path>, cam_delay: f64) -> Result<SyncedTrajectory<f64>> {
    let results_dir = results_dir.as_ref();
    info!("loading dataset in {}", results_dir.display());
    info!("cam_delay = {}", cam_delay);

    // image id (0), p (1..4), q (4..8)
    let data_es = read_whitespace_table(results_dir.join("traj_estimate.txt"), 8)?;
    // id (0), stamp (1), p (2..5), q (5..9)
    let gt_rows = read_whitespace_table(results_dir.join("groundtruth.txt"), 9)?;
    let data_gt: HashMap<i64, &[f64]> = gt_rows
        .iter()
        .map(|row| (row[0] as i64, &row[1..]))
        .collect();
    let matches = read_match_whitespace(results_dir.join("groundtruth_matches.txt"))?;

    let joined = inner_join_by_key(data_es.iter(), &data_gt, |row_es| {
        matches.get(row_es[0] as i64)
    });

    let mut trajectory = SyncedTrajectory::with_capacity(joined.len());
    for (row_es, _, row_gt) in joined {
        let t_gt = row_gt[0];
        trajectory.push(
            PoseSample {
                stamp: t_gt,
                position: vector3_at(row_es, 1),
                quaternion: vector4_at(row_es, 4),
            },
            PoseSample {
                stamp: t_gt,
                position: vector3_at(row_gt, 1),
                quaternion: vector4_at(row_gt, 4),
            },
        );
    }
    Ok(trajectory)
}

/// Loads a synthetic run where estimate ids index ground-truth rows directly.
///
/// Each estimate id is resolved to the row position ("slot") of the
/// ground-truth entry with the same id. Both stamp vectors hold the slots.
#[deprecated(note = "legacy synthetic layout, use load_dataset_csv")]
pub fn load_synthetic_dataset(results_dir: impl AsRef<Path>) -> Result<SyncedTrajectory<usize>> {
    let results_dir = results_dir.as_ref();

    // id (0), p (1..4), q (4..8) in both files
    let gt_trajectory = read_whitespace_table(results_dir.join("groundtruth.txt"), 8)?;
    let es_trajectory = read_whitespace_table(results_dir.join("traj_estimate.txt"), 8)?;

    let map_index_slot: HashMap<i64, usize> = gt_trajectory
        .iter()
        .enumerate()
        .map(|(slot, row)| (row[0] as i64, slot))
        .collect();

    let joined = inner_join_by_key(es_trajectory.iter(), &map_index_slot, |row| {
        Some(row[0] as i64)
    });

    let mut trajectory = SyncedTrajectory::with_capacity(joined.len());
    for (row_es, _, &slot) in joined {
        let row_gt = &gt_trajectory[slot];
        trajectory.push(
            PoseSample {
                stamp: slot,
                position: vector3_at(row_es, 1),
                quaternion: vector4_at(row_es, 4),
            },
            PoseSample {
                stamp: slot,
                position: vector3_at(row_gt, 1),
                quaternion: vector4_at(row_gt, 4),
            },
        );
    }
    Ok(trajectory)
}
