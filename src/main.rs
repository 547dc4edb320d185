use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use traj_loader::io::{
    load_dataset_csv, load_estimator_results, load_hand_eye_calib_from_file,
    load_relative_errors_from_file,
};
use traj_loader::{ExternalMatcher, LoaderConfig};

#[derive(Parser)]
#[command(name = "traj-loader")]
#[command(about = "Load and synchronize estimated and ground-truth trajectories")]
struct Args {
    /// Dataset directory holding the estimate, ground-truth and match tables
    #[arg(short, long)]
    data_dir: PathBuf,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Recompute the match file even if it exists
    #[arg(long)]
    rematch: bool,

    /// Offset added to estimate stamps when matching (seconds)
    #[arg(long)]
    offset_sec: Option<f64>,

    /// Maximum stamp difference accepted when matching (seconds)
    #[arg(long)]
    max_difference_sec: Option<f64>,

    /// Estimator results file (velocity and biases) to synchronize as well
    #[arg(long)]
    estimator_results: Option<PathBuf>,

    /// Hand-eye calibration YAML
    #[arg(long)]
    hand_eye: Option<PathBuf>,

    /// Segment length of a relative-error table to load
    #[arg(long)]
    segment_length: Option<f64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => LoaderConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => LoaderConfig::default(),
    };
    if args.rematch {
        config.dataset.rematch_timestamps = true;
    }
    if let Some(offset) = args.offset_sec {
        config.dataset.match_offset_sec = offset;
    }
    if let Some(max_diff) = args.max_difference_sec {
        config.dataset.match_max_difference_sec = max_diff;
    }

    let matcher = ExternalMatcher::new(config.matcher.clone());
    let dataset = load_dataset_csv(&args.data_dir, &config.dataset, &matcher)
        .with_context(|| format!("Failed to load dataset {}", args.data_dir.display()))?;
    let traj = &dataset.trajectory;

    println!(
        "Synchronized {} poses ({} match pairs)",
        traj.len(),
        dataset.matches.pairs().len()
    );
    if let (Some(first), Some(last)) = (traj.stamps_es.first(), traj.stamps_es.last()) {
        println!(
            "Estimate range: {} ns to {} ns ({:.3} s)",
            first,
            last,
            (last - first) as f64 * 1e-9
        );
    }

    if let Some(path) = &args.estimator_results {
        let results = load_estimator_results(path, &dataset.matches)
            .with_context(|| format!("Failed to load estimator results {}", path.display()))?;
        println!("Estimator results: {} matched rows", results.len());
    }

    if let Some(segment_length) = args.segment_length {
        let errors = load_relative_errors_from_file(
            &args.data_dir,
            segment_length,
            &config.relative_errors_prefix,
        )
        .context("Failed to load relative errors")?;
        let mean = |v: &[f64]| v.iter().sum::<f64>() / v.len() as f64;
        println!(
            "Relative errors ({} m segments, {} samples): mean position {:.4}, mean yaw {:.4}",
            segment_length,
            errors.len(),
            mean(&errors.pos_error_norms),
            mean(&errors.yaw_errors)
        );
    }

    if let Some(path) = &args.hand_eye {
        let t_sensor_trackable = load_hand_eye_calib_from_file(path)
            .with_context(|| format!("Failed to load hand-eye calibration {}", path.display()))?;
        println!("T_sensor_trackable =\n{}", t_sensor_trackable.to_matrix());
    }

    info!("done");
    Ok(())
}
