//! Hand-eye calibration: the fixed transform between the sensor and the
//! trackable (motion-capture markers) attached to it.

use std::fs::File;
use std::path::Path;

use nalgebra::Vector3;
use serde::Deserialize;
use tracing::info;

use crate::error::{LoadError, Result};
use crate::geometry::SE3;

const HAND_EYE_BLOCK: &str = "T_sensor_trackable";

/// `T_sensor_trackable` block: quaternion `qx, qy, qz, qw` and translation.
#[derive(Debug, Deserialize)]
struct TransformYaml {
    qx: f64,
    qy: f64,
    qz: f64,
    qw: f64,
    tx: f64,
    ty: f64,
    tz: f64,
}

#[derive(Debug, Deserialize)]
struct HandEyeYaml {
    #[serde(rename = "T_sensor_trackable")]
    t_sensor_trackable: Option<TransformYaml>,
}

/// Loads `T_sensor_trackable` from a YAML calibration file.
///
/// Other top-level keys are ignored. Use [`SE3::to_matrix`] for the 4x4
/// homogeneous form.
pub fn load_hand_eye_calib_from_file(filename: impl AsRef<Path>) -> Result<SE3> {
    let path = filename.as_ref();
    info!("Loading Hand-Eye calib from file: {}", path.display());

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
    let params: HandEyeYaml = serde_yaml::from_reader(file).map_err(|source| LoadError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    let t = params
        .t_sensor_trackable
        .ok_or_else(|| LoadError::MissingCalibration {
            path: path.to_path_buf(),
            block: HAND_EYE_BLOCK,
        })?;

    Ok(SE3::from_quaternion(
        t.qw,
        t.qx,
        t.qy,
        t.qz,
        Vector3::new(t.tx, t.ty, t.tz),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::write_file;
    use approx::assert_relative_eq;
    use nalgebra::Matrix4;
    use tempfile::tempdir;

    #[test]
    fn test_loads_transform() {
        let dir = tempdir().unwrap();
        let half = std::f64::consts::FRAC_PI_4;
        let path = write_file(
            dir.path(),
            "hand_eye.yaml",
            &format!(
                "label: vicon\nT_sensor_trackable:\n  qx: 0.0\n  qy: 0.0\n  qz: {}\n  qw: {}\n  tx: 0.1\n  ty: -0.2\n  tz: 0.3\n",
                half.sin(),
                half.cos()
            ),
        );

        let t = load_hand_eye_calib_from_file(&path).unwrap();

        #[rustfmt::skip]
        let expected = Matrix4::new(
            0.0, -1.0, 0.0,  0.1,
            1.0,  0.0, 0.0, -0.2,
            0.0,  0.0, 1.0,  0.3,
            0.0,  0.0, 0.0,  1.0,
        );
        assert_relative_eq!(t.to_matrix(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_unnormalized_quaternion_is_normalized() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "hand_eye.yaml",
            "T_sensor_trackable: {qx: 0, qy: 0, qz: 0, qw: 2, tx: 1, ty: 2, tz: 3}\n",
        );

        let t = load_hand_eye_calib_from_file(&path).unwrap();
        assert_relative_eq!(t.rotation.w, 1.0, epsilon = 1e-12);
        assert_relative_eq!(t.translation, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_missing_block() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "hand_eye.yaml", "T_cam_imu: {qx: 0}\n");

        let err = load_hand_eye_calib_from_file(&path).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingCalibration {
                block: "T_sensor_trackable",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_field_is_yaml_error() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "hand_eye.yaml",
            "T_sensor_trackable: {qx: 0, qy: 0, qz: 0, tx: 1, ty: 2, tz: 3}\n",
        );

        let err = load_hand_eye_calib_from_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Yaml { .. }));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_hand_eye_calib_from_file(dir.path().join("none.yaml")).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound(_)));
    }
}
