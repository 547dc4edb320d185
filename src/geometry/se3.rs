//! SE3: 6-DOF rigid-body transformation (rotation + translation).
//!
//! Transforms follow the `T_target_source` naming convention:
//! `p_target = T_target_source * p_source`.

use nalgebra::{Matrix4, Quaternion, UnitQuaternion, Vector3};

/// Rigid-body transform stored as a unit quaternion and a translation vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SE3 {
    pub rotation: UnitQuaternion<f64>,
    pub translation: Vector3<f64>,
}

impl SE3 {
    /// Construct from quaternion components (w-first) and a translation.
    ///
    /// The quaternion is normalized, so non-unit inputs are accepted.
    pub fn from_quaternion(qw: f64, qx: f64, qy: f64, qz: f64, translation: Vector3<f64>) -> Self {
        let rotation = UnitQuaternion::from_quaternion(Quaternion::new(qw, qx, qy, qz));
        Self {
            rotation,
            translation,
        }
    }

    /// 4x4 homogeneous matrix `[R t; 0 1]`.
    pub fn to_matrix(&self) -> Matrix4<f64> {
        let mut mat = Matrix4::identity();
        mat.fixed_view_mut::<3, 3>(0, 0)
            .copy_from(self.rotation.to_rotation_matrix().matrix());
        mat.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.translation);
        mat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_quaternion_normalizes() {
        let t = SE3::from_quaternion(2.0, 0.0, 0.0, 0.0, Vector3::zeros());
        assert_relative_eq!(t.rotation.w, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_to_matrix_layout() {
        // 90 degrees about z
        let half = std::f64::consts::FRAC_PI_4;
        let t = SE3::from_quaternion(half.cos(), 0.0, 0.0, half.sin(), Vector3::new(1.0, 2.0, 3.0));
        let m = t.to_matrix();

        #[rustfmt::skip]
        let expected = Matrix4::new(
            0.0, -1.0, 0.0, 1.0,
            1.0,  0.0, 0.0, 2.0,
            0.0,  0.0, 1.0, 3.0,
            0.0,  0.0, 0.0, 1.0,
        );
        assert_relative_eq!(m, expected, epsilon = 1e-12);
    }
}
