//! Synchronized trajectory arrays.
//!
//! Quaternions are stored as raw `[x, y, z, w]` vectors rather than
//! `UnitQuaternion`s: the loaders hand data through untouched and leave
//! normalization to whatever computes the errors.

use nalgebra::{Vector3, Vector4};

/// Integer nanosecond timestamp. Never routed through `f64`, which cannot hold
/// 19-digit stamps exactly.
pub type TimestampNs = i64;

/// One pose sample: key, position and `[x, y, z, w]` quaternion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseSample<K> {
    pub stamp: K,
    pub position: Vector3<f64>,
    pub quaternion: Vector4<f64>,
}

/// Index-aligned estimate / ground-truth pairs.
///
/// Entry `i` of every vector belongs to the same synchronized sample. `K` is
/// the key the pairs were joined on: nanosecond timestamps for the CSV format,
/// frame ids or slot indices for the legacy layouts.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncedTrajectory<K = TimestampNs> {
    pub stamps_es: Vec<K>,
    pub p_es: Vec<Vector3<f64>>,
    pub q_es: Vec<Vector4<f64>>,
    pub stamps_gt: Vec<K>,
    pub p_gt: Vec<Vector3<f64>>,
    pub q_gt: Vec<Vector4<f64>>,
}

impl<K> SyncedTrajectory<K> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stamps_es: Vec::with_capacity(capacity),
            p_es: Vec::with_capacity(capacity),
            q_es: Vec::with_capacity(capacity),
            stamps_gt: Vec::with_capacity(capacity),
            p_gt: Vec::with_capacity(capacity),
            q_gt: Vec::with_capacity(capacity),
        }
    }

    /// Append one synchronized pair.
    pub fn push(&mut self, es: PoseSample<K>, gt: PoseSample<K>) {
        self.stamps_es.push(es.stamp);
        self.p_es.push(es.position);
        self.q_es.push(es.quaternion);
        self.stamps_gt.push(gt.stamp);
        self.p_gt.push(gt.position);
        self.q_gt.push(gt.quaternion);
    }

    pub fn len(&self) -> usize {
        self.stamps_es.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps_es.is_empty()
    }
}

impl<K: Copy> SyncedTrajectory<K> {
    /// The `i`-th synchronized pair as `(estimate, ground truth)`.
    pub fn pair(&self, i: usize) -> Option<(PoseSample<K>, PoseSample<K>)> {
        if i >= self.len() {
            return None;
        }
        Some((
            PoseSample {
                stamp: self.stamps_es[i],
                position: self.p_es[i],
                quaternion: self.q_es[i],
            },
            PoseSample {
                stamp: self.stamps_gt[i],
                position: self.p_gt[i],
                quaternion: self.q_gt[i],
            },
        ))
    }
}

impl<K> Default for SyncedTrajectory<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads three consecutive values starting at `offset`.
#[inline]
pub(crate) fn vector3_at(row: &[f64], offset: usize) -> Vector3<f64> {
    Vector3::new(row[offset], row[offset + 1], row[offset + 2])
}

/// Reads four consecutive values starting at `offset`, in stored order.
#[inline]
pub(crate) fn vector4_at(row: &[f64], offset: usize) -> Vector4<f64> {
    Vector4::new(row[offset], row[offset + 1], row[offset + 2], row[offset + 3])
}

/// Permutes a quaternion stored `(w, x, y, z)` into `(x, y, z, w)`.
#[inline]
pub fn wxyz_to_xyzw(q: &Vector4<f64>) -> Vector4<f64> {
    Vector4::new(q[1], q[2], q[3], q[0])
}
