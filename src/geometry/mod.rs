//! Geometry utilities: rigid-body transforms.

pub mod se3;

pub use se3::SE3;
