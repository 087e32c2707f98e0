pub mod eigen;

pub use eigen::{DefaultEigenSolver, EigenError, EigenPair, SymmetricEigenApi, decompose_symmetric};

use nalgebra::{Matrix3, Vector3};

pub type Mat3 = Matrix3<f64>;
pub type Vec3 = Vector3<f64>;

/// Inverse cosine tolerating floating-point overshoot of the unit interval.
pub fn clamped_acos(value: f64) -> f64 {
    value.clamp(-1.0, 1.0).acos()
}
