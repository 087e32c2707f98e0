//! Conversion between symmetric 3x3 seismic moment-tensor matrices and the
//! (strike, dip, rake, scalar-moment) description of a fault plane.
//!
//! A pure double-couple source radiates an identical field from its fault
//! plane and from the auxiliary plane, so every conversion here tracks both
//! candidate solutions and canonicalizes them into a deterministic order.

pub mod common;
pub mod euler;
pub mod mechanism;
pub mod numerics;

pub use euler::{EulerAngles, euler_to_matrix, matrix_to_euler, unique_euler};
pub use mechanism::{MomentTensor, StrikeDipRake};
pub use numerics::{
    DefaultEigenSolver, EigenError, EigenPair, Mat3, SymmetricEigenApi, Vec3, decompose_symmetric,
};
