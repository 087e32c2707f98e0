//! Euler-angle <-> rotation-matrix conversion for fault-plane geometry.
//!
//! Given a fixed frame (x, y, z) and a rotated frame (xs, ys, zs), the line
//! of nodes is the intersection of the x-y and xs-ys planes:
//! - `alpha` is the angle between the z-axis and the zs-axis,
//! - `beta` is the angle between the x-axis and the line of nodes,
//! - `gamma` is the angle between the line of nodes and the xs-axis.
//!
//! For moment tensors, `euler_to_matrix(dip, strike, -rake)` produces the
//! rotation carrying the reference double couple onto the fault frame.

use crate::common::constants::PI2;
use crate::numerics::{Mat3, Vec3, clamped_acos};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Below this, the fixed and rotated z-axes are treated as coincident and
/// the rotated x-axis stands in for the line of nodes.
const NODAL_LINE_TOLERANCE: f64 = 1.0e-10;
/// Landmark snapping tolerance for alpha = pi/2 and beta = 0, pi.
const SNAP_TOLERANCE: f64 = 1.0e-10;
/// Below this dip, strike and rake are coupled and rake is folded away.
const DEGENERATE_DIP_TOLERANCE: f64 = 1.0e-7;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct EulerAngles {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl EulerAngles {
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }
}

/// Build the rotation matrix for the Euler triplet (alpha, beta, gamma).
pub fn euler_to_matrix(alpha: f64, beta: f64, gamma: f64) -> Mat3 {
    let ca = alpha.cos();
    let cb = beta.cos();
    let cg = gamma.cos();
    let sa = alpha.sin();
    let sb = beta.sin();
    let sg = gamma.sin();

    Mat3::new(
        cb * cg - ca * sb * sg,
        sb * cg + ca * cb * sg,
        sa * sg,
        -cb * sg - ca * sb * cg,
        -sb * sg + ca * cb * cg,
        sa * cg,
        sa * sb,
        -sa * cb,
        ca,
    )
}

/// Inverse of [`euler_to_matrix`].
///
/// The returned triplet is raw: pass it through [`unique_euler`] before
/// interpreting it as (dip, strike, -rake).
pub fn matrix_to_euler(rotmat: &Mat3) -> EulerAngles {
    let ex = Vec3::new(1.0, 0.0, 0.0);
    let ez = Vec3::new(0.0, 0.0, 1.0);
    let exs = rotmat.transpose() * ex;
    let ezs = rotmat.transpose() * ez;

    let mut enodes = ez.cross(&ezs);
    if enodes.norm() < NODAL_LINE_TOLERANCE {
        enodes = exs;
    }
    let enodess = rotmat * enodes;

    let alpha = clamped_acos(ez.dot(&ezs));
    let beta = enodes[1].atan2(enodes[0]).rem_euclid(PI2);
    let gamma = (-enodess[1].atan2(enodess[0])).rem_euclid(PI2);

    EulerAngles::new(alpha, beta, gamma)
}

/// Fold an arbitrary Euler triplet into the canonical seismological range:
///
/// - alpha (dip)    in [0, pi/2]
/// - beta  (strike) in [0, 2*pi)
/// - gamma (-rake)  in [-pi, pi)
///
/// If alpha is exactly pi/2 the plane can be viewed from either side; the
/// side with beta in [0, pi) is chosen. If alpha is near zero, strike and
/// rake act about the same axis and gamma is folded into beta.
pub fn unique_euler(angles: EulerAngles) -> EulerAngles {
    let mut alpha = angles.alpha.rem_euclid(PI2);
    let mut beta = angles.beta;
    let mut gamma = angles.gamma;

    if FRAC_PI_2 < alpha && alpha <= PI {
        alpha = PI - alpha;
        beta += PI;
        gamma = PI2 - gamma;
    } else if PI < alpha && alpha <= 1.5 * PI {
        alpha -= PI;
        gamma = PI - gamma;
    } else if 1.5 * PI < alpha && alpha <= PI2 {
        alpha = PI2 - alpha;
        beta += PI;
        gamma += PI;
    }

    alpha = alpha.rem_euclid(PI2);
    beta = beta.rem_euclid(PI2);
    gamma = wrap_signed(gamma);

    // Snap onto the singular landmarks so the branches below see exact
    // values instead of flapping on floating noise.
    if (alpha - FRAC_PI_2).abs() < SNAP_TOLERANCE {
        alpha = FRAC_PI_2;
    }
    if (beta - PI).abs() < SNAP_TOLERANCE {
        beta = PI;
    }
    if (beta - PI2).abs() < SNAP_TOLERANCE {
        beta = 0.0;
    }
    if beta.abs() < SNAP_TOLERANCE {
        beta = 0.0;
    }

    if alpha == FRAC_PI_2 && beta >= PI {
        gamma = -gamma;
        beta = (beta - PI).rem_euclid(PI2);
        gamma = wrap_signed(gamma);
        assert!(
            (0.0..PI).contains(&beta),
            "beta must land in [0, pi) after the dip-90 fold, got {beta}"
        );
        assert!(
            (-PI..PI).contains(&gamma),
            "gamma must land in [-pi, pi) after the dip-90 fold, got {gamma}"
        );
    }

    if alpha < DEGENERATE_DIP_TOLERANCE {
        beta = (beta + gamma).rem_euclid(PI2);
        gamma = 0.0;
    }

    EulerAngles::new(alpha, beta, gamma)
}

/// Wrap into [-pi, pi).
fn wrap_signed(angle: f64) -> f64 {
    (angle + PI).rem_euclid(PI2) - PI
}
