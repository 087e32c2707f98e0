//! The moment-tensor entity: eigen-decomposition, the two candidate fault
//! orientations, and the derived seismological quantities.

use crate::common::constants::RADDEG;
use crate::euler::{euler_to_matrix, matrix_to_euler, unique_euler};
use crate::numerics::{
    DefaultEigenSolver, EigenError, EigenPair, Mat3, SymmetricEigenApi, Vec3, decompose_symmetric,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

/// Constant of the Hanks-Kanamori relation for moments in newton meters.
const MAGNITUDE_OFFSET: f64 = 6.06333333;

static REFERENCE_FRAME: OnceLock<ReferenceFrame> = OnceLock::new();

/// Reference double couple and the fixed flip onto the auxiliary plane,
/// eigen-decomposed once per process.
#[derive(Debug)]
struct ReferenceFrame {
    m_unrot: Mat3,
    flip_dc: Mat3,
    unrot_eigen: EigenPair,
}

fn reference_frame() -> &'static ReferenceFrame {
    REFERENCE_FRAME.get_or_init(|| {
        let m_unrot = Mat3::new(0.0, 0.0, -1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0);
        let flip_dc = Mat3::new(0.0, 0.0, -1.0, 0.0, -1.0, 0.0, -1.0, 0.0, 0.0);
        let unrot_eigen = decompose_symmetric(&m_unrot)
            .expect("reference double-couple decomposition must converge");
        ReferenceFrame {
            m_unrot,
            flip_dc,
            unrot_eigen,
        }
    })
}

/// One fault-plane solution, angles in radians unless stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct StrikeDipRake {
    pub strike: f64,
    pub dip: f64,
    pub rake: f64,
}

impl StrikeDipRake {
    pub fn new(strike: f64, dip: f64, rake: f64) -> Self {
        Self { strike, dip, rake }
    }

    /// The same triplet expressed in degrees.
    pub fn in_degrees(&self) -> Self {
        Self {
            strike: self.strike * RADDEG,
            dip: self.dip * RADDEG,
            rake: self.rake * RADDEG,
        }
    }
}

/// A seismic moment tensor with its eigen-decomposition and the two
/// candidate fault orientations, fully determined at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MomentTensor {
    m: Mat3,
    eigen: EigenPair,
    rotmats: [Mat3; 2],
}

impl MomentTensor {
    /// Build from a symmetric 3x3 moment-tensor matrix.
    ///
    /// The caller is responsible for symmetry; NaN or asymmetric input
    /// propagates through the decomposition instead of being validated.
    pub fn from_matrix(m: &Mat3) -> Result<Self, EigenError> {
        Self::from_matrix_with(&DefaultEigenSolver, m)
    }

    /// Same as [`MomentTensor::from_matrix`] with an injected eigen backend.
    pub fn from_matrix_with<S: SymmetricEigenApi>(solver: &S, m: &Mat3) -> Result<Self, EigenError> {
        let eigen = solver.decompose_symmetric(m)?;
        let frame = reference_frame();

        // An eigenvector basis is only defined up to sign, so the aligned
        // rotation may come out as a reflection; force a proper rotation.
        let mut rotmat1 =
            (eigen.eigenvectors() * frame.unrot_eigen.eigenvectors().transpose()).transpose();
        if rotmat1.determinant() < 0.0 {
            rotmat1 = -rotmat1;
        }

        Ok(Self::assemble(*m, eigen, rotmat1))
    }

    /// Build from a fault-plane orientation (radians) and a scalar moment.
    pub fn from_angles(
        strike: f64,
        dip: f64,
        rake: f64,
        scalar_moment: f64,
    ) -> Result<Self, EigenError> {
        let frame = reference_frame();
        let rotmat1 = euler_to_matrix(dip, strike, -rake);
        let m = rotmat1.transpose() * frame.m_unrot * rotmat1 * scalar_moment;
        let eigen = decompose_symmetric(&m)?;
        Ok(Self::assemble(m, eigen, rotmat1))
    }

    fn assemble(m: Mat3, eigen: EigenPair, rotmat1: Mat3) -> Self {
        let rotmat2 = reference_frame().flip_dc * rotmat1;
        let rotmats = if compare_by_absolute_entries(&rotmat1, &rotmat2) == Ordering::Greater {
            [rotmat2, rotmat1]
        } else {
            [rotmat1, rotmat2]
        };
        Self { m, eigen, rotmats }
    }

    /// Both (strike, dip, rake) solutions, in the stored candidate order.
    pub fn both_strike_dip_rake(&self) -> [StrikeDipRake; 2] {
        self.rotmats.map(|rotmat| {
            let canonical = unique_euler(matrix_to_euler(&rotmat));
            StrikeDipRake::new(canonical.beta, canonical.alpha, -canonical.gamma)
        })
    }

    /// Direction of the pressure axis: the largest-eigenvalue eigenvector.
    pub fn p_axis(&self) -> Vec3 {
        self.eigen.max_eigenvector()
    }

    /// Direction of the tension axis: the smallest-eigenvalue eigenvector.
    pub fn t_axis(&self) -> Vec3 {
        self.eigen.min_eigenvector()
    }

    /// Both candidate slip directions.
    pub fn both_slip_vectors(&self) -> [Vec3; 2] {
        self.rotmats.map(|rotmat| rotmat * Vec3::new(1.0, 0.0, 0.0))
    }

    /// The moment-tensor matrix (a copy).
    pub fn m(&self) -> Mat3 {
        self.m
    }

    /// The pure-shear tensor sharing this tensor's scalar moment and first
    /// candidate orientation; any isotropic/CLVD component is discarded.
    pub fn m_plain_double_couple(&self) -> Mat3 {
        let frame = reference_frame();
        let rotmat1 = self.rotmats[0];
        rotmat1.transpose() * frame.m_unrot * rotmat1 * self.scalar_moment()
    }

    /// Scalar seismic moment, from the Frobenius norm of the eigenvalues.
    pub fn scalar_moment(&self) -> f64 {
        self.eigen.eigenvalues().norm() / std::f64::consts::SQRT_2
    }

    /// Moment magnitude via the Hanks-Kanamori relation.
    pub fn moment_magnitude(&self) -> f64 {
        self.scalar_moment().log10() / 1.5 - MAGNITUDE_OFFSET
    }
}

/// Total order on candidate rotations: flatten row-major and compare entry
/// absolute values, first difference wins. On a full tie the caller-supplied
/// order is kept, which makes the pair ordering reproducible within a call.
fn compare_by_absolute_entries(lhs: &Mat3, rhs: &Mat3) -> Ordering {
    for row in 0..3 {
        for col in 0..3 {
            let order = lhs[(row, col)].abs().total_cmp(&rhs[(row, col)].abs());
            if order != Ordering::Equal {
                return order;
            }
        }
    }
    Ordering::Equal
}

impl Display for MomentTensor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let max_entry = self
            .m
            .iter()
            .fold(0.0_f64, |best, value| best.max(value.abs()));
        let scale = if max_entry > 0.0 {
            10.0_f64.powf(max_entry.log10().ceil())
        } else {
            1.0
        };
        let m = self.m / scale;

        writeln!(
            f,
            "Scalar Moment: M0 = {} (Mw = {:.1})",
            self.scalar_moment(),
            self.moment_magnitude()
        )?;
        writeln!(
            f,
            "Moment Tensor: Mnn = {:6.3},  Mee = {:6.3}, Mdd = {:6.3},",
            m[(0, 0)],
            m[(1, 1)],
            m[(2, 2)]
        )?;
        writeln!(
            f,
            "               Mne = {:6.3},  Mnd = {:6.3}, Med = {:6.3}    [ x {} ]",
            m[(0, 1)],
            m[(0, 2)],
            m[(1, 2)],
            scale
        )?;
        for (index, solution) in self.both_strike_dip_rake().iter().enumerate() {
            let degrees = solution.in_degrees();
            writeln!(
                f,
                "Fault plane {}: strike = {:3.0}, dip = {:3.0}, slip-rake = {:4.0}",
                index + 1,
                degrees.strike,
                degrees.dip,
                degrees.rake
            )?;
        }
        Ok(())
    }
}
