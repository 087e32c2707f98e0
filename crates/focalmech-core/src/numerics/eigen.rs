use super::{Mat3, Vec3};
use nalgebra::linalg::SymmetricEigen;

const EIGEN_MAX_ITERATIONS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EigenError {
    #[error("symmetric eigen iteration did not converge within {max_iterations} iterations")]
    ConvergenceFailed { max_iterations: usize },
}

/// Eigenvalues in ascending order together with the matching orthonormal
/// eigenvector columns (column `i` belongs to eigenvalue `i`).
#[derive(Debug, Clone, PartialEq)]
pub struct EigenPair {
    eigenvalues: Vec3,
    eigenvectors: Mat3,
}

impl EigenPair {
    /// Ascending eigenvalue order is the contract every backend must meet;
    /// a violation is a bug in the backend, not a recoverable condition.
    pub fn new(eigenvalues: Vec3, eigenvectors: Mat3) -> Self {
        assert!(
            eigenvalues[0] <= eigenvalues[1] && eigenvalues[1] <= eigenvalues[2],
            "eigenvalues must be ascending, got [{}, {}, {}]",
            eigenvalues[0],
            eigenvalues[1],
            eigenvalues[2]
        );
        Self {
            eigenvalues,
            eigenvectors,
        }
    }

    pub fn eigenvalues(&self) -> &Vec3 {
        &self.eigenvalues
    }

    pub fn eigenvectors(&self) -> &Mat3 {
        &self.eigenvectors
    }

    /// Eigenvector of the smallest eigenvalue.
    pub fn min_eigenvector(&self) -> Vec3 {
        self.eigenvectors.column(0).into_owned()
    }

    /// Eigenvector of the largest eigenvalue.
    pub fn max_eigenvector(&self) -> Vec3 {
        self.eigenvectors.column(2).into_owned()
    }
}

/// Injection seam over the symmetric eigen backend, so ordering and sign
/// handling in the consumers stay testable against substitute backends.
pub trait SymmetricEigenApi {
    fn decompose_symmetric(&self, matrix: &Mat3) -> Result<EigenPair, EigenError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultEigenSolver;

impl SymmetricEigenApi for DefaultEigenSolver {
    fn decompose_symmetric(&self, matrix: &Mat3) -> Result<EigenPair, EigenError> {
        decompose_symmetric(matrix)
    }
}

/// Decompose a symmetric 3x3 matrix into an ascending [`EigenPair`].
///
/// The backend returns eigenvalues in no particular order, so the pair is
/// sorted here with the eigenvector columns permuted to match.
pub fn decompose_symmetric(matrix: &Mat3) -> Result<EigenPair, EigenError> {
    let eigen = SymmetricEigen::try_new(*matrix, f64::EPSILON, EIGEN_MAX_ITERATIONS).ok_or(
        EigenError::ConvergenceFailed {
            max_iterations: EIGEN_MAX_ITERATIONS,
        },
    )?;

    let mut order = [0_usize, 1, 2];
    order.sort_unstable_by(|lhs, rhs| {
        eigen.eigenvalues[*lhs].total_cmp(&eigen.eigenvalues[*rhs])
    });

    let eigenvalues = Vec3::new(
        eigen.eigenvalues[order[0]],
        eigen.eigenvalues[order[1]],
        eigen.eigenvalues[order[2]],
    );
    let mut eigenvectors = Mat3::zeros();
    for (target, &source) in order.iter().enumerate() {
        eigenvectors.set_column(target, &eigen.eigenvectors.column(source));
    }

    Ok(EigenPair::new(eigenvalues, eigenvectors))
}
