//! Multivariate normal sampler for θ draws.
//!
//! Purpose
//! -------
//! Draw `θ = μ + L·z`, `z ~ N(0, I)`, from the estimator's asymptotic
//! sampling distribution.
//!
//! Key behaviors
//! -------------
//! - Factorization via the symmetric eigendecomposition `Σ = Q Λ Qᵀ`,
//!   `L = Q·sqrt(max(Λ, 0))`. Unlike a Cholesky factor this accepts
//!   singular (rank-deficient) covariances, including the zero matrix.
//! - A materially negative eigenvalue is fatal; nothing is substituted.
//!
//! Invariants & assumptions
//! ------------------------
//! - `mean` is non-empty and finite; `cov` is `dim × dim`, finite and
//!   symmetric within `SYM_TOL·max(1, max|Σ|)`.
//! - `λ_min ≥ −PSD_TOL·max(1, |λ_max|)`.
use crate::inference::errors::{InferenceError, InferenceResult};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Relative tolerance for the symmetry check.
pub const SYM_TOL: f64 = 1e-8;

/// Relative tolerance for negative eigenvalues.
pub const PSD_TOL: f64 = 1e-8;

#[derive(Debug, Clone, PartialEq)]
pub struct MvnSampler {
    mean: Array1<f64>,
    factor: Array2<f64>,
}

impl MvnSampler {
    /// Validate `(mean, cov)` and factor the covariance.
    ///
    /// Errors
    /// ------
    /// - `InferenceError::EmptyMean` for an empty mean.
    /// - `InferenceError::CovarianceDimMismatch` for a non-`dim × dim` matrix.
    /// - `InferenceError::NonFiniteEntry` for NaN/±∞ in mean or covariance
    ///   (mean entries are reported with `col = usize::MAX`).
    /// - `InferenceError::CovarianceNotSymmetric` beyond `SYM_TOL`.
    /// - `InferenceError::CovarianceNotPsd` beyond `PSD_TOL`.
    pub fn new(mean: Array1<f64>, cov: Array2<f64>) -> InferenceResult<Self> {
        let dim = mean.len();
        if dim == 0 {
            return Err(InferenceError::EmptyMean);
        }
        if cov.dim() != (dim, dim) {
            return Err(InferenceError::CovarianceDimMismatch { expected: dim, found: cov.dim() });
        }
        if let Some((row, &value)) = mean.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(InferenceError::NonFiniteEntry { row, col: usize::MAX, value });
        }
        if let Some(((row, col), &value)) = cov.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(InferenceError::NonFiniteEntry { row, col, value });
        }
        let scale = cov.iter().fold(1.0_f64, |acc, v| acc.max(v.abs()));
        for row in 0..dim {
            for col in (row + 1)..dim {
                let diff = (cov[[row, col]] - cov[[col, row]]).abs();
                if diff > SYM_TOL * scale {
                    return Err(InferenceError::CovarianceNotSymmetric { row, col, diff });
                }
            }
        }

        let sym = DMatrix::<f64>::from_fn(dim, dim, |i, j| 0.5 * (cov[[i, j]] + cov[[j, i]]));
        let eigen = sym.symmetric_eigen();
        let lambda_min = eigen.eigenvalues.iter().copied().fold(f64::INFINITY, f64::min);
        let lambda_max = eigen.eigenvalues.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let tolerance = PSD_TOL * lambda_max.abs().max(1.0);
        if lambda_min < -tolerance {
            return Err(InferenceError::CovarianceNotPsd { min_eigenvalue: lambda_min, tolerance });
        }

        let factor = Array2::from_shape_fn((dim, dim), |(i, k)| {
            eigen.eigenvectors[(i, k)] * eigen.eigenvalues[k].max(0.0).sqrt()
        });
        Ok(Self { mean, factor })
    }

    pub fn dim(&self) -> usize {
        self.mean.len()
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    /// Factor `L` with `L·Lᵀ = Σ` (up to clipped negative round-off).
    pub fn factor(&self) -> &Array2<f64> {
        &self.factor
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Array1<f64> {
        let z: Array1<f64> =
            (0..self.dim()).map(|_| -> f64 { StandardNormal.sample(rng) }).collect();
        &self.mean + &self.factor.dot(&z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::{SeedableRng, rngs::StdRng};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Factor reproduces the covariance, including singular matrices.
    // - Rejection of asymmetric, non-finite and indefinite inputs.
    // - Empirical moments of the draws.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // L·Lᵀ reproduces Σ for a correlated and a singular covariance.
    fn factor_reproduces_covariance() {
        for cov in [array![[2.0, 0.6], [0.6, 1.0]], array![[1.0, 1.0], [1.0, 1.0]]] {
            let sampler = MvnSampler::new(array![0.0, 0.0], cov.clone()).expect("PSD covariance");
            let l = sampler.factor();
            let rebuilt = l.dot(&l.t());
            for (a, b) in rebuilt.iter().zip(cov.iter()) {
                assert!((a - b).abs() < 1e-10);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // A zero covariance always returns the mean.
    fn zero_covariance_returns_mean() {
        let sampler =
            MvnSampler::new(array![1.5, -2.0], Array2::zeros((2, 2))).expect("zero is PSD");
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..5 {
            assert_eq!(sampler.sample(&mut rng), array![1.5, -2.0]);
        }
    }

    #[test]
    // Purpose
    // -------
    // Invalid covariances are reported with the matching variant.
    fn new_rejects_invalid_covariances() {
        let mean = array![0.0, 0.0];
        assert!(matches!(
            MvnSampler::new(mean.clone(), array![[1.0, 0.5], [0.0, 1.0]]),
            Err(InferenceError::CovarianceNotSymmetric { row: 0, col: 1, .. })
        ));
        assert!(matches!(
            MvnSampler::new(mean.clone(), array![[1.0, 2.0], [2.0, 1.0]]),
            Err(InferenceError::CovarianceNotPsd { .. })
        ));
        assert!(matches!(
            MvnSampler::new(mean.clone(), array![[f64::NAN, 0.0], [0.0, 1.0]]),
            Err(InferenceError::NonFiniteEntry { row: 0, col: 0, .. })
        ));
        assert!(matches!(
            MvnSampler::new(mean, Array2::eye(3)),
            Err(InferenceError::CovarianceDimMismatch { expected: 2, found: (3, 3) })
        ));
        assert!(matches!(
            MvnSampler::new(Array1::zeros(0), Array2::zeros((0, 0))),
            Err(InferenceError::EmptyMean)
        ));
    }

    #[test]
    // Purpose
    // -------
    // Sample mean and variance match the target within Monte Carlo error.
    fn sample_moments_match_target() {
        // Arrange
        let sampler = MvnSampler::new(array![1.0, -1.0], array![[4.0, 1.2], [1.2, 1.0]])
            .expect("PSD covariance");
        let mut rng = StdRng::seed_from_u64(2024);
        let n = 20_000;

        // Act
        let draws: Vec<Array1<f64>> = (0..n).map(|_| sampler.sample(&mut rng)).collect();
        let mean0 = draws.iter().map(|d| d[0]).sum::<f64>() / n as f64;
        let var0 = draws.iter().map(|d| (d[0] - mean0).powi(2)).sum::<f64>() / n as f64;
        let mean1 = draws.iter().map(|d| d[1]).sum::<f64>() / n as f64;
        let cov01 = draws.iter().map(|d| (d[0] - mean0) * (d[1] - mean1)).sum::<f64>() / n as f64;

        // Assert
        assert!((mean0 - 1.0).abs() < 0.06);
        assert!((var0 - 4.0).abs() < 0.2);
        assert!((cov01 - 1.2).abs() < 0.1);
    }
}
