// =============================================================================
// Penalized Design Decomposition
// =============================================================================
//
// Every post-fit statistic in this crate is read off one factorization of the
// weighted, penalized design:
//
//     A = [ R ]      R : upper-triangular factor of diag(√w) X   (p × p)
//         [ S ]      S : square root of the penalty, SᵀS = penalty (m × p)
//
// so that AᵀA = XᵀWX + SᵀS, the penalized cross-product of the fit.
//
// THE ALGORITHM
// -------------
// 1. Scale each row of X by √wᵢ
// 2. Reduced QR of the weighted design, keep R. This compresses n rows down
//    to p without changing the cross-product (QᵀQ = I), which matters when
//    n ≫ p. When n < p the reduced R has only n rows; it is padded with
//    zero rows up to p, which leaves AᵀA unchanged.
// 3. Thin SVD of the stacked [R; S]:  A = U' Σ Vᵀ
// 4. Drop every component with σᵢ ≤ tol, where
//
//        tol = max(σ) × max(n, p) × ε
//
//    This is the standard numerical-rank cutoff; it is not configurable.
// 5. Keep only the p rows of U' that belong to R. Those rows carry the data
//    part of the influence matrix; the S rows carry the penalty part.
//    Rows of U' opposite zero padding are zero.
//
// NOTE ON U
// ---------
// U' has orthonormal columns. The row-restricted U does NOT, in general:
// the penalty rows have been cut away. Nothing downstream may assume UᵀU = I.
//
// =============================================================================

mod path;

pub use path::effective_degrees_of_freedom_path;

use ndarray::{s, Array1, Array2, Axis};
use nalgebra::DMatrix;

use crate::convert::{to_array1, to_array2, to_weighted_dmatrix};
use crate::error::{PenStatsError, Result};

/// Rank-truncated SVD of the stacked [R; S] system.
///
/// Produced fresh by [`decompose`] and owned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct PenalizedDecomposition {
    /// Left singular vectors restricted to the R block.
    /// Shape (p, k). Columns are not orthonormal in general.
    pub u: Array2<f64>,

    /// Retained singular values, descending, all > tolerance. Length k.
    pub singular_values: Array1<f64>,

    /// Retained right singular vectors, transposed. Shape (k, p).
    pub vt: Array2<f64>,
}

impl PenalizedDecomposition {
    /// Zero-width decomposition for `n_covariates` columns.
    fn empty(n_covariates: usize) -> Self {
        Self {
            u: Array2::zeros((n_covariates, 0)),
            singular_values: Array1::zeros(0),
            vt: Array2::zeros((0, n_covariates)),
        }
    }

    /// Number of retained (linearly independent) components k.
    pub fn n_independent(&self) -> usize {
        self.singular_values.len()
    }

    /// Number of covariates p.
    pub fn n_covariates(&self) -> usize {
        self.vt.ncols()
    }

    /// True when every component fell below the rank tolerance.
    pub fn is_empty(&self) -> bool {
        self.singular_values.is_empty()
    }
}

/// Numerical-rank tolerance for singular values of an (n × p) design.
///
/// `max(σ) × max(n, p) × f64::EPSILON`; zero when there are no singular values.
pub fn rank_tolerance(singular_values: &Array1<f64>, n_observations: usize, n_covariates: usize) -> f64 {
    let sigma_max = singular_values.iter().cloned().fold(0.0_f64, f64::max);
    sigma_max * (n_observations.max(n_covariates) as f64) * f64::EPSILON
}

/// Decompose the weighted, penalized design matrix.
///
/// # Arguments
/// * `design_matrix` - X, shape (n × p)
/// * `sqrt_penalty` - S, shape (m × p), with SᵀS equal to the penalty matrix.
///   Pass a (0 × p) matrix for an unpenalized fit.
/// * `weights` - IRLS working weights, length n, non-negative
///
/// # Returns
/// The rank-truncated [`PenalizedDecomposition`]. Rank deficiency is reported
/// through `log::warn!`, not as an error; a fully degenerate input gives an
/// empty decomposition.
pub fn decompose(
    design_matrix: &Array2<f64>,
    sqrt_penalty: &Array2<f64>,
    weights: &Array1<f64>,
) -> Result<PenalizedDecomposition> {
    let (n, p) = design_matrix.dim();
    let m = sqrt_penalty.nrows();

    // -------------------------------------------------------------------------
    // Validate inputs
    // -------------------------------------------------------------------------
    if sqrt_penalty.ncols() != p {
        return Err(PenStatsError::DimensionMismatch(format!(
            "design matrix has {} columns but penalty square-root has {}",
            p,
            sqrt_penalty.ncols()
        )));
    }

    if weights.len() != n {
        return Err(PenStatsError::DimensionMismatch(format!(
            "design matrix has {} rows but weights has {} elements",
            n,
            weights.len()
        )));
    }

    if weights.iter().any(|&w| !w.is_finite() || w < 0.0) {
        return Err(PenStatsError::InvalidValue(
            "weights must be finite and non-negative".to_string(),
        ));
    }

    if design_matrix.iter().chain(sqrt_penalty.iter()).any(|v| !v.is_finite()) {
        return Err(PenStatsError::InvalidValue(
            "design matrix and penalty square-root must be finite".to_string(),
        ));
    }

    // -------------------------------------------------------------------------
    // Step 1-2: R from the QR of diag(√w) X, padded to p rows
    // -------------------------------------------------------------------------
    let r = if n == 0 || p == 0 {
        DMatrix::zeros(0, p)
    } else {
        let sqrt_w = weights.mapv(f64::sqrt);
        to_weighted_dmatrix(design_matrix, &sqrt_w).qr().r()
    };
    let r_filled = r.nrows();

    // -------------------------------------------------------------------------
    // Step 3: thin SVD of [R; S]
    // -------------------------------------------------------------------------
    if p == 0 {
        return Ok(PenalizedDecomposition::empty(p));
    }

    let stacked = DMatrix::from_fn(p + m, p, |i, j| {
        if i < r_filled {
            r[(i, j)]
        } else if i < p {
            0.0
        } else {
            sqrt_penalty[[i - p, j]]
        }
    });

    let svd = stacked.svd(true, true);
    let u_full = svd.u.as_ref().map(to_array2).ok_or_else(|| {
        PenStatsError::InvalidValue("SVD did not produce left singular vectors".to_string())
    })?;
    let vt_full = svd.v_t.as_ref().map(to_array2).ok_or_else(|| {
        PenStatsError::InvalidValue("SVD did not produce right singular vectors".to_string())
    })?;
    let sigma = to_array1(&svd.singular_values);

    // -------------------------------------------------------------------------
    // Step 4: rank truncation
    // -------------------------------------------------------------------------
    let tol = rank_tolerance(&sigma, n, p);
    let keep: Vec<usize> = sigma
        .iter()
        .enumerate()
        .filter(|(_, &s)| s > tol)
        .map(|(i, _)| i)
        .collect();

    log::debug!(
        "decomposition of {}x{} design with {} penalty rows: tolerance {:.3e}, kept {} of {} components",
        n,
        p,
        m,
        tol,
        keep.len(),
        sigma.len()
    );

    if keep.len() < p {
        log::warn!(
            "rank-deficient penalized design: {} independent components for {} covariates (tolerance {:.3e})",
            keep.len(),
            p,
            tol
        );
    }

    // -------------------------------------------------------------------------
    // Step 5: restrict U to the R block and everything to retained components
    // -------------------------------------------------------------------------
    let u = u_full.slice(s![..p, ..]).select(Axis(1), &keep);
    let singular_values = sigma.select(Axis(0), &keep);
    let vt = vt_full.select(Axis(0), &keep);

    Ok(PenalizedDecomposition {
        u,
        singular_values,
        vt,
    })
}

// =============================================================================
// Tests
// =============================================================================
