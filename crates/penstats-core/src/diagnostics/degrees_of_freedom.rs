// =============================================================================
// Effective Degrees of Freedom
// =============================================================================
//
// With U the R-block of the left singular vectors of [R; S],
//
//     EDF = trace(U Uᵀ) = Σᵢⱼ Uᵢⱼ²
//         = trace( XᵀWX (XᵀWX + SᵀS)⁻¹ )
//
// which is the trace of the influence ("hat") matrix of the penalized fit.
// It moves from p (no penalty) towards 0 as the penalty grows.
//
// =============================================================================

use ndarray::Array2;

/// Effective degrees of freedom consumed by the penalized fit.
///
/// Sum of squares of every element of `u`; zero for an empty decomposition.
pub fn effective_degrees_of_freedom(u: &Array2<f64>) -> f64 {
    u.iter().map(|&v| v * v).sum()
}
