// =============================================================================
// Effective Degrees of Freedom along a Penalty Path
// =============================================================================
//
// Penalty selection (done by the caller) needs EDF(λ) for many strengths λ:
//
//     A(λ) = [ diag(√w) X ]
//            [ √λ S       ]
//
// Each λ is an independent, pure decomposition, so the path is evaluated in
// parallel with rayon. Output order matches input order.
//
// =============================================================================

use ndarray::{Array1, Array2};
use rayon::prelude::*;

use super::decompose;
use crate::diagnostics::effective_degrees_of_freedom;
use crate::error::{PenStatsError, Result};

/// Effective degrees of freedom for each penalty strength in `penalty_strengths`.
///
/// The penalty square-root is scaled by √λ, so the penalty itself is λ SᵀS.
/// Strengths must be finite and non-negative.
pub fn effective_degrees_of_freedom_path(
    design_matrix: &Array2<f64>,
    sqrt_penalty: &Array2<f64>,
    weights: &Array1<f64>,
    penalty_strengths: &[f64],
) -> Result<Vec<f64>> {
    if let Some(&bad) = penalty_strengths.iter().find(|l| !l.is_finite() || **l < 0.0) {
        return Err(PenStatsError::InvalidValue(format!(
            "penalty strengths must be finite and non-negative, got {}",
            bad
        )));
    }

    penalty_strengths
        .par_iter()
        .map(|&lambda| -> Result<f64> {
            let scaled = sqrt_penalty * lambda.sqrt();
            let dec = decompose(design_matrix, &scaled, weights)?;
            Ok(effective_degrees_of_freedom(&dec.u))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn design() -> Array2<f64> {
        array![
            [1.0, 0.0, 0.2],
            [1.0, 1.0, 0.8],
            [1.0, 2.0, 1.9],
            [1.0, 3.0, 3.1],
            [1.0, 4.0, 3.8],
            [1.0, 5.0, 5.2],
        ]
    }

    #[test]
    fn test_edf_decreases_with_penalty() {
        let x = design();
        let w = Array1::ones(6);
        let s = Array2::eye(3);
        let lambdas = [0.0, 0.01, 1.0, 100.0, 1e6];

        let edfs = effective_degrees_of_freedom_path(&x, &s, &w, &lambdas).unwrap();

        assert_eq!(edfs.len(), lambdas.len());
        assert!((edfs[0] - 3.0).abs() < 1e-10, "unpenalized EDF should be p, got {}", edfs[0]);
        for pair in edfs.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-12, "EDF increased along path: {:?}", edfs);
        }
        assert!(edfs[4] < 0.01);
    }

    #[test]
    fn test_empty_path() {
        let x = design();
        let edfs = effective_degrees_of_freedom_path(&x, &Array2::eye(3), &Array1::ones(6), &[]).unwrap();
        assert!(edfs.is_empty());
    }

    #[test]
    fn test_negative_strength_rejected() {
        let x = design();
        let result = effective_degrees_of_freedom_path(&x, &Array2::eye(3), &Array1::ones(6), &[1.0, -1.0]);
        assert!(matches!(result, Err(PenStatsError::InvalidValue(_))));
    }

    #[test]
    fn test_dimension_error_propagates() {
        let x = design();
        let result = effective_degrees_of_freedom_path(&x, &Array2::eye(2), &Array1::ones(6), &[1.0]);
        assert!(matches!(result, Err(PenStatsError::DimensionMismatch(_))));
    }
}
