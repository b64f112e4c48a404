// =============================================================================
// Coefficient Covariance (Sandwich Estimator)
// =============================================================================
//
// From the truncated SVD [R; S] ≈ U' Σ Vᵀ, with U the R-block of U':
//
//     PKᵀ = V Σ⁻¹ Uᵀ                       (p × r)
//     Cov(β̂) = φ × PKᵀ (PKᵀ)ᵀ
//            = φ × (XᵀWX + SᵀS)⁻¹ XᵀWX (XᵀWX + SᵀS)⁻¹
//
// Σ⁻¹ is safe only because `decompose` dropped every σ at or below the rank
// tolerance. The result is a Gram matrix times φ ≥ 0, so it is symmetric
// positive semi-definite.
//
// =============================================================================

use ndarray::{Array1, Array2, Axis};

use crate::error::{PenStatsError, Result};

/// Frequentist covariance of the fitted coefficients, shape (p × p).
///
/// # Arguments
/// * `u` - R-block of the left singular vectors, shape (r × k)
/// * `singular_values` - retained singular values, length k, all > 0
/// * `vt` - retained right singular vectors, shape (k × p)
/// * `scale` - dispersion φ, finite and ≥ 0
pub fn coefficient_covariance(
    u: &Array2<f64>,
    singular_values: &Array1<f64>,
    vt: &Array2<f64>,
    scale: f64,
) -> Result<Array2<f64>> {
    if !scale.is_finite() || scale < 0.0 {
        return Err(PenStatsError::InvalidScale(scale));
    }

    let k = singular_values.len();
    if u.ncols() != k || vt.nrows() != k {
        return Err(PenStatsError::DimensionMismatch(format!(
            "U has {} columns, {} singular values, Vt has {} rows",
            u.ncols(),
            k,
            vt.nrows()
        )));
    }

    if singular_values.iter().any(|&s| !(s > 0.0) || !s.is_finite()) {
        return Err(PenStatsError::InvalidValue(
            "singular values must be finite and strictly positive".to_string(),
        ));
    }

    // V Σ⁻¹: scale column j of V by 1/σⱼ
    let mut v_scaled = vt.t().to_owned();
    for (mut col, &s) in v_scaled.axis_iter_mut(Axis(1)).zip(singular_values.iter()) {
        col.mapv_inplace(|v| v / s);
    }

    let pkt = v_scaled.dot(&u.t());
    let gram = pkt.dot(&pkt.t());

    // Average with the transpose so round-off cannot break symmetry
    let cov = (&gram + &gram.t()) * (0.5 * scale);
    Ok(cov)
}

// =============================================================================
// Tests
// =============================================================================
