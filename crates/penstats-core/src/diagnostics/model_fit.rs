// =============================================================================
// Model Fit: Akaike Information Criterion
// =============================================================================
//
//     AIC = -2ℓ + 2 (EDF + 1) + 2 × [scale estimated]
//
// EDF replaces the raw parameter count so that penalized coefficients are
// only partly charged for. The "+1" is the parameter-count convention used by
// the fitting loop; the last term charges for φ only when it was estimated.
//
// =============================================================================

/// AIC of a penalized fit.
///
/// Pure arithmetic: non-finite inputs propagate into the result.
pub fn estimate_aic(log_likelihood: f64, degrees_of_freedom: f64, is_estimated_scale: bool) -> f64 {
    let scale_params = if is_estimated_scale { 1.0 } else { 0.0 };
    -2.0 * log_likelihood + 2.0 * (degrees_of_freedom + 1.0) + 2.0 * scale_params
}
