// =============================================================================
// Dispersion (Scale) Estimation
// =============================================================================
//
// Var(Y) = φ × V(μ). For Poisson and Binomial φ = 1 by definition. For every
// other family we estimate it with Pearson's statistic:
//
//     φ̂ = Σ wᵢ (yᵢ - μᵢ)² / V(μᵢ)  /  (n - EDF)
//
// where EDF is the effective degrees of freedom of the penalized fit, so the
// denominator is the residual degrees of freedom.
//
// =============================================================================

use ndarray::{Array1, Zip};

use crate::error::{PenStatsError, Result};
use crate::families::Family;

/// Outcome of the scale decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleEstimate {
    /// Dispersion φ.
    pub scale: f64,
    /// False when φ is fixed at 1 by the family.
    pub is_estimated: bool,
}

impl ScaleEstimate {
    /// φ = 1, not estimated.
    pub fn fixed() -> Self {
        Self {
            scale: 1.0,
            is_estimated: false,
        }
    }
}

/// Pearson χ² divided by the residual degrees of freedom.
///
/// # Arguments
/// * `response` - observed y, length n
/// * `predicted_response` - fitted μ, length n
/// * `prior_weights` - prior observation weights, length n
/// * `variance_fn` - variance function V(μ) of the family
/// * `degrees_of_freedom` - effective degrees of freedom of the fit
///
/// # Errors
/// `DegenerateResidualDoF` when `n - degrees_of_freedom <= 0`;
/// `DimensionMismatch` when the vectors (or V(μ)) differ in length;
/// `InvalidValue` when any V(μᵢ) is zero, negative or non-finite.
pub fn pearson_chi_square<F>(
    response: &Array1<f64>,
    predicted_response: &Array1<f64>,
    prior_weights: &Array1<f64>,
    variance_fn: F,
    degrees_of_freedom: f64,
) -> Result<f64>
where
    F: Fn(&Array1<f64>) -> Array1<f64>,
{
    let n = response.len();

    if predicted_response.len() != n {
        return Err(PenStatsError::DimensionMismatch(format!(
            "response has {} elements but predicted response has {}",
            n,
            predicted_response.len()
        )));
    }

    if prior_weights.len() != n {
        return Err(PenStatsError::DimensionMismatch(format!(
            "response has {} elements but prior weights has {}",
            n,
            prior_weights.len()
        )));
    }

    let residual_dof = n as f64 - degrees_of_freedom;
    if !(residual_dof > 0.0) {
        return Err(PenStatsError::DegenerateResidualDoF {
            n_observations: n,
            degrees_of_freedom,
        });
    }

    let variance = variance_fn(predicted_response);
    if variance.len() != n {
        return Err(PenStatsError::DimensionMismatch(format!(
            "variance function returned {} values for {} predictions",
            variance.len(),
            n
        )));
    }

    if let Some(i) = variance.iter().position(|&v| !(v > 0.0 && v.is_finite())) {
        return Err(PenStatsError::InvalidValue(format!(
            "variance function gave {} at predicted response {}; V(μ) must be positive and finite",
            variance[i], predicted_response[i]
        )));
    }

    let mut chi_square = 0.0;
    Zip::from(response)
        .and(predicted_response)
        .and(prior_weights)
        .and(&variance)
        .for_each(|&y, &mu, &w, &v| {
            let resid = y - mu;
            chi_square += w * resid * resid / v;
        });

    Ok(chi_square / residual_dof)
}

/// Decide the dispersion for `family`.
///
/// Poisson and Binomial return φ = 1 without looking at the data. Every other
/// family returns the Pearson estimate.
pub fn estimate_scale(
    family: &dyn Family,
    response: &Array1<f64>,
    predicted_response: &Array1<f64>,
    prior_weights: &Array1<f64>,
    degrees_of_freedom: f64,
) -> Result<ScaleEstimate> {
    if family.fixed_dispersion() {
        log::debug!("{} family: scale fixed at 1", family.name());
        return Ok(ScaleEstimate::fixed());
    }

    let scale = pearson_chi_square(
        response,
        predicted_response,
        prior_weights,
        |mu| family.variance(mu),
        degrees_of_freedom,
    )?;

    log::debug!("{} family: estimated scale {:.6}", family.name(), scale);

    Ok(ScaleEstimate {
        scale,
        is_estimated: true,
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::families::{
        BinomialFamily, GammaFamily, GaussianFamily, PoissonFamily, QuasiBinomialFamily, QuasiPoissonFamily,
    };
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_perfect_fit_gives_zero() {
        let y = array![2.0, 4.0, 6.0];
        let mu = array![2.0, 4.0, 6.0];
        let w = array![1.0, 1.0, 1.0];

        let chi2 = pearson_chi_square(&y, &mu, &w, |m| m.clone(), 1.0).unwrap();

        assert_eq!(chi2, 0.0);
    }

    #[test]
    fn test_known_value() {
        // residuals [1, -1, 2], V = 1, weights [1, 2, 0.5]
        // Σ = 1 + 2 + 2 = 5, residual df = 4 - 1.5 = 2.5
        let y = array![2.0, 3.0, 7.0, 1.0];
        let mu = array![1.0, 4.0, 5.0, 1.0];
        let w = array![1.0, 2.0, 0.5, 1.0];

        let chi2 = pearson_chi_square(&y, &mu, &w, |m| Array1::ones(m.len()), 1.5).unwrap();

        assert_abs_diff_eq!(chi2, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_variance_function_scales_residuals() {
        // Poisson variance: (4-2)²/2 + (1-1)²/1 = 2, df = 2 - 0 = 2
        let y = array![4.0, 1.0];
        let mu = array![2.0, 1.0];
        let w = array![1.0, 1.0];

        let chi2 = pearson_chi_square(&y, &mu, &w, |m| PoissonFamily.variance(m), 0.0).unwrap();

        assert_abs_diff_eq!(chi2, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_residual_dof_fails() {
        let y = array![3.0];
        let mu = array![3.0];
        let w = array![1.0];

        let result = pearson_chi_square(&y, &mu, &w, |m| m.clone(), 1.0);

        assert!(matches!(
            result,
            Err(PenStatsError::DegenerateResidualDoF { n_observations: 1, .. })
        ));
    }

    #[test]
    fn test_negative_residual_dof_fails() {
        let y = array![1.0, 2.0];
        let result = pearson_chi_square(&y, &y, &array![1.0, 1.0], |m| m.clone(), 2.5);
        assert!(matches!(result, Err(PenStatsError::DegenerateResidualDoF { .. })));
    }

    #[test]
    fn test_length_mismatch() {
        let y = array![1.0, 2.0, 3.0];
        let result = pearson_chi_square(&y, &array![1.0, 2.0], &array![1.0, 1.0, 1.0], |m| m.clone(), 0.0);
        assert!(matches!(result, Err(PenStatsError::DimensionMismatch(_))));

        let result = pearson_chi_square(&y, &y, &array![1.0], |m| m.clone(), 0.0);
        assert!(matches!(result, Err(PenStatsError::DimensionMismatch(_))));
    }

    #[test]
    fn test_zero_variance_rejected() {
        // Gamma at μ = 0 has V(μ) = 0
        let y = array![1.0, 2.0, 3.0];
        let mu = array![0.0, 2.0, 3.0];
        let w = array![1.0, 1.0, 1.0];

        let result = pearson_chi_square(&y, &mu, &w, |m| GammaFamily.variance(m), 1.0);
        assert!(matches!(result, Err(PenStatsError::InvalidValue(_))));

        let result = estimate_scale(&GammaFamily, &y, &mu, &w, 1.0);
        assert!(matches!(result, Err(PenStatsError::InvalidValue(_))));
    }

    #[test]
    fn test_non_finite_variance_rejected() {
        let y = array![1.0, 2.0];
        let w = array![1.0, 1.0];

        let negative = pearson_chi_square(&y, &y, &w, |m| m.mapv(|v| -v), 0.0);
        assert!(matches!(negative, Err(PenStatsError::InvalidValue(_))));

        let nan = pearson_chi_square(&y, &y, &w, |m| m.mapv(|_| f64::NAN), 0.0);
        assert!(matches!(nan, Err(PenStatsError::InvalidValue(_))));
    }

    #[test]
    fn test_fixed_families_ignore_data() {
        // Mismatched lengths and zero residual df would fail if computed
        let y = array![1.0, 100.0];
        let mu = array![50.0];
        let w = array![1.0];

        for family in [&PoissonFamily as &dyn Family, &BinomialFamily] {
            let est = estimate_scale(family, &y, &mu, &w, 2.0).unwrap();
            assert_eq!(est, ScaleEstimate { scale: 1.0, is_estimated: false });
        }
    }

    #[test]
    fn test_estimated_families_use_pearson() {
        let y = array![1.0, 2.5, 2.0, 4.5];
        let mu = array![1.5, 2.0, 2.5, 4.0];
        let w = array![1.0, 1.0, 2.0, 1.0];

        let gaussian = estimate_scale(&GaussianFamily, &y, &mu, &w, 1.0).unwrap();
        let expected = pearson_chi_square(&y, &mu, &w, |m| GaussianFamily.variance(m), 1.0).unwrap();
        assert!(gaussian.is_estimated);
        assert_eq!(gaussian.scale, expected);

        let gamma = estimate_scale(&GammaFamily, &y, &mu, &w, 1.0).unwrap();
        let expected = pearson_chi_square(&y, &mu, &w, |m| GammaFamily.variance(m), 1.0).unwrap();
        assert!(gamma.is_estimated);
        assert_eq!(gamma.scale, expected);
    }

    #[test]
    fn test_quasi_families_estimate_what_their_counterparts_fix() {
        // Poisson variance: (4-2)²/2 + (1-1)²/1 = 2, df = 2
        let y = array![4.0, 1.0];
        let mu = array![2.0, 1.0];
        let w = array![1.0, 1.0];

        assert_eq!(estimate_scale(&PoissonFamily, &y, &mu, &w, 0.0).unwrap(), ScaleEstimate::fixed());
        let quasi = estimate_scale(&QuasiPoissonFamily, &y, &mu, &w, 0.0).unwrap();
        assert!(quasi.is_estimated);
        assert_abs_diff_eq!(quasi.scale, 1.0, epsilon = 1e-12);

        // Binomial variance: 0.25²/0.1875 + 0.5²/0.25 = 1/3 + 1, df = 2 - 0.5
        let y = array![1.0, 0.0];
        let mu = array![0.75, 0.5];
        assert_eq!(estimate_scale(&BinomialFamily, &y, &mu, &w, 0.5).unwrap(), ScaleEstimate::fixed());
        let quasi = estimate_scale(&QuasiBinomialFamily, &y, &mu, &w, 0.5).unwrap();
        assert!(quasi.is_estimated);
        assert_abs_diff_eq!(quasi.scale, (4.0 / 3.0) / 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_estimated_family_propagates_degenerate_dof() {
        let y = array![3.0];
        let result = estimate_scale(&GaussianFamily, &y, &y, &array![1.0], 1.0);
        assert!(matches!(result, Err(PenStatsError::DegenerateResidualDoF { .. })));
    }
}
