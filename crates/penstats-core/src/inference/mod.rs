// =============================================================================
// Coefficient Inference
// =============================================================================
//
// Wald summaries built on top of the sandwich covariance:
//
//     se(β̂ⱼ) = √Cov(β̂)ⱼⱼ
//     zⱼ     = β̂ⱼ / se(β̂ⱼ)
//
// Reference distribution follows the scale decision:
//   - φ fixed (Poisson, Binomial)  → standard normal
//   - φ estimated                  → Student's t with n - EDF degrees of freedom
//
// Penalized coefficients are shrunk, so these are frequentist Wald
// quantities for the penalized estimator, not for the unpenalized one.
//
// =============================================================================

use ndarray::{Array1, Array2};
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

use crate::error::{PenStatsError, Result};

/// Per-coefficient Wald summary.
#[derive(Debug, Clone)]
pub struct CoefficientSummary {
    pub std_errors: Array1<f64>,
    /// β̂ / se; zero where se is zero.
    pub statistics: Array1<f64>,
    pub p_values: Array1<f64>,
    pub conf_lower: Array1<f64>,
    pub conf_upper: Array1<f64>,
}

/// Reference distribution for Wald statistics.
enum Reference {
    Normal(Normal),
    StudentsT(StudentsT),
}

impl Reference {
    fn new(is_estimated_scale: bool, residual_dof: f64) -> Result<Self> {
        if is_estimated_scale {
            if !(residual_dof > 0.0) || !residual_dof.is_finite() {
                return Err(PenStatsError::InvalidValue(format!(
                    "residual degrees of freedom must be positive, got {}",
                    residual_dof
                )));
            }
            StudentsT::new(0.0, 1.0, residual_dof)
                .map(Reference::StudentsT)
                .map_err(|e| PenStatsError::InvalidValue(e.to_string()))
        } else {
            Normal::new(0.0, 1.0)
                .map(Reference::Normal)
                .map_err(|e| PenStatsError::InvalidValue(e.to_string()))
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        match self {
            Reference::Normal(d) => d.cdf(x),
            Reference::StudentsT(d) => d.cdf(x),
        }
    }

    fn inverse_cdf(&self, p: f64) -> f64 {
        match self {
            Reference::Normal(d) => d.inverse_cdf(p),
            Reference::StudentsT(d) => d.inverse_cdf(p),
        }
    }
}

/// Standard errors from the diagonal of a covariance matrix.
///
/// Tiny negative diagonals from round-off are clamped to zero.
pub fn standard_errors(covariance: &Array2<f64>) -> Array1<f64> {
    covariance.diag().mapv(|v| v.max(0.0).sqrt())
}

/// Wald statistics, two-sided p-values and confidence intervals.
///
/// # Arguments
/// * `coefficients` - fitted β̂, length p
/// * `covariance` - Cov(β̂), shape (p × p), already multiplied by the scale
/// * `is_estimated_scale` - selects t (true) or normal (false) reference
/// * `residual_dof` - n - EDF; only used when the scale was estimated
/// * `confidence` - interval level in (0, 1), e.g. 0.95
pub fn summarize_coefficients(
    coefficients: &Array1<f64>,
    covariance: &Array2<f64>,
    is_estimated_scale: bool,
    residual_dof: f64,
    confidence: f64,
) -> Result<CoefficientSummary> {
    let p = coefficients.len();
    if covariance.dim() != (p, p) {
        return Err(PenStatsError::DimensionMismatch(format!(
            "{} coefficients but covariance is {}x{}",
            p,
            covariance.nrows(),
            covariance.ncols()
        )));
    }

    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(PenStatsError::InvalidValue(format!(
            "confidence must be in (0, 1), got {}",
            confidence
        )));
    }

    let reference = Reference::new(is_estimated_scale, residual_dof)?;
    let critical = reference.inverse_cdf(1.0 - (1.0 - confidence) / 2.0);

    let std_errors = standard_errors(covariance);

    let statistics: Array1<f64> = coefficients
        .iter()
        .zip(std_errors.iter())
        .map(|(&b, &se)| if se > 0.0 { b / se } else { 0.0 })
        .collect();

    // P(|T| > |t|) = 2 (1 - F(|t|))
    let p_values = statistics.mapv(|t| 2.0 * (1.0 - reference.cdf(t.abs())));

    let margin = &std_errors * critical;
    let conf_lower = coefficients - &margin;
    let conf_upper = coefficients + &margin;

    Ok(CoefficientSummary {
        std_errors,
        statistics,
        p_values,
        conf_lower,
        conf_upper,
    })
}

// =============================================================================
// Tests
// =============================================================================
