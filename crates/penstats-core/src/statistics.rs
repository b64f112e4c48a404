// =============================================================================
// Fit Statistics Pipeline
// =============================================================================
//
// The fitting loop hands over its converged state and gets back every post-fit
// statistic in one call:
//
//   1. decompose [√W X; S]
//   2. EDF = Σ U²
//   3. scale: fixed (Poisson/Binomial) or Pearson χ² / (n - EDF)
//   4. Cov(β̂) = φ × sandwich            (optional, see config)
//   5. AIC = -2ℓ + 2(EDF + 1) + 2[φ estimated]
//
// Nothing is cached between calls.
//
// =============================================================================

use ndarray::{Array1, Array2};

use crate::decomposition::decompose;
use crate::diagnostics::{coefficient_covariance, effective_degrees_of_freedom, estimate_aic, estimate_scale};
use crate::error::{PenStatsError, Result};
use crate::families::Family;

// =============================================================================
// Configuration
// =============================================================================

/// Options for [`compute_fit_statistics`].
#[derive(Debug, Clone)]
pub struct FitStatisticsConfig {
    /// Compute the p × p coefficient covariance.
    /// Turn off when only EDF/scale/AIC are needed, e.g. while searching
    /// over penalty strengths.
    /// Default: true
    pub compute_covariance: bool,

    /// Log the computed summary at info level.
    /// Default: false
    pub verbose: bool,
}

impl Default for FitStatisticsConfig {
    fn default() -> Self {
        Self {
            compute_covariance: true,
            verbose: false,
        }
    }
}

// =============================================================================
// Input and Result Structures
// =============================================================================

/// Converged state of a penalized GLM fit, borrowed from the caller.
#[derive(Debug, Clone, Copy)]
pub struct FitStatisticsInput<'a> {
    /// X, shape (n × p)
    pub design_matrix: &'a Array2<f64>,
    /// S with SᵀS = penalty, shape (m × p)
    pub sqrt_penalty: &'a Array2<f64>,
    /// Final IRLS working weights, length n
    pub weights: &'a Array1<f64>,
    /// Observed response y, length n
    pub response: &'a Array1<f64>,
    /// Fitted values μ, length n
    pub predicted_response: &'a Array1<f64>,
    /// Prior observation weights, length n
    pub prior_weights: &'a Array1<f64>,
    /// Log-likelihood ℓ of the fit, computed by the caller
    pub log_likelihood: f64,
}

/// Post-fit statistics of a penalized GLM.
#[derive(Debug, Clone)]
pub struct FitStatistics {
    /// Trace of the influence matrix.
    pub effective_degrees_of_freedom: f64,

    /// Number of components that survived rank truncation.
    pub n_independent: usize,

    /// φ × sandwich covariance, (p × p). None if disabled in the config.
    pub covariance: Option<Array2<f64>>,

    /// Dispersion φ.
    pub scale: f64,

    /// Whether φ was estimated (false for Poisson/Binomial).
    pub is_estimated_scale: bool,

    /// Akaike Information Criterion.
    pub aic: f64,

    /// Number of observations n.
    pub n_observations: usize,
}

impl FitStatistics {
    /// n - EDF
    pub fn residual_degrees_of_freedom(&self) -> f64 {
        self.n_observations as f64 - self.effective_degrees_of_freedom
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

/// Compute every post-fit statistic for a converged penalized GLM.
pub fn compute_fit_statistics(
    input: &FitStatisticsInput<'_>,
    family: &dyn Family,
    config: &FitStatisticsConfig,
) -> Result<FitStatistics> {
    if !input.log_likelihood.is_finite() {
        return Err(PenStatsError::InvalidValue(format!(
            "log-likelihood must be finite, got {}",
            input.log_likelihood
        )));
    }

    let n = input.design_matrix.nrows();
    if input.response.len() != n {
        return Err(PenStatsError::DimensionMismatch(format!(
            "design matrix has {} rows but response has {} elements",
            n,
            input.response.len()
        )));
    }

    let dec = decompose(input.design_matrix, input.sqrt_penalty, input.weights)?;
    let edf = effective_degrees_of_freedom(&dec.u);

    let scale = estimate_scale(
        family,
        input.response,
        input.predicted_response,
        input.prior_weights,
        edf,
    )?;

    let covariance = if config.compute_covariance {
        Some(coefficient_covariance(&dec.u, &dec.singular_values, &dec.vt, scale.scale)?)
    } else {
        None
    };

    let aic = estimate_aic(input.log_likelihood, edf, scale.is_estimated);

    if config.verbose {
        log::info!(
            "{} fit: n = {}, EDF = {:.4}, rank = {}, scale = {:.6} ({}), AIC = {:.4}",
            family.name(),
            n,
            edf,
            dec.n_independent(),
            scale.scale,
            if scale.is_estimated { "estimated" } else { "fixed" },
            aic
        );
    }

    Ok(FitStatistics {
        effective_degrees_of_freedom: edf,
        n_independent: dec.n_independent(),
        covariance,
        scale: scale.scale,
        is_estimated_scale: scale.is_estimated,
        aic,
        n_observations: n,
    })
}

// =============================================================================
// Tests
// =============================================================================
