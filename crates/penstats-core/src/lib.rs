// =============================================================================
// PenStats Core Library
// =============================================================================
//
// Post-fit statistics for penalized (ridge / smoothing-regularized) GLMs.
// The fitting loop lives elsewhere; it hands us converged working weights,
// the design matrix and the square root of the penalty, and gets back:
//
//   - effective degrees of freedom
//   - coefficient covariance (sandwich estimator)
//   - dispersion (scale), fixed or estimated
//   - AIC
//
// STRUCTURE:
// ----------
//   - decomposition: QR-then-SVD of the weighted, penalized design
//   - diagnostics:   EDF, covariance, Pearson χ² / scale, AIC
//   - families:      Variance functions and fixed-dispersion capability
//   - statistics:    One-call pipeline bundling everything above
//   - inference:     Wald standard errors, p-values, confidence intervals
//   - error:         Error types used throughout the library
//
// Everything is a pure function over caller-owned arrays. Independent calls
// can run on different threads without coordination.
//
// =============================================================================

pub mod convert;
pub mod decomposition;
pub mod diagnostics;
pub mod error;
pub mod families;
pub mod inference;
pub mod statistics;

// Re-export commonly used items at the top level
pub use decomposition::{decompose, effective_degrees_of_freedom_path, PenalizedDecomposition};
pub use diagnostics::{
    coefficient_covariance, effective_degrees_of_freedom, estimate_aic, estimate_scale, pearson_chi_square,
    ScaleEstimate,
};
pub use error::{PenStatsError, Result};
pub use families::Family;
pub use statistics::{compute_fit_statistics, FitStatistics, FitStatisticsConfig, FitStatisticsInput};
