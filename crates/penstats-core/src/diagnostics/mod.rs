// =============================================================================
// Post-fit Diagnostics
// =============================================================================
//
// Statistics computed once the fitting loop has converged:
//
// - DEGREES OF FREEDOM: trace of the influence matrix under the penalty
// - COVARIANCE: frequentist sandwich covariance of the coefficients
// - DISPERSION: Pearson χ² and the fixed-vs-estimated scale decision
// - MODEL FIT: AIC with effective degrees of freedom
//
// DATA FLOW
// ---------
//     decompose ──► effective_degrees_of_freedom ──► estimate_scale ──► estimate_aic
//         │                                              │
//         └────────────► coefficient_covariance ◄────────┘ (scale)
//
// All functions are pure and stateless.
//
// =============================================================================

mod degrees_of_freedom;
mod covariance;
mod dispersion;
mod model_fit;

pub use degrees_of_freedom::effective_degrees_of_freedom;

pub use covariance::coefficient_covariance;

pub use dispersion::{
    pearson_chi_square,
    estimate_scale,
    ScaleEstimate,
};

pub use model_fit::estimate_aic;
