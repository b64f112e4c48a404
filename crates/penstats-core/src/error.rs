// =============================================================================
// Error Types
// =============================================================================
//
// Every public operation in this crate validates its inputs up front and
// reports problems to the immediate caller. Nothing here retries or recovers:
// the fitting loop that called us decides whether to abort the fit or try a
// different penalty.
//
// Rank-deficient decompositions are NOT errors. They produce a smaller
// effective dimension and a `log::warn!`, see `decomposition`.
//
// =============================================================================

use thiserror::Error;

/// Errors produced by penstats computations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PenStatsError {
    /// Two inputs have incompatible shapes.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// n_observations - degrees_of_freedom is zero or negative, so the
    /// Pearson statistic has no residual degrees of freedom to divide by.
    #[error(
        "no residual degrees of freedom: {n_observations} observations, \
         {degrees_of_freedom} effective degrees of freedom"
    )]
    DegenerateResidualDoF {
        n_observations: usize,
        degrees_of_freedom: f64,
    },

    /// Scale passed to the covariance estimator is negative or non-finite.
    #[error("invalid scale {0}: must be finite and non-negative")]
    InvalidScale(f64),

    /// An input value lies outside its valid domain.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PenStatsError>;
