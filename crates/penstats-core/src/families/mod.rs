// =============================================================================
// Distribution Families
// =============================================================================
//
// A family tells the scale estimator two things about the response
// distribution of the fitted GLM:
//
//   1. Its variance function V(μ), so that Var(Y) = φ × V(μ)
//   2. Whether the dispersion φ is fixed at 1 by definition
//
// FIXED DISPERSION
// ----------------
// Only Binomial and Poisson have φ = 1 by definition. For every other family
// φ has to be estimated from the residuals (Pearson χ² / residual df).
//
// The set is closed: `fixed_dispersion()` returns false by default and only
// the two families below override it. Adding another fixed-dispersion family
// means overriding it there, on purpose.
//
// =============================================================================

use ndarray::Array1;

/// Response distribution of a GLM, as seen by the scale estimator.
pub trait Family: Send + Sync {
    /// Human-readable family name (e.g. "Poisson").
    fn name(&self) -> &str;

    /// Variance function V(μ), evaluated elementwise.
    fn variance(&self, mu: &Array1<f64>) -> Array1<f64>;

    /// True when the dispersion parameter is fixed at 1 by the distribution.
    fn fixed_dispersion(&self) -> bool {
        false
    }
}

// =============================================================================
// Fixed-dispersion families
// =============================================================================

/// Poisson family for counts. V(μ) = μ, φ = 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoissonFamily;

impl Family for PoissonFamily {
    fn name(&self) -> &str {
        "Poisson"
    }

    fn variance(&self, mu: &Array1<f64>) -> Array1<f64> {
        mu.clone()
    }

    fn fixed_dispersion(&self) -> bool {
        true
    }
}

/// Binomial family for proportions. V(μ) = μ(1 - μ), φ = 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinomialFamily;

impl Family for BinomialFamily {
    fn name(&self) -> &str {
        "Binomial"
    }

    fn variance(&self, mu: &Array1<f64>) -> Array1<f64> {
        mu.mapv(|m| m * (1.0 - m))
    }

    fn fixed_dispersion(&self) -> bool {
        true
    }
}

// =============================================================================
// Estimated-dispersion families
// =============================================================================

/// Gaussian family. V(μ) = 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussianFamily;

impl Family for GaussianFamily {
    fn name(&self) -> &str {
        "Gaussian"
    }

    fn variance(&self, mu: &Array1<f64>) -> Array1<f64> {
        Array1::ones(mu.len())
    }
}

/// Gamma family for positive continuous data. V(μ) = μ².
#[derive(Debug, Clone, Copy, Default)]
pub struct GammaFamily;

impl Family for GammaFamily {
    fn name(&self) -> &str {
        "Gamma"
    }

    fn variance(&self, mu: &Array1<f64>) -> Array1<f64> {
        mu.mapv(|m| m * m)
    }
}

/// Inverse Gaussian family. V(μ) = μ³.
#[derive(Debug, Clone, Copy, Default)]
pub struct InverseGaussianFamily;

impl Family for InverseGaussianFamily {
    fn name(&self) -> &str {
        "InverseGaussian"
    }

    fn variance(&self, mu: &Array1<f64>) -> Array1<f64> {
        mu.mapv(|m| m * m * m)
    }
}

/// Quasi-Poisson family. V(μ) = μ with φ estimated, for overdispersed counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuasiPoissonFamily;

impl Family for QuasiPoissonFamily {
    fn name(&self) -> &str {
        "QuasiPoisson"
    }

    fn variance(&self, mu: &Array1<f64>) -> Array1<f64> {
        mu.clone()
    }
}

/// Quasi-binomial family. V(μ) = μ(1 - μ) with φ estimated.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuasiBinomialFamily;

impl Family for QuasiBinomialFamily {
    fn name(&self) -> &str {
        "QuasiBinomial"
    }

    fn variance(&self, mu: &Array1<f64>) -> Array1<f64> {
        mu.mapv(|m| m * (1.0 - m))
    }
}

/// Tweedie family with variance power p. V(μ) = μ^p.
///
/// p = 1 has the Poisson variance but still estimates φ, like
/// [`QuasiPoissonFamily`]; only the Poisson family itself fixes the dispersion.
#[derive(Debug, Clone, Copy)]
pub struct TweedieFamily {
    pub var_power: f64,
}

impl TweedieFamily {
    pub fn new(var_power: f64) -> Self {
        Self { var_power }
    }
}

impl Family for TweedieFamily {
    fn name(&self) -> &str {
        "Tweedie"
    }

    fn variance(&self, mu: &Array1<f64>) -> Array1<f64> {
        let p = self.var_power;
        mu.mapv(|m| m.powf(p))
    }
}

/// Negative binomial family with ancillary parameter α. V(μ) = μ + αμ².
#[derive(Debug, Clone, Copy)]
pub struct NegativeBinomialFamily {
    pub alpha: f64,
}

impl NegativeBinomialFamily {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }
}

impl Family for NegativeBinomialFamily {
    fn name(&self) -> &str {
        "NegativeBinomial"
    }

    fn variance(&self, mu: &Array1<f64>) -> Array1<f64> {
        let alpha = self.alpha;
        mu.mapv(|m| m + alpha * m * m)
    }
}

// =============================================================================
// Tests
// =============================================================================
