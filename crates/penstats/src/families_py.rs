// =============================================================================
// Family Python Wrappers
// =============================================================================
//
// Python-side families expose the two capabilities the scale estimator needs:
// the variance function and whether the dispersion is fixed at 1.
// `family_from_name` resolves the string names used by the other bindings.
// =============================================================================

use pyo3::prelude::*;
use pyo3::exceptions::PyValueError;
use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};

use penstats_core::families::{
    Family, GaussianFamily, PoissonFamily, BinomialFamily, GammaFamily, InverseGaussianFamily,
    QuasiPoissonFamily, QuasiBinomialFamily, TweedieFamily, NegativeBinomialFamily,
};

// =============================================================================
// Family Helper Functions
// =============================================================================

/// Get a Family trait object from a family name string.
///
/// Handles case-insensitive matching and common aliases.
/// `var_power` is used only for Tweedie; `alpha` only for NegativeBinomial.
pub(crate) fn family_from_name(name: &str, var_power: f64, alpha: f64) -> PyResult<Box<dyn Family>> {
    match name.to_lowercase().as_str() {
        "gaussian" | "normal" => Ok(Box::new(GaussianFamily)),
        "poisson" => Ok(Box::new(PoissonFamily)),
        "binomial" => Ok(Box::new(BinomialFamily)),
        "gamma" => Ok(Box::new(GammaFamily)),
        "inversegaussian" | "inverse_gaussian" | "inverse-gaussian" => Ok(Box::new(InverseGaussianFamily)),
        "quasipoisson" | "quasi-poisson" | "quasi_poisson" => Ok(Box::new(QuasiPoissonFamily)),
        "quasibinomial" | "quasi-binomial" | "quasi_binomial" => Ok(Box::new(QuasiBinomialFamily)),
        "tweedie" => {
            if var_power > 0.0 && var_power < 1.0 {
                return Err(PyValueError::new_err(format!(
                    "var_power must be <= 0 or >= 1, got {}", var_power
                )));
            }
            Ok(Box::new(TweedieFamily::new(var_power)))
        }
        "negativebinomial" | "negative_binomial" | "negbin" | "nb" => {
            if !(alpha > 0.0) {
                return Err(PyValueError::new_err(format!(
                    "alpha must be > 0 for Negative Binomial, got {}", alpha
                )));
            }
            Ok(Box::new(NegativeBinomialFamily::new(alpha)))
        }
        _ => Err(PyValueError::new_err(format!(
            "Unknown family '{}'. Use 'gaussian', 'poisson', 'binomial', 'gamma', \
             'inverse_gaussian', 'quasipoisson', 'quasibinomial', 'tweedie', or 'negativebinomial'.", name
        ))),
    }
}

// =============================================================================
// Family Wrappers (Macro-Generated)
// =============================================================================

/// Generate PyO3 wrappers for parameter-free families.
macro_rules! impl_py_family {
    ($py_name:ident, $py_str:literal, $inner_type:ty, $inner_expr:expr) => {
        #[pyclass(name = $py_str)]
        #[derive(Clone)]
        pub struct $py_name {
            inner: $inner_type,
        }

        #[pymethods]
        impl $py_name {
            #[new]
            fn new() -> Self {
                Self { inner: $inner_expr }
            }

            fn name(&self) -> &str {
                self.inner.name()
            }

            fn variance<'py>(&self, py: Python<'py>, mu: PyReadonlyArray1<f64>) -> Bound<'py, PyArray1<f64>> {
                self.inner.variance(&mu.as_array().to_owned()).into_pyarray_bound(py)
            }

            fn fixed_dispersion(&self) -> bool {
                self.inner.fixed_dispersion()
            }
        }
    };
}

impl_py_family!(PyGaussianFamily, "GaussianFamily", GaussianFamily, GaussianFamily);
impl_py_family!(PyPoissonFamily, "PoissonFamily", PoissonFamily, PoissonFamily);
impl_py_family!(PyBinomialFamily, "BinomialFamily", BinomialFamily, BinomialFamily);
impl_py_family!(PyGammaFamily, "GammaFamily", GammaFamily, GammaFamily);
impl_py_family!(PyInverseGaussianFamily, "InverseGaussianFamily", InverseGaussianFamily, InverseGaussianFamily);
impl_py_family!(PyQuasiPoissonFamily, "QuasiPoissonFamily", QuasiPoissonFamily, QuasiPoissonFamily);
impl_py_family!(PyQuasiBinomialFamily, "QuasiBinomialFamily", QuasiBinomialFamily, QuasiBinomialFamily);

/// Tweedie family. Variance function: V(μ) = μ^p.
///
/// Parameters
/// ----------
/// var_power : float
///     The variance power p. Must be <= 0 or >= 1.
#[pyclass(name = "TweedieFamily")]
#[derive(Clone)]
pub struct PyTweedieFamily {
    inner: TweedieFamily,
}

#[pymethods]
impl PyTweedieFamily {
    #[new]
    #[pyo3(signature = (var_power=1.5))]
    fn new(var_power: f64) -> PyResult<Self> {
        if var_power > 0.0 && var_power < 1.0 {
            return Err(PyValueError::new_err(
                format!("var_power must be <= 0 or >= 1, got {}", var_power)
            ));
        }
        Ok(Self { inner: TweedieFamily::new(var_power) })
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    #[getter]
    fn var_power(&self) -> f64 {
        self.inner.var_power
    }

    fn variance<'py>(&self, py: Python<'py>, mu: PyReadonlyArray1<f64>) -> Bound<'py, PyArray1<f64>> {
        self.inner.variance(&mu.as_array().to_owned()).into_pyarray_bound(py)
    }

    fn fixed_dispersion(&self) -> bool {
        self.inner.fixed_dispersion()
    }
}

/// Negative binomial family. Variance function: V(μ) = μ + αμ².
#[pyclass(name = "NegativeBinomialFamily")]
#[derive(Clone)]
pub struct PyNegativeBinomialFamily {
    inner: NegativeBinomialFamily,
}

#[pymethods]
impl PyNegativeBinomialFamily {
    #[new]
    #[pyo3(signature = (alpha=1.0))]
    fn new(alpha: f64) -> PyResult<Self> {
        if !(alpha > 0.0) {
            return Err(PyValueError::new_err(
                format!("alpha must be > 0 for Negative Binomial, got {}", alpha)
            ));
        }
        Ok(Self { inner: NegativeBinomialFamily::new(alpha) })
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    #[getter]
    fn alpha(&self) -> f64 {
        self.inner.alpha
    }

    fn variance<'py>(&self, py: Python<'py>, mu: PyReadonlyArray1<f64>) -> Bound<'py, PyArray1<f64>> {
        self.inner.variance(&mu.as_array().to_owned()).into_pyarray_bound(py)
    }

    fn fixed_dispersion(&self) -> bool {
        self.inner.fixed_dispersion()
    }
}
