// =============================================================================
// PenStats Python Bindings
// =============================================================================
//
// This module bridges `penstats-core` to Python using PyO3. The Python GLM
// fitting loop calls into it once its IRLS iterations have converged.
//
// STRUCTURE:
// ----------
// - families_py:    Family classes and `family_from_name`
// - diagnostics_py: decomposition, EDF, covariance, scale, AIC, full pipeline
// - inference_py:   Wald summaries of the coefficients
//
// FOR MAINTAINERS:
// ----------------
// When adding new functionality:
// 1. Implement the logic in `penstats-core` first
// 2. Create a Python wrapper in the matching *_py module
// 3. Register it in the `_penstats` function at the bottom
//
// =============================================================================

use pyo3::prelude::*;

mod diagnostics_py;
mod families_py;
mod inference_py;

use diagnostics_py::{
    compute_fit_statistics_py, coefficient_covariance_py, decompose_py, effective_degrees_of_freedom_path_py,
    effective_degrees_of_freedom_py, estimate_aic_py, estimate_scale_py, pearson_chi_square_py,
};
use families_py::{
    PyBinomialFamily, PyGammaFamily, PyGaussianFamily, PyInverseGaussianFamily, PyNegativeBinomialFamily,
    PyPoissonFamily, PyQuasiBinomialFamily, PyQuasiPoissonFamily, PyTweedieFamily,
};
use inference_py::summarize_coefficients_py;

// =============================================================================
// Module Registration
// =============================================================================

/// PenStats: post-fit statistics for penalized GLMs with a Rust backend
///
/// This is the internal Rust module. Users should import from the
/// Python wrapper: `import penstats`
#[pymodule]
fn _penstats(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Families
    m.add_class::<PyGaussianFamily>()?;
    m.add_class::<PyPoissonFamily>()?;
    m.add_class::<PyBinomialFamily>()?;
    m.add_class::<PyGammaFamily>()?;
    m.add_class::<PyInverseGaussianFamily>()?;
    m.add_class::<PyQuasiPoissonFamily>()?;
    m.add_class::<PyQuasiBinomialFamily>()?;
    m.add_class::<PyTweedieFamily>()?;
    m.add_class::<PyNegativeBinomialFamily>()?;

    // Decomposition and statistics
    m.add_function(wrap_pyfunction!(decompose_py, m)?)?;
    m.add_function(wrap_pyfunction!(effective_degrees_of_freedom_py, m)?)?;
    m.add_function(wrap_pyfunction!(effective_degrees_of_freedom_path_py, m)?)?;
    m.add_function(wrap_pyfunction!(coefficient_covariance_py, m)?)?;
    m.add_function(wrap_pyfunction!(pearson_chi_square_py, m)?)?;
    m.add_function(wrap_pyfunction!(estimate_scale_py, m)?)?;
    m.add_function(wrap_pyfunction!(estimate_aic_py, m)?)?;
    m.add_function(wrap_pyfunction!(compute_fit_statistics_py, m)?)?;

    // Inference
    m.add_function(wrap_pyfunction!(summarize_coefficients_py, m)?)?;

    Ok(())
}
