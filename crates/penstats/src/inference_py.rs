// =============================================================================
// Inference Python Bindings
// =============================================================================
//
// Wald summaries of the penalized coefficients.
// =============================================================================

use pyo3::prelude::*;
use pyo3::exceptions::PyValueError;
use numpy::{IntoPyArray, PyReadonlyArray1, PyReadonlyArray2};

use penstats_core::inference::summarize_coefficients;

/// Standard errors, Wald statistics, p-values and confidence intervals.
///
/// # Arguments
/// * `coefficients` - Fitted coefficients (p,)
/// * `covariance` - Scaled coefficient covariance (p, p)
/// * `is_estimated_scale` - Use Student's t (True) or the normal (False)
/// * `residual_dof` - n - EDF, used with the t reference
/// * `confidence` - Interval level
///
/// # Returns
/// Dict with std_errors, statistics, p_values, conf_lower, conf_upper
#[pyfunction]
#[pyo3(signature = (coefficients, covariance, is_estimated_scale, residual_dof, confidence=0.95))]
pub fn summarize_coefficients_py<'py>(
    py: Python<'py>,
    coefficients: PyReadonlyArray1<'py, f64>,
    covariance: PyReadonlyArray2<'py, f64>,
    is_estimated_scale: bool,
    residual_dof: f64,
    confidence: f64,
) -> PyResult<Bound<'py, pyo3::types::PyDict>> {
    let summary = summarize_coefficients(
        &coefficients.as_array().to_owned(),
        &covariance.as_array().to_owned(),
        is_estimated_scale,
        residual_dof,
        confidence,
    )
    .map_err(|e| PyValueError::new_err(format!("coefficient summary failed: {}", e)))?;

    let dict = pyo3::types::PyDict::new_bound(py);
    dict.set_item("std_errors", summary.std_errors.into_pyarray_bound(py))?;
    dict.set_item("statistics", summary.statistics.into_pyarray_bound(py))?;
    dict.set_item("p_values", summary.p_values.into_pyarray_bound(py))?;
    dict.set_item("conf_lower", summary.conf_lower.into_pyarray_bound(py))?;
    dict.set_item("conf_upper", summary.conf_upper.into_pyarray_bound(py))?;

    Ok(dict)
}
