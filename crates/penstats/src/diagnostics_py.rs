// =============================================================================
// Post-fit Statistics Python Bindings
// =============================================================================
//
// Thin wrappers over penstats-core. Arrays come in as read-only numpy views,
// are copied into owned ndarray values, and results go back as new numpy
// arrays. Core errors surface in Python as ValueError.
// =============================================================================

use pyo3::prelude::*;
use pyo3::exceptions::PyValueError;
use pyo3::types::PyDict;
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray1, PyReadonlyArray2};

use penstats_core::{
    compute_fit_statistics, coefficient_covariance, decompose, effective_degrees_of_freedom,
    effective_degrees_of_freedom_path, estimate_aic, estimate_scale, pearson_chi_square,
    FitStatisticsConfig, FitStatisticsInput, PenStatsError,
};

use crate::families_py::family_from_name;

fn to_py_err(err: PenStatsError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

// =============================================================================
// Decomposition and Degrees of Freedom
// =============================================================================

/// Rank-truncated SVD of the weighted, penalized design.
///
/// # Arguments
/// * `x` - Design matrix (n, p)
/// * `sqrt_penalty` - Penalty square-root (m, p); use shape (0, p) for none
/// * `weights` - IRLS working weights (n,)
///
/// # Returns
/// Tuple (U, singular_values, Vt)
#[pyfunction]
pub fn decompose_py<'py>(
    py: Python<'py>,
    x: PyReadonlyArray2<'py, f64>,
    sqrt_penalty: PyReadonlyArray2<'py, f64>,
    weights: PyReadonlyArray1<'py, f64>,
) -> PyResult<(Bound<'py, PyArray2<f64>>, Bound<'py, PyArray1<f64>>, Bound<'py, PyArray2<f64>>)> {
    let x_arr = x.as_array().to_owned();
    let s_arr = sqrt_penalty.as_array().to_owned();
    let w_arr = weights.as_array().to_owned();

    let dec = decompose(&x_arr, &s_arr, &w_arr).map_err(to_py_err)?;

    Ok((
        dec.u.into_pyarray_bound(py),
        dec.singular_values.into_pyarray_bound(py),
        dec.vt.into_pyarray_bound(py),
    ))
}

/// Effective degrees of freedom: sum of squares of U.
#[pyfunction]
pub fn effective_degrees_of_freedom_py(u: PyReadonlyArray2<f64>) -> f64 {
    effective_degrees_of_freedom(&u.as_array().to_owned())
}

/// Effective degrees of freedom for each penalty strength, computed in parallel.
#[pyfunction]
pub fn effective_degrees_of_freedom_path_py(
    x: PyReadonlyArray2<f64>,
    sqrt_penalty: PyReadonlyArray2<f64>,
    weights: PyReadonlyArray1<f64>,
    penalty_strengths: Vec<f64>,
) -> PyResult<Vec<f64>> {
    let x_arr = x.as_array().to_owned();
    let s_arr = sqrt_penalty.as_array().to_owned();
    let w_arr = weights.as_array().to_owned();

    effective_degrees_of_freedom_path(&x_arr, &s_arr, &w_arr, &penalty_strengths).map_err(to_py_err)
}

// =============================================================================
// Covariance, Scale and AIC
// =============================================================================

/// Coefficient covariance from the decomposition, multiplied by `scale`.
#[pyfunction]
#[pyo3(signature = (u, singular_values, vt, scale=1.0))]
pub fn coefficient_covariance_py<'py>(
    py: Python<'py>,
    u: PyReadonlyArray2<'py, f64>,
    singular_values: PyReadonlyArray1<'py, f64>,
    vt: PyReadonlyArray2<'py, f64>,
    scale: f64,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let cov = coefficient_covariance(
        &u.as_array().to_owned(),
        &singular_values.as_array().to_owned(),
        &vt.as_array().to_owned(),
        scale,
    )
    .map_err(to_py_err)?;

    Ok(cov.into_pyarray_bound(py))
}

/// Pearson χ² / (n - dof), with the variance function of the named family.
#[pyfunction]
#[pyo3(signature = (y, mu, prior_weights, family, degrees_of_freedom, var_power=1.5, alpha=1.0))]
pub fn pearson_chi_square_py(
    y: PyReadonlyArray1<f64>,
    mu: PyReadonlyArray1<f64>,
    prior_weights: PyReadonlyArray1<f64>,
    family: &str,
    degrees_of_freedom: f64,
    var_power: f64,
    alpha: f64,
) -> PyResult<f64> {
    let fam = family_from_name(family, var_power, alpha)?;

    pearson_chi_square(
        &y.as_array().to_owned(),
        &mu.as_array().to_owned(),
        &prior_weights.as_array().to_owned(),
        |m| fam.variance(m),
        degrees_of_freedom,
    )
    .map_err(to_py_err)
}

/// Scale decision for the named family.
///
/// # Returns
/// Tuple (scale, is_estimated)
#[pyfunction]
#[pyo3(signature = (family, y, mu, prior_weights, degrees_of_freedom, var_power=1.5, alpha=1.0))]
pub fn estimate_scale_py(
    family: &str,
    y: PyReadonlyArray1<f64>,
    mu: PyReadonlyArray1<f64>,
    prior_weights: PyReadonlyArray1<f64>,
    degrees_of_freedom: f64,
    var_power: f64,
    alpha: f64,
) -> PyResult<(f64, bool)> {
    let fam = family_from_name(family, var_power, alpha)?;

    let est = estimate_scale(
        fam.as_ref(),
        &y.as_array().to_owned(),
        &mu.as_array().to_owned(),
        &prior_weights.as_array().to_owned(),
        degrees_of_freedom,
    )
    .map_err(to_py_err)?;

    Ok((est.scale, est.is_estimated))
}

/// AIC = -2ℓ + 2(dof + 1) + 2[scale estimated]
#[pyfunction]
pub fn estimate_aic_py(log_likelihood: f64, degrees_of_freedom: f64, is_estimated_scale: bool) -> f64 {
    estimate_aic(log_likelihood, degrees_of_freedom, is_estimated_scale)
}

// =============================================================================
// Full Pipeline
// =============================================================================

/// Compute every post-fit statistic of a converged penalized GLM.
///
/// # Returns
/// Dict with effective_degrees_of_freedom, n_independent, scale,
/// is_estimated_scale, aic, residual_degrees_of_freedom and, unless
/// `compute_covariance` is False, covariance.
#[pyfunction]
#[pyo3(signature = (
    x, sqrt_penalty, weights, y, mu, prior_weights, log_likelihood, family,
    var_power=1.5, alpha=1.0, compute_covariance=true, verbose=false
))]
pub fn compute_fit_statistics_py<'py>(
    py: Python<'py>,
    x: PyReadonlyArray2<'py, f64>,
    sqrt_penalty: PyReadonlyArray2<'py, f64>,
    weights: PyReadonlyArray1<'py, f64>,
    y: PyReadonlyArray1<'py, f64>,
    mu: PyReadonlyArray1<'py, f64>,
    prior_weights: PyReadonlyArray1<'py, f64>,
    log_likelihood: f64,
    family: &str,
    var_power: f64,
    alpha: f64,
    compute_covariance: bool,
    verbose: bool,
) -> PyResult<Bound<'py, PyDict>> {
    let fam = family_from_name(family, var_power, alpha)?;

    let x_arr = x.as_array().to_owned();
    let s_arr = sqrt_penalty.as_array().to_owned();
    let w_arr = weights.as_array().to_owned();
    let y_arr = y.as_array().to_owned();
    let mu_arr = mu.as_array().to_owned();
    let pw_arr = prior_weights.as_array().to_owned();

    let input = FitStatisticsInput {
        design_matrix: &x_arr,
        sqrt_penalty: &s_arr,
        weights: &w_arr,
        response: &y_arr,
        predicted_response: &mu_arr,
        prior_weights: &pw_arr,
        log_likelihood,
    };
    let config = FitStatisticsConfig {
        compute_covariance,
        verbose,
    };

    let stats = compute_fit_statistics(&input, fam.as_ref(), &config).map_err(to_py_err)?;

    let dict = PyDict::new_bound(py);
    dict.set_item("effective_degrees_of_freedom", stats.effective_degrees_of_freedom)?;
    dict.set_item("residual_degrees_of_freedom", stats.residual_degrees_of_freedom())?;
    dict.set_item("n_independent", stats.n_independent)?;
    dict.set_item("scale", stats.scale)?;
    dict.set_item("is_estimated_scale", stats.is_estimated_scale)?;
    dict.set_item("aic", stats.aic)?;
    if let Some(cov) = stats.covariance {
        dict.set_item("covariance", cov.into_pyarray_bound(py))?;
    }

    Ok(dict)
}
