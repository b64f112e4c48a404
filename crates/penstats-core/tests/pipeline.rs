// End-to-end checks of the post-fit statistics on small penalized problems.

use approx::assert_abs_diff_eq;
use ndarray::{array, Array1, Array2};
use penstats_core::families::{GammaFamily, GaussianFamily, PoissonFamily};
use penstats_core::inference::summarize_coefficients;
use penstats_core::{
    compute_fit_statistics, decompose, effective_degrees_of_freedom, pearson_chi_square, FitStatisticsConfig,
    FitStatisticsInput, PenStatsError,
};

/// Second-order difference penalty square-root for k coefficients, scaled by √λ.
fn difference_penalty(k: usize, lambda: f64) -> Array2<f64> {
    let mut d = Array2::zeros((k - 2, k));
    for i in 0..k - 2 {
        d[[i, i]] = 1.0;
        d[[i, i + 1]] = -2.0;
        d[[i, i + 2]] = 1.0;
    }
    d * lambda.sqrt()
}

/// Piecewise-linear "tent" basis on equally spaced knots over [0, 1].
fn tent_basis(x: &Array1<f64>, k: usize) -> Array2<f64> {
    let h = 1.0 / (k - 1) as f64;
    Array2::from_shape_fn((x.len(), k), |(i, j)| {
        let knot = j as f64 * h;
        (1.0 - (x[i] - knot).abs() / h).max(0.0)
    })
}

#[test]
fn identity_design_without_penalty() {
    let dec = decompose(&Array2::eye(3), &Array2::zeros((0, 3)), &array![1.0, 1.0, 1.0]).unwrap();

    assert_eq!(dec.n_independent(), 3);
    for &s in dec.singular_values.iter() {
        assert_abs_diff_eq!(s, 1.0, epsilon = 1e-12);
    }
    assert_abs_diff_eq!(effective_degrees_of_freedom(&dec.u), 3.0, epsilon = 1e-12);
}

#[test]
fn perfect_fit_has_zero_pearson_statistic() {
    let y = array![2.0, 4.0, 6.0];
    let chi2 = pearson_chi_square(&y, &y, &array![1.0, 1.0, 1.0], |m| m.clone(), 1.0).unwrap();
    assert_eq!(chi2, 0.0);
}

#[test]
fn single_observation_with_one_dof_is_degenerate() {
    let y = array![3.0];
    let result = pearson_chi_square(&y, &array![3.0], &array![1.0], |m| m.clone(), 1.0);
    assert!(matches!(result, Err(PenStatsError::DegenerateResidualDoF { .. })));
}

#[test]
fn smoother_edf_shrinks_with_penalty() {
    let n = 40;
    let k = 8;
    let x_obs = Array1::linspace(0.0, 1.0, n);
    let basis = tent_basis(&x_obs, k);
    let w = Array1::ones(n);

    let edf_at = |lambda: f64| {
        let dec = decompose(&basis, &difference_penalty(k, lambda), &w).unwrap();
        effective_degrees_of_freedom(&dec.u)
    };

    let light = edf_at(1e-6);
    let heavy = edf_at(1e8);

    assert_abs_diff_eq!(light, k as f64, epsilon = 1e-3);
    // A second-difference penalty leaves straight lines unpenalized
    assert_abs_diff_eq!(heavy, 2.0, epsilon = 1e-3);
}

#[test]
fn gamma_smoother_full_statistics() {
    let n = 30;
    let k = 6;
    let x_obs = Array1::linspace(0.0, 1.0, n);
    let basis = tent_basis(&x_obs, k);
    let s = difference_penalty(k, 2.0);

    let mu = x_obs.mapv(|t| 2.0 + t);
    let y: Array1<f64> = mu
        .iter()
        .enumerate()
        .map(|(i, &m)| m * if i % 2 == 0 { 1.1 } else { 0.9 })
        .collect();
    let irls_weights = Array1::ones(n);
    let prior_weights = Array1::ones(n);

    let input = FitStatisticsInput {
        design_matrix: &basis,
        sqrt_penalty: &s,
        weights: &irls_weights,
        response: &y,
        predicted_response: &mu,
        prior_weights: &prior_weights,
        log_likelihood: -25.0,
    };

    let stats = compute_fit_statistics(&input, &GammaFamily, &FitStatisticsConfig::default()).unwrap();

    // Each (y - μ)² / μ² = 0.01
    let expected_scale = 0.01 * n as f64 / (n as f64 - stats.effective_degrees_of_freedom);
    assert!(stats.is_estimated_scale);
    assert_abs_diff_eq!(stats.scale, expected_scale, epsilon = 1e-10);
    assert!(stats.effective_degrees_of_freedom > 2.0 && stats.effective_degrees_of_freedom < k as f64);
    assert_abs_diff_eq!(
        stats.aic,
        50.0 + 2.0 * (stats.effective_degrees_of_freedom + 1.0) + 2.0,
        epsilon = 1e-10
    );

    let cov = stats.covariance.as_ref().unwrap();
    let coefficients = Array1::from_elem(k, 1.0);
    let summary = summarize_coefficients(
        &coefficients,
        cov,
        stats.is_estimated_scale,
        stats.residual_degrees_of_freedom(),
        0.95,
    )
    .unwrap();
    assert!(summary.std_errors.iter().all(|&se| se > 0.0));
    assert!(summary.p_values.iter().all(|&p| (0.0..=1.0).contains(&p)));
}

#[test]
fn covariance_scales_linearly_with_dispersion() {
    let x = array![[1.0, 0.2], [1.0, 0.4], [1.0, 0.9], [1.0, 1.3], [1.0, 2.0]];
    let s = array![[0.0, 1.0]];
    let w = array![1.0, 2.0, 1.0, 0.5, 1.0];
    let y = array![1.0, 2.0, 1.5, 3.0, 2.0];
    let mu = array![1.2, 1.6, 1.9, 2.4, 2.3];
    let pw = Array1::ones(5);

    let input = FitStatisticsInput {
        design_matrix: &x,
        sqrt_penalty: &s,
        weights: &w,
        response: &y,
        predicted_response: &mu,
        prior_weights: &pw,
        log_likelihood: -4.0,
    };

    let fixed = compute_fit_statistics(&input, &PoissonFamily, &FitStatisticsConfig::default()).unwrap();
    let estimated = compute_fit_statistics(&input, &GaussianFamily, &FitStatisticsConfig::default()).unwrap();

    assert_eq!(fixed.scale, 1.0);
    assert_abs_diff_eq!(fixed.effective_degrees_of_freedom, estimated.effective_degrees_of_freedom);

    let a = fixed.covariance.unwrap();
    let b = estimated.covariance.unwrap();
    for (va, vb) in a.iter().zip(b.iter()) {
        assert_abs_diff_eq!(va * estimated.scale, *vb, epsilon = 1e-12);
    }
}
