//! Integration tests for the hierarchical compositional likelihood.
//!
//! Purpose
//! -------
//! - Validate the end-to-end pipeline: from validated observation bundles,
//!   through model construction and flat-vector unpacking, to the joint
//!   objective, the diagnostic report, and the optimizer adapter.
//! - Exercise realistic shapes (several coarse and fine categories, a
//!   handful of observations) rather than toy edge cases only.
//!
//! Coverage
//! --------
//! - `composition::core`:
//!   - `CompositionData` construction from proportion matrices, response,
//!     and covariate.
//!   - `CompositionShape` validation and θ sizing.
//! - `composition::models::hierarchical::HierarchicalModel`:
//!   - Evaluation at model-space parameters and at flat θ vectors.
//!   - Report diagnostics: reference pinning, simplex columns, predicted
//!     log-scale means.
//! - `driver::ObjectiveAdapter`:
//!   - argmin `CostFunction`/`Gradient` over the full pipeline.
//!
//! Exclusions
//! ----------
//! - Fine-grained validation of low-level building blocks (validators,
//!   transforms, θ round-trips) — these are covered by unit tests.
//! - Python bindings — those are expected to be tested at a higher
//!   integration or system level.
//! - Closed-form objective values — covered by unit tests in
//!   `core::likelihood` where the arithmetic is laid out next to the code.
use argmin::core::{CostFunction, Gradient};
use ndarray::{array, Array1, Array2, Axis};
use rust_composition::{
    composition::{
        core::{
            data::CompositionData, params::CompositionParams, shape::CompositionShape,
        },
        models::hierarchical::HierarchicalModel,
    },
    driver::ObjectiveAdapter,
};

/// Purpose
/// -------
/// Construct a deterministic, non-degenerate observation bundle for a
/// (2 coarse, 3 fine, 4 observations) model.
///
/// Returns
/// -------
/// - A `CompositionData` whose proportion columns each sum to one, whose
///   response is strictly positive with visible spread, and whose
///   covariate changes sign across observations.
///
/// Usage
/// -----
/// - Shared by the pipeline tests below so every entry point sees the same
///   observations.
fn make_data(shape: CompositionShape) -> CompositionData {
    let coarse = array![[0.7, 0.4, 0.2, 0.55], [0.3, 0.6, 0.8, 0.45]];
    let fine = array![
        [0.5, 0.2, 0.1, 0.3],
        [0.3, 0.5, 0.4, 0.4],
        [0.2, 0.3, 0.5, 0.3],
    ];
    let carbon = array![2.4, 1.1, 0.6, 1.8];
    let temperature = array![-1.5, -0.5, 0.5, 1.5];
    CompositionData::new(coarse, fine, carbon, temperature, shape)
        .expect("CompositionData::new should succeed for finite, non-negative inputs")
}

/// Purpose
/// -------
/// Provide a flat θ with distinct values in every block for the
/// (2, 3, 4) shape, so block-ordering mistakes surface as numeric
/// disagreements rather than silent coincidences.
fn make_theta() -> Array1<f64> {
    array![
        0.4, // coarse effects (n_coarse − 1 = 1)
        0.3, -0.2, 0.1, 0.5, // loadings, row-major (2 × 2)
        0.2, -0.1, 0.3, // intercepts (3)
        0.15, -0.25, 0.05, // slopes (3)
        -0.5, // ln_sigma
    ]
}

#[test]
fn full_pipeline_produces_consistent_diagnostics() {
    let shape = CompositionShape::new(2, 3, 4).unwrap();
    let model = HierarchicalModel::new(shape);
    let data = make_data(shape);
    let theta = make_theta();
    assert_eq!(theta.len(), model.theta_len());

    let evaluation = model.evaluate_theta(theta.view(), &data).unwrap();
    assert!(evaluation.objective.is_finite());

    let report = &evaluation.report;

    // Reference pinning: beta[0] = 0 and the first loading column is zero.
    assert_eq!(report.beta.len(), 2);
    assert_eq!(report.beta[0], 0.0);
    assert_eq!(report.loadings.dim(), (2, 3));
    for value in report.loadings.column(0) {
        assert_eq!(*value, 0.0);
    }

    // Predicted probabilities are simplex columns of the right dimension.
    assert_eq!(report.coarse_predicted.dim(), (2, 4));
    assert_eq!(report.fine_predicted.dim(), (3, 4));
    for matrix in [&report.coarse_predicted, &report.fine_predicted] {
        for column in matrix.axis_iter(Axis(1)) {
            assert!(column.iter().all(|p| *p > 0.0 && *p < 1.0));
            assert!((column.sum() - 1.0).abs() < 1e-12);
        }
    }

    // One predicted log-scale mean per observation, all finite.
    assert_eq!(report.carbon_predicted.len(), 4);
    assert!(report.carbon_predicted.iter().all(|c| c.is_finite()));
}

#[test]
fn model_space_and_flat_entry_points_agree() {
    let shape = CompositionShape::new(2, 3, 4).unwrap();
    let model = HierarchicalModel::new(shape);
    let data = make_data(shape);
    let theta = make_theta();

    let via_theta = model.evaluate_theta(theta.view(), &data).unwrap();
    let params = CompositionParams::from_theta(theta.view(), &shape).unwrap();
    let via_params = model.evaluate(&params, &data).unwrap();

    assert_eq!(via_theta.objective, via_params.objective);
    assert_eq!(via_theta.report, via_params.report);
}

#[test]
fn objective_is_invariant_under_observation_permutation() {
    let shape = CompositionShape::new(2, 3, 4).unwrap();
    let model = HierarchicalModel::new(shape);
    let data = make_data(shape);
    let theta = make_theta();

    // Reverse the observation order in every per-observation input.
    let permute_cols = |matrix: &Array2<f64>| -> Array2<f64> {
        let mut out = matrix.clone();
        for (mut dst, src) in out.axis_iter_mut(Axis(1)).zip(matrix.axis_iter(Axis(1)).rev()) {
            dst.assign(&src);
        }
        out
    };
    let reversed = CompositionData::new(
        permute_cols(&data.coarse),
        permute_cols(&data.fine),
        data.carbon.iter().rev().copied().collect(),
        data.temperature.iter().rev().copied().collect(),
        shape,
    )
    .unwrap();

    let original = model.evaluate_theta(theta.view(), &data).unwrap().objective;
    let shuffled = model.evaluate_theta(theta.view(), &reversed).unwrap().objective;
    assert!((original - shuffled).abs() < 1e-10);
}

#[test]
fn adapter_drives_cost_and_gradient_over_the_full_pipeline() {
    let shape = CompositionShape::new(2, 3, 4).unwrap();
    let model = HierarchicalModel::new(shape);
    let data = make_data(shape);
    let adapter = ObjectiveAdapter::new(&model, &data);
    let theta = make_theta();

    let cost = adapter.cost(&theta).unwrap();
    let direct = model.evaluate_theta(theta.view(), &data).unwrap().objective;
    assert_eq!(cost, direct);

    let grad = adapter.gradient(&theta).unwrap();
    assert_eq!(grad.len(), theta.len());
    assert!(grad.iter().all(|g| g.is_finite()));

    // A small step against the gradient should not increase the cost for a
    // smooth objective at a non-stationary point.
    let norm_sq: f64 = grad.iter().map(|g| g * g).sum();
    assert!(norm_sq > 0.0);
    let step = 1e-6 / norm_sq.sqrt();
    let downhill = &theta - &(step * &grad);
    let stepped = adapter.cost(&downhill).unwrap();
    assert!(stepped <= cost + 1e-12);
}

#[test]
fn empty_sample_evaluates_to_zero_objective() {
    let shape = CompositionShape::new(2, 3, 0).unwrap();
    let model = HierarchicalModel::new(shape);
    let data = CompositionData::new(
        Array2::zeros((2, 0)),
        Array2::zeros((3, 0)),
        Array1::zeros(0),
        Array1::zeros(0),
        shape,
    )
    .unwrap();

    let evaluation = model.evaluate_theta(make_theta().view(), &data).unwrap();
    assert_eq!(evaluation.objective, 0.0);
    assert_eq!(evaluation.report.coarse_predicted.dim(), (2, 0));
    assert_eq!(evaluation.report.fine_predicted.dim(), (3, 0));
    assert_eq!(evaluation.report.carbon_predicted.len(), 0);

    // Parameter-side diagnostics survive an empty sample.
    assert_eq!(evaluation.report.beta.len(), 2);
    assert_eq!(evaluation.report.loadings.dim(), (2, 3));
}
