use super::common::*;
use crate::analysis::domain::{AnalysisError, ParameterIssue};
use crate::analysis::{lambda_steps, score, sweep, DEFAULT_AXIS_PADDING, MAX_SWEEP_DIVISIONS};

#[test]
fn default_grid_has_eleven_points_from_zero_to_one() {
    let steps = lambda_steps(10).expect("steps");

    assert_eq!(steps.len(), 11);
    assert_eq!(steps[0], 0.0);
    assert_eq!(steps[10], 1.0);
    assert_eq!(steps[3], 0.3);
    assert_eq!(steps[7], 0.7);
}

#[test]
fn zero_divisions_is_invalid_parameter() {
    assert_eq!(
        lambda_steps(0),
        Err(AnalysisError::InvalidParameter(ParameterIssue::ZeroDivisions))
    );
}

#[test]
fn sweep_points_match_direct_scoring() {
    let problem = reference();
    let normalized = reference_normalized();
    let steps = lambda_steps(10).expect("steps");

    let result = sweep(&normalized, &problem.criteria, &steps).expect("sweep");

    assert_eq!(result.points.len(), steps.len());
    for lambda in &steps {
        let direct = score(&normalized, &problem.criteria, *lambda).expect("score");
        let point = result.point(*lambda).expect("point present");
        assert_eq!(point.results, direct);
    }
}

#[test]
fn sweep_tracks_global_score_extremes() {
    let problem = reference();
    let normalized = reference_normalized();
    let steps = lambda_steps(10).expect("steps");

    let result = sweep(&normalized, &problem.criteria, &steps).expect("sweep");
    let range = result.score_range.expect("range present");

    let all_scores = result
        .points
        .iter()
        .flat_map(|point| point.results.iter().map(|entry| entry.q));
    let min = all_scores.clone().fold(f64::INFINITY, f64::min);
    let max = all_scores.fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(range.min, min);
    assert_eq!(range.max, max);

    // Rhodium's WPM score at λ = 0 and Chromium's WSM score at λ = 1.
    assert!((range.min - 0.520_955_117_793_940_1).abs() < 1e-9);
    assert!((range.max - 0.78656).abs() < 1e-9);

    let axis = result.axis_bounds(DEFAULT_AXIS_PADDING).expect("axis");
    assert!((axis.min - (range.min - 0.05)).abs() < 1e-12);
    assert!((axis.max - (range.max + 0.05)).abs() < 1e-12);
}

#[test]
fn axis_lower_bound_never_drops_below_zero() {
    let problem = reference();
    let normalized = reference_normalized();
    let result = sweep(&normalized, &problem.criteria, &[0.5]).expect("sweep");

    let axis = result.axis_bounds(5.0).expect("axis");

    assert_eq!(axis.min, 0.0);
}

#[test]
fn leadership_switches_from_platinum_to_chromium() {
    let problem = reference();
    let normalized = reference_normalized();
    let steps = lambda_steps(10).expect("steps");

    let result = sweep(&normalized, &problem.criteria, &steps).expect("sweep");

    let leaders = result.leaders();
    assert_eq!(leaders[0], (0.0, "Platinum"));
    assert_eq!(leaders[4].1, "Platinum");
    assert_eq!(leaders[5].1, "Chromium");
    assert_eq!(leaders[10], (1.0, "Chromium"));
    assert!(!result.is_rank_stable());

    let nickel = result.rank_trajectory("Nickel");
    assert_eq!(nickel.len(), 11);
    assert_eq!(nickel[0].1, 5);
    assert_eq!(nickel[10].1, 3);
    assert!(result.rank_trajectory("Unobtainium").is_empty());
}

#[test]
fn empty_lambda_list_produces_empty_sweep() {
    let problem = reference();
    let result = sweep(&reference_normalized(), &problem.criteria, &[]).expect("sweep");

    assert!(result.points.is_empty());
    assert!(result.score_range.is_none());
    assert!(result.is_rank_stable());
}

#[test]
fn invalid_lambda_in_sweep_fails_as_a_unit() {
    let problem = reference();
    let error = sweep(&reference_normalized(), &problem.criteria, &[0.2, 1.4])
        .expect_err("rejected");

    assert_eq!(error.kind(), "invalid_parameter");
}

#[test]
fn oversized_grids_are_rejected_before_allocation() {
    let steps = lambda_steps(MAX_SWEEP_DIVISIONS).expect("largest grid");
    assert_eq!(steps.len(), MAX_SWEEP_DIVISIONS + 1);

    assert_eq!(
        lambda_steps(MAX_SWEEP_DIVISIONS + 1),
        Err(AnalysisError::InvalidParameter(
            ParameterIssue::TooManyDivisions {
                requested: MAX_SWEEP_DIVISIONS + 1,
                max: MAX_SWEEP_DIVISIONS,
            }
        ))
    );
    assert_eq!(
        lambda_steps(usize::MAX).map_err(|error| error.kind()),
        Err("invalid_parameter")
    );
}

#[test]
fn oversized_lambda_lists_are_rejected() {
    let problem = reference();
    let lambdas = vec![0.5; MAX_SWEEP_DIVISIONS + 2];

    let error = sweep(&reference_normalized(), &problem.criteria, &lambdas).expect_err("too many");

    assert_eq!(
        error,
        AnalysisError::InvalidParameter(ParameterIssue::TooManyLambdas {
            requested: MAX_SWEEP_DIVISIONS + 2,
            max: MAX_SWEEP_DIVISIONS + 1,
        })
    );
}
