use super::common::*;
use crate::analysis::domain::{
    Alternative, AnalysisError, Criterion, DecisionMatrix, Lambda, ParameterIssue,
};
use crate::analysis::{aggregate, contributions, normalize, score};

#[test]
fn reference_ranking_at_half_lambda_puts_chromium_first() {
    let problem = reference();
    let results = score(&reference_normalized(), &problem.criteria, 0.5).expect("scores");

    assert_eq!(
        names(&results),
        vec!["Chromium", "Platinum", "Silver", "Nickel", "Gold", "Lead", "Rhodium"]
    );
    let ranks = results.iter().map(|result| result.rank).collect::<Vec<_>>();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6, 7]);

    let chromium = &results[0];
    assert!((chromium.q1 - 0.78656).abs() < 1e-9);
    assert!((chromium.q2 - 0.650_900_796_289_662).abs() < 1e-9);
    assert!((chromium.q - 0.718_730_398_144_831).abs() < 1e-9);
}

#[test]
fn product_model_alone_prefers_platinum() {
    let problem = reference();
    let results = score(&reference_normalized(), &problem.criteria, 0.0).expect("scores");

    assert_eq!(results[0].name, "Platinum");
    assert_eq!(results[results.len() - 1].name, "Rhodium");
}

#[test]
fn blend_boundaries_reproduce_each_model() {
    let problem = reference();
    let normalized = reference_normalized();

    for result in score(&normalized, &problem.criteria, 1.0).expect("wsm") {
        assert_eq!(result.q, result.q1);
    }
    for result in score(&normalized, &problem.criteria, 0.0).expect("wpm") {
        assert_eq!(result.q, result.q2);
    }
}

#[test]
fn blend_is_linear_between_models() {
    let problem = small_problem();
    let normalized = normalize(&problem.alternatives, &problem.criteria).expect("normalizes");

    let low = score(&normalized, &problem.criteria, 0.25).expect("low");
    let high = score(&normalized, &problem.criteria, 0.75).expect("high");

    for result in &low {
        let expected = 0.25 * result.q1 + 0.75 * result.q2;
        assert_close(result.q, expected);
        let other = high
            .iter()
            .find(|candidate| candidate.name == result.name)
            .expect("same alternative");
        if result.q1 - result.q2 > 1e-9 {
            assert!(other.q > result.q);
        }
    }
}

#[test]
fn contributions_sum_and_multiply_to_aggregates() {
    let problem = reference();
    let normalized = reference_normalized();

    for row in &normalized {
        let terms = contributions(row, &problem.criteria).expect("terms");
        let keys = terms.iter().map(|term| term.key.as_str()).collect::<Vec<_>>();
        assert_eq!(keys, vec!["H", "T", "AE", "AD", "C"]);

        let (q1, q2) = aggregate(row, &problem.criteria).expect("aggregate");
        let sum = terms.iter().fold(0.0, |acc, term| acc + term.wsm);
        let product = terms.iter().fold(1.0, |acc, term| acc * term.wpm);
        assert_eq!(q1, sum);
        assert_eq!(q2, product);
    }
}

#[test]
fn small_problem_scores_match_hand_computation() {
    let problem = small_problem();
    let normalized = normalize(&problem.alternatives, &problem.criteria).expect("normalizes");

    let results = score(&normalized, &problem.criteria, 1.0).expect("scores");

    let gamma = results.iter().find(|result| result.name == "gamma").expect("gamma");
    assert_close(gamma.q1, 0.25);
    assert_close(gamma.q2, 0.25);
    assert_eq!(gamma.rank, 3);
}

#[test]
fn ties_keep_input_order() {
    let criteria = vec![
        Criterion::benefit("a", "A", 0.6),
        Criterion::cost("b", "B", 0.4),
    ];
    let matrix = DecisionMatrix::new(vec![
        Alternative::new("first", [("a", 3.0), ("b", 2.0)]),
        Alternative::new("leader", [("a", 6.0), ("b", 1.0)]),
        Alternative::new("second", [("a", 3.0), ("b", 2.0)]),
    ]);
    let normalized = normalize(&matrix, &criteria).expect("normalizes");

    let results = score(&normalized, &criteria, 0.4).expect("scores");

    assert_eq!(names(&results), vec!["leader", "first", "second"]);
    assert_eq!(results[1].q, results[2].q);
    assert_eq!(results[2].rank, 3);

    let reversed = normalized.iter().rev().cloned().collect::<Vec<_>>();
    let results = score(&reversed, &criteria, 0.4).expect("scores");
    assert_eq!(names(&results), vec!["leader", "second", "first"]);
}

#[test]
fn lambda_outside_unit_interval_is_rejected() {
    let problem = reference();
    let normalized = reference_normalized();

    for lambda in [-0.01, 1.01, f64::NAN] {
        let error = score(&normalized, &problem.criteria, lambda).expect_err("rejected");
        assert!(matches!(
            error,
            AnalysisError::InvalidParameter(ParameterIssue::LambdaOutOfRange { .. })
        ));
    }
    assert!(Lambda::new(0.0).is_ok());
    assert!(Lambda::new(1.0).is_ok());
}

#[test]
fn repeated_scoring_is_bit_identical() {
    let problem = reference();
    let normalized = reference_normalized();

    let first = score(&normalized, &problem.criteria, 0.37).expect("first");
    let second = score(&normalized, &problem.criteria, 0.37).expect("second");

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.q.to_bits(), b.q.to_bits());
        assert_eq!(a.q1.to_bits(), b.q1.to_bits());
        assert_eq!(a.q2.to_bits(), b.q2.to_bits());
    }
}

#[test]
fn scoring_rows_missing_a_criterion_fails() {
    let problem = reference();
    let mut normalized = reference_normalized();
    normalized[3].values.remove("AD");

    let error = score(&normalized, &problem.criteria, 0.5).expect_err("missing key");

    assert_eq!(error.kind(), "invalid_configuration");
}

#[test]
fn scoring_rejects_rows_outside_the_normalized_domain() {
    let problem = reference();

    let mut zeroed = reference_normalized();
    zeroed[1].values.insert("T".to_string(), 0.0);
    let error = score(&zeroed, &problem.criteria, 0.5).expect_err("zero value");
    assert_eq!(error.kind(), "invalid_input");

    let mut negative = reference_normalized();
    negative[0].values.insert("C".to_string(), -0.5);
    let error = score(&negative, &problem.criteria, 0.5).expect_err("negative value");
    assert_eq!(error.kind(), "invalid_input");

    let mut not_a_number = reference_normalized();
    not_a_number[4].values.insert("H".to_string(), f64::NAN);
    let error = score(&not_a_number, &problem.criteria, 0.0).expect_err("nan value");
    assert_eq!(error.kind(), "invalid_input");
    assert!(error.to_string().contains("Nickel"));
}
