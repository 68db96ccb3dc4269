use crate::infra::{load_problem, parse_divisions, parse_lambda};
use chrono::Local;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use waspas::analysis::{
    AnalysisService, AnalysisSettings, DecisionProblem, InMemoryNormalizedStore, Lambda,
    ScoredResult, SensitivitySweep, WaspasReport, DEFAULT_AXIS_PADDING,
};
use waspas::config::AppConfig;
use waspas::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct RankArgs {
    /// Blend between weighted product (0) and weighted sum (1). Defaults to WASPAS_LAMBDA.
    #[arg(long, value_parser = parse_lambda)]
    pub(crate) lambda: Option<Lambda>,
    /// Criteria CSV (key,name,direction,weight). Defaults to the reference criteria.
    #[arg(long)]
    pub(crate) criteria_csv: Option<PathBuf>,
    /// Decision matrix CSV (name,<key>,...). Defaults to the reference matrix.
    #[arg(long)]
    pub(crate) matrix_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SweepArgs {
    /// Number of equal λ intervals between 0 and 1. Defaults to WASPAS_SWEEP_DIVISIONS.
    #[arg(long, value_parser = parse_divisions)]
    pub(crate) divisions: Option<usize>,
    /// Criteria CSV (key,name,direction,weight). Defaults to the reference criteria.
    #[arg(long)]
    pub(crate) criteria_csv: Option<PathBuf>,
    /// Decision matrix CSV (name,<key>,...). Defaults to the reference matrix.
    #[arg(long)]
    pub(crate) matrix_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// λ used for the ranking step. Defaults to WASPAS_LAMBDA.
    #[arg(long, value_parser = parse_lambda)]
    pub(crate) lambda: Option<Lambda>,
}

fn build_service(settings: AnalysisSettings) -> AnalysisService<InMemoryNormalizedStore> {
    let store = InMemoryNormalizedStore::with_capacity(settings.cache_capacity);
    AnalysisService::new(Arc::new(store), settings)
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        lambda,
        criteria_csv,
        matrix_csv,
    } = args;

    let config = AppConfig::load()?;
    let service = build_service(config.analysis);
    let (problem, source) = load_problem(criteria_csv, matrix_csv)?;
    let lambda = lambda.unwrap_or(config.analysis.default_lambda);

    let results = service.score(&problem, Some(lambda))?;

    println!("WASPAS ranking");
    println!("Data source: {}", source.label());
    println!("Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    render_ranking(&results, lambda);
    Ok(())
}

pub(crate) fn run_sweep(args: SweepArgs) -> Result<(), AppError> {
    let SweepArgs {
        divisions,
        criteria_csv,
        matrix_csv,
    } = args;

    let config = AppConfig::load()?;
    let service = build_service(config.analysis);
    let (problem, source) = load_problem(criteria_csv, matrix_csv)?;

    let sweep = service.sweep(&problem, None, divisions)?;

    println!("WASPAS sensitivity sweep");
    println!("Data source: {}", source.label());
    render_sweep(&problem, &sweep);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(config.analysis);
    let (problem, source) = load_problem(None, None)?;
    let lambda = args.lambda.unwrap_or(config.analysis.default_lambda);

    println!("WASPAS walk-through: electroplating system selection");
    println!("Data source: {}", source.label());
    println!("Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));

    let report = service.report(&problem, Some(lambda))?;
    render_report(&report);

    let sweep = service.sweep(&problem, None, None)?;
    println!();
    render_sweep(&problem, &sweep);
    Ok(())
}

fn render_report(report: &WaspasReport) {
    println!("\n1. Criteria");
    for criterion in &report.criteria {
        println!(
            "- {} ({}): {}, weight {:.4}",
            criterion.name,
            criterion.key,
            criterion.direction.label(),
            criterion.weight
        );
    }
    let total_weight = report
        .criteria
        .iter()
        .map(|criterion| criterion.weight)
        .sum::<f64>();
    println!("Total weight: {total_weight:.4}");

    println!("\n2. Column limits");
    for limit in &report.limits {
        println!(
            "- {}: max {}, min {}, optimum {} ({})",
            limit.key,
            limit.max,
            limit.min,
            limit.optimum(),
            limit.direction.label()
        );
    }

    println!("\n3. Normalized matrix");
    for row in &report.normalized {
        let cells = report
            .criteria
            .iter()
            .map(|criterion| {
                let value = row.value(&criterion.key).unwrap_or_default();
                format!("{}={value:.4}", criterion.key)
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!("- {:<10} {cells}", row.name);
    }

    println!("\n4. Weighted terms (WSM: value * weight | WPM: value ^ weight)");
    for entry in &report.breakdown {
        let wsm = entry
            .contributions
            .iter()
            .map(|term| format!("{:.4}", term.wsm))
            .collect::<Vec<_>>()
            .join(" ");
        let wpm = entry
            .contributions
            .iter()
            .map(|term| format!("{:.4}", term.wpm))
            .collect::<Vec<_>>()
            .join(" ");
        println!("- {:<10} WSM [{wsm}] | WPM [{wpm}]", entry.name);
    }

    println!("\n5. Model totals");
    for entry in &report.normalized {
        if let Some(result) = report.result_for(&entry.name) {
            println!(
                "- {:<10} Q1 (WSM) {:.4}, Q2 (WPM) {:.4}",
                result.name, result.q1, result.q2
            );
        }
    }

    println!("\n6. Ranking");
    render_ranking(&report.ranking, report.lambda);
}

fn render_ranking(results: &[ScoredResult], lambda: Lambda) {
    let weight_sum = lambda.value();
    let weight_product = 1.0 - weight_sum;
    println!("λ = {lambda} (Q = {weight_sum:.2}·Q1 + {weight_product:.2}·Q2)");
    for result in results {
        println!(
            "#{} {:<10} {:.3} + {:.3} = {:.4}",
            result.rank,
            result.name,
            weight_sum * result.q1,
            weight_product * result.q2,
            result.q
        );
    }
    if let Some(leader) = results.first() {
        println!("Selected alternative: {}", leader.name);
    }
}

fn render_sweep(problem: &DecisionProblem, sweep: &SensitivitySweep) {
    println!("Sensitivity analysis ({} λ points)", sweep.points.len());
    for point in &sweep.points {
        let order = point
            .results
            .iter()
            .map(|result| result.name.as_str())
            .collect::<Vec<_>>()
            .join(" > ");
        println!("- λ {:.2}: {order}", point.lambda);
    }

    if let (Some(range), Some(axis)) = (
        sweep.score_range,
        sweep.axis_bounds(DEFAULT_AXIS_PADDING),
    ) {
        println!(
            "Score range {:.4} .. {:.4} (axis {:.4} .. {:.4})",
            range.min, range.max, axis.min, axis.max
        );
    }

    if sweep.is_rank_stable() {
        println!("Ranking is stable across the sweep");
    } else {
        println!("Rank trajectories");
        for alternative in problem.alternatives.iter() {
            let ranks = sweep
                .rank_trajectory(&alternative.name)
                .iter()
                .map(|(_, rank)| rank.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            println!("- {:<10} {ranks}", alternative.name);
        }
    }
}
