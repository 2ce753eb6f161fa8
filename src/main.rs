use assessment_scoring::config::AppConfig;
use assessment_scoring::demo;
use assessment_scoring::error::AppError;
use assessment_scoring::scoring::{
    aggregate_gaps, aggregate_scores, AssessmentResponse, AssessmentSummary, CohortGapOverview,
    CohortScores, GapAnalysis, GapAssessment, IndicatorGap, ScoringConfig, ScoringEngine,
};
use assessment_scoring::telemetry;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Assessment Scoring Engine",
    about = "Score school transformation assessments and analyze maturity gaps from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score the built-in sample network and print a cohort roll-up (default command)
    Demo(DemoArgs),
    /// Score one assessment from configuration and response files
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
struct DemoArgs {
    /// Emit the full JSON payload instead of the text rendering
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Path to the scoring configuration (JSON)
    #[arg(long)]
    config: PathBuf,
    /// Path to the response set (JSON array)
    #[arg(long)]
    responses: PathBuf,
    /// Timestamp stamped onto the summary (RFC 3339; defaults to now)
    #[arg(long, value_parser = parse_timestamp)]
    generated_at: Option<DateTime<Utc>>,
    /// Include the indicator-level gap drill-down
    #[arg(long)]
    gaps: bool,
    /// Emit the full JSON payload instead of the text rendering
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct ScoreOutput<'a> {
    summary: &'a AssessmentSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    gaps: Option<&'a GapAnalysis>,
}

#[derive(Debug, Serialize)]
struct DemoOutput<'a> {
    summaries: &'a [AssessmentSummary],
    gap_analyses: &'a [GapAnalysis],
    cohort_scores: &'a CohortScores,
    cohort_gaps: &'a CohortGapOverview,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()))
    {
        Command::Demo(args) => run_demo(&config, args),
        Command::Score(args) => run_score(&config, args),
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|at| at.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}

fn run_demo(config: &AppConfig, args: DemoArgs) -> Result<(), AppError> {
    let generated_at = config
        .run
        .generated_at
        .unwrap_or_else(demo::pinned_generated_at);

    let mut summaries = Vec::new();
    let mut gap_analyses = Vec::new();
    for (context, responses) in demo::sample_cohort() {
        let engine = ScoringEngine::new(demo::network_config(context))?;
        let summary = engine.score(&responses, generated_at)?;
        gap_analyses.push(engine.indicator_gaps(&summary)?);
        summaries.push(summary);
    }

    let cohort_scores = aggregate_scores(&summaries);
    let cohort_gaps = aggregate_gaps(&gap_analyses);
    info!(classrooms = summaries.len(), "demo cohort scored");

    if args.json {
        let output = DemoOutput {
            summaries: &summaries,
            gap_analyses: &gap_analyses,
            cohort_scores: &cohort_scores,
            cohort_gaps: &cohort_gaps,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("School transformation scoring demo");
    for (summary, analysis) in summaries.iter().zip(&gap_analyses) {
        println!();
        render_summary(summary);
        render_gap_analysis(analysis);
    }

    println!();
    render_cohort(&cohort_scores, &cohort_gaps);
    Ok(())
}

fn run_score(config: &AppConfig, args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        config: config_path,
        responses: responses_path,
        generated_at,
        gaps,
        json,
    } = args;

    let scoring_config: ScoringConfig = serde_json::from_str(&fs::read_to_string(&config_path)?)?;
    let responses: Vec<AssessmentResponse> =
        serde_json::from_str(&fs::read_to_string(&responses_path)?)?;

    let generated_at = generated_at
        .or(config.run.generated_at)
        .unwrap_or_else(Utc::now);

    let engine = ScoringEngine::new(scoring_config)?;
    let summary = engine.score(&responses, generated_at)?;
    let analysis = if gaps {
        Some(engine.indicator_gaps(&summary)?)
    } else {
        None
    };

    info!(
        indicators = summary.indicator_scores.len(),
        grade = summary.context.grade.label(),
        "assessment scored"
    );

    if json {
        let output = ScoreOutput {
            summary: &summary,
            gaps: analysis.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    render_summary(&summary);
    if let Some(analysis) = &analysis {
        render_gap_analysis(analysis);
    }
    Ok(())
}

fn render_summary(summary: &AssessmentSummary) {
    println!(
        "Classroom {} | transformation year {}",
        summary.context.grade.label(),
        summary.context.year.number()
    );
    match (summary.overall_score, summary.overall_level) {
        (Some(score), Some(level)) => println!("Overall: {score:.2} ({})", level.label()),
        _ => println!("Overall: undetermined (no scored indicators)"),
    }

    println!("\nArea maturity");
    for area in &summary.area_scores {
        match (area.actual_score, area.actual_level) {
            (Some(score), Some(level)) => {
                let expectation = match &area.gap {
                    Some(gap) => format!(
                        " | expected {} ({:+}, {})",
                        gap.expected_level.label(),
                        gap.gap,
                        gap.standing().label()
                    ),
                    None => String::new(),
                };
                println!(
                    "- {}: {score:.2} ({}){expectation}",
                    area.area.label(),
                    level.label()
                );
            }
            _ => println!("- {}: no responses", area.area.label()),
        }
    }

    println!("\nModule scores");
    for module in &summary.module_scores {
        match module.average_score {
            Some(score) => println!(
                "- {}: {score:.2} ({} indicators)",
                module.module, module.indicator_count
            ),
            None => println!("- {}: no responses", module.module),
        }
    }
}

fn render_gap_analysis(analysis: &GapAnalysis) {
    println!("\nIndicator gaps");
    println!(
        "Tracked {} indicators: {} ahead, {} on track, {} behind, {} critical, {} without expectations",
        analysis.tally.total,
        analysis.tally.ahead,
        analysis.tally.on_track,
        analysis.tally.behind,
        analysis.tally.critical,
        analysis.tally.not_configured
    );
    if let Some(average) = analysis.average_gap {
        println!("Average level gap: {average:+.2}");
    }

    for module in &analysis.modules {
        if module.indicators.is_empty() {
            continue;
        }
        println!("\n{} ({})", module.module, module.area.label());
        for indicator in &module.indicators {
            println!("- {}", describe_indicator_gap(indicator));
        }
    }
}

fn describe_indicator_gap(gap: &IndicatorGap) -> String {
    match &gap.assessment {
        GapAssessment::NotConfigured => {
            format!("{}: no expectation configured", gap.indicator)
        }
        GapAssessment::Level {
            expected_level,
            gap: delta,
            classification,
        } => format!(
            "{}: level {} vs expected {} ({:+}, {})",
            gap.indicator,
            gap.actual_level,
            expected_level.index(),
            delta,
            classification.label()
        ),
        GapAssessment::Frequency {
            actual,
            expected,
            gap_percent,
            classification,
        } => format!(
            "{}: {} per {} vs expected {} per {} ({:+.0}%, {})",
            gap.indicator,
            actual.value,
            actual.unit.label(),
            expected.value,
            expected.unit.label(),
            gap_percent,
            classification.label()
        ),
    }
}

fn render_cohort(scores: &CohortScores, gaps: &CohortGapOverview) {
    println!("Cohort roll-up ({} classrooms)", scores.instances);
    match &scores.overall {
        Some(overall) => println!(
            "Network average: {:.2} (mean level {:.2})",
            overall.average_score, overall.average_level
        ),
        None => println!("Network average: undetermined"),
    }

    println!("\nArea averages");
    for (area, averages) in &scores.by_area {
        println!(
            "- {}: {:.2} across {} classrooms",
            area.label(),
            averages.average_score,
            averages.instances
        );
    }

    println!("\nGap overview");
    println!(
        "Tracked {} indicators: {} ahead, {} on track, {} behind, {} critical",
        gaps.tally.total,
        gaps.tally.ahead,
        gaps.tally.on_track,
        gaps.tally.behind,
        gaps.tally.critical
    );
    if let Some(average) = gaps.average_gap {
        println!("Average level gap: {average:+.2}");
    }

    if gaps.top_critical.is_empty() {
        println!("\nCritical indicators: none");
    } else {
        println!("\nMost critical indicators");
        for entry in &gaps.top_critical {
            println!("- {} ({} classrooms)", entry.indicator, entry.count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_timestamp_accepts_rfc3339() {
        let parsed = parse_timestamp("2026-03-16T12:00:00Z").expect("timestamp parses");
        assert_eq!(parsed, demo::pinned_generated_at());
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        let err = parse_timestamp("next tuesday").expect_err("garbage rejected");
        assert!(err.contains("RFC 3339"));
    }

    #[test]
    fn score_output_omits_absent_gaps() {
        let (context, responses) = demo::sample_cohort()
            .into_iter()
            .next()
            .expect("cohort not empty");
        let engine = ScoringEngine::new(demo::network_config(context)).expect("config validates");
        let summary = engine
            .score(&responses, demo::pinned_generated_at())
            .expect("responses score");

        let output = ScoreOutput {
            summary: &summary,
            gaps: None,
        };
        let value = serde_json::to_value(&output).expect("output serializes");
        assert!(value.get("summary").is_some());
        assert!(value.get("gaps").is_none());
    }
}
