use crate::infra::{evaluation_instant, InMemoryTripHistory};
use chrono::{Duration, NaiveDate};
use clap::Args;
use fleet_inspect::config::AppConfig;
use fleet_inspect::inspection::{
    AnswerValue, BehaviorStatus, Catalog, CheckStatus, DriverId, Expectation, InspectionId,
    InspectionSnapshot, SectionAnswers, SectionKind,
};
use fleet_inspect::scoring::{InspectionScorecard, ScoringService, TripRecord};
use fleet_inspect::{AppError, ScoringPolicy};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Inspection snapshot in JSON form
    pub(crate) snapshot: PathBuf,
    /// Trip history CSV used for rolling violation points
    #[arg(long)]
    pub(crate) history_csv: Option<PathBuf>,
    /// Evaluate as of this date (YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Print the full scorecard as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Inspection date for the sample (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Print the full scorecard as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        snapshot,
        history_csv,
        as_of,
        json,
    } = args;

    let config = AppConfig::load()?;
    let raw = std::fs::read_to_string(snapshot)?;
    let snapshot: InspectionSnapshot = serde_json::from_str(&raw)?;
    let history = Arc::new(InMemoryTripHistory::load(history_csv.as_deref())?);

    let service = ScoringService::new(history, config.scoring);
    let scorecard = service.scorecard(&snapshot, evaluation_instant(as_of))?;

    emit(&scorecard, json)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let now = evaluation_instant(args.as_of);
    let inspection_date = now.date_naive();

    let history = Arc::new(InMemoryTripHistory::from_records(sample_history(
        inspection_date,
    )));
    let service = ScoringService::new(history, ScoringPolicy::default());
    let scorecard = service.scorecard(&sample_inspection(inspection_date), now)?;

    if !args.json {
        println!("Fleet inspection scoring demo");
    }
    emit(&scorecard, args.json)
}

fn emit(scorecard: &InspectionScorecard, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(scorecard)?);
    } else {
        for line in render_scorecard(scorecard) {
            println!("{line}");
        }
    }
    Ok(())
}

pub(crate) fn render_scorecard(scorecard: &InspectionScorecard) -> Vec<String> {
    let pre = &scorecard.pre_trip;
    let post = &scorecard.post_trip;
    let summary = &scorecard.final_summary;
    let risk = &scorecard.trip_risk;

    let mut lines = vec![format!(
        "Inspection {} | driver {}",
        scorecard.inspection_id.0, scorecard.driver_id.0
    )];

    lines.push(format!(
        "\nPre-trip checklist: {}/{} ({:.2}%) -> {}",
        pre.total_score,
        pre.max_possible_score,
        pre.score_percentage,
        pre.risk_status.label()
    ));
    for section in &pre.sections {
        let marker = if section.completed { "" } else { " [not completed]" };
        lines.push(format!(
            "  - {}: {}/{} ({:.2}%) {}{}",
            section.name,
            section.earned,
            section.max,
            section.percentage,
            section.risk_tier.label(),
            marker
        ));
    }
    lines.push(format!(
        "  Cleared for travel: {}",
        if pre.is_cleared_for_travel { "yes" } else { "no" }
    ));
    lines.push(format!("  {}", pre.clearance_notes));
    lines.push(format!("  Health: {}", pre.health_clearance.message));
    if !pre.documentation.missing_documents.is_empty() {
        lines.push(format!(
            "  Missing documents: {} ({})",
            pre.documentation.missing_documents.join(", "),
            if pre.documentation.is_compliant {
                "required documents complete"
            } else {
                "not compliant"
            }
        ));
    }

    lines.push(format!(
        "\nPost-trip checklist: {}/{} ({:.2}%) -> {}",
        post.total_score,
        post.max_possible_score,
        post.score_percentage,
        post.risk_status.label()
    ));
    for section in &post.sections {
        lines.push(format!(
            "  - {}: {}/{} ({:.2}%)",
            section.name, section.earned, section.max, section.percentage
        ));
    }

    lines.push(format!(
        "\nFinal: {:.2}% (pre {:.2} + post {:.2}) -> {} / {}",
        summary.final_percentage,
        summary.pre_checklist_weighted,
        summary.post_checklist_weighted,
        summary.final_status.label(),
        summary.final_risk_level.label()
    ));
    lines.push(format!("  {}", summary.final_comment));

    lines.push(format!(
        "\nViolation points: {} this trip ({}) | {} over {} to {} ({}, {} inspections)",
        risk.total_points_this_trip,
        risk.risk_level.label(),
        risk.rolling.total_points,
        risk.rolling.window_start,
        risk.rolling.window_end,
        risk.rolling.risk_level.label(),
        risk.rolling.inspections_considered
    ));

    lines
}

fn favourable_answers(kind: SectionKind) -> SectionAnswers {
    Catalog::standard()
        .section(kind)
        .items
        .iter()
        .map(|item| {
            let value = match item.expectation {
                _ if kind == SectionKind::TripBehavior => {
                    AnswerValue::Behavior(BehaviorStatus::Compliant)
                }
                Expectation::Affirmative => AnswerValue::Flag(true),
                Expectation::Negative => AnswerValue::Flag(false),
                Expectation::Within { .. } => AnswerValue::Number(36.8),
                Expectation::FreeText => AnswerValue::Text("Depot control room".to_string()),
            };
            (item.id.to_string(), value)
        })
        .collect()
}

pub(crate) fn sample_inspection(inspection_date: NaiveDate) -> InspectionSnapshot {
    let mut snapshot = InspectionSnapshot::new("insp-demo-0042", "drv-demo-7", inspection_date);
    for kind in SectionKind::pre_trip()
        .into_iter()
        .chain(SectionKind::post_trip())
    {
        snapshot = snapshot.with_section(kind, favourable_answers(kind));
    }

    snapshot
        .with_section(
            SectionKind::VehicleExterior,
            favourable_answers(SectionKind::VehicleExterior)
                .with("tires", AnswerValue::Check(CheckStatus::Fail))
                .with("mirrors", AnswerValue::Check(CheckStatus::Fail)),
        )
        .with_section(
            SectionKind::TripBehavior,
            favourable_answers(SectionKind::TripBehavior).with(
                "speed_market_area",
                AnswerValue::Behavior(BehaviorStatus::Violation),
            ),
        )
        .with_section(
            SectionKind::DrivingBehavior,
            favourable_answers(SectionKind::DrivingBehavior)
                .with("no_phone_use", AnswerValue::Flag(false)),
        )
}

pub(crate) fn sample_history(today: NaiveDate) -> Vec<TripRecord> {
    let trip = |id: &str, days_ago: i64, item: &str| TripRecord {
        inspection_id: InspectionId(id.to_string()),
        driver_id: DriverId("drv-demo-7".to_string()),
        inspection_date: today - Duration::days(days_ago),
        trip_behavior: SectionAnswers::new()
            .with(item, AnswerValue::Behavior(BehaviorStatus::Violation)),
    };

    vec![
        trip("insp-demo-0031", 12, "toll_gate"),
        trip("insp-demo-0017", 26, "max_speed_open_road"),
        trip("insp-demo-0009", 45, "incidents"),
    ]
}
