use applicant_scoring::config::AppConfig;
use applicant_scoring::error::AppError;
use applicant_scoring::infra::{Dataset, InMemoryScoringRepository};
use applicant_scoring::telemetry;
use applicant_scoring::workflows::screening::{
    decode_application, decode_criteria, ranked_rows, write_csv, ApplicationId,
    ApplicationScoringService, BatchOutcome, JobPostingId, ScoreBreakdown, ScoringEngine,
    ScoringRepository,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "applicant-scoring",
    about = "Score job applications against their posting's criteria",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Re-score every application of a job posting and report the results
    Score(ScoreArgs),
    /// Show the per-skill breakdown for a single application without saving it
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug)]
struct DatasetArgs {
    /// JSON dataset with jobPostings, criteria and applications (defaults to SCORING_DATASET)
    #[arg(long)]
    dataset: Option<PathBuf>,
    /// Date standing in for "Present" end dates (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    #[command(flatten)]
    dataset: DatasetArgs,
    /// Job posting to score
    #[arg(long)]
    job_posting: u64,
    /// Write ranked scores to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Write the updated dataset back to this path
    #[arg(long)]
    save: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    #[command(flatten)]
    dataset: DatasetArgs,
    /// Application to evaluate
    #[arg(long)]
    application: u64,
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
    info!(environment = config.environment.label(), "configuration loaded");

    match cli.command {
        Command::Score(args) => run_score(&config, args),
        Command::Evaluate(args) => run_evaluate(&config, args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn load_repository(
    config: &AppConfig,
    args: &DatasetArgs,
) -> Result<(InMemoryScoringRepository, ScoringEngine), AppError> {
    let path = args
        .dataset
        .clone()
        .or_else(|| config.scoring.dataset_path.clone())
        .ok_or(AppError::MissingDataset)?;
    let dataset = Dataset::from_path(&path)?;
    info!(path = %path.display(), applications = dataset.applications.len(), "dataset loaded");

    let today = args.today.unwrap_or_else(|| config.scoring.today());
    Ok((
        InMemoryScoringRepository::from_dataset(dataset),
        ScoringEngine::new(today),
    ))
}

fn run_score(config: &AppConfig, args: ScoreArgs) -> Result<(), AppError> {
    let (repository, engine) = load_repository(config, &args.dataset)?;
    let repository = Arc::new(repository);
    let job_posting_id = JobPostingId(args.job_posting);

    let service = ApplicationScoringService::new(repository.clone(), engine);
    let outcome = service.update_application_scores(job_posting_id)?;

    let status = repository
        .job_posting(job_posting_id)
        .map(|posting| posting.status.label())
        .unwrap_or("unknown");
    println!(
        "Scoring run for job posting {job_posting_id} [{status}] (present = {})",
        engine.today()
    );
    match &outcome {
        BatchOutcome::Skipped(reason) => println!("Skipped: {}", reason.label()),
        BatchOutcome::Completed(summary) => {
            println!(
                "Evaluated {} application(s), {} failed, max attainable score {:.2}",
                summary.evaluated,
                summary.failures.len(),
                summary.max_attainable_score
            );
            for failure in &summary.failures {
                println!(
                    "- application {} (applicant {}): {}",
                    failure.application_id, failure.applicant_id, failure.reason
                );
            }
        }
    }

    let snapshot = repository.snapshot();
    let rows = ranked_rows(&snapshot.applications, job_posting_id);

    println!("\nRanked applications");
    for row in &rows {
        let score = row
            .score
            .map(|score| format!("{score:.2}"))
            .unwrap_or_else(|| "unscored".to_string());
        println!(
            "- application {} | applicant {} | {}",
            row.application_id, row.applicant_id, score
        );
    }

    if let Some(path) = args.csv {
        write_csv(&rows, File::create(&path)?)?;
        info!(path = %path.display(), rows = rows.len(), "scores exported");
    }

    if let Some(path) = args.save {
        let file = File::create(&path)?;
        serde_json::to_writer_pretty(file, &snapshot)
            .map_err(|err| AppError::Io(err.into()))?;
        info!(path = %path.display(), "dataset written");
    }

    Ok(())
}

fn run_evaluate(config: &AppConfig, args: EvaluateArgs) -> Result<(), AppError> {
    let (repository, engine) = load_repository(config, &args.dataset)?;
    let application_id = ApplicationId(args.application);

    let record = repository
        .application(application_id)
        .ok_or(AppError::UnknownApplication(application_id))?;
    let application = decode_application(&record)?;

    let criteria: Vec<_> = repository
        .criteria_for(record.job_posting_id)
        .map_err(|err| AppError::Scoring(err.into()))?
        .iter()
        .filter_map(|criteria| match decode_criteria(criteria) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                warn!(criteria_id = %criteria.id, error = %err, "skipping unreadable criteria");
                None
            }
        })
        .collect();

    let breakdown = engine.score(&application, &criteria);
    render_breakdown(&breakdown, record.score);
    Ok(())
}

fn render_breakdown(breakdown: &ScoreBreakdown, stored: Option<f64>) {
    println!("Application {}", breakdown.application_id);
    println!("Computed score: {:.2}", breakdown.total);
    match stored {
        Some(score) => println!("Stored score: {score:.2}"),
        None => println!("Stored score: none"),
    }

    if breakdown.components.is_empty() {
        println!("\nMatched skills: none");
    } else {
        println!("\nMatched skills");
        for component in &breakdown.components {
            let cap_note = if component.capped { " (capped)" } else { "" };
            println!(
                "- {}: {:.2}/{:.2} from {} mention(s){}",
                component.skill,
                component.points,
                component.max_points,
                component.mentions,
                cap_note
            );
        }
    }

    if !breakdown.matched_keywords.is_empty() {
        println!("\nKeywords: {}", breakdown.matched_keywords.join(", "));
    }
}
