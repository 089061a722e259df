use crate::infra::{assessment_service, reference_store};
use clap::Args;
use esli::assessment::{
    AssessmentSubmission, Category, RawResponseSet, ReferenceSnapshot, ResponseOption,
    SchoolLevel, SurveyCatalog,
};
use esli::config::AppConfig;
use esli::error::AppError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::PathBuf;

const DEFAULT_DEMO_STUDENT: &str = "홍길동";

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON object mapping question text to an answer between 1 and 4
    #[arg(long)]
    pub(crate) responses: PathBuf,
    /// School level (초등/중등/고등 or elementary/middle/high). Defaults to ESLI_REF_LEVEL.
    #[arg(long, value_parser = crate::infra::parse_level)]
    pub(crate) level: Option<SchoolLevel>,
    /// Student name printed in the report heading
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Print the stored assessment as JSON instead of markdown
    #[arg(long)]
    pub(crate) json: bool,
    /// Override the configured reference directory
    #[arg(long)]
    pub(crate) reference_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// School level for the synthesized respondent
    #[arg(long, value_parser = crate::infra::parse_level)]
    pub(crate) level: Option<SchoolLevel>,
    /// Seed for reproducible answers
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Student name printed in the report heading
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Override the configured reference directory
    #[arg(long)]
    pub(crate) reference_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ReferenceArgs {
    /// Directory holding standards.csv, percentiles.csv and question_map.csv
    #[arg(long)]
    pub(crate) reference_dir: Option<PathBuf>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        responses,
        level,
        name,
        json,
        reference_dir,
    } = args;

    let config = AppConfig::load()?;
    let raw = fs::read_to_string(&responses)?;
    let responses: RawResponseSet = serde_json::from_str(&raw)?;

    let service = assessment_service(
        &config.assessment,
        reference_store(&config.assessment, reference_dir),
    );
    let record = service.submit(AssessmentSubmission {
        student_name: name.unwrap_or_else(|| "학생".to_string()),
        school_level: level,
        responses,
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record.view())?);
    } else {
        println!("{}", record.report_context().to_markdown());
        print_unmapped(record.report.unmapped_questions.len());
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        level,
        seed,
        name,
        reference_dir,
    } = args;

    let config = AppConfig::load()?;
    let service = assessment_service(
        &config.assessment,
        reference_store(&config.assessment, reference_dir),
    );

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let responses = synthesize_responses(&SurveyCatalog::standard(), &mut rng);

    println!("ESLI assessment demo");
    println!(
        "  Level: {}",
        level.unwrap_or_else(|| service.default_level())
    );
    println!("  Items answered: {}", responses.len());

    let record = service.submit(AssessmentSubmission {
        student_name: name.unwrap_or_else(|| DEFAULT_DEMO_STUDENT.to_string()),
        school_level: level,
        responses,
    })?;

    println!("  Assessment id: {}\n", record.id);
    println!("{}", record.report_context().to_markdown());
    print_unmapped(record.report.unmapped_questions.len());

    Ok(())
}

pub(crate) fn run_reference_check(args: ReferenceArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let store = reference_store(&config.assessment, args.reference_dir);
    let snapshot = store.snapshot()?;

    println!("Reference data check");
    for line in coverage_lines(&snapshot) {
        println!("  {}", line);
    }
    println!("  Percentile rows: {}", snapshot.percentiles().len());
    println!(
        "  Question patterns: {} exact, {} keyword",
        snapshot.questions().exact_patterns().len(),
        snapshot.questions().keywords().len()
    );

    Ok(())
}

fn synthesize_responses<R: Rng>(catalog: &SurveyCatalog, rng: &mut R) -> RawResponseSet {
    let options = ResponseOption::ordered();
    let mut responses = RawResponseSet::new();
    for question in catalog.question_texts() {
        let option = options[rng.gen_range(0..options.len())];
        responses.insert(question, option.value());
    }
    responses
}

fn coverage_lines(snapshot: &ReferenceSnapshot) -> Vec<String> {
    let total = Category::ordered().len();
    SchoolLevel::ordered()
        .into_iter()
        .map(|level| {
            let missing = snapshot.missing_categories(level);
            if missing.is_empty() {
                format!("{}: {}/{} categories", level, total, total)
            } else {
                let labels: Vec<&str> = missing.iter().map(|category| category.label()).collect();
                format!(
                    "{}: {}/{} categories (missing: {})",
                    level,
                    total - missing.len(),
                    total,
                    labels.join(", ")
                )
            }
        })
        .collect()
}

fn print_unmapped(count: usize) {
    if count > 0 {
        println!("\nUnmapped questions: {} (recorded for review)", count);
    }
}
