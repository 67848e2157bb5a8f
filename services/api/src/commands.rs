use crate::infra::{build_service, load_catalog, parse_answers};
use clap::{Args, ValueEnum};
use persona_quiz::config::AppConfig;
use persona_quiz::error::AppError;
use persona_quiz::quizzes::{
    export_csv, AnswerSelection, QuestionBank, QuizServiceError, ScoreRequest, ScoreResponse,
};
use persona_quiz::telemetry::{self, LogSink};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum ResultFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug)]
pub(crate) struct BankArgs {
    /// Quiz key, e.g. `enneagram`
    pub(crate) quiz: String,
    /// Also write the bank as CSV to this path
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Output format for stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Quiz key, e.g. `cat-archetype`
    pub(crate) quiz: String,
    /// Comma-separated option ids or 1-based option positions; `-` skips a question
    #[arg(long, default_value = "")]
    pub(crate) answers: String,
    /// Output format for stdout
    #[arg(long, value_enum, default_value_t = ResultFormat::Text)]
    pub(crate) format: ResultFormat,
}

/// Loads configuration and routes logs to stderr so stdout stays clean.
pub(crate) fn init_cli() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_with_sink(&config.telemetry, LogSink::Stderr)?;
    Ok(config)
}

pub(crate) fn run_list() -> Result<(), AppError> {
    let config = init_cli()?;
    let catalog = load_catalog(&config.quiz)?;

    for summary in catalog.summaries() {
        println!(
            "{:<16} {:>3} questions  {:<18} {}",
            summary.key, summary.questions, summary.strategy, summary.title
        );
    }
    Ok(())
}

pub(crate) fn run_bank(args: BankArgs) -> Result<(), AppError> {
    let config = init_cli()?;
    let catalog = load_catalog(&config.quiz)?;
    let quiz = catalog
        .get(&args.quiz)
        .ok_or_else(|| QuizServiceError::UnknownQuiz(args.quiz.clone()))?;
    let bank = quiz.bank();

    if let Some(path) = &args.csv {
        let file = BufWriter::new(File::create(path)?);
        export_csv(bank, file)?;
        info!(path = %path.display(), questions = bank.len(), "question bank exported");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => out.write_all(render_bank(bank).as_bytes())?,
        OutputFormat::Csv => export_csv(bank, &mut out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, bank)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = init_cli()?;
    let service = build_service(&config.quiz)?;
    let questions = service.questions(&args.quiz)?.questions;
    let answers = parse_answers(&args.answers, &questions);

    let response = service.score(
        &args.quiz,
        ScoreRequest {
            answers,
            session: None,
        },
    )?;

    match args.format {
        ResultFormat::Text => print!("{}", render_result(&response)),
        ResultFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
    }
    Ok(())
}

pub(crate) fn render_bank(bank: &QuestionBank) -> String {
    let mut text = format!("{} ({} questions", bank.quiz, bank.len());
    if bank.shortfall() > 0 {
        text.push_str(&format!(", {} short of the requested count", bank.shortfall()));
    }
    text.push_str(")\n");

    for (index, question) in bank.questions.iter().enumerate() {
        text.push_str(&format!(
            "\n{:>2}. [{}] {} ({})\n",
            index + 1,
            question.outcome,
            question.title,
            question.id
        ));
        if !question.description.is_empty() {
            text.push_str(&format!("    {}
", question.description));
        }
        for (position, option) in question.options.iter().enumerate() {
            text.push_str(&format!("    {}) {}\n", position + 1, option.label));
        }
    }
    text
}

pub(crate) fn render_result(response: &ScoreResponse) -> String {
    let result = &response.result;
    let mut text = format!(
        "{}: answered {} of {} ({})\n\n",
        result.quiz,
        result.answered,
        result.total,
        result.strategy.label()
    );

    for line in &result.summary_lines {
        text.push_str(line);
        text.push('\n');
    }
    if !result.narrative.is_empty() {
        text.push('\n');
        text.push_str(&result.narrative);
        text.push('\n');
    }
    if let Some(artwork) = &response.artwork {
        text.push_str(&format!("\nArtwork: {} ({})\n", artwork.url, artwork.alt));
    }

    let skipped: Vec<&str> = result
        .answers
        .iter()
        .filter(|answer| answer.selection == AnswerSelection::Unanswered)
        .map(|answer| answer.question_id.as_str())
        .collect();
    if !skipped.is_empty() && skipped.len() < result.total {
        text.push_str(&format!("\nUnanswered: {}\n", skipped.join(", ")));
    }
    text
}
