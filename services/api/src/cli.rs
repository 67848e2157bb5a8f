use crate::commands::{run_bank, run_list, run_score, BankArgs, ScoreArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use persona_quiz::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Persona Quiz",
    about = "Serve, inspect and score personality quizzes from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect question banks and score answer sets
    Quiz {
        #[command(subcommand)]
        command: QuizCommand,
    },
    /// Play through the built-in quizzes with simulated answers
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum QuizCommand {
    /// List the available quizzes
    List,
    /// Print or export the finalized question bank of a quiz
    Bank(BankArgs),
    /// Score a comma-separated answer set against a quiz
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quiz { command } => match command {
            QuizCommand::List => run_list(),
            QuizCommand::Bank(args) => run_bank(args),
            QuizCommand::Score(args) => run_score(args),
        },
        Command::Demo(args) => run_demo(args),
    }
}
