use crate::demo::{run_demo, run_reference_check, run_score, DemoArgs, ReferenceArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use esli::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "ESLI Assessment Service",
    about = "Score ESLI learning-profile surveys and serve the assessment API",
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
    /// Score a JSON response file (question text -> 1..4)
    Score(ScoreArgs),
    /// Score a synthesized survey and print the rule-based report
    Demo(DemoArgs),
    /// Inspect the reference tables
    Reference {
        #[command(subcommand)]
        command: ReferenceCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ReferenceCommand {
    /// Load the reference directory and report coverage per school level
    Check(ReferenceArgs),
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
        Command::Score(args) => run_score(args),
        Command::Demo(args) => run_demo(args),
        Command::Reference {
            command: ReferenceCommand::Check(args),
        } => run_reference_check(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esli::assessment::SchoolLevel;

    #[test]
    fn score_command_parses_level_and_flags() {
        let cli = Cli::try_parse_from([
            "esli-api",
            "score",
            "--responses",
            "answers.json",
            "--level",
            "중등",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.level, Some(SchoolLevel::Middle));
                assert!(args.json);
                assert_eq!(args.responses.to_string_lossy(), "answers.json");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn reference_check_is_nested() {
        let cli = Cli::try_parse_from(["esli-api", "reference", "check", "--reference-dir", "fixtures"])
            .expect("parses");
        assert!(matches!(
            cli.command,
            Some(Command::Reference {
                command: ReferenceCommand::Check(_)
            })
        ));
    }

    #[test]
    fn unknown_level_is_rejected() {
        let result = Cli::try_parse_from(["esli-api", "demo", "--level", "대학"]);
        assert!(result.is_err());
    }
}
