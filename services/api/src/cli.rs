use crate::demo::{run_demo, run_score, DemoArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fleet_inspect::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Fleet Inspection Scoring",
    about = "Score fleet pre-trip and post-trip inspections from the command line or over HTTP",
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
    /// Score an inspection snapshot stored as JSON
    Score(ScoreArgs),
    /// Print the scorecard of a built-in sample inspection
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Trip history CSV used for rolling violation points
    #[arg(long)]
    pub(crate) history_csv: Option<PathBuf>,
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
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["fleet-inspect-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn score_accepts_history_and_as_of_date() {
        let cli = Cli::try_parse_from([
            "fleet-inspect-api",
            "score",
            "inspection.json",
            "--history-csv",
            "trips.csv",
            "--as-of",
            "2025-06-30",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.snapshot, PathBuf::from("inspection.json"));
                assert_eq!(args.history_csv, Some(PathBuf::from("trips.csv")));
                assert!(args.as_of.is_some());
                assert!(args.json);
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_as_of_dates() {
        let result = Cli::try_parse_from(["fleet-inspect-api", "demo", "--as-of", "30/06/2025"]);
        assert!(result.is_err());
    }
}
