use crate::demo::{run_demo, run_scorecard_export, DemoArgs, ScorecardArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use okr_tracker::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "OKR Performance Tracker",
    about = "Score departmental objectives and blend manual evaluations from the command line",
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
    /// Export the sample organization's scorecard as CSV
    Scorecard(ScorecardArgs),
    /// Run an end-to-end CLI demo covering scoring and evaluation blending
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
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Scorecard(args) => run_scorecard_export(args),
        Command::Demo(args) => run_demo(args),
    }
}
