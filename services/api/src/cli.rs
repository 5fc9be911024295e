use crate::demo::{run_demo, run_scorecard, DemoArgs, ScorecardArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use inclusion_metrics::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Branch Reporting Console",
    about = "Run the financial inclusion reporting service and scorecard tools from the command line",
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
    /// Score a field report CSV export and print per-branch scorecards
    Scorecard(ScorecardArgs),
    /// Run an end-to-end CLI demo covering intake, scoring, and the dashboard
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
        Command::Scorecard(args) => run_scorecard(args),
        Command::Demo(args) => run_demo(args),
    }
}
