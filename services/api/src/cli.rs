use crate::demo::{run_demo, run_rank, run_sweep, DemoArgs, RankArgs, SweepArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use waspas::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "WASPAS Decision Engine",
    about = "Rank alternatives with the WASPAS method and explore λ sensitivity",
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
    /// Print the ranking for a single λ
    Rank(RankArgs),
    /// Print the ranking family across a λ grid
    Sweep(SweepArgs),
    /// Walk through every calculation step for the reference problem
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
        Command::Rank(args) => run_rank(args),
        Command::Sweep(args) => run_sweep(args),
        Command::Demo(args) => run_demo(args),
    }
}
