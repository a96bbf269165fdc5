use crate::demo::{run_demo, run_fleet_report, DemoArgs, FleetReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fleet_desk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Fleet Desk",
    about = "Run the fleet dashboard service or drive check-ins from the command line",
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
    /// Inspect the fleet registry
    Fleet {
        #[command(subcommand)]
        command: FleetCommand,
    },
    /// Run an end-to-end check-in against the loaded fleet and print before/after
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum FleetCommand {
    /// Print fleet statistics and the vehicles matching a status filter
    Report(FleetReportArgs),
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
        Command::Fleet {
            command: FleetCommand::Report(args),
        } => run_fleet_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
