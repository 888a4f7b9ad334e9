use crate::report::{
    run_flow, run_list, run_normalize, run_summary, CsvArgs, NormalizeArgs, SummaryArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_tracker::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Job Application Tracker",
    about = "Track job applications and report on the search from the command line",
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
    /// Print KPIs, top title categories, and the status breakdown for a CSV export
    Summary(SummaryArgs),
    /// Print the Applied -> status flow lines for a CSV export
    Flow(CsvArgs),
    /// List applications from a CSV export, newest applied first
    List(CsvArgs),
    /// Show the category each job title normalizes to
    Normalize(NormalizeArgs),
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
        Command::Summary(args) => run_summary(args),
        Command::Flow(args) => run_flow(args),
        Command::List(args) => run_list(args),
        Command::Normalize(args) => {
            run_normalize(args);
            Ok(())
        }
    }
}
