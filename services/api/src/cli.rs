use crate::demo::{run_categories, run_demo, run_search, CategoriesArgs, DemoArgs, SearchArgs};
use crate::server;
use bestfavour::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "BestFavour",
    about = "Run and explore the BestFavour services marketplace from the command line",
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
    /// Filter and sort the listings of one category
    Search(SearchArgs),
    /// List the service category directory
    Categories(CategoriesArgs),
    /// Walk through listing search, onboarding, messaging and settings
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
        Command::Search(args) => run_search(args),
        Command::Categories(args) => run_categories(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
