use crate::demo::{
    run_ask, run_demo, run_evaluate, run_policies, run_vat, AskArgs, DemoArgs, EvaluateArgs,
    VatArgs,
};
use crate::server;
use bggov_fiscal::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "BGGovAI fiscal engine",
    about = "Evaluate fiscal what-if scenarios from the command line or over HTTP",
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
    /// Apply catalogued measures to a baseline and print the verdict
    Evaluate(EvaluateArgs),
    /// List the policy catalog
    Policies,
    /// Route a free-text question to a demo topic
    Ask(AskArgs),
    /// Run the restaurant VAT model
    Vat(VatArgs),
    /// Walk through a scripted scenario demo
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
        Command::Evaluate(args) => run_evaluate(args),
        Command::Policies => run_policies(),
        Command::Ask(args) => run_ask(args),
        Command::Vat(args) => run_vat(args),
        Command::Demo(args) => run_demo(args),
    }
}
