use clap::{Parser, Subcommand};

use crate::cmd::{
    history::HistoryCommand, permissions::PermissionsCommand, report::ReportCommand,
    schema::SchemaCommand, summary::SummaryCommand, GlobalOpts,
};

mod api;
mod cmd;
mod core;

#[derive(Parser, Debug)]
#[command(
    name = "ledgerview",
    version,
    about = "Period and currency summaries of expense, credit and salary histories"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the records of a ledger that match the filters
    History(HistoryCommand),
    /// Total amount fields per currency, optionally per period
    Summary(SummaryCommand),
    /// Project a ledger into a printable document or CSV
    Report(ReportCommand),
    /// Show the permissions granted to the current token
    Permissions(PermissionsCommand),
    /// Print the expected input formats
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match &cli.command {
        Command::History(cmd) => cmd.exec(&cli.global),
        Command::Summary(cmd) => cmd.exec(&cli.global),
        Command::Report(cmd) => cmd.exec(&cli.global),
        Command::Permissions(cmd) => cmd.exec(&cli.global),
        Command::Schema(cmd) => cmd.exec(),
    }
}
