//! crewtax - Canadian income tax and GST/HST tracker for self-employed
//! film and TV crew

use clap::{Parser, Subcommand};

mod cmd;
mod records;
mod snapshot;
mod tax;

#[derive(Parser, Debug)]
#[command(
    name = "crewtax",
    version,
    about = "Canadian income tax and GST/HST tracker for self-employed film and TV crew"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full tax summary for a year
    Summary(cmd::summary::SummaryCommand),
    /// Per-record income and expense listing
    Transactions(cmd::transactions::TransactionsCommand),
    /// Expense totals by category
    Categories(cmd::categories::CategoriesCommand),
    /// GST/HST position for a year
    Gst(cmd::gst::GstCommand),
    /// CPP parameters and contributions
    Cpp(cmd::cpp::CppCommand),
    /// Print the snapshot document contract
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Summary(command) => command.exec(),
        Command::Transactions(command) => command.exec(),
        Command::Categories(command) => command.exec(),
        Command::Gst(command) => command.exec(),
        Command::Cpp(command) => command.exec(),
        Command::Schema(command) => command.exec(),
    }
}
