mod commands;
mod logging;

use clap::{Parser, Subcommand, ValueEnum};
use xinsert_store::Schema;

#[derive(Debug, Parser)]
#[command(
    name = "xinsert",
    version,
    about = "Exercise extended MySQL inserts and decode the rows back",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the demo table
    Setup {
        #[arg(long, value_enum, default_value_t = SchemaArg::AutoIncrement)]
        schema: SchemaArg,
    },
    /// Remove the table created by the setup command
    #[command(alias = "reset")]
    Cleanup,
    /// Insert one batch of two rows
    Test1,
    /// Insert several batches, then read every row back and decode it
    Test2 {
        #[arg(long, default_value_t = 10)]
        batches: usize,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SchemaArg {
    AutoIncrement,
    Simple,
}

impl From<SchemaArg> for Schema {
    fn from(s: SchemaArg) -> Self {
        match s {
            SchemaArg::AutoIncrement => Schema::AutoIncrement,
            SchemaArg::Simple => Schema::Simple,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = commands::run(cli.command).await {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
