use clap::{Parser, Subcommand};

use crate::{optimize::OptimizeArgs, schema::SchemaArgs};

mod optimize;
mod schema;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one route optimization pass over a JSON batch file
    Optimize {
        #[command(flatten)]
        args: OptimizeArgs,
    },
    /// Print the JSON schema of the batch input format
    Schema {
        #[command(flatten)]
        args: SchemaArgs,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Optimize { args } => optimize::run(args)?,
        Commands::Schema { args } => schema::run(args)?,
    }

    Ok(())
}
