use std::{fs, path::PathBuf};

use clap::Args;
use drover_optimizer::json::schema::generate_json_schema;

#[derive(Args)]
pub struct SchemaArgs {
    /// Write the schema to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: SchemaArgs) -> Result<(), anyhow::Error> {
    let schema = generate_json_schema()?;

    match args.output {
        Some(path) => fs::write(path, schema)?,
        None => println!("{schema}"),
    }

    Ok(())
}
