use std::{fs::File, path::PathBuf};

use clap::Args;
use comfy_table::Table;
use drover_optimizer::{
    json::types::{FromResult, JsonDeliveryBatch, JsonOptimizationResult},
    solver::optimize::optimize_batch,
};
use tracing::info;

#[derive(Args)]
pub struct OptimizeArgs {
    /// JSON file describing the batch (see `drover schema`)
    #[arg(short, long)]
    input: PathBuf,

    /// Print the full result as JSON instead of a summary table
    #[arg(long)]
    json: bool,
}

pub fn run(args: OptimizeArgs) -> Result<(), anyhow::Error> {
    info!("Optimizing batch {:?}", args.input);

    let file = File::open(&args.input)?;
    let json_batch: JsonDeliveryBatch = serde_json::from_reader(file)?;
    let (batch, config) = json_batch.build_batch();

    let result = optimize_batch(&batch, &config)?;
    let output = JsonOptimizationResult::from_result(&result, &batch);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Route",
        "Vehicle",
        "Driver",
        "Stops",
        "Weight (kg)",
        "Distance (km)",
        "Est. time",
        "Utilization",
    ]);

    for (index, route) in output.routes.iter().enumerate() {
        table.add_row(vec![
            index.to_string(),
            format!("{} ({})", route.vehicle_id, route.vehicle_plate),
            route.driver_name.clone().unwrap_or_else(|| "-".to_owned()),
            route.stops.len().to_string(),
            format!("{:.1}", route.total_weight_kg),
            format!("{:.1}", route.total_distance_km),
            format!("{:#}", route.estimated_duration),
            format!("{:.1}%", route.utilization * 100.0),
        ]);
    }

    println!("{table}");

    for entry in &output.unassigned {
        println!("unassigned {}: {}", entry.delivery_id, entry.message);
    }
    for problem in &output.problems {
        println!("problem: {problem}");
    }
    for suggestion in &output.suggestions {
        println!("suggestion: {suggestion}");
    }

    info!(
        routes = output.routes.len(),
        total_distance_km = output.statistics.total_distance.value(),
        average_utilization = output.statistics.average_utilization,
        "optimization finished"
    );

    Ok(())
}
