use jiff::Timestamp;
use rayon::prelude::*;
use tracing::instrument;

use crate::{
    OptimizeError, timer_debug,
    problem::{
        delivery_batch::DeliveryBatch, driver::DriverIdx, kilograms::Kilograms, location::Location,
    },
    solver::{
        balance, cluster,
        config::OptimizerConfig,
        packing::{self, VehicleLoad},
        result::{OptimizationResult, Problem, Route, UnassignedReason},
        sequence,
        statistics::BatchStatistics,
    },
};

/// Runs one full optimization pass: cluster, pack, sequence, analyze,
/// assemble. Pure computation over the snapshot in `batch`; the same inputs
/// and configuration always produce the same result.
///
/// Configuration problems and an empty batch fail the whole call. Capacity
/// shortfalls do not: a dispatcher still wants the 8 routable deliveries even
/// when 2 are not, so those surface inside the result.
#[instrument(skip_all, fields(
    deliveries = batch.deliveries().len(),
    vehicles = batch.vehicles().len(),
))]
pub fn optimize_batch(
    batch: &DeliveryBatch,
    config: &OptimizerConfig,
) -> Result<OptimizationResult, OptimizeError> {
    config.validate()?;

    if batch.deliveries().is_empty() {
        return Err(OptimizeError::EmptyBatch);
    }

    check_deadline(config, "clustering")?;
    let clusters = timer_debug!("clustering", {
        cluster::cluster(batch.deliveries(), config.radius_km)
    });

    check_deadline(config, "packing")?;
    let outcome = timer_debug!("packing", {
        packing::pack(&clusters, batch.deliveries(), batch.vehicles())
    });

    check_deadline(config, "sequencing")?;
    // Each load's tour is independent, so sequencing fans out across the
    // loads. Collect preserves the load order, which is ascending vehicle
    // index, so the result does not depend on thread completion order.
    let mut routes: Vec<Route> = timer_debug!("sequencing", {
        outcome
            .loads
            .par_iter()
            .map(|load| build_route(load, batch, config))
            .collect()
    });

    let mut problems = Vec::new();

    if batch.vehicles().is_empty() {
        problems.push(Problem::NoVehiclesAvailable {
            deliveries: batch.deliveries().len(),
        });
    }
    for entry in &outcome.unassigned {
        if entry.reason == UnassignedReason::CapacityExceeded {
            problems.push(Problem::CapacityExceeded {
                delivery_id: entry.delivery_id,
            });
        }
    }

    let routes_without_driver = assign_drivers(&mut routes, batch);
    if routes_without_driver > 0 {
        problems.push(Problem::NotEnoughDrivers {
            routes_without_driver,
        });
    }

    let report = balance::analyze(&routes, batch, config);
    problems.extend(report.imbalance);

    let unassigned_weight: Kilograms = outcome
        .unassigned
        .iter()
        .map(|entry| batch.delivery(entry.delivery_id).weight())
        .sum();
    let statistics = BatchStatistics::from_routes(
        &routes,
        clusters.len(),
        outcome.unassigned.len(),
        unassigned_weight,
    );

    Ok(OptimizationResult {
        routes,
        unassigned: outcome.unassigned,
        problems,
        suggestions: report.suggestions,
        statistics,
    })
}

fn build_route(load: &VehicleLoad, batch: &DeliveryBatch, config: &OptimizerConfig) -> Route {
    let tour = sequence::sequence(load.deliveries(), batch.deliveries(), config);
    let centroid = Location::centroid_of(
        load.deliveries()
            .iter()
            .map(|&id| batch.delivery(id).location()),
    )
    .unwrap_or(config.depot);
    let capacity = batch.vehicle(load.vehicle_id()).capacity();

    Route {
        cluster_ids: load.cluster_ids().to_vec(),
        vehicle_id: load.vehicle_id(),
        driver_id: None,
        stops: tour.ordered_stops,
        centroid,
        total_distance: tour.distance,
        total_weight: load.weight(),
        estimated_duration: tour.estimated_duration,
        utilization: load.weight() / capacity,
    }
}

/// Round-robin pairing in route order. Purely a labeling aid for the
/// dispatcher; returns how many routes were left without a driver.
fn assign_drivers(routes: &mut [Route], batch: &DeliveryBatch) -> usize {
    let drivers = batch.drivers().len();

    for (index, route) in routes.iter_mut().enumerate() {
        if index < drivers {
            route.driver_id = Some(DriverIdx::new(index));
        }
    }

    routes.len().saturating_sub(drivers)
}

fn check_deadline(config: &OptimizerConfig, phase: &'static str) -> Result<(), OptimizeError> {
    if let Some(deadline) = config.deadline
        && Timestamp::now() > deadline
    {
        return Err(OptimizeError::DeadlineExceeded(phase));
    }

    Ok(())
}
