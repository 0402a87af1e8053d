use jiff::SignedDuration;

use crate::{
    problem::{
        delivery::{DeliveryIdx, DeliveryPoint, DeliveryPointBuilder},
        delivery_batch::{DeliveryBatch, DeliveryBatchBuilder},
        driver::Driver,
        kilograms::Kilograms,
        kilometers::Kilometers,
        location::Location,
        vehicle::{Vehicle, VehicleBuilder, VehicleIdx},
    },
    solver::result::Route,
};

pub fn delivery_at(id: &str, weight: f64, lat: f64, lon: f64) -> DeliveryPoint {
    let mut builder = DeliveryPointBuilder::default();
    builder
        .set_delivery_id(id.to_owned())
        .set_order_reference(format!("order-{id}"))
        .set_weight(Kilograms::new(weight))
        .set_location(Location::from_lat_lon(lat, lon))
        .set_address(format!("{id} street"));

    builder.build()
}

pub fn vehicle_with_capacity(id: &str, capacity: f64) -> Vehicle {
    let mut builder = VehicleBuilder::default();
    builder
        .set_vehicle_id(id.to_owned())
        .set_plate(format!("PLATE-{id}"))
        .set_capacity(Kilograms::new(capacity));

    builder.build()
}

pub fn test_config() -> crate::solver::config::OptimizerConfig {
    crate::solver::config::OptimizerConfig::with_depot(Location::from_lat_lon(48.0, 2.0))
}

/// Batch with all deliveries a few hundred meters apart, one vehicle per
/// capacity and `drivers` drivers.
pub fn test_batch(weights: &[f64], capacities: &[f64], drivers: usize) -> DeliveryBatch {
    build_batch(weights, capacities, drivers, 0.001)
}

/// Batch with deliveries spread several degrees apart.
pub fn test_batch_spread(weights: &[f64], capacities: &[f64]) -> DeliveryBatch {
    build_batch(weights, capacities, 0, 3.0)
}

fn build_batch(
    weights: &[f64],
    capacities: &[f64],
    drivers: usize,
    lat_step: f64,
) -> DeliveryBatch {
    let mut builder = DeliveryBatchBuilder::default();

    for (i, &weight) in weights.iter().enumerate() {
        builder.add_delivery(delivery_at(
            &format!("d{i}"),
            weight,
            48.0 + i as f64 * lat_step,
            2.0,
        ));
    }
    for (i, &capacity) in capacities.iter().enumerate() {
        builder.add_vehicle(vehicle_with_capacity(&format!("v{i}"), capacity));
    }
    for i in 0..drivers {
        builder.add_driver(Driver::new(format!("drv{i}"), format!("Driver {i}")));
    }

    builder.build()
}

/// Route with stats derived from the batch; distance and duration are
/// placeholders for tests that only care about weights and positions.
pub fn route_for_test(batch: &DeliveryBatch, vehicle: usize, stops: Vec<DeliveryIdx>) -> Route {
    let total_weight: Kilograms = stops.iter().map(|&id| batch.delivery(id).weight()).sum();
    let vehicle_id = VehicleIdx::new(vehicle);
    let capacity = batch.vehicle(vehicle_id).capacity();
    let centroid = Location::centroid_of(stops.iter().map(|&id| batch.delivery(id).location()))
        .unwrap_or_else(|| Location::from_lat_lon(48.0, 2.0));

    Route {
        cluster_ids: Vec::new(),
        vehicle_id,
        driver_id: None,
        stops,
        centroid,
        total_distance: Kilometers::new(10.0),
        total_weight,
        estimated_duration: SignedDuration::from_mins(30),
        utilization: total_weight / capacity,
    }
}
