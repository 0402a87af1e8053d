use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    problem::{
        delivery::DeliveryPointBuilder,
        delivery_batch::{DeliveryBatch, DeliveryBatchBuilder},
        driver::Driver,
        kilograms::Kilograms,
        kilometers::Kilometers,
        kmh::Kmh,
        location::Location,
        vehicle::VehicleBuilder,
    },
    solver::{
        config::OptimizerConfig,
        result::{OptimizationResult, Route, UnassignedDelivery, UnassignedReason},
        statistics::BatchStatistics,
    },
};

#[derive(Deserialize, JsonSchema)]
#[serde(rename = "DeliveryBatch")]
pub struct JsonDeliveryBatch {
    pub id: Option<String>,
    pub deliveries: Vec<JsonDelivery>,
    pub vehicles: Vec<JsonVehicle>,
    #[serde(default)]
    pub drivers: Vec<JsonDriver>,
    pub config: JsonOptimizerConfig,
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Delivery")]
pub struct JsonDelivery {
    pub id: String,
    pub order_reference: Option<String>,
    pub weight_kg: f64,
    pub lat: f64,
    pub lon: f64,
    pub address: Option<String>,
    pub client_name: Option<String>,
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Vehicle")]
pub struct JsonVehicle {
    pub id: String,
    pub plate: Option<String>,
    pub capacity_kg: f64,
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Driver")]
pub struct JsonDriver {
    pub id: String,
    pub name: String,
}

/// Tuning knobs with deployment defaults; only the depot is mandatory.
#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "OptimizerConfig")]
pub struct JsonOptimizerConfig {
    pub depot_lat: f64,
    pub depot_lon: f64,
    pub radius_km: Option<f64>,
    pub average_speed_kmh: Option<f64>,
    pub per_stop_service_minutes: Option<f64>,
    pub under_utilized_threshold: Option<f64>,
    pub over_utilized_threshold: Option<f64>,
    pub merge_radius_km: Option<f64>,
}

impl From<&JsonOptimizerConfig> for OptimizerConfig {
    fn from(value: &JsonOptimizerConfig) -> Self {
        let mut config =
            OptimizerConfig::with_depot(Location::from_lat_lon(value.depot_lat, value.depot_lon));

        if let Some(radius_km) = value.radius_km {
            config.radius_km = Kilometers::new(radius_km);
        }
        if let Some(speed) = value.average_speed_kmh {
            config.average_speed = Kmh::new(speed);
        }
        if let Some(minutes) = value.per_stop_service_minutes {
            config.per_stop_service = SignedDuration::from_secs_f64(minutes * 60.0);
        }
        if let Some(under) = value.under_utilized_threshold {
            config.under_utilized_threshold = under;
        }
        if let Some(over) = value.over_utilized_threshold {
            config.over_utilized_threshold = over;
        }
        if let Some(merge) = value.merge_radius_km {
            config.merge_radius_km = Kilometers::new(merge);
        }

        config
    }
}

impl JsonDeliveryBatch {
    /// Builds the immutable batch snapshot plus the pass configuration. The
    /// configuration itself is validated later, at optimizer entry.
    pub fn build_batch(self) -> (DeliveryBatch, OptimizerConfig) {
        let config = OptimizerConfig::from(&self.config);
        let mut builder = DeliveryBatchBuilder::default();

        for delivery in self.deliveries {
            let mut delivery_builder = DeliveryPointBuilder::default();
            delivery_builder
                .set_delivery_id(delivery.id)
                .set_weight(Kilograms::new(delivery.weight_kg))
                .set_location(Location::from_lat_lon(delivery.lat, delivery.lon));
            if let Some(order_reference) = delivery.order_reference {
                delivery_builder.set_order_reference(order_reference);
            }
            if let Some(address) = delivery.address {
                delivery_builder.set_address(address);
            }
            if let Some(client_name) = delivery.client_name {
                delivery_builder.set_client_name(client_name);
            }
            builder.add_delivery(delivery_builder.build());
        }

        for vehicle in self.vehicles {
            let mut vehicle_builder = VehicleBuilder::default();
            vehicle_builder
                .set_vehicle_id(vehicle.id)
                .set_capacity(Kilograms::new(vehicle.capacity_kg));
            if let Some(plate) = vehicle.plate {
                vehicle_builder.set_plate(plate);
            }
            builder.add_vehicle(vehicle_builder.build());
        }

        for driver in self.drivers {
            builder.add_driver(Driver::new(driver.id, driver.name));
        }

        (builder.build(), config)
    }
}

pub trait FromResult<T> {
    fn from_result(value: T, batch: &DeliveryBatch) -> Self;
}

#[derive(Serialize)]
#[serde(rename = "OptimizationResult")]
pub struct JsonOptimizationResult {
    pub routes: Vec<JsonRoute>,
    pub unassigned: Vec<JsonUnassigned>,
    pub problems: Vec<String>,
    pub suggestions: Vec<String>,
    pub statistics: BatchStatistics,
}

#[derive(Serialize)]
#[serde(rename = "Route")]
pub struct JsonRoute {
    pub vehicle_id: String,
    pub vehicle_plate: String,
    pub driver_id: Option<String>,
    pub driver_name: Option<String>,
    pub stops: Vec<JsonStop>,
    pub total_distance_km: f64,
    pub total_weight_kg: f64,
    pub estimated_duration: SignedDuration,
    pub utilization: f64,
}

#[derive(Serialize)]
#[serde(rename = "Stop")]
pub struct JsonStop {
    /// Position within the route, starting at 1.
    pub sequence: usize,
    pub delivery_id: String,
    pub order_reference: String,
    pub address: String,
    pub client_name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub weight_kg: f64,
}

#[derive(Serialize)]
#[serde(rename = "Unassigned")]
pub struct JsonUnassigned {
    pub delivery_id: String,
    pub reason: UnassignedReason,
    pub message: String,
}

impl FromResult<&Route> for JsonRoute {
    fn from_result(value: &Route, batch: &DeliveryBatch) -> Self {
        let vehicle = batch.vehicle(value.vehicle_id);
        let driver = value.driver_id.map(|id| &batch.drivers()[id.get()]);

        JsonRoute {
            vehicle_id: vehicle.external_id().to_owned(),
            vehicle_plate: vehicle.plate().to_owned(),
            driver_id: driver.map(|driver| driver.external_id().to_owned()),
            driver_name: driver.map(|driver| driver.name().to_owned()),
            stops: value
                .stops
                .iter()
                .enumerate()
                .map(|(index, &delivery_id)| {
                    let delivery = batch.delivery(delivery_id);
                    JsonStop {
                        sequence: index + 1,
                        delivery_id: delivery.external_id().to_owned(),
                        order_reference: delivery.order_reference().to_owned(),
                        address: delivery.address().to_owned(),
                        client_name: delivery.client_name().map(str::to_owned),
                        lat: delivery.location().lat(),
                        lon: delivery.location().lon(),
                        weight_kg: delivery.weight().value(),
                    }
                })
                .collect(),
            total_distance_km: value.total_distance.value(),
            total_weight_kg: value.total_weight.value(),
            estimated_duration: value.estimated_duration,
            utilization: value.utilization,
        }
    }
}

impl FromResult<&UnassignedDelivery> for JsonUnassigned {
    fn from_result(value: &UnassignedDelivery, batch: &DeliveryBatch) -> Self {
        JsonUnassigned {
            delivery_id: batch.delivery(value.delivery_id).external_id().to_owned(),
            reason: value.reason,
            message: value.reason.to_string(),
        }
    }
}

impl FromResult<&OptimizationResult> for JsonOptimizationResult {
    fn from_result(value: &OptimizationResult, batch: &DeliveryBatch) -> Self {
        JsonOptimizationResult {
            routes: value
                .routes
                .iter()
                .map(|route| JsonRoute::from_result(route, batch))
                .collect(),
            unassigned: value
                .unassigned
                .iter()
                .map(|entry| JsonUnassigned::from_result(entry, batch))
                .collect(),
            problems: value.problems.iter().map(ToString::to_string).collect(),
            suggestions: value.suggestions.iter().map(ToString::to_string).collect(),
            statistics: value.statistics.clone(),
        }
    }
}
