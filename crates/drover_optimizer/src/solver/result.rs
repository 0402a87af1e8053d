use std::fmt;

use jiff::SignedDuration;
use serde::Serialize;

use crate::{
    problem::{
        delivery::DeliveryIdx, driver::DriverIdx, kilograms::Kilograms, kilometers::Kilometers,
        location::Location, vehicle::VehicleIdx,
    },
    solver::{cluster::ClusterIdx, statistics::BatchStatistics},
};

/// One vehicle's planned tour. The capacity invariant holds by construction:
/// the packer never assigns more weight than the vehicle can carry.
#[derive(Serialize, Debug, Clone)]
pub struct Route {
    /// Clusters this vehicle ended up carrying. Usually one, more when the
    /// packer topped a vehicle up with a second cluster or a split item.
    pub cluster_ids: Vec<ClusterIdx>,
    pub vehicle_id: VehicleIdx,
    /// Advisory pairing only; drivers never influence routing.
    pub driver_id: Option<DriverIdx>,
    /// Visiting order, depot to depot.
    pub stops: Vec<DeliveryIdx>,
    pub centroid: Location,
    pub total_distance: Kilometers,
    pub total_weight: Kilograms,
    pub estimated_duration: SignedDuration,
    /// Fraction of the vehicle capacity carried.
    pub utilization: f64,
}

impl Route {
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }
}

/// Why a delivery could not be put on any route.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnassignedReason {
    CapacityExceeded,
    NoVehiclesAvailable,
}

impl fmt::Display for UnassignedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnassignedReason::CapacityExceeded => {
                write!(f, "no vehicle has enough remaining capacity")
            }
            UnassignedReason::NoVehiclesAvailable => {
                write!(f, "no vehicles available for this batch")
            }
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct UnassignedDelivery {
    pub delivery_id: DeliveryIdx,
    pub reason: UnassignedReason,
}

/// Structured issues surfaced alongside the routes. Packer rejections and
/// analyzer imbalance flags end up in the same list so the dispatcher sees
/// everything in one place.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Problem {
    NoVehiclesAvailable {
        deliveries: usize,
    },
    CapacityExceeded {
        delivery_id: DeliveryIdx,
    },
    UnderUtilizedRoute {
        route: usize,
        utilization: f64,
    },
    OverUtilizedRoute {
        route: usize,
        utilization: f64,
    },
    NotEnoughDrivers {
        routes_without_driver: usize,
    },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::NoVehiclesAvailable { deliveries } => {
                write!(f, "{deliveries} deliveries left unrouted: no vehicles available")
            }
            Problem::CapacityExceeded { delivery_id } => {
                write!(f, "delivery {delivery_id} exceeds every vehicle's remaining capacity")
            }
            Problem::UnderUtilizedRoute { route, utilization } => {
                write!(f, "route {route} is under-utilized at {:.1}%", utilization * 100.0)
            }
            Problem::OverUtilizedRoute { route, utilization } => {
                write!(f, "route {route} is over-utilized at {:.1}%", utilization * 100.0)
            }
            Problem::NotEnoughDrivers { routes_without_driver } => {
                write!(f, "{routes_without_driver} routes have no driver assigned")
            }
        }
    }
}

/// Advisory rebalancing hints. Never applied automatically: acting on them is
/// a dispatcher decision made on the approval screen.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Suggestion {
    MergeRoutes {
        routes: Vec<usize>,
        centroid_distance: Kilometers,
    },
    MoveLightestStop {
        from_route: usize,
        to_route: usize,
        delivery_id: DeliveryIdx,
        weight: Kilograms,
    },
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suggestion::MergeRoutes {
                routes,
                centroid_distance,
            } => {
                write!(
                    f,
                    "routes {routes:?} are under-utilized and only {:.1} km apart: consider merging them",
                    centroid_distance.value()
                )
            }
            Suggestion::MoveLightestStop {
                from_route,
                to_route,
                delivery_id,
                weight,
            } => {
                write!(
                    f,
                    "route {from_route} is over-utilized: consider moving delivery {delivery_id} ({} kg) to route {to_route}",
                    weight.value()
                )
            }
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct OptimizationResult {
    pub routes: Vec<Route>,
    pub unassigned: Vec<UnassignedDelivery>,
    pub problems: Vec<Problem>,
    pub suggestions: Vec<Suggestion>,
    pub statistics: BatchStatistics,
}
