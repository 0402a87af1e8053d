use jiff::SignedDuration;
use serde::Serialize;

use crate::{
    problem::{kilograms::Kilograms, kilometers::Kilometers},
    solver::result::Route,
};

/// Batch-level aggregates over the built routes.
#[derive(Serialize, Debug, Clone)]
pub struct BatchStatistics {
    pub total_distance: Kilometers,
    pub total_weight: Kilograms,
    pub total_duration: SignedDuration,
    pub average_utilization: f64,
    pub cluster_count: usize,
    pub route_count: usize,
    pub assigned_stop_count: usize,
    pub unassigned_count: usize,
    pub unassigned_weight: Kilograms,
}

impl BatchStatistics {
    pub fn from_routes(
        routes: &[Route],
        cluster_count: usize,
        unassigned_count: usize,
        unassigned_weight: Kilograms,
    ) -> Self {
        let total_distance = routes.iter().map(|route| route.total_distance).sum();
        let total_weight = routes.iter().map(|route| route.total_weight).sum();
        let total_duration = routes
            .iter()
            .fold(SignedDuration::ZERO, |acc, route| {
                acc + route.estimated_duration
            });
        let average_utilization = if routes.is_empty() {
            0.0
        } else {
            routes.iter().map(|route| route.utilization).sum::<f64>() / routes.len() as f64
        };

        BatchStatistics {
            total_distance,
            total_weight,
            total_duration,
            average_utilization,
            cluster_count,
            route_count: routes.len(),
            assigned_stop_count: routes.iter().map(Route::stop_count).sum(),
            unassigned_count,
            unassigned_weight,
        }
    }
}
