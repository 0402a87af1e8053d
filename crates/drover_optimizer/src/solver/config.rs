use jiff::{SignedDuration, Timestamp};

use crate::{
    OptimizeError,
    problem::{kilometers::Kilometers, kmh::Kmh, location::Location},
};

/// Tuning knobs for one optimization pass. The defaults reflect urban
/// delivery operations and are expected to be overridden per deployment.
#[derive(Clone, Debug)]
pub struct OptimizerConfig {
    /// Maximum distance between a delivery and its cluster centroid.
    pub radius_km: Kilometers,
    /// Start and return point of every route.
    pub depot: Location,
    pub average_speed: Kmh,
    /// Handling time added per stop on top of travel time.
    pub per_stop_service: SignedDuration,
    /// Routes below this utilization fraction are flagged under-utilized.
    pub under_utilized_threshold: f64,
    /// Routes above this utilization fraction are flagged over-utilized.
    pub over_utilized_threshold: f64,
    /// Two under-utilized routes with centroids closer than this are merge
    /// candidates.
    pub merge_radius_km: Kilometers,
    /// Optional wall-clock bound, checked between phases.
    pub deadline: Option<Timestamp>,
}

impl OptimizerConfig {
    pub fn with_depot(depot: Location) -> Self {
        Self {
            radius_km: Kilometers::new(2.0),
            depot,
            average_speed: Kmh::new(40.0),
            per_stop_service: SignedDuration::from_mins(5),
            under_utilized_threshold: 0.40,
            over_utilized_threshold: 0.95,
            merge_radius_km: Kilometers::new(5.0),
            deadline: None,
        }
    }

    /// Run once at orchestrator entry. Nothing useful can be computed from a
    /// malformed configuration, so any violation fails the whole call.
    pub fn validate(&self) -> Result<(), OptimizeError> {
        if self.radius_km.value() <= 0.0 || !self.radius_km.value().is_finite() {
            return Err(OptimizeError::InvalidConfiguration(format!(
                "cluster radius must be positive, got {} km",
                self.radius_km.value()
            )));
        }

        if self.average_speed.value() <= 0.0 || !self.average_speed.value().is_finite() {
            return Err(OptimizeError::InvalidConfiguration(format!(
                "average speed must be positive, got {} km/h",
                self.average_speed.value()
            )));
        }

        if self.per_stop_service.is_negative() {
            return Err(OptimizeError::InvalidConfiguration(
                "per-stop service time must not be negative".to_owned(),
            ));
        }

        let under = self.under_utilized_threshold;
        let over = self.over_utilized_threshold;
        if !(0.0..=1.0).contains(&under) || !(0.0..=1.0).contains(&over) || under >= over {
            return Err(OptimizeError::InvalidConfiguration(format!(
                "utilization thresholds must satisfy 0 <= under < over <= 1, got {under} and {over}"
            )));
        }

        if self.merge_radius_km.value() <= 0.0 || !self.merge_radius_km.value().is_finite() {
            return Err(OptimizeError::InvalidConfiguration(format!(
                "merge radius must be positive, got {} km",
                self.merge_radius_km.value()
            )));
        }

        Ok(())
    }
}
