use jiff::SignedDuration;

use crate::{
    problem::{
        delivery::{DeliveryIdx, DeliveryPoint},
        kilometers::Kilometers,
        kmh::Kmh,
        location::Location,
    },
    solver::config::OptimizerConfig,
};

#[derive(Debug, Clone)]
pub struct SequencedTour {
    pub ordered_stops: Vec<DeliveryIdx>,
    /// Depot to depot, including the return leg.
    pub distance: Kilometers,
    pub estimated_duration: SignedDuration,
}

/// Nearest-neighbor tour construction. Starts at the depot, repeatedly
/// travels to the closest unvisited stop, then closes the loop back to the
/// depot. Ties on distance resolve to the earliest item in `items` order, so
/// the tour is deterministic.
pub fn sequence(
    items: &[DeliveryIdx],
    deliveries: &[DeliveryPoint],
    config: &OptimizerConfig,
) -> SequencedTour {
    let tour = nearest_neighbor_tour(items, deliveries, &config.depot);
    let estimated_duration = estimate_duration(
        tour.1,
        tour.0.len(),
        config.average_speed,
        config.per_stop_service,
    );

    SequencedTour {
        ordered_stops: tour.0,
        distance: tour.1,
        estimated_duration,
    }
}

fn nearest_neighbor_tour(
    items: &[DeliveryIdx],
    deliveries: &[DeliveryPoint],
    depot: &Location,
) -> (Vec<DeliveryIdx>, Kilometers) {
    let mut ordered = Vec::with_capacity(items.len());
    let mut visited = vec![false; items.len()];
    let mut position = *depot;
    let mut total = Kilometers::ZERO;

    for _ in 0..items.len() {
        let mut nearest: Option<(usize, Kilometers)> = None;

        for (slot, &delivery_id) in items.iter().enumerate() {
            if visited[slot] {
                continue;
            }

            let distance = position.haversine_distance(deliveries[delivery_id].location());
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((slot, distance));
            }
        }

        let Some((slot, distance)) = nearest else {
            break;
        };
        visited[slot] = true;
        ordered.push(items[slot]);
        total += distance;
        position = *deliveries[items[slot]].location();
    }

    // Return leg back to the depot.
    if !ordered.is_empty() {
        total += position.haversine_distance(depot);
    }

    (ordered, total)
}

/// Travel time at the configured average speed plus fixed handling time per
/// stop.
fn estimate_duration(
    distance: Kilometers,
    stop_count: usize,
    average_speed: Kmh,
    per_stop_service: SignedDuration,
) -> SignedDuration {
    let travel = distance / average_speed;
    let service = SignedDuration::from_secs_f64(per_stop_service.as_secs_f64() * stop_count as f64);

    travel + service
}
