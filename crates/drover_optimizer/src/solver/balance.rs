use tracing::debug;

use crate::{
    problem::{delivery::DeliveryIdx, delivery_batch::DeliveryBatch, kilograms::Kilograms},
    solver::{
        config::OptimizerConfig,
        result::{Problem, Route, Suggestion},
    },
};

#[derive(Debug, Clone)]
pub struct BalanceReport {
    pub utilization_per_route: Vec<f64>,
    pub imbalance: Vec<Problem>,
    pub suggestions: Vec<Suggestion>,
}

/// Flags under- and over-utilized routes and proposes rebalancing moves.
/// Everything here is advisory: assignments are never mutated, the dispatcher
/// decides on the approval screen.
pub fn analyze(routes: &[Route], batch: &DeliveryBatch, config: &OptimizerConfig) -> BalanceReport {
    let utilization_per_route: Vec<f64> = routes.iter().map(|route| route.utilization).collect();

    let mut imbalance = Vec::new();
    let mut under = Vec::new();
    let mut over = Vec::new();

    for (index, route) in routes.iter().enumerate() {
        if route.utilization < config.under_utilized_threshold {
            under.push(index);
            imbalance.push(Problem::UnderUtilizedRoute {
                route: index,
                utilization: route.utilization,
            });
        } else if route.utilization > config.over_utilized_threshold {
            over.push(index);
            imbalance.push(Problem::OverUtilizedRoute {
                route: index,
                utilization: route.utilization,
            });
        }
    }

    let mut suggestions = Vec::new();

    // Adjacent under-utilized routes are merge candidates.
    for (position, &a) in under.iter().enumerate() {
        for &b in &under[position + 1..] {
            let centroid_distance = routes[a].centroid.haversine_distance(&routes[b].centroid);
            if centroid_distance < config.merge_radius_km {
                suggestions.push(Suggestion::MergeRoutes {
                    routes: vec![a, b],
                    centroid_distance,
                });
            }
        }
    }

    // An over-utilized route sheds its lightest stop onto the route with the
    // most slack, provided the stop actually fits there.
    for &from_route in &over {
        let Some((delivery_id, weight)) = lightest_stop(&routes[from_route], batch) else {
            continue;
        };

        let target = routes
            .iter()
            .enumerate()
            .filter(|&(index, _)| index != from_route && !over.contains(&index))
            .map(|(index, route)| (index, route_slack(route, batch)))
            .filter(|&(_, slack)| slack >= weight)
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)));

        if let Some((to_route, _)) = target {
            suggestions.push(Suggestion::MoveLightestStop {
                from_route,
                to_route,
                delivery_id,
                weight,
            });
        }
    }

    debug!(
        routes = routes.len(),
        under_utilized = under.len(),
        over_utilized = over.len(),
        suggestions = suggestions.len(),
        "balance analysis done"
    );

    BalanceReport {
        utilization_per_route,
        imbalance,
        suggestions,
    }
}

fn lightest_stop(route: &Route, batch: &DeliveryBatch) -> Option<(DeliveryIdx, Kilograms)> {
    route
        .stops
        .iter()
        .map(|&delivery_id| (delivery_id, batch.delivery(delivery_id).weight()))
        .min_by(|a, b| a.1.cmp(&b.1))
}

fn route_slack(route: &Route, batch: &DeliveryBatch) -> Kilograms {
    batch.vehicle(route.vehicle_id).capacity() - route.total_weight
}
