use fxhash::FxHashMap;
use tracing::debug;

use crate::{
    problem::{
        delivery::{DeliveryIdx, DeliveryPoint},
        kilograms::Kilograms,
        vehicle::{Vehicle, VehicleIdx},
    },
    solver::{
        cluster::{Cluster, ClusterIdx},
        result::{UnassignedDelivery, UnassignedReason},
    },
};

/// Everything one vehicle was given by the packer. Invariant: `weight` never
/// exceeds the vehicle's capacity.
#[derive(Debug, Clone)]
pub struct VehicleLoad {
    vehicle_id: VehicleIdx,
    cluster_ids: Vec<ClusterIdx>,
    deliveries: Vec<DeliveryIdx>,
    weight: Kilograms,
}

impl VehicleLoad {
    pub fn vehicle_id(&self) -> VehicleIdx {
        self.vehicle_id
    }

    pub fn cluster_ids(&self) -> &[ClusterIdx] {
        &self.cluster_ids
    }

    pub fn deliveries(&self) -> &[DeliveryIdx] {
        &self.deliveries
    }

    pub fn weight(&self) -> Kilograms {
        self.weight
    }
}

#[derive(Debug)]
pub struct PackingOutcome {
    /// Loads in ascending vehicle index order; vehicles that received nothing
    /// are absent.
    pub loads: Vec<VehicleLoad>,
    pub unassigned: Vec<UnassignedDelivery>,
}

/// Fallback progression for a cluster that is being placed. Kept explicit so
/// the capacity fallback stays auditable instead of living in nested
/// conditionals.
enum FitState {
    TryClusterFit,
    TryItemFit,
    Done,
}

/// First-fit-decreasing by cluster weight. Clusters are placed heaviest
/// first; vehicles are scanned in ascending capacity order so the tightest
/// adequate vehicle wins and large vehicles keep their slack for large
/// clusters. A cluster that fits no vehicle whole is split and its deliveries
/// are reattempted one by one; whatever still fits nowhere is reported as
/// unassigned rather than failing the pass.
pub fn pack(
    clusters: &[Cluster],
    deliveries: &[DeliveryPoint],
    vehicles: &[Vehicle],
) -> PackingOutcome {
    let mut unassigned = Vec::new();

    if vehicles.is_empty() {
        for cluster in clusters {
            for &delivery_id in cluster.members() {
                unassigned.push(UnassignedDelivery {
                    delivery_id,
                    reason: UnassignedReason::NoVehiclesAvailable,
                });
            }
        }

        return PackingOutcome {
            loads: Vec::new(),
            unassigned,
        };
    }

    // Heaviest cluster first; ties keep cluster id order.
    let mut cluster_order: Vec<usize> = (0..clusters.len()).collect();
    cluster_order.sort_by(|&a, &b| clusters[b].total_weight().cmp(&clusters[a].total_weight()));

    // Tightest adequate vehicle first; ties keep input order.
    let mut vehicle_order: Vec<usize> = (0..vehicles.len()).collect();
    vehicle_order.sort_by_key(|&v| vehicles[v].capacity());

    let mut remaining: Vec<Kilograms> = vehicles.iter().map(Vehicle::capacity).collect();
    let mut loads: FxHashMap<usize, VehicleLoad> = FxHashMap::default();

    let place = |vehicle: usize,
                 cluster_id: ClusterIdx,
                 members: &[DeliveryIdx],
                 weight: Kilograms,
                 remaining: &mut Vec<Kilograms>,
                 loads: &mut FxHashMap<usize, VehicleLoad>| {
        remaining[vehicle] -= weight;
        let load = loads.entry(vehicle).or_insert_with(|| VehicleLoad {
            vehicle_id: VehicleIdx::new(vehicle),
            cluster_ids: Vec::new(),
            deliveries: Vec::new(),
            weight: Kilograms::ZERO,
        });
        if !load.cluster_ids.contains(&cluster_id) {
            load.cluster_ids.push(cluster_id);
        }
        load.deliveries.extend_from_slice(members);
        load.weight += weight;
    };

    for &cluster_index in &cluster_order {
        let cluster = &clusters[cluster_index];
        let mut state = FitState::TryClusterFit;

        while !matches!(state, FitState::Done) {
            state = match state {
                FitState::TryClusterFit => {
                    let fit = vehicle_order
                        .iter()
                        .copied()
                        .find(|&v| remaining[v] >= cluster.total_weight());

                    match fit {
                        Some(vehicle) => {
                            place(
                                vehicle,
                                cluster.id(),
                                cluster.members(),
                                cluster.total_weight(),
                                &mut remaining,
                                &mut loads,
                            );
                            FitState::Done
                        }
                        None => FitState::TryItemFit,
                    }
                }
                FitState::TryItemFit => {
                    // The cluster fits nowhere whole. Split it and reattempt
                    // each delivery as a unit item, first fit again.
                    for &delivery_id in cluster.members() {
                        let weight = deliveries[delivery_id].weight();
                        let fit = vehicle_order
                            .iter()
                            .copied()
                            .find(|&v| remaining[v] >= weight);

                        match fit {
                            Some(vehicle) => place(
                                vehicle,
                                cluster.id(),
                                &[delivery_id],
                                weight,
                                &mut remaining,
                                &mut loads,
                            ),
                            None => unassigned.push(UnassignedDelivery {
                                delivery_id,
                                reason: UnassignedReason::CapacityExceeded,
                            }),
                        }
                    }
                    FitState::Done
                }
                FitState::Done => FitState::Done,
            };
        }
    }

    // Hash iteration order is not deterministic; the result must be.
    let mut loads: Vec<VehicleLoad> = loads.into_values().collect();
    loads.sort_by_key(|load| load.vehicle_id);

    debug!(
        clusters = clusters.len(),
        vehicles = vehicles.len(),
        loaded_vehicles = loads.len(),
        unassigned = unassigned.len(),
        "packing done"
    );

    PackingOutcome { loads, unassigned }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        solver::cluster,
        test_utils::{delivery_at, vehicle_with_capacity},
    };

    fn singleton_clusters(deliveries: &[DeliveryPoint]) -> Vec<Cluster> {
        // A tiny radius keeps every delivery in its own cluster.
        cluster::cluster(deliveries, crate::problem::kilometers::Kilometers::new(0.001))
    }

    #[test]
    fn empty_fleet_leaves_everything_unassigned() {
        let deliveries: Vec<_> = (0..5)
            .map(|i| delivery_at(&format!("d{i}"), 10.0, 48.0 + i as f64, 2.0))
            .collect();
        let clusters = singleton_clusters(&deliveries);

        let outcome = pack(&clusters, &deliveries, &[]);

        assert!(outcome.loads.is_empty());
        assert_eq!(outcome.unassigned.len(), 5);
        assert!(
            outcome
                .unassigned
                .iter()
                .all(|u| u.reason == UnassignedReason::NoVehiclesAvailable)
        );
    }

    #[test]
    fn first_fit_decreasing_prefers_the_tightest_vehicle() {
        // Weights [50, 80, 150] against capacities [100, 200]: FFD places
        // 150 on the 200, 80 on the 100, and tops the 200 up with the 50.
        let deliveries = vec![
            delivery_at("d50", 50.0, 48.0, 2.0),
            delivery_at("d80", 80.0, 49.0, 3.0),
            delivery_at("d150", 150.0, 50.0, 4.0),
        ];
        let clusters = singleton_clusters(&deliveries);
        let vehicles = vec![
            vehicle_with_capacity("v100", 100.0),
            vehicle_with_capacity("v200", 200.0),
        ];

        let outcome = pack(&clusters, &deliveries, &vehicles);

        assert!(outcome.unassigned.is_empty());
        assert_eq!(outcome.loads.len(), 2);

        let small = &outcome.loads[0];
        assert_eq!(small.vehicle_id(), VehicleIdx::new(0));
        assert_eq!(small.deliveries(), &[DeliveryIdx::new(1)]);
        assert_eq!(small.weight(), Kilograms::new(80.0));

        let large = &outcome.loads[1];
        assert_eq!(large.vehicle_id(), VehicleIdx::new(1));
        assert_eq!(
            large.deliveries(),
            &[DeliveryIdx::new(2), DeliveryIdx::new(0)]
        );
        assert_eq!(large.weight(), Kilograms::new(200.0));
    }

    #[test]
    fn oversized_cluster_is_split_into_unit_items() {
        // One geographic cluster weighing 180 against two 100 kg vans: the
        // cluster fits nowhere whole and gets split across both.
        let deliveries = vec![
            delivery_at("d1", 90.0, 48.8566, 2.3522),
            delivery_at("d2", 90.0, 48.8570, 2.3530),
        ];
        let clusters = cluster::cluster(
            &deliveries,
            crate::problem::kilometers::Kilometers::new(2.0),
        );
        assert_eq!(clusters.len(), 1);

        let vehicles = vec![
            vehicle_with_capacity("v1", 100.0),
            vehicle_with_capacity("v2", 100.0),
        ];

        let outcome = pack(&clusters, &deliveries, &vehicles);

        assert!(outcome.unassigned.is_empty());
        assert_eq!(outcome.loads.len(), 2);
        assert_eq!(outcome.loads[0].deliveries(), &[DeliveryIdx::new(0)]);
        assert_eq!(outcome.loads[1].deliveries(), &[DeliveryIdx::new(1)]);
    }

    #[test]
    fn unfittable_item_is_reported_not_dropped() {
        let deliveries = vec![
            delivery_at("light", 40.0, 48.0, 2.0),
            delivery_at("heavy", 500.0, 55.0, 10.0),
        ];
        let clusters = singleton_clusters(&deliveries);
        let vehicles = vec![vehicle_with_capacity("v", 100.0)];

        let outcome = pack(&clusters, &deliveries, &vehicles);

        assert_eq!(outcome.loads.len(), 1);
        assert_eq!(outcome.loads[0].deliveries(), &[DeliveryIdx::new(0)]);
        assert_eq!(outcome.unassigned.len(), 1);
        assert_eq!(outcome.unassigned[0].delivery_id, DeliveryIdx::new(1));
        assert_eq!(
            outcome.unassigned[0].reason,
            UnassignedReason::CapacityExceeded
        );
    }

    #[test]
    fn loads_never_exceed_capacity() {
        let deliveries: Vec<_> = [35.0, 120.0, 60.0, 90.0, 45.0, 75.0, 30.0]
            .iter()
            .enumerate()
            .map(|(i, &w)| delivery_at(&format!("d{i}"), w, 40.0 + i as f64 * 2.0, 2.0))
            .collect();
        let clusters = singleton_clusters(&deliveries);
        let vehicles = vec![
            vehicle_with_capacity("v1", 150.0),
            vehicle_with_capacity("v2", 150.0),
            vehicle_with_capacity("v3", 150.0),
        ];

        let outcome = pack(&clusters, &deliveries, &vehicles);

        for load in &outcome.loads {
            assert!(load.weight() <= vehicles[load.vehicle_id().get()].capacity());
            let sum: Kilograms = load
                .deliveries()
                .iter()
                .map(|&id| deliveries[id].weight())
                .sum();
            assert_eq!(sum, load.weight());
        }
    }
}
