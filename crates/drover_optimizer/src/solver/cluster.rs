use tracing::debug;

use crate::{
    define_index_newtype,
    problem::{
        delivery::{DeliveryIdx, DeliveryPoint},
        kilograms::Kilograms,
        kilometers::Kilometers,
        location::Location,
    },
};

define_index_newtype!(ClusterIdx, Cluster);

/// A proximity group of deliveries. Transient: recomputed on every
/// optimization pass, never persisted.
#[derive(Debug, Clone)]
pub struct Cluster {
    id: ClusterIdx,
    centroid: Location,
    members: Vec<DeliveryIdx>,
    total_weight: Kilograms,
}

impl Cluster {
    pub fn id(&self) -> ClusterIdx {
        self.id
    }

    pub fn centroid(&self) -> &Location {
        &self.centroid
    }

    pub fn members(&self) -> &[DeliveryIdx] {
        &self.members
    }

    pub fn total_weight(&self) -> Kilograms {
        self.total_weight
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Greedy proximity grouping. Walks the deliveries in input order; each
/// unclustered delivery seeds a cluster which then absorbs every remaining
/// unclustered delivery within `radius_km` of the running centroid, the
/// centroid being recomputed after each absorption.
///
/// O(n²) over the batch size, which is fine for fleet-sized batches
/// (hundreds of deliveries, not thousands). The absorption order follows the
/// input order, so the grouping is deterministic for a fixed input ordering
/// but not invariant under permutation. That is a documented property of the
/// heuristic, relied upon by dispatchers re-running the same batch.
pub fn cluster(deliveries: &[DeliveryPoint], radius_km: Kilometers) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();
    let mut clustered = vec![false; deliveries.len()];

    for seed in 0..deliveries.len() {
        if clustered[seed] {
            continue;
        }

        clustered[seed] = true;
        let mut members = vec![DeliveryIdx::new(seed)];
        let mut centroid = *deliveries[seed].location();
        let mut total_weight = deliveries[seed].weight();

        // Keep sweeping the remaining deliveries until a full pass absorbs
        // nothing. The centroid moves with every absorption, so a delivery
        // rejected early in a pass may qualify in a later one.
        loop {
            let mut absorbed_any = false;

            for candidate in (seed + 1)..deliveries.len() {
                if clustered[candidate] {
                    continue;
                }

                let distance = centroid.haversine_distance(deliveries[candidate].location());
                if distance <= radius_km {
                    clustered[candidate] = true;
                    members.push(DeliveryIdx::new(candidate));
                    total_weight += deliveries[candidate].weight();
                    centroid = Location::centroid_of(
                        members.iter().map(|id| deliveries[id.get()].location()),
                    )
                    .unwrap_or(centroid);
                    absorbed_any = true;
                }
            }

            if !absorbed_any {
                break;
            }
        }

        clusters.push(Cluster {
            id: ClusterIdx::new(clusters.len()),
            centroid,
            members,
            total_weight,
        });
    }

    debug!(
        deliveries = deliveries.len(),
        clusters = clusters.len(),
        radius_km = radius_km.value(),
        "clustering done"
    );

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::delivery_at;

    #[test]
    fn empty_input_yields_no_clusters() {
        assert!(cluster(&[], Kilometers::new(2.0)).is_empty());
    }

    #[test]
    fn isolated_delivery_forms_singleton_cluster() {
        let deliveries = vec![delivery_at("d1", 10.0, 48.0, 2.0)];

        let clusters = cluster(&deliveries, Kilometers::new(2.0));

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members(), &[DeliveryIdx::new(0)]);
        assert_eq!(clusters[0].total_weight(), Kilograms::new(10.0));
    }

    #[test]
    fn nearby_deliveries_share_a_cluster_and_distant_ones_do_not() {
        // Two stops a few hundred meters apart in one city, one stop in
        // another city entirely.
        let deliveries = vec![
            delivery_at("d1", 10.0, 48.8566, 2.3522),
            delivery_at("d2", 20.0, 48.8580, 2.3530),
            delivery_at("d3", 30.0, 45.7640, 4.8357),
        ];

        let clusters = cluster(&deliveries, Kilometers::new(2.0));

        assert_eq!(clusters.len(), 2);
        assert_eq!(
            clusters[0].members(),
            &[DeliveryIdx::new(0), DeliveryIdx::new(1)]
        );
        assert_eq!(clusters[0].total_weight(), Kilograms::new(30.0));
        assert_eq!(clusters[1].members(), &[DeliveryIdx::new(2)]);
    }

    #[test]
    fn every_delivery_lands_in_exactly_one_cluster() {
        let deliveries: Vec<_> = (0..25)
            .map(|i| {
                delivery_at(
                    &format!("d{i}"),
                    5.0,
                    48.0 + (i % 5) as f64 * 0.3,
                    2.0 + (i / 5) as f64 * 0.3,
                )
            })
            .collect();

        let clusters = cluster(&deliveries, Kilometers::new(10.0));

        let mut seen = vec![0usize; deliveries.len()];
        for cluster in &clusters {
            for member in cluster.members() {
                seen[member.get()] += 1;
            }
        }

        assert!(seen.iter().all(|&count| count == 1));
    }

    #[test]
    fn centroid_drift_can_pull_in_a_delivery_rejected_earlier() {
        // d2 is ~2.2 km from d1 and rejected on the first sweep, but the
        // centroid moves toward d3 after absorbing it, which brings d2 within
        // range on the second sweep.
        let deliveries = vec![
            delivery_at("d1", 1.0, 48.0000, 2.0000),
            delivery_at("d2", 1.0, 48.0200, 2.0000),
            delivery_at("d3", 1.0, 48.0170, 2.0000),
        ];

        let clusters = cluster(&deliveries, Kilometers::new(2.0));

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 3);
    }
}
