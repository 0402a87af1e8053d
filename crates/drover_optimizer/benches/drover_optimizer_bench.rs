use criterion::{Criterion, criterion_group, criterion_main};
use drover_optimizer::{
    problem::{
        delivery::DeliveryPointBuilder,
        delivery_batch::{DeliveryBatch, DeliveryBatchBuilder},
        kilograms::Kilograms,
        location::Location,
        vehicle::VehicleBuilder,
    },
    solver::{config::OptimizerConfig, optimize::optimize_batch},
};

/// Deterministic pseudo-grid of deliveries around one metro area, a realistic
/// upper bound for a dispatch batch.
fn batch_of(deliveries: usize, vehicles: usize) -> DeliveryBatch {
    let mut builder = DeliveryBatchBuilder::default();

    for i in 0..deliveries {
        let lat = 48.80 + (i % 23) as f64 * 0.01;
        let lon = 2.25 + (i % 17) as f64 * 0.01;
        let mut delivery = DeliveryPointBuilder::default();
        delivery
            .set_delivery_id(format!("d{i}"))
            .set_weight(Kilograms::new(5.0 + (i % 40) as f64))
            .set_location(Location::from_lat_lon(lat, lon))
            .set_address(format!("{i} Bench Street"));
        builder.add_delivery(delivery.build());
    }

    for i in 0..vehicles {
        let mut vehicle = VehicleBuilder::default();
        vehicle
            .set_vehicle_id(format!("v{i}"))
            .set_capacity(Kilograms::new(800.0));
        builder.add_vehicle(vehicle.build());
    }

    builder.build()
}

fn bench_optimize_batch(c: &mut Criterion) {
    let config = OptimizerConfig::with_depot(Location::from_lat_lon(48.85, 2.35));

    for size in [50usize, 200, 500] {
        let batch = batch_of(size, size / 25 + 1);

        c.bench_function(&format!("optimize_batch_{size}"), |b| {
            b.iter(|| optimize_batch(&batch, &config).unwrap())
        });
    }
}

criterion_group!(benches, bench_optimize_batch);
criterion_main!(benches);
