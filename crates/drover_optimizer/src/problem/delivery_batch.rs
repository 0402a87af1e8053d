use crate::problem::{
    delivery::{DeliveryIdx, DeliveryPoint},
    driver::Driver,
    vehicle::{Vehicle, VehicleIdx},
};

/// Immutable snapshot of everything one optimization pass works on. The
/// persistence layer upstream is responsible for claiming the underlying
/// orders so two dispatchers cannot batch the same deliveries concurrently.
pub struct DeliveryBatch {
    deliveries: Vec<DeliveryPoint>,
    vehicles: Vec<Vehicle>,
    drivers: Vec<Driver>,
}

impl DeliveryBatch {
    pub fn deliveries(&self) -> &[DeliveryPoint] {
        &self.deliveries
    }

    pub fn delivery(&self, delivery_id: DeliveryIdx) -> &DeliveryPoint {
        &self.deliveries[delivery_id]
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, vehicle_id: VehicleIdx) -> &Vehicle {
        &self.vehicles[vehicle_id]
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn delivery_ids(&self) -> impl Iterator<Item = DeliveryIdx> + '_ {
        (0..self.deliveries.len()).map(DeliveryIdx::new)
    }

    pub fn vehicle_ids(&self) -> impl Iterator<Item = VehicleIdx> + '_ {
        (0..self.vehicles.len()).map(VehicleIdx::new)
    }
}

#[derive(Default)]
pub struct DeliveryBatchBuilder {
    deliveries: Vec<DeliveryPoint>,
    vehicles: Vec<Vehicle>,
    drivers: Vec<Driver>,
}

impl DeliveryBatchBuilder {
    pub fn add_delivery(&mut self, delivery: DeliveryPoint) -> &mut DeliveryBatchBuilder {
        self.deliveries.push(delivery);
        self
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> &mut DeliveryBatchBuilder {
        self.vehicles.push(vehicle);
        self
    }

    pub fn add_driver(&mut self, driver: Driver) -> &mut DeliveryBatchBuilder {
        self.drivers.push(driver);
        self
    }

    pub fn build(self) -> DeliveryBatch {
        DeliveryBatch {
            deliveries: self.deliveries,
            vehicles: self.vehicles,
            drivers: self.drivers,
        }
    }
}
