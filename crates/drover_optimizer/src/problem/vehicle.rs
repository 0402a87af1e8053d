use serde::Serialize;

use crate::{define_index_newtype, problem::kilograms::Kilograms};

define_index_newtype!(VehicleIdx, Vehicle);

/// Capacity constraint holder. The caller passes only vehicles that are
/// actually available for the batch.
#[derive(Serialize, Debug, Clone)]
pub struct Vehicle {
    external_id: String,
    plate: String,
    capacity: Kilograms,
}

impl Vehicle {
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn plate(&self) -> &str {
        &self.plate
    }

    pub fn capacity(&self) -> Kilograms {
        self.capacity
    }
}

#[derive(Default)]
pub struct VehicleBuilder {
    external_id: Option<String>,
    plate: Option<String>,
    capacity: Option<Kilograms>,
}

impl VehicleBuilder {
    pub fn set_vehicle_id(&mut self, external_id: String) -> &mut VehicleBuilder {
        self.external_id = Some(external_id);
        self
    }

    pub fn set_plate(&mut self, plate: String) -> &mut VehicleBuilder {
        self.plate = Some(plate);
        self
    }

    pub fn set_capacity(&mut self, capacity: Kilograms) -> &mut VehicleBuilder {
        self.capacity = Some(capacity);
        self
    }

    pub fn build(self) -> Vehicle {
        Vehicle {
            external_id: self.external_id.expect("Vehicle ID is required"),
            plate: self.plate.unwrap_or_default(),
            capacity: self.capacity.expect("Vehicle capacity is required"),
        }
    }
}
