use serde::Serialize;

use crate::define_index_newtype;

define_index_newtype!(DriverIdx, Driver);

/// Drivers only label routes in the output; they never influence routing.
#[derive(Serialize, Debug, Clone)]
pub struct Driver {
    external_id: String,
    name: String,
}

impl Driver {
    pub fn new(external_id: String, name: String) -> Self {
        Self { external_id, name }
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
