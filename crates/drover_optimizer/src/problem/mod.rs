pub mod delivery;
pub mod delivery_batch;
pub mod driver;
pub mod kilograms;
pub mod kilometers;
pub mod kmh;
pub mod location;
pub mod vehicle;
