pub mod balance;
pub mod cluster;
pub mod config;
pub mod optimize;
pub mod packing;
pub mod result;
pub mod sequence;
pub mod statistics;
