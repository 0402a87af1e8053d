mod error;
pub mod problem;
pub mod solver;
mod utils;

pub mod json;

pub use error::OptimizeError;

#[cfg(test)]
pub(crate) mod test_utils;
