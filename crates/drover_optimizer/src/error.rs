use thiserror::Error;

/// Hard failures of an optimization call. Capacity and fleet shortfalls are
/// not errors: they are reported inside the result so a dispatcher still sees
/// the routes that could be built.
#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("no deliveries supplied")]
    EmptyBatch,
    #[error("deadline exceeded during phase {0}")]
    DeadlineExceeded(&'static str),
}
