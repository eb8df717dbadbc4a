//! Helpers shared by the unit tests in this crate and the test suites of the crates built on it.
mod local_gateway;
mod prepare_env;

pub use local_gateway::LocalGateway;
pub use prepare_env::{prepare_test_env, sample_catalogue, sample_deals};
