pub mod config;
pub mod dashboard;
pub mod export;
pub mod geo;
pub mod intel;
pub mod logging;
pub mod map_layers;
pub mod model;
pub mod seed;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;
