//! Polls ASIC miners and exposes their telemetry as sensor entities.
//!
//! Each configured miner gets its own [`MinerCoordinator`]. On every tick it
//! asks a [`MinerResolver`] for a fresh handle, pushes the configured
//! credentials onto it, fetches a fixed set of [`DataField`]s and publishes
//! the normalized [`MinerSnapshot`]. [`MinerSensor`]s read from the latest
//! snapshot on demand.

pub mod config;
pub mod coordinator;
pub mod data;
pub mod error;
pub mod miners;
pub mod sensor;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{CoordinatorConfig, MinerEntry};
pub use coordinator::snapshot::{MinerSnapshot, SensorValue};
pub use coordinator::{CoordinatorHandle, CoordinatorState, MinerCoordinator};
pub use error::{ConfigError, MinerError, SetupError, UpdateFailed};
pub use miners::backends::traits::{MinerHandle, MinerResolver};
pub use miners::data::DataField;
pub use sensor::{AddEntities, MinerSensor, create_sensors, setup_entry};

/// Integration domain, used as the device identifier namespace.
pub const DOMAIN: &str = "miner";
