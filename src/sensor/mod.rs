//! Sensor entities backed by a coordinator's published snapshot.
//!
//! Sensors hold no values of their own. Every read goes to the latest
//! snapshot, so a board that disappears from one refresh simply reads as
//! unknown until it comes back.

pub mod description;

use serde::Serialize;
use strum::IntoEnumIterator;
use tokio::sync::watch;
use tracing::debug;

use crate::DOMAIN;
use crate::config::MinerEntry;
use crate::coordinator::snapshot::{
    BoardSensorKey, FanSensorKey, MinerSensorKey, MinerSnapshot, SensorValue,
};
use crate::coordinator::{CoordinatorState, MinerCoordinator};
use crate::error::SetupError;
use description::{SensorDescription, board_description, fan_description, miner_description};

/// Where in the snapshot a sensor reads its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorSource {
    Miner(MinerSensorKey),
    Board {
        /// Position among the sorted board slots, used for naming only
        display_idx: usize,
        /// Slot reported by the firmware, used for lookups
        board_num: u8,
        key: BoardSensorKey,
    },
    Fan {
        fan_num: usize,
        key: FanSensorKey,
    },
}

/// Device grouping shared by all sensors of one miner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityDevice {
    pub identifiers: Vec<(&'static str, String)>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub sw_version: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct MinerSensor {
    title: String,
    unique_id: String,
    source: SensorSource,
    state: watch::Receiver<CoordinatorState>,
}

impl MinerSensor {
    pub fn new(
        title: impl Into<String>,
        mac_id: &str,
        source: SensorSource,
        state: watch::Receiver<CoordinatorState>,
    ) -> Self {
        let unique_id = match source {
            SensorSource::Miner(key) => format!("{mac_id}-{key}"),
            SensorSource::Board { board_num, key, .. } => {
                format!("{mac_id}-board-{board_num}-{key}")
            }
            SensorSource::Fan { fan_num, key } => format!("{mac_id}-{fan_num}-{key}"),
        };
        Self {
            title: title.into(),
            unique_id,
            source,
            state,
        }
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn source(&self) -> SensorSource {
        self.source
    }

    pub fn description(&self) -> SensorDescription {
        match self.source {
            SensorSource::Miner(key) => miner_description(key),
            SensorSource::Board { key, .. } => board_description(key),
            SensorSource::Fan { key, .. } => fan_description(key),
        }
    }

    pub fn name(&self) -> String {
        let label = self.description().label;
        match self.source {
            SensorSource::Miner(_) => format!("{} {label}", self.title),
            SensorSource::Board { display_idx, .. } => {
                format!("{} Board #{display_idx} {label}", self.title)
            }
            SensorSource::Fan { fan_num, .. } => format!("{} Fan #{fan_num} {label}", self.title),
        }
    }

    /// Device metadata from the latest snapshot, if there is one.
    pub fn device_info(&self) -> Option<EntityDevice> {
        let state = self.state.borrow();
        let data = state.data.as_ref()?;
        Some(EntityDevice {
            identifiers: vec![(DOMAIN, data.mac_id())],
            manufacturer: data.make.clone(),
            model: data.model.clone(),
            sw_version: data.fw_ver.clone(),
            name: self.title.clone(),
        })
    }

    /// The current reading, or `None` when the value is unknown.
    pub fn native_value(&self) -> Option<SensorValue> {
        let state = self.state.borrow();
        let data = state.data.as_ref()?;
        match self.source {
            SensorSource::Miner(key) => data.miner_value(key),
            SensorSource::Board { board_num, key, .. } => data.board_value(board_num, key),
            SensorSource::Fan { fan_num, key } => data.fan_value(fan_num, key),
        }
    }

    pub fn available(&self) -> bool {
        self.state.borrow().available()
    }

    /// Fan speeds are written on every refresh even when unchanged.
    pub fn force_update(&self) -> bool {
        matches!(self.source, SensorSource::Fan { .. })
    }
}

/// Host-side entity registration.
pub trait AddEntities {
    fn add_entities(&mut self, entities: Vec<MinerSensor>);
}

impl AddEntities for Vec<MinerSensor> {
    fn add_entities(&mut self, entities: Vec<MinerSensor>) {
        self.extend(entities);
    }
}

/// Builds the sensors for everything `snapshot` reports. Each sensor reads
/// through its own clone of `state`.
///
/// Boards are named by their position among the sorted slots, starting at 0,
/// but read by slot.
pub fn create_sensors(
    entry: &MinerEntry,
    snapshot: &MinerSnapshot,
    state: watch::Receiver<CoordinatorState>,
) -> Vec<MinerSensor> {
    let mac_id = snapshot.mac_id();
    let sensor = |source: SensorSource| {
        MinerSensor::new(entry.title.as_str(), &mac_id, source, state.clone())
    };

    let mut sensors: Vec<MinerSensor> = MinerSensorKey::iter()
        .map(|key| sensor(SensorSource::Miner(key)))
        .collect();

    // BTreeMap keys are already sorted.
    for (display_idx, &board_num) in snapshot.board_sensors.keys().enumerate() {
        sensors.extend(BoardSensorKey::iter().map(|key| {
            sensor(SensorSource::Board {
                display_idx,
                board_num,
                key,
            })
        }));
    }

    for fan_num in 0..snapshot.expected_fans {
        sensors.extend(FanSensorKey::iter().map(|key| sensor(SensorSource::Fan { fan_num, key })));
    }

    sensors
}

/// Runs the first refresh and registers the miner's sensors.
///
/// Returns the number of sensors registered.
pub async fn setup_entry(
    coordinator: &MinerCoordinator,
    registry: &mut impl AddEntities,
) -> Result<usize, SetupError> {
    let snapshot = coordinator.first_refresh().await?;
    let sensors = create_sensors(coordinator.entry(), &snapshot, coordinator.subscribe());
    let count = sensors.len();
    debug!(title = %coordinator.entry().title, count, "Registering sensors");
    registry.add_entities(sensors);
    Ok(count)
}
