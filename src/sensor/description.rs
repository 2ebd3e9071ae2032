//! Display metadata for every sensor key.

use serde::Serialize;
use strum::Display;

use crate::coordinator::snapshot::{BoardSensorKey, FanSensorKey, MinerSensorKey};

pub const TERA_HASH_PER_SECOND: &str = "TH/s";
pub const JOULES_PER_TERA_HASH: &str = "J/TH";
pub const CELSIUS: &str = "°C";
pub const WATT: &str = "W";
pub const REVOLUTIONS_PER_MINUTE: &str = "rpm";
pub const PERCENTAGE: &str = "%";
pub const SECONDS: &str = "s";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeviceClass {
    Temperature,
    Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StateClass {
    Measurement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntityCategory {
    Diagnostic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SensorDescription {
    /// Human-facing label, appended to the device title
    pub label: &'static str,
    pub unit: Option<&'static str>,
    pub device_class: Option<DeviceClass>,
    pub state_class: Option<StateClass>,
    pub entity_category: EntityCategory,
    pub icon: Option<&'static str>,
}

impl SensorDescription {
    const fn measurement(label: &'static str, unit: &'static str, icon: &'static str) -> Self {
        Self {
            label,
            unit: Some(unit),
            device_class: None,
            state_class: Some(StateClass::Measurement),
            entity_category: EntityCategory::Diagnostic,
            icon: Some(icon),
        }
    }

    const fn temperature(label: &'static str, icon: Option<&'static str>) -> Self {
        Self {
            label,
            unit: Some(CELSIUS),
            device_class: Some(DeviceClass::Temperature),
            state_class: Some(StateClass::Measurement),
            entity_category: EntityCategory::Diagnostic,
            icon,
        }
    }

    const fn power(label: &'static str, icon: &'static str) -> Self {
        Self {
            label,
            unit: Some(WATT),
            device_class: Some(DeviceClass::Power),
            state_class: Some(StateClass::Measurement),
            entity_category: EntityCategory::Diagnostic,
            icon: Some(icon),
        }
    }
}

pub fn miner_description(key: MinerSensorKey) -> SensorDescription {
    match key {
        MinerSensorKey::Hashrate => {
            SensorDescription::measurement("Hashrate", TERA_HASH_PER_SECOND, "mdi:speedometer")
        }
        MinerSensorKey::IdealHashrate => SensorDescription::measurement(
            "Ideal Hashrate",
            TERA_HASH_PER_SECOND,
            "mdi:speedometer",
        ),
        MinerSensorKey::Temperature => SensorDescription::temperature("Temperature", None),
        MinerSensorKey::PowerLimit => SensorDescription::power("Power Limit", "mdi:flash"),
        MinerSensorKey::MinerConsumption => {
            SensorDescription::power("Miner Consumption", "mdi:flash-outline")
        }
        MinerSensorKey::Efficiency => {
            SensorDescription::measurement("Efficiency", JOULES_PER_TERA_HASH, "mdi:oil")
        }
        MinerSensorKey::PercentExpectedHashrate => SensorDescription::measurement(
            "Percent Expected Hashrate",
            PERCENTAGE,
            "mdi:percent",
        ),
        MinerSensorKey::Uptime => {
            SensorDescription::measurement("Uptime", SECONDS, "mdi:timer-outline")
        }
        MinerSensorKey::EnvTemp => {
            SensorDescription::temperature("Environment Temperature", Some("mdi:weather-sunny"))
        }
        MinerSensorKey::Errors => SensorDescription {
            label: "Errors",
            unit: None,
            device_class: None,
            state_class: None,
            entity_category: EntityCategory::Diagnostic,
            icon: Some("mdi:alert-circle"),
        },
        MinerSensorKey::FaultLight => SensorDescription {
            label: "Fault Light",
            unit: None,
            device_class: None,
            state_class: Some(StateClass::Measurement),
            entity_category: EntityCategory::Diagnostic,
            icon: Some("mdi:alert"),
        },
    }
}

pub fn board_description(key: BoardSensorKey) -> SensorDescription {
    match key {
        BoardSensorKey::BoardTemperature => {
            SensorDescription::temperature("Board Temperature", Some("mdi:thermometer-lines"))
        }
        BoardSensorKey::ChipTemperature => {
            SensorDescription::temperature("Chip Temperature", Some("mdi:thermometer-high"))
        }
        BoardSensorKey::BoardHashrate => SensorDescription::measurement(
            "Board Hashrate",
            TERA_HASH_PER_SECOND,
            "mdi:speedometer",
        ),
    }
}

pub fn fan_description(key: FanSensorKey) -> SensorDescription {
    match key {
        FanSensorKey::FanSpeed => {
            SensorDescription::measurement("Fan Speed", REVOLUTIONS_PER_MINUTE, "mdi:fan")
        }
    }
}
