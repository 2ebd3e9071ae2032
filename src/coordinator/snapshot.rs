//! The normalized view of one successful refresh.
//!
//! A [`MinerSnapshot`] is built from a [`MinerData`] record and never
//! changes after it is published. Sensors look values up by key.

use std::collections::BTreeMap;
use std::net::IpAddr;

use macaddr::MacAddr;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter};

use crate::data::board::BoardData;
use crate::data::fan::FanData;
use crate::data::hashrate::HashRate;
use crate::data::message::MinerMessage;
use crate::data::miner::MinerData;

/// Summary shown when the miner reported an error list with nothing in it.
pub const NO_ERRORS: &str = "No errors";

/// A single sensor reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SensorValue {
    Float(f64),
    Int(i64),
    Bool(bool),
    Text(String),
}

impl From<f64> for SensorValue {
    fn from(value: f64) -> Self {
        SensorValue::Float(value)
    }
}

impl From<i64> for SensorValue {
    fn from(value: i64) -> Self {
        SensorValue::Int(value)
    }
}

impl From<bool> for SensorValue {
    fn from(value: bool) -> Self {
        SensorValue::Bool(value)
    }
}

impl From<String> for SensorValue {
    fn from(value: String) -> Self {
        SensorValue::Text(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum MinerSensorKey {
    Hashrate,
    IdealHashrate,
    Temperature,
    PowerLimit,
    MinerConsumption,
    Efficiency,
    PercentExpectedHashrate,
    Uptime,
    EnvTemp,
    Errors,
    FaultLight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum BoardSensorKey {
    BoardTemperature,
    ChipTemperature,
    BoardHashrate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum FanSensorKey {
    FanSpeed,
}

/// Whole-device readings. Units: TH/s, °C, W, J/TH, %, seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MinerSensors {
    pub hashrate: Option<f64>,
    pub ideal_hashrate: Option<f64>,
    pub temperature: Option<f64>,
    pub power_limit: Option<f64>,
    pub miner_consumption: Option<f64>,
    pub efficiency: Option<f64>,
    pub percent_expected_hashrate: Option<f64>,
    pub uptime: Option<u64>,
    pub env_temp: Option<f64>,
    pub errors: String,
    pub fault_light: Option<bool>,
}

impl MinerSensors {
    pub fn get(&self, key: MinerSensorKey) -> Option<SensorValue> {
        match key {
            MinerSensorKey::Hashrate => self.hashrate.map(Into::into),
            MinerSensorKey::IdealHashrate => self.ideal_hashrate.map(Into::into),
            MinerSensorKey::Temperature => self.temperature.map(Into::into),
            MinerSensorKey::PowerLimit => self.power_limit.map(Into::into),
            MinerSensorKey::MinerConsumption => self.miner_consumption.map(Into::into),
            MinerSensorKey::Efficiency => self.efficiency.map(Into::into),
            MinerSensorKey::PercentExpectedHashrate => {
                self.percent_expected_hashrate.map(Into::into)
            }
            MinerSensorKey::Uptime => self
                .uptime
                .and_then(|secs| i64::try_from(secs).ok())
                .map(Into::into),
            MinerSensorKey::EnvTemp => self.env_temp.map(Into::into),
            MinerSensorKey::Errors => Some(self.errors.clone().into()),
            MinerSensorKey::FaultLight => self.fault_light.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoardSensors {
    pub board_temperature: Option<f64>,
    pub chip_temperature: Option<f64>,
    pub board_hashrate: f64,
}

impl BoardSensors {
    pub fn get(&self, key: BoardSensorKey) -> Option<SensorValue> {
        match key {
            BoardSensorKey::BoardTemperature => self.board_temperature.map(Into::into),
            BoardSensorKey::ChipTemperature => self.chip_temperature.map(Into::into),
            BoardSensorKey::BoardHashrate => Some(self.board_hashrate.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FanSensors {
    /// RPM
    pub fan_speed: Option<i64>,
}

impl FanSensors {
    pub fn get(&self, key: FanSensorKey) -> Option<SensorValue> {
        match key {
            FanSensorKey::FanSpeed => self.fan_speed.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinerSnapshot {
    pub hostname: Option<String>,
    #[serde(serialize_with = "serialize_mac")]
    pub mac: Option<MacAddr>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub ip: IpAddr,
    pub is_mining: Option<bool>,
    pub fw_ver: Option<String>,
    /// Number of fan sensors to create; the device's own count if it
    /// reports one, otherwise the number of fans it returned.
    pub expected_fans: usize,
    pub miner_sensors: MinerSensors,
    /// Keyed by the board slot reported by the firmware
    pub board_sensors: BTreeMap<u8, BoardSensors>,
    /// Keyed by position in the reported fan list, not hardware slot
    pub fan_sensors: BTreeMap<usize, FanSensors>,
}

impl MinerSnapshot {
    /// Normalizes a fetched record. `ip` is the address the handle talked to.
    pub fn from_data(ip: IpAddr, data: &MinerData) -> Self {
        let fan_sensors = fan_sensors(&data.fans);
        let expected_fans = data
            .expected_fans
            .map(usize::from)
            .unwrap_or(fan_sensors.len());

        MinerSnapshot {
            hostname: data.hostname.clone(),
            mac: data.mac,
            make: data.device_info.make.map(|make| make.to_string()),
            model: data.device_info.model.clone(),
            ip,
            is_mining: data.is_mining,
            fw_ver: data.firmware_version.clone(),
            expected_fans,
            miner_sensors: MinerSensors {
                hashrate: rounded_terahash(data.hashrate.as_ref()),
                ideal_hashrate: rounded_terahash(data.expected_hashrate.as_ref()),
                temperature: data.average_temperature.map(|t| t.as_celsius()),
                power_limit: data.wattage_limit.map(|p| p.as_watts()),
                miner_consumption: data.wattage.map(|p| p.as_watts()),
                efficiency: data.efficiency(),
                percent_expected_hashrate: data.percent_expected_hashrate(),
                uptime: data.uptime.map(|d| d.as_secs()),
                env_temp: data.fluid_temperature.map(|t| t.as_celsius()),
                errors: error_summary(data.errors.as_deref()),
                fault_light: data.light_flashing,
            },
            board_sensors: board_sensors(&data.hashboards),
            fan_sensors,
        }
    }

    /// Device identifier used in entity ids. Falls back to the IP address
    /// when the miner did not report a MAC.
    pub fn mac_id(&self) -> String {
        match self.mac {
            Some(mac) => mac.to_string(),
            None => self.ip.to_string(),
        }
    }

    pub fn miner_value(&self, key: MinerSensorKey) -> Option<SensorValue> {
        self.miner_sensors.get(key)
    }

    pub fn board_value(&self, board_num: u8, key: BoardSensorKey) -> Option<SensorValue> {
        self.board_sensors.get(&board_num)?.get(key)
    }

    pub fn fan_value(&self, fan_num: usize, key: FanSensorKey) -> Option<SensorValue> {
        self.fan_sensors.get(&fan_num)?.get(key)
    }
}

fn serialize_mac<S: serde::Serializer>(
    mac: &Option<MacAddr>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match mac {
        Some(mac) => serializer.collect_str(mac),
        None => serializer.serialize_none(),
    }
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A hashrate in TH/s rounded to two decimals, or `None` if it is missing
/// or not a finite number.
pub fn rounded_terahash(rate: Option<&HashRate>) -> Option<f64> {
    let value = rate?.as_terahash();
    value.is_finite().then(|| round2(value))
}

/// Collapses the error list into one display string.
///
/// Not fetched gives `""`; a list with nothing readable in it gives
/// [`NO_ERRORS`]; otherwise the messages are joined with `"; "`.
pub fn error_summary(errors: Option<&[MinerMessage]>) -> String {
    let Some(errors) = errors else {
        return String::new();
    };
    let joined = errors
        .iter()
        .filter_map(MinerMessage::text)
        .collect::<Vec<_>>()
        .join("; ");
    if joined.is_empty() {
        NO_ERRORS.to_string()
    } else {
        joined
    }
}

/// Boards that report no hashrate are left out entirely.
fn board_sensors(boards: &[BoardData]) -> BTreeMap<u8, BoardSensors> {
    boards
        .iter()
        .filter_map(|board| {
            let hashrate = board.hashrate.as_ref()?;
            let board_hashrate = Some(hashrate.as_terahash())
                .filter(|v| v.is_finite())
                .map(round2)
                .unwrap_or(0.0);
            Some((
                board.position,
                BoardSensors {
                    board_temperature: board.board_temperature.map(|t| t.as_celsius()),
                    chip_temperature: board.chip_temperature.map(|t| t.as_celsius()),
                    board_hashrate,
                },
            ))
        })
        .collect()
}

fn fan_sensors(fans: &[FanData]) -> BTreeMap<usize, FanSensors> {
    fans.iter()
        .enumerate()
        .map(|(idx, fan)| {
            let fan_speed = fan
                .rpm
                .map(|rpm| rpm.as_rpm().round())
                .filter(|rpm| rpm.is_finite())
                .map(|rpm| rpm as i64);
            (idx, FanSensors { fan_speed })
        })
        .collect()
}
