use std::{net::IpAddr, time::Duration};

use macaddr::MacAddr;
use measurements::{Power, Temperature};

use super::{
    board::BoardData, device::DeviceInfo, fan::FanData, hashrate::HashRate, message::MinerMessage,
};

/// Telemetry returned by a miner handle for one request.
///
/// Every field is optional at the source; a field that was not requested, or
/// that the device does not report, is `None` (or empty for collections).
#[derive(Debug, Clone, PartialEq)]
pub struct MinerData {
    /// The IP address of the miner this data is for
    pub ip: IpAddr,
    /// The MAC address of the miner this data is for
    pub mac: Option<MacAddr>,
    /// Hardware information about this miner
    pub device_info: DeviceInfo,
    /// The network hostname of the miner
    pub hostname: Option<String>,
    /// The firmware version of the miner
    pub firmware_version: Option<String>,
    /// Per-hashboard data for this miner
    pub hashboards: Vec<BoardData>,
    /// The current hashrate of the miner
    pub hashrate: Option<HashRate>,
    /// The expected or factory hashrate of the miner
    pub expected_hashrate: Option<HashRate>,
    /// The expected number of fans on the miner
    pub expected_fans: Option<u8>,
    /// The current fan information for the miner
    pub fans: Vec<FanData>,
    /// The average temperature across all chips in the miner
    pub average_temperature: Option<Temperature>,
    /// The environment temperature of the miner, such as air temperature or immersion fluid temperature
    pub fluid_temperature: Option<Temperature>,
    /// The current power consumption of the miner
    pub wattage: Option<Power>,
    /// The current power limit or power target of the miner
    pub wattage_limit: Option<Power>,
    /// The current efficiency in W/TH/s (J/TH) of the miner
    pub efficiency: Option<f64>,
    /// The state of the fault/alert light on the miner
    pub light_flashing: Option<bool>,
    /// Errors reported by the miner
    /// `None` when the errors were not fetched, an empty list when there are none
    pub errors: Option<Vec<MinerMessage>>,
    /// The total uptime of the miner's system
    pub uptime: Option<Duration>,
    /// Whether the hashing process is currently running
    pub is_mining: Option<bool>,
}

impl MinerData {
    /// An empty record for `ip`, to be filled in by a backend.
    pub fn new(ip: IpAddr) -> Self {
        Self {
            ip,
            mac: None,
            device_info: DeviceInfo::default(),
            hostname: None,
            firmware_version: None,
            hashboards: vec![],
            hashrate: None,
            expected_hashrate: None,
            expected_fans: None,
            fans: vec![],
            average_temperature: None,
            fluid_temperature: None,
            wattage: None,
            wattage_limit: None,
            efficiency: None,
            light_flashing: None,
            errors: None,
            uptime: None,
            is_mining: None,
        }
    }

    /// Efficiency in J/TH, falling back to wattage over hashrate when the
    /// device does not report it.
    pub fn efficiency(&self) -> Option<f64> {
        if let Some(efficiency) = self.efficiency.filter(|e| e.is_finite()) {
            return Some(efficiency);
        }
        match (&self.hashrate, self.wattage) {
            (Some(hr), Some(w)) if hr.as_terahash() > 0.0 => Some((w / hr).round()),
            _ => None,
        }
    }

    /// Current hashrate as a whole percentage of the expected hashrate.
    pub fn percent_expected_hashrate(&self) -> Option<f64> {
        let hashrate = self.hashrate.as_ref()?.as_terahash();
        let expected = self.expected_hashrate.as_ref()?.as_terahash();
        if expected == 0.0 {
            return None;
        }
        let percent = (hashrate / expected * 100.0).round();
        percent.is_finite().then_some(percent)
    }
}
