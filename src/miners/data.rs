use strum::{Display, EnumIter};

/// Represents the individual pieces of data that can be queried from a miner device.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Copy, EnumIter, Display)]
pub enum DataField {
    /// MAC address of the miner.
    Mac,
    /// Information about the miner's device.
    DeviceInfo,
    /// Hostname assigned to the miner.
    Hostname,
    /// Firmware version of the miner.
    FirmwareVersion,
    /// Details about the hashboards (e.g., temperatures, chips, etc.).
    Hashboards,
    /// Current hashrate reported by the miner.
    Hashrate,
    /// Expected or factory hashrate of the miner.
    ExpectedHashrate,
    /// Expected number of fans.
    ExpectedFans,
    /// Fan speed or fan configuration.
    Fans,
    /// Average temperature reported by the miner.
    AverageTemperature,
    /// Fluid temperature reported by the miner.
    FluidTemperature,
    /// Current power consumption in watts.
    Wattage,
    /// Configured power limit in watts.
    WattageLimit,
    /// Efficiency of the miner (e.g., J/TH).
    Efficiency,
    /// Whether the fault or alert light is flashing.
    LightFlashing,
    /// Errors reported by the miner.
    Errors,
    /// Uptime in seconds.
    Uptime,
    /// Whether the miner is currently hashing.
    IsMining,
}

/// Fields requested on every refresh.
///
/// Make and model come with [`DataField::DeviceInfo`]; everything the
/// published sensors read must be listed here.
pub const MONITORED_FIELDS: &[DataField] = &[
    DataField::DeviceInfo,
    DataField::Hostname,
    DataField::Mac,
    DataField::IsMining,
    DataField::FirmwareVersion,
    DataField::Hashrate,
    DataField::ExpectedHashrate,
    DataField::Hashboards,
    DataField::Wattage,
    DataField::WattageLimit,
    DataField::Efficiency,
    DataField::AverageTemperature,
    DataField::ExpectedFans,
    DataField::Fans,
    DataField::Uptime,
    DataField::FluidTemperature,
    DataField::Errors,
    DataField::LightFlashing,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn monitored_fields_are_unique() {
        let unique: HashSet<_> = MONITORED_FIELDS.iter().collect();
        assert_eq!(unique.len(), MONITORED_FIELDS.len());
    }

    #[test]
    fn every_field_is_monitored() {
        let skipped: Vec<_> = DataField::iter()
            .filter(|f| !MONITORED_FIELDS.contains(f))
            .collect();
        assert!(skipped.is_empty(), "not requested: {skipped:?}");
    }
}
