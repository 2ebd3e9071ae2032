use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MinerMake {
    AntMiner,
    WhatsMiner,
    AvalonMiner,
    Innosilicon,
    Goldshell,
    Auradine,
    BitAxe,
    IceRiver,
    Hammer,
    Braiins,
    #[strum(to_string = "ePIC")]
    Epic,
    Volcminer,
}

/// Hardware identity of a miner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceInfo {
    pub make: Option<MinerMake>,
    /// Model name as reported by the device, e.g. `S19j Pro` or `Gamma`
    pub model: Option<String>,
}

impl DeviceInfo {
    pub fn new(make: MinerMake, model: impl Into<String>) -> Self {
        Self {
            make: Some(make),
            model: Some(model.into()),
        }
    }
}
