use measurements::Power;
use std::ops::Div;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum HashRateUnit {
    #[strum(to_string = "H/s")]
    Hash,
    #[strum(to_string = "KH/s")]
    KiloHash,
    #[strum(to_string = "MH/s")]
    MegaHash,
    #[strum(to_string = "GH/s")]
    GigaHash,
    #[strum(to_string = "TH/s")]
    TeraHash,
    #[strum(to_string = "PH/s")]
    PetaHash,
    #[strum(to_string = "EH/s")]
    ExaHash,
    #[strum(to_string = "ZH/s")]
    ZettaHash,
    #[strum(to_string = "YH/s")]
    YottaHash,
}

impl HashRateUnit {
    /// Power of 1000 this unit represents relative to plain hashes.
    fn exponent(self) -> i32 {
        match self {
            HashRateUnit::Hash => 0,
            HashRateUnit::KiloHash => 1,
            HashRateUnit::MegaHash => 2,
            HashRateUnit::GigaHash => 3,
            HashRateUnit::TeraHash => 4,
            HashRateUnit::PetaHash => 5,
            HashRateUnit::ExaHash => 6,
            HashRateUnit::ZettaHash => 7,
            HashRateUnit::YottaHash => 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HashRate {
    /// The current amount of hashes being computed
    pub value: f64,
    /// The unit of the hashes in value
    pub unit: HashRateUnit,
}

impl HashRate {
    pub fn new(value: f64, unit: HashRateUnit) -> Self {
        Self { value, unit }
    }

    /// Returns the same rate expressed in `unit`.
    pub fn as_unit(&self, unit: HashRateUnit) -> HashRate {
        let shift = self.unit.exponent() - unit.exponent();
        HashRate {
            value: self.value * 1000f64.powi(shift),
            unit,
        }
    }

    /// The rate in TH/s, the unit sensors are published in.
    pub fn as_terahash(&self) -> f64 {
        self.as_unit(HashRateUnit::TeraHash).value
    }
}

/// Efficiency in W per TH/s (J/TH).
impl Div<&HashRate> for Power {
    type Output = f64;

    fn div(self, hash_rate: &HashRate) -> Self::Output {
        self.as_watts() / hash_rate.as_terahash()
    }
}
