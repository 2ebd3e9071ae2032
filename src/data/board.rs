use super::hashrate::HashRate;
use measurements::Temperature;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoardData {
    /// The board slot in the miner as reported by the firmware
    pub position: u8,
    /// The current hashrate of the board
    /// Boards that are missing or not hashing report `None`
    pub hashrate: Option<HashRate>,
    /// The board temperature, also sometimes called PCB temperature
    pub board_temperature: Option<Temperature>,
    /// The average temperature of the chips on this board
    pub chip_temperature: Option<Temperature>,
}
