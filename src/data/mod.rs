pub mod board;
pub mod device;
pub mod fan;
pub mod hashrate;
pub mod message;
pub mod miner;
