use std::net::IpAddr;

use crate::data::miner::MinerData;
use crate::error::MinerError;
use crate::miners::api::{Credentials, RpcCredentials};
use crate::miners::data::DataField;
use async_trait::async_trait;

/// A live connection to one physical miner.
///
/// Handles are cheap to build and are created fresh for every refresh; the
/// transports they wrap keep no state between refreshes.
#[async_trait]
pub trait MinerHandle: Send + Sync {
    /// The address this handle talks to.
    fn ip(&self) -> IpAddr;

    /// The RPC API transport, if the backend has one.
    fn rpc_mut(&mut self) -> Option<&mut RpcCredentials> {
        None
    }

    /// The web UI transport, if the backend has one.
    fn web_mut(&mut self) -> Option<&mut Credentials> {
        None
    }

    /// The SSH transport, if the backend has one.
    fn ssh_mut(&mut self) -> Option<&mut Credentials> {
        None
    }

    /// Asynchronously retrieves the requested fields in one call.
    ///
    /// Fields that were not requested, or that the device does not report,
    /// are left empty in the returned `MinerData`.
    async fn get_data(&self, fields: &[DataField]) -> Result<MinerData, MinerError>;
}

/// Turns an address into a handle for whatever miner answers there.
#[async_trait]
pub trait MinerResolver: Send + Sync {
    /// Returns `Ok(None)` when nothing answers or the device is not a
    /// recognized miner.
    async fn get_miner(&self, ip: IpAddr) -> Result<Option<Box<dyn MinerHandle>>, MinerError>;
}
