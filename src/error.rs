use std::net::IpAddr;

use thiserror::Error;

/// Errors raised by the miner communication library.
#[derive(Debug, Clone, Error)]
pub enum MinerError {
    /// Network error (connection issues, DNS resolution, etc.)
    #[error("Network error: {0}")]
    Network(String),
    /// HTTP error with status code
    #[error("HTTP error: {0}")]
    Http(u16),
    /// The device answered but rejected the command
    #[error("API error: {0}")]
    Api(String),
    /// JSON parsing error
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Request timeout")]
    Timeout,
    /// The backend cannot serve this request
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// A refresh cycle that produced no data.
///
/// Always recoverable: the previous snapshot stays published and the next
/// scheduled tick starts over.
#[derive(Debug, Clone, Error)]
pub enum UpdateFailed {
    #[error("Miner Offline: no miner found at {ip}")]
    Offline { ip: IpAddr },
    #[error("Miner lookup at {ip} failed")]
    Resolve {
        ip: IpAddr,
        #[source]
        source: MinerError,
    },
    #[error("Fetching data from {ip} failed")]
    Fetch {
        ip: IpAddr,
        #[source]
        source: MinerError,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config entry: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Config entry title must not be empty")]
    EmptyTitle,
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

#[derive(Debug, Error)]
pub enum SetupError {
    /// The first refresh failed, so there is nothing to build entities from.
    #[error("Miner not ready")]
    NotReady(#[source] UpdateFailed),
}
