use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Refresh interval used by the original polling setup.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(10);

/// Cooldown for coalescing manual refresh requests.
pub const REQUEST_REFRESH_DEFAULT_COOLDOWN: Duration = Duration::from_secs(5);

/// A configured miner, as stored by the host.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinerEntry {
    /// Display name of the device; prefixes every sensor name
    pub title: String,
    pub ip: IpAddr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_password: Option<String>,
}

impl MinerEntry {
    /// An entry with no credentials configured.
    pub fn new(title: impl Into<String>, ip: IpAddr) -> Self {
        Self {
            title: title.into(),
            ip,
            rpc_password: None,
            web_username: None,
            web_password: None,
            ssh_username: None,
            ssh_password: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let entry: MinerEntry = serde_json::from_str(json)?;
        if entry.title.trim().is_empty() {
            return Err(ConfigError::EmptyTitle);
        }
        Ok(entry)
    }
}

impl fmt::Debug for MinerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(secret: &Option<String>) -> Option<&'static str> {
            secret.as_ref().map(|_| "<redacted>")
        }

        f.debug_struct("MinerEntry")
            .field("title", &self.title)
            .field("ip", &self.ip)
            .field("rpc_password", &redact(&self.rpc_password))
            .field("web_username", &self.web_username)
            .field("web_password", &redact(&self.web_password))
            .field("ssh_username", &self.ssh_username)
            .field("ssh_password", &redact(&self.ssh_password))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Time between the end of one refresh and the next scheduled one.
    pub update_interval: Duration,

    /// Window in which manual refresh requests are merged into one.
    pub request_refresh_cooldown: Duration,

    /// Whether the first manual request in a window runs right away
    /// instead of at the end of the window.
    pub request_refresh_immediate: bool,
}

impl CoordinatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("update_interval"));
        }
        if self.request_refresh_cooldown.is_zero() {
            return Err(ConfigError::ZeroDuration("request_refresh_cooldown"));
        }
        Ok(())
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            update_interval: DEFAULT_UPDATE_INTERVAL,
            request_refresh_cooldown: REQUEST_REFRESH_DEFAULT_COOLDOWN,
            request_refresh_immediate: true,
        }
    }
}
