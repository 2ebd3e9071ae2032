//! Credential-bearing transport sub-handles.
//!
//! A miner handle may talk to the device over an RPC API, a web UI and SSH.
//! The protocol clients themselves live in the miner library; this crate
//! only sets the credentials they authenticate with.

use std::fmt;

use crate::config::MinerEntry;
use crate::miners::backends::traits::MinerHandle;
use tracing::trace;

/// Credentials of an RPC API transport.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RpcCredentials {
    /// `None` when the RPC API of this device does not take a password.
    pub password: Option<String>,
}

/// Username and password of a web or SSH transport.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn overwrite(&mut self, username: Option<&str>, password: Option<&str>) {
        self.username = username.unwrap_or_default().to_owned();
        self.password = password.unwrap_or_default().to_owned();
    }
}

impl fmt::Debug for RpcCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcCredentials")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Overwrites the credentials of every transport `miner` exposes with the
/// ones configured in `entry`.
///
/// Unconfigured values become empty strings so no stale credentials reach
/// the transport. Transports the handle does not expose are skipped.
pub fn apply_credentials(miner: &mut dyn MinerHandle, entry: &MinerEntry) {
    if let Some(rpc) = miner.rpc_mut() {
        if rpc.password.is_some() {
            rpc.password = Some(entry.rpc_password.clone().unwrap_or_default());
            trace!("rpc credentials set");
        }
    }

    if let Some(web) = miner.web_mut() {
        web.overwrite(entry.web_username.as_deref(), entry.web_password.as_deref());
        trace!("web credentials set");
    }

    if let Some(ssh) = miner.ssh_mut() {
        ssh.overwrite(entry.ssh_username.as_deref(), entry.ssh_password.as_deref());
        trace!("ssh credentials set");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeMiner;
    use std::net::IpAddr;

    fn entry() -> MinerEntry {
        MinerEntry::new("Garage S19", IpAddr::from([192, 168, 1, 50]))
    }

    #[test]
    fn missing_web_credentials_become_empty() {
        let mut miner = FakeMiner::new(entry().ip)
            .with_web(Credentials::new("root", "stale"));

        apply_credentials(&mut miner, &entry());

        let web = miner.web.as_ref().unwrap();
        assert_eq!(web.username, "");
        assert_eq!(web.password, "");
        assert!(miner.rpc.is_none());
        assert!(miner.ssh.is_none());
    }

    #[test]
    fn configured_credentials_are_applied() {
        let mut entry = entry();
        entry.rpc_password = Some("rpc-secret".into());
        entry.web_username = Some("admin".into());
        entry.web_password = Some("web-secret".into());
        entry.ssh_username = Some("miner".into());
        entry.ssh_password = Some("ssh-secret".into());

        let mut miner = FakeMiner::new(entry.ip)
            .with_rpc(RpcCredentials {
                password: Some("admin".into()),
            })
            .with_web(Credentials::default())
            .with_ssh(Credentials::default());

        apply_credentials(&mut miner, &entry);

        assert_eq!(miner.rpc.unwrap().password.as_deref(), Some("rpc-secret"));
        assert_eq!(miner.web.unwrap(), Credentials::new("admin", "web-secret"));
        assert_eq!(miner.ssh.unwrap(), Credentials::new("miner", "ssh-secret"));
    }

    #[test]
    fn rpc_without_password_support_is_left_alone() {
        let mut entry = entry();
        entry.rpc_password = Some("rpc-secret".into());
        let mut miner = FakeMiner::new(entry.ip).with_rpc(RpcCredentials::default());

        apply_credentials(&mut miner, &entry);

        assert_eq!(miner.rpc.unwrap().password, None);
    }

    #[test]
    fn rpc_password_defaults_to_empty() {
        let mut miner = FakeMiner::new(entry().ip).with_rpc(RpcCredentials {
            password: Some("admin".into()),
        });

        apply_credentials(&mut miner, &entry());

        assert_eq!(miner.rpc.unwrap().password.as_deref(), Some(""));
    }

    #[test]
    fn debug_redacts_passwords() {
        let rendered = format!("{:?}", Credentials::new("root", "hunter2"));
        assert!(rendered.contains("root"));
        assert!(!rendered.contains("hunter2"));
    }
}
