//! Scripted stand-ins for the miner library.

use std::collections::VecDeque;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::data::miner::MinerData;
use crate::error::MinerError;
use crate::miners::api::{Credentials, RpcCredentials};
use crate::miners::backends::traits::{MinerHandle, MinerResolver};
use crate::miners::data::DataField;

type FetchLog = Arc<Mutex<Vec<Option<Credentials>>>>;

/// Routes log output through the test harness; `RUST_LOG` picks the level.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone)]
pub(crate) struct FakeMiner {
    pub ip: IpAddr,
    pub rpc: Option<RpcCredentials>,
    pub web: Option<Credentials>,
    pub ssh: Option<Credentials>,
    response: Result<MinerData, MinerError>,
    delay: Duration,
    fetches: FetchLog,
}

impl FakeMiner {
    pub fn new(ip: IpAddr) -> Self {
        Self {
            ip,
            rpc: None,
            web: None,
            ssh: None,
            response: Ok(MinerData::new(ip)),
            delay: Duration::ZERO,
            fetches: FetchLog::default(),
        }
    }

    pub fn with_rpc(mut self, rpc: RpcCredentials) -> Self {
        self.rpc = Some(rpc);
        self
    }

    pub fn with_web(mut self, web: Credentials) -> Self {
        self.web = Some(web);
        self
    }

    pub fn with_ssh(mut self, ssh: Credentials) -> Self {
        self.ssh = Some(ssh);
        self
    }

    pub fn with_data(mut self, data: MinerData) -> Self {
        self.response = Ok(data);
        self
    }

    pub fn with_error(mut self, err: MinerError) -> Self {
        self.response = Err(err);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl MinerHandle for FakeMiner {
    fn ip(&self) -> IpAddr {
        self.ip
    }

    fn rpc_mut(&mut self) -> Option<&mut RpcCredentials> {
        self.rpc.as_mut()
    }

    fn web_mut(&mut self) -> Option<&mut Credentials> {
        self.web.as_mut()
    }

    fn ssh_mut(&mut self) -> Option<&mut Credentials> {
        self.ssh.as_mut()
    }

    async fn get_data(&self, _fields: &[DataField]) -> Result<MinerData, MinerError> {
        self.fetches.lock().unwrap().push(self.web.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.response.clone()
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Resolution {
    Offline,
    Error(MinerError),
    Miner(FakeMiner),
}

/// Answers lookups from a script, then with `fallback` (offline by default).
pub(crate) struct FakeResolver {
    script: Mutex<VecDeque<Resolution>>,
    fallback: Resolution,
    calls: AtomicUsize,
    fetches: FetchLog,
}

impl FakeResolver {
    pub fn new(script: Vec<Resolution>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: Resolution::Offline,
            calls: AtomicUsize::new(0),
            fetches: FetchLog::default(),
        }
    }

    pub fn repeating(mut self, fallback: Resolution) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Web credentials each fetch saw, in order.
    pub fn fetched_with(&self) -> Vec<Option<Credentials>> {
        self.fetches.lock().unwrap().clone()
    }
}

#[async_trait]
impl MinerResolver for FakeResolver {
    async fn get_miner(&self, _ip: IpAddr) -> Result<Option<Box<dyn MinerHandle>>, MinerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        match next {
            Resolution::Offline => Ok(None),
            Resolution::Error(err) => Err(err),
            Resolution::Miner(mut miner) => {
                miner.fetches = Arc::clone(&self.fetches);
                Ok(Some(Box::new(miner)))
            }
        }
    }
}
