//! Periodic refresh of one miner.
//!
//! A [`MinerCoordinator`] runs one refresh cycle at a time: look the miner up,
//! set its credentials, fetch [`MONITORED_FIELDS`], normalize the record into
//! a [`MinerSnapshot`] and publish it through a `watch` channel. Failed
//! cycles leave the last good snapshot in place and mark the device
//! unavailable; the next tick starts again from scratch.

pub mod debounce;
pub mod snapshot;

use std::sync::Arc;
use std::time::SystemTime;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace};

use crate::config::{CoordinatorConfig, MinerEntry};
use crate::error::{ConfigError, SetupError, UpdateFailed};
use crate::miners::api::apply_credentials;
use crate::miners::backends::traits::{MinerHandle, MinerResolver};
use crate::miners::data::MONITORED_FIELDS;
use debounce::{Debouncer, RequestOutcome};
use snapshot::MinerSnapshot;

/// Manual refresh requests buffered while a refresh is running.
const REFRESH_REQUEST_CAPACITY: usize = 8;

/// Everything dependents know about the device, replaced as a whole after
/// every refresh.
#[derive(Debug, Clone, Default)]
pub struct CoordinatorState {
    /// Last successfully fetched snapshot, kept across failed refreshes
    pub data: Option<Arc<MinerSnapshot>>,
    /// Whether the last refresh found a miner at the configured address
    pub miner_present: bool,
    pub last_update_success: bool,
    pub last_success: Option<SystemTime>,
    /// Failed refreshes since the last successful one
    pub failure_count: u32,
    pub last_error: Option<UpdateFailed>,
}

impl CoordinatorState {
    pub fn available(&self) -> bool {
        self.miner_present && self.last_update_success
    }

    fn record(&mut self, result: &Result<Arc<MinerSnapshot>, UpdateFailed>) {
        match result {
            Ok(snapshot) => {
                self.data = Some(Arc::clone(snapshot));
                self.miner_present = true;
                self.last_update_success = true;
                self.last_success = Some(SystemTime::now());
                self.failure_count = 0;
                self.last_error = None;
            }
            Err(err) => {
                self.miner_present = matches!(err, UpdateFailed::Fetch { .. });
                self.last_update_success = false;
                self.failure_count = self.failure_count.saturating_add(1);
                self.last_error = Some(err.clone());
            }
        }
    }
}

pub struct MinerCoordinator {
    entry: MinerEntry,
    config: CoordinatorConfig,
    resolver: Arc<dyn MinerResolver>,
    state: watch::Sender<CoordinatorState>,
}

impl MinerCoordinator {
    /// Fails if the timings in `config` would spin the refresh loop.
    pub fn new(
        entry: MinerEntry,
        config: CoordinatorConfig,
        resolver: Arc<dyn MinerResolver>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let (state, _) = watch::channel(CoordinatorState::default());
        Ok(Self {
            entry,
            config,
            resolver,
            state,
        })
    }

    pub fn entry(&self) -> &MinerEntry {
        &self.entry
    }

    pub fn subscribe(&self) -> watch::Receiver<CoordinatorState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> CoordinatorState {
        self.state.borrow().clone()
    }

    pub fn data(&self) -> Option<Arc<MinerSnapshot>> {
        self.state.borrow().data.clone()
    }

    pub fn available(&self) -> bool {
        self.state.borrow().available()
    }

    /// Runs one refresh cycle and publishes its outcome.
    pub async fn refresh(&self) -> Result<Arc<MinerSnapshot>, UpdateFailed> {
        let was_failing = {
            let state = self.state.borrow();
            state.failure_count > 0
        };

        let result = self.update_data().await.map(Arc::new);
        match &result {
            Ok(_) if was_failing => info!(ip = %self.entry.ip, "Fetching miner data recovered"),
            Ok(_) => {}
            Err(err @ UpdateFailed::Offline { .. }) => debug!(ip = %self.entry.ip, "{err}"),
            Err(err) => error!(ip = %self.entry.ip, error = ?err, "{err}"),
        }

        self.state.send_modify(|state| state.record(&result));
        result
    }

    /// The refresh that has to succeed before any sensor can be created.
    pub async fn first_refresh(&self) -> Result<Arc<MinerSnapshot>, SetupError> {
        self.refresh().await.map_err(SetupError::NotReady)
    }

    /// Looks the miner up and prepares it for a fetch.
    async fn get_miner(&self) -> Result<Box<dyn MinerHandle>, UpdateFailed> {
        let ip = self.entry.ip;
        let mut miner = self
            .resolver
            .get_miner(ip)
            .await
            .map_err(|source| UpdateFailed::Resolve { ip, source })?
            .ok_or(UpdateFailed::Offline { ip })?;

        apply_credentials(miner.as_mut(), &self.entry);
        Ok(miner)
    }

    async fn update_data(&self) -> Result<MinerSnapshot, UpdateFailed> {
        let miner = self.get_miner().await?;
        let ip = miner.ip();
        debug!(%ip, "Found miner");

        let data = miner
            .get_data(MONITORED_FIELDS)
            .await
            .map_err(|source| UpdateFailed::Fetch { ip, source })?;
        debug!(%ip, ?data, "Got data");

        Ok(MinerSnapshot::from_data(ip, &data))
    }

    /// Starts the refresh loop on the current runtime.
    ///
    /// The first scheduled refresh happens one interval from now; call
    /// [`first_refresh`](Self::first_refresh) beforehand to have data
    /// right away.
    pub fn spawn(self: Arc<Self>, cancel: CancellationToken) -> CoordinatorHandle {
        let (refresh_tx, refresh_rx) = mpsc::channel(REFRESH_REQUEST_CAPACITY);
        let state_rx = self.subscribe();
        let task = tokio::spawn(self.run(refresh_rx, cancel.clone()));
        CoordinatorHandle {
            refresh_tx,
            state_rx,
            cancel,
            task,
        }
    }

    async fn run(self: Arc<Self>, mut requests: mpsc::Receiver<()>, cancel: CancellationToken) {
        trace!(ip = %self.entry.ip, "Coordinator task started.");

        let mut debouncer = Debouncer::new(
            self.config.request_refresh_cooldown,
            self.config.request_refresh_immediate,
        );
        let mut next_tick = Instant::now() + self.config.update_interval;
        let mut requests_open = true;

        loop {
            let window_end = debouncer.deadline();
            let due = tokio::select! {
                _ = cancel.cancelled() => break,

                _ = time::sleep_until(next_tick) => true,

                _ = time::sleep_until(window_end.unwrap_or(next_tick)), if window_end.is_some() => {
                    debouncer.fire()
                }

                request = requests.recv(), if requests_open => match request {
                    Some(()) => debouncer.request() == RequestOutcome::Execute,
                    None => {
                        requests_open = false;
                        false
                    }
                },
            };

            if !due {
                continue;
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = self.refresh() => {}
            }
            next_tick = Instant::now() + self.config.update_interval;
        }

        trace!(ip = %self.entry.ip, "Coordinator task stopped.");
    }
}

/// Control side of a running coordinator loop.
pub struct CoordinatorHandle {
    refresh_tx: mpsc::Sender<()>,
    state_rx: watch::Receiver<CoordinatorState>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl CoordinatorHandle {
    /// Asks for a refresh outside the schedule. Bursts are coalesced.
    pub fn request_refresh(&self) {
        if let Err(err) = self.refresh_tx.try_send(()) {
            trace!("Refresh request dropped: {err}");
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<CoordinatorState> {
        self.state_rx.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops the loop, abandoning any refresh in flight.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(err) = self.task.await {
            error!("Coordinator task failed: {err}");
        }
    }
}
