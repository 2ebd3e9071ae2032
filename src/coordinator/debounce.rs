//! Coalesces bursts of refresh requests.
//!
//! # State Machine
//!
//! ```text
//!              request() [immediate]
//!   Idle ───────────────────────────► Cooling { pending: false }
//!    ▲                                   │            ▲
//!    │ fire() [not pending]   request()  │            │ fire() [pending]
//!    │                                   ▼            │  (caller runs)
//!    └─────────────────────────── Cooling { pending: true }
//! ```
//!
//! The debouncer owns no timer. The owner sleeps until [`Debouncer::deadline`]
//! and then calls [`Debouncer::fire`].

use std::time::Duration;

use tokio::time::Instant;

/// What the caller should do with a refresh request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Run the refresh now.
    Execute,
    /// The refresh will run when the window closes at this instant.
    Scheduled(Instant),
    /// A refresh is already scheduled for this window; nothing to do.
    Coalesced,
}

#[derive(Debug)]
enum State {
    Idle,
    Cooling { until: Instant, pending: bool },
}

#[derive(Debug)]
pub struct Debouncer {
    cooldown: Duration,
    immediate: bool,
    state: State,
}

impl Debouncer {
    pub fn new(cooldown: Duration, immediate: bool) -> Self {
        Self {
            cooldown,
            immediate,
            state: State::Idle,
        }
    }

    pub fn request(&mut self) -> RequestOutcome {
        match self.state {
            State::Idle => {
                let until = Instant::now() + self.cooldown;
                self.state = State::Cooling {
                    until,
                    pending: !self.immediate,
                };
                if self.immediate {
                    RequestOutcome::Execute
                } else {
                    RequestOutcome::Scheduled(until)
                }
            }
            State::Cooling {
                until,
                pending: false,
            } => {
                self.state = State::Cooling {
                    until,
                    pending: true,
                };
                RequestOutcome::Scheduled(until)
            }
            State::Cooling { pending: true, .. } => RequestOutcome::Coalesced,
        }
    }

    /// When the current window closes, if one is open.
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            State::Idle => None,
            State::Cooling { until, .. } => Some(until),
        }
    }

    /// Closes the current window.
    ///
    /// Returns true if a request arrived during the window; the caller must
    /// then run the refresh, and a new window starts. Otherwise the
    /// debouncer goes back to idle.
    pub fn fire(&mut self) -> bool {
        match self.state {
            State::Cooling { pending: true, .. } => {
                self.state = State::Cooling {
                    until: Instant::now() + self.cooldown,
                    pending: false,
                };
                true
            }
            _ => {
                self.state = State::Idle;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time;

    use super::*;

    const COOLDOWN: Duration = Duration::from_secs(5);

    #[tokio::test(start_paused = true)]
    async fn first_request_runs_immediately() {
        let mut debouncer = Debouncer::new(COOLDOWN, true);
        assert_eq!(debouncer.request(), RequestOutcome::Execute);
        assert_eq!(debouncer.deadline(), Some(Instant::now() + COOLDOWN));
    }

    #[tokio::test(start_paused = true)]
    async fn burst_is_merged_into_one_trailing_run() {
        let mut debouncer = Debouncer::new(COOLDOWN, true);
        let start = Instant::now();
        assert_eq!(debouncer.request(), RequestOutcome::Execute);

        time::advance(Duration::from_secs(1)).await;
        assert_eq!(debouncer.request(), RequestOutcome::Scheduled(start + COOLDOWN));
        assert_eq!(debouncer.request(), RequestOutcome::Coalesced);
        assert_eq!(debouncer.request(), RequestOutcome::Coalesced);

        time::advance(Duration::from_secs(4)).await;
        assert!(debouncer.fire());
        // The trailing run opens a fresh window.
        assert_eq!(debouncer.deadline(), Some(Instant::now() + COOLDOWN));
    }

    #[tokio::test(start_paused = true)]
    async fn quiet_window_returns_to_idle() {
        let mut debouncer = Debouncer::new(COOLDOWN, true);
        debouncer.request();

        time::advance(COOLDOWN).await;
        assert!(!debouncer.fire());
        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.request(), RequestOutcome::Execute);
    }

    #[tokio::test(start_paused = true)]
    async fn not_immediate_defers_first_request() {
        let mut debouncer = Debouncer::new(COOLDOWN, false);
        let start = Instant::now();
        assert_eq!(debouncer.request(), RequestOutcome::Scheduled(start + COOLDOWN));
        assert_eq!(debouncer.request(), RequestOutcome::Coalesced);

        time::advance(COOLDOWN).await;
        assert!(debouncer.fire());
        assert!(!debouncer.fire());
    }

    #[tokio::test(start_paused = true)]
    async fn fire_when_idle_is_noop() {
        let mut debouncer = Debouncer::new(COOLDOWN, true);
        assert!(!debouncer.fire());
        assert_eq!(debouncer.deadline(), None);
    }
}
