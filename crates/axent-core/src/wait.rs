//! Polling waits for element state.
//!
//! [`WaitSpec`] describes one wait: the state to probe, the expected value,
//! a timeout, the poll cadence, and whether the immediate-check fast path
//! is suppressed. [`Element::wait_for`] runs it. Timeout expiry is a normal
//! outcome reported as `false`, never an error; backend failures during a
//! probe count as "condition not met" and polling continues.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, debug_span, Instrument};

use crate::config::AxentConfig;
use crate::element::{Element, ElementState};

/// Default maximum time to wait for a state.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default interval between state probes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Parameters for one state wait.
///
/// The default spec waits up to 5 seconds for the element to exist,
/// probing every 100 ms, with the fast path enabled.
#[derive(Debug, Clone, Copy)]
pub struct WaitSpec {
    /// The state to probe.
    pub state: ElementState,
    /// The value the state must reach.
    pub expected: bool,
    /// Maximum time to wait before reporting `false`.
    pub timeout: Duration,
    /// Suppress the immediate-check fast path and always poll.
    ///
    /// The fast path returns as soon as the state already matches, which
    /// races against a UI still settling: the state can flip right after
    /// the check. Slowed waits trade latency for a full poll interval of
    /// confirmation.
    pub slowed: bool,
    /// Interval between probes on the polling path.
    pub poll_interval: Duration,
}

impl Default for WaitSpec {
    fn default() -> Self {
        Self {
            state: ElementState::Exists,
            expected: true,
            timeout: DEFAULT_TIMEOUT,
            slowed: false,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl WaitSpec {
    /// A spec with the default timeout and cadence from a loaded config.
    pub fn from_config(config: &AxentConfig) -> Self {
        Self {
            timeout: Duration::from_millis(config.default_timeout_ms),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            ..Self::default()
        }
    }

    /// Sets the state to probe.
    pub fn state(mut self, state: ElementState) -> Self {
        self.state = state;
        self
    }

    /// Sets the value the state must reach.
    pub fn expected(mut self, expected: bool) -> Self {
        self.expected = expected;
        self
    }

    /// Sets the maximum time to wait.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Suppresses the immediate-check fast path.
    pub fn slowed(mut self) -> Self {
        self.slowed = true;
        self
    }

    /// Sets the interval between probes.
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

impl Element {
    /// Waits for a state to reach its expected value.
    ///
    /// Unless the spec is slowed, one immediate probe runs first and a
    /// match returns `true` without sleeping. Otherwise the polling loop
    /// probes every `poll_interval` until the state matches (`true`) or
    /// `timeout` has elapsed (`false`). Probe errors are logged and treated
    /// as "not yet"; a backend that never recovers ends the wait by
    /// timeout.
    pub async fn wait_for(&self, spec: WaitSpec) -> bool {
        let span = debug_span!(
            "wait_for",
            selector = %self.selector().value,
            state = spec.state.name(),
            expected = spec.expected,
        );
        async move {
            if !spec.slowed && self.probe(spec).await {
                return true;
            }

            let start = Instant::now();
            loop {
                if start.elapsed() >= spec.timeout {
                    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "wait timed out");
                    return false;
                }
                sleep(spec.poll_interval).await;
                if self.probe(spec).await {
                    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "wait satisfied");
                    return true;
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Waits for a state to become `true` with the default timeout and
    /// cadence.
    pub async fn wait_until(&self, state: ElementState) -> bool {
        self.wait_for(WaitSpec::default().state(state)).await
    }

    async fn probe(&self, spec: WaitSpec) -> bool {
        match self.state(spec.state).await {
            Ok(value) => value == spec.expected,
            Err(error) => {
                debug!(%error, "state probe failed; treating as not met");
                false
            }
        }
    }
}
