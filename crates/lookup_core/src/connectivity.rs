//! Network reachability sources the controller subscribes to.

use std::time::Duration;

use tokio::{
    net::TcpStream,
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{info, warn};

pub trait ConnectivityMonitor: Send + Sync {
    fn subscribe(&self) -> watch::Receiver<bool>;

    fn is_connected(&self) -> bool {
        *self.subscribe().borrow()
    }
}

/// Reachability pushed in from outside, e.g. by a platform network callback.
pub struct ManualConnectivity {
    tx: watch::Sender<bool>,
}

impl ManualConnectivity {
    pub fn new(is_connected: bool) -> Self {
        let (tx, _) = watch::channel(is_connected);
        Self { tx }
    }

    /// Returns whether subscribers were notified.
    pub fn set_connected(&self, is_connected: bool) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == is_connected {
                return false;
            }
            *current = is_connected;
            true
        })
    }
}

impl ConnectivityMonitor for ManualConnectivity {
    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// `host:port` opened over TCP to decide reachability.
    pub addr: String,
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            addr: "api.dictionaryapi.dev:443".into(),
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(3),
        }
    }
}

impl ProbeOptions {
    /// Replaces zero durations with the defaults; a zero interval cannot tick.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.interval.is_zero() {
            warn!(
                default_ms = defaults.interval.as_millis() as u64,
                "zero probe interval, using default"
            );
            self.interval = defaults.interval;
        }
        if self.timeout.is_zero() {
            warn!(
                default_ms = defaults.timeout.as_millis() as u64,
                "zero probe timeout, using default"
            );
            self.timeout = defaults.timeout;
        }
        self
    }
}

/// Periodically opens a TCP connection and publishes reachability changes.
///
/// Starts optimistic (connected) and corrects itself on the first probe, which
/// runs immediately. The probe task stops when this value is dropped.
pub struct ProbeConnectivity {
    rx: watch::Receiver<bool>,
    probed: watch::Receiver<bool>,
    task: JoinHandle<()>,
}

impl ProbeConnectivity {
    pub fn spawn(options: ProbeOptions) -> Self {
        let (tx, rx) = watch::channel(true);
        let (probed_tx, probed) = watch::channel(false);
        let task = tokio::spawn(run_probe_loop(options.sanitized(), tx, probed_tx));
        Self { rx, probed, task }
    }

    /// Waits for the first probe to finish and returns its reachability.
    pub async fn first_probe(&self) -> bool {
        let mut probed = self.probed.clone();
        let _ = probed.wait_for(|done| *done).await;
        *self.rx.borrow()
    }
}

impl ConnectivityMonitor for ProbeConnectivity {
    fn subscribe(&self) -> watch::Receiver<bool> {
        let mut rx = self.rx.clone();
        rx.mark_unchanged();
        rx
    }
}

impl Drop for ProbeConnectivity {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_probe_loop(
    options: ProbeOptions,
    tx: watch::Sender<bool>,
    probed_tx: watch::Sender<bool>,
) {
    let mut ticker = time::interval(options.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let reachable = probe_once(&options.addr, options.timeout).await;
        let changed = tx.send_if_modified(|current| {
            if *current == reachable {
                return false;
            }
            *current = reachable;
            true
        });
        if changed {
            info!(addr = %options.addr, reachable, "connectivity changed");
        }
        probed_tx.send_replace(true);
    }
}

pub async fn probe_once(addr: &str, timeout: Duration) -> bool {
    matches!(time::timeout(timeout, TcpStream::connect(addr)).await, Ok(Ok(_)))
}

#[cfg(test)]
#[path = "tests/connectivity_tests.rs"]
mod tests;
