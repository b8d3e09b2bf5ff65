//! Async owner of a [`LookupState`]: issues lookups, folds their outcomes back
//! in, and broadcasts every applied change.

use std::{sync::Arc, time::Duration};

use shared::{domain::WordResult, error::LookupError};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
    time,
};
use tracing::{debug, info, warn};

use crate::{
    connectivity::ConnectivityMonitor,
    service::LookupService,
    state::{DisplayState, LookupRequest, LookupState},
};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Lookups running longer than this resolve as transport failures.
    pub lookup_timeout: Duration,
    /// Abort the in-flight task when its query is superseded. Superseded
    /// responses are discarded either way.
    pub cancel_superseded: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(10),
            cancel_superseded: true,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ControllerEvent {
    StateChanged(LookupState),
}

pub struct LookupController {
    service: Arc<dyn LookupService>,
    options: ControllerOptions,
    state: Mutex<LookupState>,
    inflight: Mutex<Option<JoinHandle<()>>>,
    events: broadcast::Sender<ControllerEvent>,
}

impl LookupController {
    pub fn new(service: Arc<dyn LookupService>) -> Arc<Self> {
        Self::with_options(service, ControllerOptions::default())
    }

    pub fn with_options(service: Arc<dyn LookupService>, options: ControllerOptions) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Arc::new(Self {
            service,
            options,
            state: Mutex::new(LookupState::new()),
            inflight: Mutex::new(None),
            events,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> LookupState {
        self.state.lock().await.clone()
    }

    pub async fn display_state(&self) -> DisplayState {
        self.state.lock().await.display_state()
    }

    pub async fn set_query(self: &Arc<Self>, text: impl Into<String>) {
        let mut state = self.state.lock().await;
        let request = state.set_query(text);
        self.publish(&state);

        let mut inflight = self.inflight.lock().await;
        if let Some(previous) = inflight.take() {
            if self.options.cancel_superseded {
                previous.abort();
            }
        }

        let Some(request) = request else {
            debug!("query cleared");
            return;
        };
        info!(query = %request.query, "issuing lookup");
        let controller = Arc::clone(self);
        *inflight = Some(tokio::spawn(async move {
            controller.run_lookup(request).await;
        }));
    }

    /// Returns `false` when the response was stale and discarded.
    pub async fn on_lookup_succeeded(&self, for_query: &str, result: WordResult) -> bool {
        let mut state = self.state.lock().await;
        if !state.on_lookup_succeeded(for_query, result) {
            debug!(query = for_query, current = state.query(), "discarding stale lookup result");
            return false;
        }
        self.publish(&state);
        true
    }

    /// Returns `false` when the failure was stale and discarded.
    pub async fn on_lookup_failed(&self, for_query: &str, reason: LookupError) -> bool {
        let mut state = self.state.lock().await;
        if !state.on_lookup_failed(for_query, &reason) {
            debug!(query = for_query, current = state.query(), "discarding stale lookup failure");
            return false;
        }
        if reason.is_not_found() {
            debug!(query = for_query, "no definitions found");
        } else {
            warn!(query = for_query, error = %reason, "lookup failed");
        }
        self.publish(&state);
        true
    }

    /// Leaves in-flight lookups alone; only the overlay reacts.
    pub async fn on_connectivity_changed(&self, is_connected: bool) -> bool {
        let mut state = self.state.lock().await;
        if !state.on_connectivity_changed(is_connected) {
            return false;
        }
        info!(is_connected, "connectivity status updated");
        self.publish(&state);
        true
    }

    /// Forwards every reachability change from `monitor` until it closes.
    pub fn follow_connectivity(
        self: &Arc<Self>,
        monitor: &dyn ConnectivityMonitor,
    ) -> JoinHandle<()> {
        let mut rx = monitor.subscribe();
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            let initial = *rx.borrow_and_update();
            controller.on_connectivity_changed(initial).await;
            while rx.changed().await.is_ok() {
                let is_connected = *rx.borrow_and_update();
                controller.on_connectivity_changed(is_connected).await;
            }
            debug!("connectivity monitor closed");
        })
    }

    /// Waits until no lookup is pending for the current query.
    pub async fn settled(&self) -> LookupState {
        let mut events = self.subscribe();
        let snapshot = self.snapshot().await;
        if !snapshot.is_loading() {
            return snapshot;
        }
        loop {
            match events.recv().await {
                Ok(ControllerEvent::StateChanged(state)) if !state.is_loading() => return state,
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(_)) => {
                    let snapshot = self.snapshot().await;
                    if !snapshot.is_loading() {
                        return snapshot;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => return self.snapshot().await,
            }
        }
    }

    async fn run_lookup(&self, request: LookupRequest) {
        let outcome =
            match time::timeout(self.options.lookup_timeout, self.service.lookup(&request.query))
                .await
            {
                Ok(outcome) => outcome,
                Err(_) => Err(LookupError::transport(format!(
                    "lookup timed out after {}ms",
                    self.options.lookup_timeout.as_millis()
                ))),
            };

        match outcome {
            Ok(result) => {
                self.on_lookup_succeeded(&request.query, result).await;
            }
            Err(reason) => {
                self.on_lookup_failed(&request.query, reason).await;
            }
        }
    }

    fn publish(&self, state: &LookupState) {
        let _ = self
            .events
            .send(ControllerEvent::StateChanged(state.clone()));
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
