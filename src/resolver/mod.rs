//! Resolution orchestrator
//!
//! `Resolver` turns a coordinate into a sequence of `ResolutionState`
//! transitions: `Loading` is published as soon as a request is accepted, and
//! exactly one terminal state (`Success` or `Failed`) follows once the
//! provider answers.
//!
//! A new request supersedes the one in flight. The stale task is aborted, and
//! if it finishes anyway its result is dropped: every request carries a
//! sequence number that must still be current, checked under the same lock
//! that guards the published state.

pub mod state;

pub use state::ResolutionState;

use crate::coord::Coordinates;
use crate::error::Result;
use crate::geocode::{AddressRecord, GeocodeProvider};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Default maximum number of candidates asked from a provider
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// State shared between the resolver and its provider tasks
#[derive(Default)]
struct Shared {
    state: ResolutionState,
    sequence: u64,
    in_flight: Option<JoinHandle<()>>,
    subscribers: Vec<mpsc::UnboundedSender<ResolutionState>>,
}

impl Shared {
    /// Replace the current state and fan it out, dropping closed subscribers
    fn publish(&mut self, state: ResolutionState) {
        debug!(state = state.name(), sequence = self.sequence, "Publishing resolution state");
        self.subscribers.retain(|tx| tx.send(state.clone()).is_ok());
        self.state = state;
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Publish a provider outcome if its request is still the latest one
///
/// Returns whether the outcome was published.
fn complete(shared: &Mutex<Shared>, sequence: u64, outcome: Result<Vec<AddressRecord>>) -> bool {
    let mut shared = lock(shared);

    if shared.sequence != sequence {
        debug!(
            sequence,
            latest = shared.sequence,
            "Discarding result of superseded request"
        );
        return false;
    }

    match &outcome {
        Ok(records) => info!(sequence, records = records.len(), "Resolution succeeded"),
        Err(e) => warn!(sequence, "Resolution failed: {}", e),
    }

    shared.in_flight = None;
    shared.publish(ResolutionState::from(outcome));
    true
}

/// Ordered stream of state transitions
///
/// Receives every state published after the subscription was created.
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<ResolutionState>,
}

impl Subscription {
    /// Wait for the next transition; `None` once the resolver is gone
    pub async fn recv(&mut self) -> Option<ResolutionState> {
        self.rx.recv().await
    }

    /// Take the next transition if one is already queued
    pub fn try_recv(&mut self) -> Option<ResolutionState> {
        self.rx.try_recv().ok()
    }

    /// Skip ahead to the next `Success` or `Failed`
    pub async fn next_terminal(&mut self) -> Option<ResolutionState> {
        while let Some(state) = self.recv().await {
            if state.is_terminal() {
                return Some(state);
            }
        }
        None
    }
}

/// Drives provider calls and publishes their lifecycle
pub struct Resolver<P> {
    provider: Arc<P>,
    shared: Arc<Mutex<Shared>>,
    max_results: usize,
}

impl<P: GeocodeProvider + 'static> Resolver<P> {
    /// Create a resolver asking for up to `DEFAULT_MAX_RESULTS` candidates
    pub fn new(provider: P) -> Self {
        Self::with_max_results(provider, DEFAULT_MAX_RESULTS)
    }

    pub fn with_max_results(provider: P, max_results: usize) -> Self {
        Self {
            provider: Arc::new(provider),
            shared: Arc::default(),
            max_results: max_results.max(1),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// The latest published state
    pub fn current_state(&self) -> ResolutionState {
        lock(&self.shared).state.clone()
    }

    /// Register for every transition from now on
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.shared).subscribers.push(tx);
        Subscription { rx }
    }

    /// Register a callback for every transition from now on
    ///
    /// The callback runs on a background task, in publish order. The task
    /// ends when the resolver is dropped.
    pub fn observe<F>(&self, observer: F) -> JoinHandle<()>
    where
        F: Fn(&ResolutionState) + Send + 'static,
    {
        let mut subscription = self.subscribe();
        tokio::spawn(async move {
            while let Some(state) = subscription.recv().await {
                observer(&state);
            }
        })
    }

    /// Start resolving `coordinate`
    ///
    /// Publishes `Loading` before returning and runs the provider on a tokio
    /// task. Returns the request's sequence number. An out-of-range
    /// coordinate is rejected with `Error::Validation` and leaves the state
    /// untouched.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn request(&self, coordinate: Coordinates) -> Result<u64> {
        coordinate.validate()?;

        let mut shared = lock(&self.shared);
        shared.sequence += 1;
        let sequence = shared.sequence;

        if let Some(previous) = shared.in_flight.take() {
            if !previous.is_finished() {
                debug!(sequence, "Superseding in-flight request");
            }
            previous.abort();
        }

        info!(sequence, %coordinate, provider = self.provider.name(), "Resolving coordinate");
        shared.publish(ResolutionState::Loading);

        let provider = Arc::clone(&self.provider);
        let task_shared = Arc::clone(&self.shared);
        let max_results = self.max_results;

        shared.in_flight = Some(tokio::spawn(async move {
            let outcome = provider.resolve(coordinate, max_results).await;
            complete(&task_shared, sequence, outcome);
        }));

        Ok(sequence)
    }

    /// Entry point for a map tap or click
    pub fn on_tap_coordinate(&self, coordinate: Coordinates) -> Result<u64> {
        self.request(coordinate)
    }
}

impl<P> Drop for Resolver<P> {
    fn drop(&mut self) {
        if let Some(task) = lock(&self.shared).in_flight.take() {
            task.abort();
        }
    }
}
