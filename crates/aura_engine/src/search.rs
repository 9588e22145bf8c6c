//! Debounced, cancellable search client.
//!
//! The client owns two single-occupant slots: the pending debounce timer and
//! the active request. Both hold a [`CancellationToken`]; installing a new
//! occupant cancels the previous one. Slot changes and visible-state commits
//! happen under the same lock, so a request whose token was cancelled can
//! never write results, errors or the loading flag.
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use aura_core::{can_search, ScoredJob, SearchState};
use aura_logging::{aura_debug, aura_warn};
use tokio::runtime::Handle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::engine::EventSink;
use crate::{ApiError, EngineEvent, JobsApi};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchEndpoint {
    /// `GET /rank`: rank a candidate pool and return the top entries.
    #[default]
    Rank,
    /// `GET /search`: plain similarity search returning `top` entries.
    Semantic,
}

#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Input must be stable this long before a debounced search fires.
    pub quiescence: Duration,
    /// Candidate pool size (`k`).
    pub candidate_pool: usize,
    /// Number of ranked results returned (`top`).
    pub top: usize,
    pub endpoint: SearchEndpoint,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            quiescence: Duration::from_millis(500),
            candidate_pool: 50,
            top: 10,
            endpoint: SearchEndpoint::Rank,
        }
    }
}

#[derive(Default)]
struct Slots {
    state: SearchState,
    pending_timer: Option<CancellationToken>,
    active_request: Option<CancellationToken>,
}

struct Shared {
    api: Arc<dyn JobsApi>,
    settings: SearchSettings,
    runtime: Handle,
    sink: Arc<dyn EventSink>,
    slots: Mutex<Slots>,
}

#[derive(Clone)]
pub struct SearchClient {
    shared: Arc<Shared>,
}

impl SearchClient {
    pub fn new(
        api: Arc<dyn JobsApi>,
        settings: SearchSettings,
        runtime: Handle,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                api,
                settings,
                runtime,
                sink,
                slots: Mutex::new(Slots::default()),
            }),
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.shared.settings
    }

    /// Query text changed. Rearms the debounce timer; the search runs with
    /// the latest value once input has been stable for the quiescence window.
    pub fn input_changed(&self, query: impl Into<String>) {
        let query = query.into();
        let timer = CancellationToken::new();
        {
            let mut slots = self.shared.lock_slots();
            if let Some(previous) = slots.pending_timer.replace(timer.clone()) {
                previous.cancel();
            }
        }

        let shared = Arc::clone(&self.shared);
        let delay = shared.settings.quiescence;
        self.shared.runtime.spawn(async move {
            tokio::select! {
                _ = timer.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let mut slots = shared.lock_slots();
                    // Rearmed while we were waiting for the lock.
                    if timer.is_cancelled() {
                        return;
                    }
                    slots.pending_timer = None;
                    shared.run_locked(&mut slots, query);
                }
            }
        });
    }

    /// Manual search: drops any pending debounce and runs right away.
    pub fn search_now(&self, query: impl Into<String>) {
        let mut slots = self.shared.lock_slots();
        if let Some(timer) = slots.pending_timer.take() {
            timer.cancel();
        }
        self.shared.run_locked(&mut slots, query.into());
    }

    /// Drops the pending timer and the in-flight request without replacement.
    pub fn cancel(&self) {
        let mut slots = self.shared.lock_slots();
        if let Some(timer) = slots.pending_timer.take() {
            timer.cancel();
        }
        if let Some(request) = slots.active_request.take() {
            request.cancel();
            slots.state.abandon();
            self.shared.publish(&slots);
        }
    }

    pub fn snapshot(&self) -> SearchState {
        self.shared.lock_slots().state.clone()
    }

    pub fn has_pending_timer(&self) -> bool {
        self.shared.lock_slots().pending_timer.is_some()
    }
}

impl Shared {
    fn lock_slots(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, slots: &Slots) {
        self.sink
            .emit(EngineEvent::SearchUpdated(slots.state.clone()));
    }

    /// Must be called with the slot lock held.
    fn run_locked(self: &Arc<Self>, slots: &mut Slots, query: String) {
        if let Some(previous) = slots.active_request.take() {
            aura_debug!("Superseding in-flight search");
            previous.cancel();
        }

        if !can_search(&query) {
            slots.state.clear(&query);
            self.publish(slots);
            return;
        }

        let token = CancellationToken::new();
        slots.active_request = Some(token.clone());
        slots.state.begin(&query);
        self.publish(slots);

        let shared = Arc::clone(self);
        self.runtime.spawn(async move {
            shared.execute(query, token).await;
        });
    }

    async fn execute(self: Arc<Self>, query: String, token: CancellationToken) {
        let started = Instant::now();
        let result = tokio::select! {
            _ = token.cancelled() => {
                aura_debug!("Search for {:?} cancelled", query);
                return;
            }
            result = self.call(&query) => result,
        };
        let took = started.elapsed();

        let mut slots = self.lock_slots();
        if token.is_cancelled() {
            return;
        }
        slots.active_request = None;
        match result {
            Ok(results) => {
                aura_debug!(
                    "Search for {:?} returned {} results in {:?}",
                    query,
                    results.len(),
                    took
                );
                slots.state.succeed(results, took);
            }
            Err(err) => {
                aura_warn!("Search for {:?} failed: {}", query, err);
                slots.state.fail(err.to_string());
            }
        }
        self.publish(&slots);
    }

    async fn call(&self, query: &str) -> Result<Vec<ScoredJob>, ApiError> {
        let settings = &self.settings;
        match settings.endpoint {
            SearchEndpoint::Rank => {
                self.api
                    .rank(query, settings.candidate_pool, settings.top)
                    .await
            }
            SearchEndpoint::Semantic => self.api.search(query, settings.top).await,
        }
    }
}
