use std::future::Future;
use std::sync::{mpsc, Arc};

use aura_core::{Effect, SearchState};
use aura_logging::{aura_info, aura_warn};
use tokio::runtime::Runtime;

use crate::search::{SearchClient, SearchSettings};
use crate::sync::{self, LoadedJobs};
use crate::{ClientSettings, EngineError, EngineEvent, JobsApi, ReqwestJobsApi};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Executes core effects on a private tokio runtime and reports results as
/// [`EngineEvent`]s, drained by the caller with [`EngineHandle::try_recv`].
pub struct EngineHandle {
    runtime: Runtime,
    api: Arc<dyn JobsApi>,
    search: SearchClient,
    event_tx: mpsc::Sender<EngineEvent>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(client: ClientSettings, search: SearchSettings) -> Result<Self, EngineError> {
        let api = ReqwestJobsApi::new(client)?;
        Self::with_api(Arc::new(api), search)
    }

    pub fn with_api(api: Arc<dyn JobsApi>, search: SearchSettings) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (event_tx, event_rx) = mpsc::channel();
        let sink = Arc::new(ChannelEventSink::new(event_tx.clone()));
        let search = SearchClient::new(api.clone(), search, runtime.handle().clone(), sink);

        Ok(Self {
            runtime,
            api,
            search,
            event_tx,
            event_rx,
        })
    }

    pub fn execute(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.execute_one(effect);
        }
    }

    fn execute_one(&self, effect: Effect) {
        match effect {
            Effect::ScheduleSearch { query } => self.search.input_changed(query),
            Effect::SearchNow { query } => self.search.search_now(query),
            Effect::PersistRating(rating) => {
                // Detached: the outcome never flows back into state.
                let _ = sync::spawn_persist_rating(self.runtime.handle(), self.api.clone(), rating);
            }
            Effect::LoadCurrentBatch => {
                let api = self.api.clone();
                let tx = self.event_tx.clone();
                self.runtime.spawn(async move {
                    let event = match sync::load_batch(api.as_ref()).await {
                        Ok(LoadedJobs::Batch(batch)) => EngineEvent::BatchLoaded(batch),
                        Ok(LoadedJobs::Listing(jobs)) => {
                            aura_info!("Loaded {} jobs from listing", jobs.len());
                            EngineEvent::JobsLoaded(jobs)
                        }
                        Err(err) => {
                            aura_warn!("Failed to load jobs: {}", err);
                            EngineEvent::BatchFailed(err)
                        }
                    };
                    let _ = tx.send(event);
                });
            }
            Effect::CreateBatch => {
                let api = self.api.clone();
                let tx = self.event_tx.clone();
                self.runtime.spawn(async move {
                    let event = match sync::create_batch(api.as_ref()).await {
                        Ok(batch) => EngineEvent::BatchLoaded(batch),
                        Err(err) => {
                            aura_warn!("Failed to create batch: {}", err);
                            EngineEvent::BatchFailed(err)
                        }
                    };
                    let _ = tx.send(event);
                });
            }
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn search_state(&self) -> SearchState {
        self.search.snapshot()
    }

    pub fn api(&self) -> Arc<dyn JobsApi> {
        self.api.clone()
    }

    /// Runs a one-off call (preferences, job details) to completion.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn shutdown(self) {
        self.search.cancel();
        self.runtime.shutdown_background();
    }
}
