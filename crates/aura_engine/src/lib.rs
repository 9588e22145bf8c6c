//! AURA engine: HTTP client for the jobs API and effect execution.
mod api;
mod engine;
mod search;
mod sync;
mod types;

pub use api::{ClientSettings, JobsApi, ReqwestJobsApi, DEFAULT_API_URL};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use search::{SearchClient, SearchEndpoint, SearchSettings};
pub use sync::{create_batch, load_batch, persist_rating, spawn_persist_rating, LoadedJobs};
pub use types::{ApiError, EngineError, EngineEvent, FailureKind, HealthStatus};
