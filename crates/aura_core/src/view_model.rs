use crate::{BatchId, BatchProgress, JobId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub query: String,
    pub batch_id: Option<BatchId>,
    pub loading_batch: bool,
    /// Dashboard rows: every job of the batch with its rating.
    pub jobs: Vec<RatedJobView>,
    pub progress: BatchProgress,
    /// Every job in the batch has been rated.
    pub review_ready: bool,
    /// Review rows: jobs rated at or above the threshold.
    pub eligible: Vec<JobRowView>,
    pub selected: Vec<JobId>,
    /// Application rows: selected jobs of the batch.
    pub chosen: Vec<JobRowView>,
    pub can_prepare: bool,
    pub last_error: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub job_id: JobId,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub url: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatedJobView {
    pub row: JobRowView,
    pub stars: Option<u8>,
}
