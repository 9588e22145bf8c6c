use crate::view_model::{AppViewModel, JobRowView, RatedJobView};
use crate::{Batch, BatchStore, Job, JobId, Stars};

/// Whole-session state driven by [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    batch: BatchStore,
    query: String,
    loading_batch: bool,
    last_error: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch(&self) -> &BatchStore {
        &self.batch
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading_batch(&self) -> bool {
        self.loading_batch
    }

    pub fn view(&self) -> AppViewModel {
        let batch = &self.batch;
        let jobs = batch
            .jobs()
            .iter()
            .map(|job| RatedJobView {
                row: row_view(job, batch.is_selected(job.id)),
                stars: batch.rating(job.id).map(Stars::get),
            })
            .collect();
        let eligible = batch
            .eligible()
            .into_iter()
            .map(|job| row_view(job, batch.is_selected(job.id)))
            .collect();
        let chosen = batch
            .chosen()
            .into_iter()
            .map(|job| row_view(job, true))
            .collect();

        AppViewModel {
            query: self.query.clone(),
            batch_id: batch.batch_id(),
            loading_batch: self.loading_batch,
            jobs,
            progress: batch.progress(),
            review_ready: batch.all_rated(),
            eligible,
            selected: batch.selected().to_vec(),
            chosen,
            can_prepare: !batch.selected().is_empty(),
            last_error: self.last_error.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a re-render is pending and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns false when the query is unchanged.
    pub(crate) fn set_query(&mut self, query: String) -> bool {
        if self.query == query {
            return false;
        }
        self.query = query;
        self.mark_dirty();
        true
    }

    pub(crate) fn begin_batch_load(&mut self) {
        self.loading_batch = true;
        self.mark_dirty();
    }

    pub(crate) fn apply_batch(&mut self, batch: Batch) {
        self.batch.set_batch(batch);
        self.finish_batch_load(None);
    }

    pub(crate) fn apply_jobs(&mut self, jobs: Vec<Job>) {
        self.batch.set_jobs(jobs);
        self.finish_batch_load(None);
    }

    pub(crate) fn apply_load_failure(&mut self, message: String) {
        self.finish_batch_load(Some(message));
    }

    pub(crate) fn rate(&mut self, job_id: JobId, stars: Stars) {
        self.batch.rate(job_id, stars);
        self.mark_dirty();
    }

    pub(crate) fn replace_selection(&mut self, ids: Vec<JobId>) {
        self.batch.set_selected(ids);
        self.mark_dirty();
    }

    fn finish_batch_load(&mut self, error: Option<String>) {
        self.loading_batch = false;
        self.last_error = error;
        self.mark_dirty();
    }
}

fn row_view(job: &Job, selected: bool) -> JobRowView {
    JobRowView {
        job_id: job.id,
        title: job.title.clone(),
        company: job.company.clone(),
        location: job.location.clone(),
        url: job.url.clone(),
        selected,
    }
}
