use std::collections::BTreeMap;

use crate::review;
use crate::{Batch, BatchId, Job, JobId, Stars};

/// Rating progress over the current batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchProgress {
    pub rated: usize,
    pub total: usize,
    pub percent: u32,
}

/// Session state for the active job batch: jobs, star ratings and the
/// selection handed to application preparation.
///
/// Every write is synchronous; reads always see the latest write. The store
/// knows nothing about remote persistence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchStore {
    batch_id: Option<BatchId>,
    jobs: Vec<Job>,
    ratings: BTreeMap<JobId, Stars>,
    selected: Vec<JobId>,
}

impl BatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the batch with a server-side batch.
    pub fn set_batch(&mut self, batch: Batch) {
        self.batch_id = Some(batch.id);
        self.jobs = batch.jobs;
    }

    /// Replaces the batch wholesale. Ratings and selections for ids that are
    /// not part of the new batch are kept but no longer show up anywhere.
    pub fn set_jobs(&mut self, jobs: Vec<Job>) {
        self.batch_id = None;
        self.jobs = jobs;
    }

    /// Sets or overwrites the rating for `job_id`. Last write wins.
    pub fn rate(&mut self, job_id: JobId, stars: Stars) {
        self.ratings.insert(job_id, stars);
    }

    /// Replaces the selection list outright.
    pub fn set_selected(&mut self, ids: Vec<JobId>) {
        self.selected = ids;
    }

    pub fn batch_id(&self) -> Option<BatchId> {
        self.batch_id
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job(&self, job_id: JobId) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == job_id)
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn rating(&self, job_id: JobId) -> Option<Stars> {
        self.ratings.get(&job_id).copied()
    }

    pub fn ratings(&self) -> &BTreeMap<JobId, Stars> {
        &self.ratings
    }

    pub fn selected(&self) -> &[JobId] {
        &self.selected
    }

    pub fn is_selected(&self, job_id: JobId) -> bool {
        self.selected.contains(&job_id)
    }

    pub fn eligible(&self) -> Vec<&Job> {
        review::eligible(&self.jobs, &self.ratings)
    }

    pub fn chosen(&self) -> Vec<&Job> {
        review::chosen(&self.jobs, &self.selected)
    }

    /// Counts only ratings that belong to jobs of the current batch.
    pub fn progress(&self) -> BatchProgress {
        let total = self.jobs.len();
        let rated = self
            .jobs
            .iter()
            .filter(|job| self.ratings.contains_key(&job.id))
            .count();
        let percent = ((rated as f64 * 100.0) / total.max(1) as f64).round() as u32;
        BatchProgress {
            rated,
            total,
            percent,
        }
    }

    /// True when the batch is non-empty and every job in it has a rating.
    pub fn all_rated(&self) -> bool {
        let progress = self.progress();
        progress.total > 0 && progress.rated == progress.total
    }
}
