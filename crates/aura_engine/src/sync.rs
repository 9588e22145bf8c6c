//! Batch loading and fire-and-forget rating persistence.
use std::sync::Arc;

use aura_core::{Batch, Job, RatingUpdate};
use aura_logging::{aura_debug, aura_info, aura_warn};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::{ApiError, JobsApi};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedJobs {
    Batch(Batch),
    /// Plain job listing, used when there is no batch to show.
    Listing(Vec<Job>),
}

/// Loads the jobs for the dashboard.
///
/// Signed-in users get their current batch; if that fails the plain listing
/// is used instead. Anonymous sessions go straight to the listing. When both
/// calls fail the first error is returned.
pub async fn load_batch(api: &dyn JobsApi) -> Result<LoadedJobs, ApiError> {
    if !api.is_authenticated() {
        return api.list_jobs(None).await.map(LoadedJobs::Listing);
    }

    match api.current_batch().await {
        Ok(batch) => {
            aura_info!("Loaded batch {} with {} jobs", batch.id, batch.jobs.len());
            Ok(LoadedJobs::Batch(batch))
        }
        Err(err) => {
            aura_warn!("Current batch unavailable ({}); falling back to job listing", err);
            match api.list_jobs(None).await {
                Ok(jobs) => Ok(LoadedJobs::Listing(jobs)),
                Err(fallback) => {
                    aura_warn!("Job listing fallback failed: {}", fallback);
                    Err(err)
                }
            }
        }
    }
}

pub async fn create_batch(api: &dyn JobsApi) -> Result<Batch, ApiError> {
    let batch = api.create_batch().await?;
    aura_info!("Created batch {} with {} jobs", batch.id, batch.jobs.len());
    Ok(batch)
}

/// Single remote write of a rating. Never retried.
pub async fn persist_rating(api: &dyn JobsApi, rating: RatingUpdate) -> Result<(), ApiError> {
    api.post_rating(rating).await
}

/// Persists a rating in the background. Failures are logged and dropped;
/// the locally committed rating is left as is. Anonymous sessions skip the
/// call entirely.
pub fn spawn_persist_rating(
    runtime: &Handle,
    api: Arc<dyn JobsApi>,
    rating: RatingUpdate,
) -> JoinHandle<()> {
    runtime.spawn(async move {
        if !api.is_authenticated() {
            aura_debug!("Rating for job {} kept local (anonymous)", rating.job_id);
            return;
        }
        match persist_rating(api.as_ref(), rating).await {
            Ok(()) => aura_debug!(
                "Persisted rating job_id={} stars={}",
                rating.job_id,
                rating.stars.get()
            ),
            Err(err) => aura_warn!("Rating for job {} not persisted: {}", rating.job_id, err),
        }
    })
}
