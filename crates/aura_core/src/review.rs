//! Review stage: rating threshold filter and selection toggling.
use std::collections::BTreeMap;

use crate::{Job, JobId, Stars};

/// Minimum star rating for a job to qualify for application preparation.
pub const ELIGIBLE_THRESHOLD: u8 = 4;

pub fn is_eligible(rating: Option<Stars>) -> bool {
    rating.is_some_and(|stars| stars.get() >= ELIGIBLE_THRESHOLD)
}

/// Jobs of the batch rated at or above [`ELIGIBLE_THRESHOLD`], in batch order.
///
/// Always computed from the inputs; nothing is cached between calls.
pub fn eligible<'a>(jobs: &'a [Job], ratings: &BTreeMap<JobId, Stars>) -> Vec<&'a Job> {
    jobs.iter()
        .filter(|job| is_eligible(ratings.get(&job.id).copied()))
        .collect()
}

/// Flips membership of `id`: removed if present, appended if absent.
pub fn toggle(selected: &[JobId], id: JobId) -> Vec<JobId> {
    if selected.contains(&id) {
        selected.iter().copied().filter(|x| *x != id).collect()
    } else {
        let mut next = Vec::with_capacity(selected.len() + 1);
        next.extend_from_slice(selected);
        next.push(id);
        next
    }
}

/// Jobs of the batch that are selected for application preparation, in batch order.
pub fn chosen<'a>(jobs: &'a [Job], selected: &[JobId]) -> Vec<&'a Job> {
    jobs.iter().filter(|job| selected.contains(&job.id)).collect()
}
