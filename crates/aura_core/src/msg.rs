#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the search box (raw, not yet debounced).
    QueryEdited(String),
    /// User pressed Enter / the search button.
    SearchSubmitted,
    /// Dashboard opened; load the active batch unless one is already present.
    LoadBatchRequested,
    /// User asked for a fresh batch.
    NewBatchRequested,
    /// Engine delivered the user's batch.
    BatchLoaded(crate::Batch),
    /// Engine fell back to the plain job listing (anonymous or no batch).
    JobsLoaded(Vec<crate::Job>),
    /// Engine could not load any jobs.
    BatchLoadFailed(String),
    /// User clicked a star.
    JobRated {
        job_id: crate::JobId,
        stars: crate::Stars,
    },
    /// User ticked or unticked a job on the review page.
    SelectionToggled(crate::JobId),
    /// Replace the selection wholesale.
    SelectionReplaced(Vec<crate::JobId>),
}
