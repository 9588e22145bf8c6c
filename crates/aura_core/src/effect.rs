use crate::RatingUpdate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Rearm the search debounce timer with the latest query.
    ScheduleSearch { query: String },
    /// Run a search immediately, bypassing the debounce timer.
    SearchNow { query: String },
    LoadCurrentBatch,
    CreateBatch,
    /// Fire-and-forget remote sync of a rating already committed locally.
    PersistRating(RatingUpdate),
}
