//! AURA core: pure session state, review rules and the update reducer.
mod batch;
mod effect;
mod model;
mod msg;
pub mod review;
mod search;
mod state;
mod update;
mod view_model;

pub use batch::{BatchProgress, BatchStore};
pub use effect::Effect;
pub use model::{Batch, BatchId, Job, JobId, Preferences, RatingError, RatingUpdate, ScoredJob, Stars};
pub use msg::Msg;
pub use review::ELIGIBLE_THRESHOLD;
pub use search::{can_search, SearchState, MIN_QUERY_LEN};
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, JobRowView, RatedJobView};
