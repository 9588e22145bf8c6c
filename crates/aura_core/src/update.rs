use crate::{review, AppState, Effect, Msg, RatingUpdate};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryEdited(query) => {
            if state.set_query(query) {
                vec![Effect::ScheduleSearch {
                    query: state.query().to_string(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::SearchSubmitted => vec![Effect::SearchNow {
            query: state.query().to_string(),
        }],
        Msg::LoadBatchRequested => {
            // Only an empty dashboard triggers a load.
            if !state.batch().is_empty() || state.is_loading_batch() {
                Vec::new()
            } else {
                state.begin_batch_load();
                vec![Effect::LoadCurrentBatch]
            }
        }
        Msg::NewBatchRequested => {
            if state.is_loading_batch() {
                Vec::new()
            } else {
                state.begin_batch_load();
                vec![Effect::CreateBatch]
            }
        }
        Msg::BatchLoaded(batch) => {
            state.apply_batch(batch);
            Vec::new()
        }
        Msg::JobsLoaded(jobs) => {
            state.apply_jobs(jobs);
            Vec::new()
        }
        Msg::BatchLoadFailed(message) => {
            state.apply_load_failure(message);
            Vec::new()
        }
        Msg::JobRated { job_id, stars } => {
            // Local commit first; the remote write is a separate effect whose
            // outcome never comes back here.
            state.rate(job_id, stars);
            vec![Effect::PersistRating(RatingUpdate { job_id, stars })]
        }
        Msg::SelectionToggled(job_id) => {
            let next = review::toggle(state.batch().selected(), job_id);
            state.replace_selection(next);
            Vec::new()
        }
        Msg::SelectionReplaced(ids) => {
            state.replace_selection(ids);
            Vec::new()
        }
    };

    (state, effects)
}
