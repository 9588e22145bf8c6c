use std::sync::Once;

use aura_core::{update, AppState, Batch, Effect, Job, JobId, Msg, RatingUpdate, Stars};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(aura_logging::initialize_for_tests);
}

fn job(id: JobId) -> Job {
    Job {
        id,
        title: format!("Data Scientist {id}"),
        company: "Acme".to_string(),
        location: None,
        date_posted: Some("2024-05-01".to_string()),
        url: format!("https://jobs.test/{id}"),
    }
}

fn stars(v: u8) -> Stars {
    Stars::new(v).unwrap()
}

fn loaded(jobs: Vec<Job>) -> AppState {
    let (state, _) = update(AppState::new(), Msg::JobsLoaded(jobs));
    state
}

fn rate(state: AppState, job_id: JobId, v: u8) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::JobRated {
            job_id,
            stars: stars(v),
        },
    )
}

#[test]
fn rating_commits_locally_and_requests_persist() {
    init_logging();
    let state = loaded(vec![job(1), job(2)]);

    let (mut state, effects) = rate(state, 1, 5);

    assert_eq!(state.batch().rating(1), Some(stars(5)));
    assert!(state.consume_dirty());
    assert_eq!(
        effects,
        vec![Effect::PersistRating(RatingUpdate {
            job_id: 1,
            stars: stars(5),
        })]
    );
}

#[test]
fn review_shows_only_jobs_rated_four_or_more() {
    init_logging();
    let state = loaded(vec![job(1), job(2)]);
    let (state, _) = rate(state, 1, 5);
    let (state, _) = rate(state, 2, 3);

    let view = state.view();
    let eligible: Vec<_> = view.eligible.iter().map(|row| row.job_id).collect();
    assert_eq!(eligible, vec![1]);
    assert!(view.review_ready);
    assert_eq!(view.progress.percent, 100);
}

#[test]
fn toggling_a_selected_job_clears_it() {
    init_logging();
    let state = loaded(vec![job(1)]);
    let (state, _) = update(state, Msg::SelectionReplaced(vec![1]));
    let (state, effects) = update(state, Msg::SelectionToggled(1));

    assert!(state.batch().selected().is_empty());
    assert!(!state.view().can_prepare);
    assert!(effects.is_empty());
}

#[test]
fn toggling_appends_in_click_order() {
    init_logging();
    let state = loaded(vec![job(1), job(2), job(3)]);
    let (state, _) = update(state, Msg::SelectionToggled(3));
    let (state, _) = update(state, Msg::SelectionToggled(1));

    assert_eq!(state.batch().selected(), &[3, 1]);
    // Application rows follow batch order, not click order.
    let chosen: Vec<_> = state.view().chosen.iter().map(|row| row.job_id).collect();
    assert_eq!(chosen, vec![1, 3]);
}

#[test]
fn lowering_a_rating_keeps_the_selection() {
    init_logging();
    let state = loaded(vec![job(1)]);
    let (state, _) = rate(state, 1, 5);
    let (state, _) = update(state, Msg::SelectionToggled(1));
    let (state, _) = rate(state, 1, 2);

    let view = state.view();
    assert!(view.eligible.is_empty());
    assert_eq!(view.selected, vec![1]);
}

#[test]
fn query_edits_schedule_debounced_search() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::QueryEdited("data".to_string()));
    assert_eq!(
        effects,
        vec![Effect::ScheduleSearch {
            query: "data".to_string()
        }]
    );

    let (state, effects) = update(state, Msg::QueryEdited("data".to_string()));
    assert!(effects.is_empty());

    let (_state, effects) = update(state, Msg::SearchSubmitted);
    assert_eq!(
        effects,
        vec![Effect::SearchNow {
            query: "data".to_string()
        }]
    );
}

#[test]
fn batch_is_loaded_only_when_dashboard_is_empty() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::LoadBatchRequested);
    assert_eq!(effects, vec![Effect::LoadCurrentBatch]);
    assert!(state.view().loading_batch);

    // A second request while loading is ignored.
    let (state, effects) = update(state, Msg::LoadBatchRequested);
    assert!(effects.is_empty());

    let (state, _) = update(
        state,
        Msg::BatchLoaded(Batch {
            id: 4,
            jobs: vec![job(1)],
        }),
    );
    let view = state.view();
    assert_eq!(view.batch_id, Some(4));
    assert!(!view.loading_batch);

    let (_state, effects) = update(state, Msg::LoadBatchRequested);
    assert!(effects.is_empty());
}

#[test]
fn new_batch_replaces_jobs() {
    init_logging();
    let state = loaded(vec![job(1)]);
    let (state, effects) = update(state, Msg::NewBatchRequested);
    assert_eq!(effects, vec![Effect::CreateBatch]);

    let (state, _) = update(
        state,
        Msg::BatchLoaded(Batch {
            id: 9,
            jobs: vec![job(5), job(6)],
        }),
    );
    let ids: Vec<_> = state.view().jobs.iter().map(|r| r.row.job_id).collect();
    assert_eq!(ids, vec![5, 6]);
}

#[test]
fn load_failure_is_recorded_and_cleared_by_next_load() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::LoadBatchRequested);
    let (state, effects) = update(state, Msg::BatchLoadFailed("http status 500".to_string()));

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.last_error.as_deref(), Some("http status 500"));
    assert!(!view.loading_batch);

    let (state, _) = update(state, Msg::JobsLoaded(vec![job(1)]));
    assert_eq!(state.view().last_error, None);
}
