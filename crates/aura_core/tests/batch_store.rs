use aura_core::{Batch, BatchProgress, BatchStore, Job, JobId, Stars};

fn job(id: JobId) -> Job {
    Job {
        id,
        title: format!("Engineer {id}"),
        company: "Acme".to_string(),
        location: Some("Remote".to_string()),
        date_posted: None,
        url: format!("https://jobs.test/{id}"),
    }
}

fn stars(v: u8) -> Stars {
    Stars::new(v).unwrap()
}

#[test]
fn rating_is_last_write_wins() {
    let mut store = BatchStore::new();
    store.set_jobs(vec![job(1)]);

    for (first, second) in [(1, 5), (5, 1), (3, 3), (4, 2)] {
        store.rate(1, stars(first));
        store.rate(1, stars(second));
        assert_eq!(store.rating(1), Some(stars(second)));
        assert_eq!(store.ratings().len(), 1);
    }
}

#[test]
fn rated_and_thresholded_batch_yields_single_eligible_job() {
    let mut store = BatchStore::new();
    store.set_jobs(vec![job(1), job(2)]);
    store.rate(1, stars(5));
    store.rate(2, stars(3));

    let eligible: Vec<_> = store.eligible().into_iter().map(|j| j.id).collect();
    assert_eq!(eligible, vec![1]);
}

#[test]
fn eligible_is_stable_across_repeated_calls() {
    let mut store = BatchStore::new();
    store.set_jobs(vec![job(1), job(2), job(3)]);
    store.rate(3, stars(4));
    store.rate(1, stars(4));

    let first: Vec<_> = store.eligible().into_iter().cloned().collect();
    let second: Vec<_> = store.eligible().into_iter().cloned().collect();
    assert_eq!(first, second);
}

#[test]
fn set_jobs_replaces_batch_and_orphans_old_ratings() {
    let mut store = BatchStore::new();
    store.set_batch(Batch {
        id: 11,
        jobs: vec![job(1), job(2)],
    });
    store.rate(1, stars(5));
    store.set_selected(vec![1]);

    store.set_jobs(vec![job(3)]);

    assert_eq!(store.batch_id(), None);
    assert_eq!(store.jobs(), &[job(3)]);
    // Orphans are retained but inert.
    assert_eq!(store.rating(1), Some(stars(5)));
    assert_eq!(store.selected(), &[1]);
    assert!(store.eligible().is_empty());
    assert!(store.chosen().is_empty());
    assert_eq!(
        store.progress(),
        BatchProgress {
            rated: 0,
            total: 1,
            percent: 0
        }
    );
}

#[test]
fn selection_is_replaced_not_merged() {
    let mut store = BatchStore::new();
    store.set_selected(vec![1, 2]);
    store.set_selected(vec![3]);
    assert_eq!(store.selected(), &[3]);
    // The store accepts ids it has never seen.
    assert!(store.is_selected(3));
}

#[test]
fn progress_rounds_and_reports_completion() {
    let mut store = BatchStore::new();
    assert!(!store.all_rated());
    assert_eq!(store.progress().percent, 0);

    store.set_jobs(vec![job(1), job(2), job(3)]);
    store.rate(1, stars(2));
    assert_eq!(store.progress().percent, 33);
    store.rate(2, stars(2));
    assert_eq!(store.progress().percent, 67);
    assert!(!store.all_rated());
    store.rate(3, stars(1));
    assert_eq!(store.progress().percent, 100);
    assert!(store.all_rated());
}
