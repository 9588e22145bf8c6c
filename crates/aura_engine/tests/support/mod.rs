//! Scripted `JobsApi` and recording sink shared by the engine tests.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use aura_core::{Batch, Job, JobId, Preferences, RatingUpdate, ScoredJob};
use aura_engine::{ApiError, EngineEvent, EventSink, FailureKind, HealthStatus, JobsApi};

pub fn job(id: JobId, title: &str) -> Job {
    Job {
        id,
        title: title.to_string(),
        company: "Acme".to_string(),
        location: Some("Remote".to_string()),
        date_posted: None,
        url: format!("https://jobs.test/{id}"),
    }
}

/// Two results per query, titled after the query, in descending score order.
pub fn results_for(query: &str) -> Vec<ScoredJob> {
    vec![
        ScoredJob {
            job: job(1, query),
            score: 0.9,
        },
        ScoredJob {
            job: job(2, query),
            score: 0.4,
        },
    ]
}

pub struct FakeApi {
    authenticated: bool,
    default_delay: Duration,
    delays: HashMap<String, Duration>,
    failing_queries: HashSet<String>,
    batch: Option<Batch>,
    listing: Option<Vec<Job>>,
    reject_ratings: bool,
    calls: Mutex<Vec<String>>,
    ratings: Mutex<Vec<RatingUpdate>>,
}

impl FakeApi {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            default_delay: Duration::from_millis(50),
            delays: HashMap::new(),
            failing_queries: HashSet::new(),
            batch: None,
            listing: Some(vec![job(100, "Listed")]),
            reject_ratings: false,
            calls: Mutex::new(Vec::new()),
            ratings: Mutex::new(Vec::new()),
        }
    }

    pub fn signed_in() -> Self {
        Self {
            authenticated: true,
            ..Self::anonymous()
        }
    }

    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn failing_query(mut self, query: &str) -> Self {
        self.failing_queries.insert(query.to_string());
        self
    }

    pub fn with_batch(mut self, batch: Batch) -> Self {
        self.batch = Some(batch);
        self
    }

    pub fn without_listing(mut self) -> Self {
        self.listing = None;
        self
    }

    pub fn rejecting_ratings(mut self) -> Self {
        self.reject_ratings = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ratings(&self) -> Vec<RatingUpdate> {
        self.ratings.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    async fn scored(&self, query: &str) -> Result<Vec<ScoredJob>, ApiError> {
        let delay = self
            .delays
            .get(query)
            .copied()
            .unwrap_or(self.default_delay);
        tokio::time::sleep(delay).await;
        if self.failing_queries.contains(query) {
            return Err(ApiError::new(
                FailureKind::HttpStatus(503),
                "503 Service Unavailable",
            ));
        }
        Ok(results_for(query))
    }

    fn unauthenticated() -> ApiError {
        ApiError::new(FailureKind::Unauthenticated, "this call requires a bearer token")
    }
}

#[async_trait::async_trait]
impl JobsApi for FakeApi {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.record("health".to_string());
        Ok(HealthStatus {
            status: "ok".to_string(),
        })
    }

    async fn list_jobs(&self, query: Option<&str>) -> Result<Vec<Job>, ApiError> {
        self.record(format!("jobs:{}", query.unwrap_or_default()));
        self.listing
            .clone()
            .ok_or_else(|| ApiError::new(FailureKind::HttpStatus(500), "500 Internal Server Error"))
    }

    async fn get_job(&self, id: JobId) -> Result<Job, ApiError> {
        self.record(format!("job:{id}"));
        Ok(job(id, "Detail"))
    }

    async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredJob>, ApiError> {
        self.record(format!("search:{query}:{k}"));
        self.scored(query).await
    }

    async fn rank(&self, query: &str, _k: usize, _top: usize) -> Result<Vec<ScoredJob>, ApiError> {
        self.record(format!("rank:{query}"));
        self.scored(query).await
    }

    async fn post_rating(&self, rating: RatingUpdate) -> Result<(), ApiError> {
        self.record(format!("rating:{}", rating.job_id));
        if !self.authenticated {
            return Err(Self::unauthenticated());
        }
        if self.reject_ratings {
            return Err(ApiError::new(FailureKind::HttpStatus(500), "500 Internal Server Error"));
        }
        self.ratings.lock().unwrap().push(rating);
        Ok(())
    }

    async fn get_preferences(&self) -> Result<Option<Preferences>, ApiError> {
        self.record("preferences".to_string());
        Ok(None)
    }

    async fn put_preferences(&self, _preferences: &Preferences) -> Result<(), ApiError> {
        self.record("put_preferences".to_string());
        Ok(())
    }

    async fn create_batch(&self) -> Result<Batch, ApiError> {
        self.record("create_batch".to_string());
        if !self.authenticated {
            return Err(Self::unauthenticated());
        }
        Ok(Batch {
            id: 77,
            jobs: vec![job(7, "Fresh")],
        })
    }

    async fn current_batch(&self) -> Result<Batch, ApiError> {
        self.record("current_batch".to_string());
        if !self.authenticated {
            return Err(Self::unauthenticated());
        }
        self.batch
            .clone()
            .ok_or_else(|| ApiError::new(FailureKind::HttpStatus(404), "404 Not Found"))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}
