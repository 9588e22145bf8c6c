use std::time::Duration;

use aura_core::{Batch, Job, JobId, Preferences, RatingUpdate, ScoredJob};
use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize};
use url::Url;

use crate::{ApiError, FailureKind, HealthStatus};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    /// Sent as `Authorization: Bearer <token>`. `None` is anonymous mode.
    pub bearer_token: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            bearer_token: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The external jobs API.
///
/// Read-only calls work anonymously. User-scoped calls (ratings, preferences,
/// batches) fail with [`FailureKind::Unauthenticated`] when no token is set.
#[async_trait::async_trait]
pub trait JobsApi: Send + Sync {
    fn is_authenticated(&self) -> bool;

    async fn health(&self) -> Result<HealthStatus, ApiError>;

    /// `GET /jobs?q=`
    async fn list_jobs(&self, query: Option<&str>) -> Result<Vec<Job>, ApiError>;

    /// `GET /jobs/{id}`
    async fn get_job(&self, id: JobId) -> Result<Job, ApiError>;

    /// `GET /search?q=&k=`: lexical/semantic search.
    async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredJob>, ApiError>;

    /// `GET /rank?q=&k=&top=`: ranks a pool of `k` candidates, returns `top`.
    async fn rank(&self, query: &str, k: usize, top: usize) -> Result<Vec<ScoredJob>, ApiError>;

    /// `POST /ratings`
    async fn post_rating(&self, rating: RatingUpdate) -> Result<(), ApiError>;

    /// `GET /preferences`; `None` when the user has not saved any yet.
    async fn get_preferences(&self) -> Result<Option<Preferences>, ApiError>;

    /// `PUT /preferences`
    async fn put_preferences(&self, preferences: &Preferences) -> Result<(), ApiError>;

    /// `POST /batches`
    async fn create_batch(&self) -> Result<Batch, ApiError>;

    /// `GET /batches/current`
    async fn current_batch(&self) -> Result<Batch, ApiError>;
}

#[derive(Debug, Deserialize)]
struct Ack {
    #[serde(default)]
    ok: bool,
}

#[derive(Debug, Clone)]
pub struct ReqwestJobsApi {
    settings: ClientSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestJobsApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            base,
            client,
        })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Joins `path` onto the base url (keeping any base path prefix) and
    /// appends `query` pairs.
    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                ApiError::new(FailureKind::InvalidUrl, "base url cannot be a base")
            })?;
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|segment| !segment.is_empty()));
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self.client.request(method, url);
        match self.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn token(&self) -> Option<&str> {
        self.settings
            .bearer_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }

    fn require_token(&self) -> Result<(), ApiError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(ApiError::new(
                FailureKind::Unauthenticated,
                "this call requires a bearer token",
            ))
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        response.json::<T>().await.map_err(map_reqwest_error)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path, query)?;
        self.send(self.request(Method::GET, url)).await
    }

    async fn expect_ack(&self, request: RequestBuilder) -> Result<(), ApiError> {
        let ack: Ack = self.send(request).await?;
        if ack.ok {
            Ok(())
        } else {
            Err(ApiError::new(
                FailureKind::Rejected,
                "server did not acknowledge the write",
            ))
        }
    }
}

#[async_trait::async_trait]
impl JobsApi for ReqwestJobsApi {
    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get("/healthz", &[]).await
    }

    async fn list_jobs(&self, query: Option<&str>) -> Result<Vec<Job>, ApiError> {
        let params: Vec<(&str, String)> = query
            .filter(|q| !q.is_empty())
            .map(|q| ("q", q.to_string()))
            .into_iter()
            .collect();
        self.get("/jobs", &params).await
    }

    async fn get_job(&self, id: JobId) -> Result<Job, ApiError> {
        self.get(&format!("/jobs/{id}"), &[]).await
    }

    async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredJob>, ApiError> {
        self.get("/search", &[("q", query.to_string()), ("k", k.to_string())])
            .await
    }

    async fn rank(&self, query: &str, k: usize, top: usize) -> Result<Vec<ScoredJob>, ApiError> {
        self.get(
            "/rank",
            &[
                ("q", query.to_string()),
                ("k", k.to_string()),
                ("top", top.to_string()),
            ],
        )
        .await
    }

    async fn post_rating(&self, rating: RatingUpdate) -> Result<(), ApiError> {
        self.require_token()?;
        let url = self.endpoint("/ratings", &[])?;
        self.expect_ack(self.request(Method::POST, url).json(&rating))
            .await
    }

    async fn get_preferences(&self) -> Result<Option<Preferences>, ApiError> {
        self.require_token()?;
        self.get("/preferences", &[]).await
    }

    async fn put_preferences(&self, preferences: &Preferences) -> Result<(), ApiError> {
        self.require_token()?;
        let url = self.endpoint("/preferences", &[])?;
        self.expect_ack(self.request(Method::PUT, url).json(preferences))
            .await
    }

    async fn create_batch(&self) -> Result<Batch, ApiError> {
        self.require_token()?;
        let url = self.endpoint("/batches", &[])?;
        self.send(self.request(Method::POST, url)).await
    }

    async fn current_batch(&self) -> Result<Batch, ApiError> {
        self.require_token()?;
        self.get("/batches/current", &[]).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str) -> ReqwestJobsApi {
        ReqwestJobsApi::new(ClientSettings {
            base_url: base_url.to_string(),
            ..ClientSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let url = api("http://host.test/api/").endpoint("/jobs/4", &[]).unwrap();
        assert_eq!(url.as_str(), "http://host.test/api/jobs/4");
    }

    #[test]
    fn endpoint_encodes_query_pairs() {
        let url = api("http://host.test")
            .endpoint("/rank", &[("q", "data & ml".to_string()), ("k", "50".to_string())])
            .unwrap();
        assert_eq!(url.as_str(), "http://host.test/rank?q=data+%26+ml&k=50");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ReqwestJobsApi::new(ClientSettings {
            base_url: "not a url".to_string(),
            ..ClientSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }

    #[test]
    fn blank_token_counts_as_anonymous() {
        let anonymous = ReqwestJobsApi::new(ClientSettings {
            bearer_token: Some("  ".to_string()),
            ..ClientSettings::default()
        })
        .unwrap();
        assert!(!anonymous.is_authenticated());
    }
}
