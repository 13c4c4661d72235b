//! REST client for the planning service.
//!
//! [`TrajectoryApi`] is the seam the rest of the system talks through, so the
//! push client and the host can be exercised against in-memory fakes.
//! [`HttpApi`] is the real implementation over `reqwest`.
//!
//! Failures are returned to the caller and never retried here.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use canvas::doc::{RoomModel, Waypoint};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::types::{Health, MetricsSummary};

/// Request/response calls against the planning service.
#[async_trait::async_trait]
pub trait TrajectoryApi: Send + Sync {
    /// `POST /api/trajectories`: generate a path for `room`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for local validation, transport or status failures.
    async fn create_trajectory(&self, room: &RoomModel) -> Result<Vec<Waypoint>, ApiError>;

    /// `GET /api/trajectories/{id}`: a previously generated path.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for transport or status failures.
    async fn fetch_trajectory(&self, trajectory_id: &str) -> Result<Vec<Waypoint>, ApiError>;

    /// `GET /api/metrics`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for transport or status failures.
    async fn metrics(&self) -> Result<MetricsSummary, ApiError>;

    /// `GET /api/health`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for transport or status failures.
    async fn health(&self) -> Result<Health, ApiError>;
}

/// Reject rooms the service would refuse with "Obstacle exceeds wall bounds".
///
/// # Errors
///
/// Returns [`ApiError::ObstacleOutOfBounds`] naming the first offending obstacle.
pub fn validate_room(room: &RoomModel) -> Result<(), ApiError> {
    match room.first_out_of_bounds() {
        Some(index) => Err(ApiError::ObstacleOutOfBounds { index }),
        None => Ok(()),
    }
}

pub struct HttpApi {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpApi {
    /// Build a client for `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] for non-HTTP base URLs, or
    /// [`ApiError::Http`] if the underlying client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(ApiError::InvalidBaseUrl(config.base_url.clone()));
        }
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { http, config: config.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// `{base}/api/trajectories/{id}` with `id` percent-encoded as a single
    /// path segment, so ids containing `/`, `?` or `#` stay opaque.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if the base URL does not parse.
    pub fn trajectory_url(&self, trajectory_id: &str) -> Result<reqwest::Url, ApiError> {
        let invalid = || ApiError::InvalidBaseUrl(self.config.base_url.clone());
        let mut url = reqwest::Url::parse(&self.config.api_url("/api/trajectories")).map_err(|_| invalid())?;
        url.path_segments_mut().map_err(|()| invalid())?.push(trajectory_id);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: impl reqwest::IntoUrl) -> Result<T, ApiError> {
        let response = self.http.get(url).send().await?;
        read_json(response).await
    }
}

/// Decode a success body, or turn a non-2xx response into [`ApiError::Status`].
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status { status: status.as_u16(), body });
    }
    Ok(response.json::<T>().await?)
}

#[async_trait::async_trait]
impl TrajectoryApi for HttpApi {
    async fn create_trajectory(&self, room: &RoomModel) -> Result<Vec<Waypoint>, ApiError> {
        validate_room(room)?;
        let started = std::time::Instant::now();
        let response = self
            .http
            .post(self.config.api_url("/api/trajectories"))
            .json(room)
            .send()
            .await?;
        let waypoints: Vec<Waypoint> = read_json(response).await?;
        tracing::info!(
            obstacles = room.obstacles.len(),
            waypoints = waypoints.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "trajectory generated"
        );
        Ok(waypoints)
    }

    async fn fetch_trajectory(&self, trajectory_id: &str) -> Result<Vec<Waypoint>, ApiError> {
        let waypoints: Vec<Waypoint> = self.get_json(self.trajectory_url(trajectory_id)?).await?;
        tracing::debug!(%trajectory_id, waypoints = waypoints.len(), "trajectory fetched");
        Ok(waypoints)
    }

    async fn metrics(&self) -> Result<MetricsSummary, ApiError> {
        self.get_json(self.config.api_url("/api/metrics")).await
    }

    async fn health(&self) -> Result<Health, ApiError> {
        self.get_json(self.config.api_url("/api/health")).await
    }
}
