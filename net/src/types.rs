//! Wire types exchanged with the planning service.
//!
//! Obstacles, waypoints and room models live in `canvas::doc`; this module
//! only adds the shapes the engine itself never needs.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Push-channel message announcing a newly generated trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryNotice {
    pub trajectory_id: String,
    pub metadata: NoticeMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoticeMetadata {
    /// Wall width in meters.
    pub width: f64,
    /// Wall height in meters.
    pub height: f64,
    /// Generation time in seconds.
    pub duration: f64,
    /// Obstacle count, when the publisher includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obstacles: Option<u32>,
}

impl TrajectoryNotice {
    /// Decode a push-channel text frame.
    ///
    /// # Errors
    ///
    /// Returns the decode error for non-JSON text or a JSON value of the
    /// wrong shape.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// One-line human-readable description for a transient notification.
    #[must_use]
    pub fn summary(&self) -> String {
        let m = &self.metadata;
        let obstacles = match m.obstacles {
            Some(1) => ", 1 obstacle".to_owned(),
            Some(n) => format!(", {n} obstacles"),
            None => String::new(),
        };
        format!(
            "new trajectory {}: {}m x {}m wall{obstacles}, generated in {}s",
            self.trajectory_id, m.width, m.height, m.duration
        )
    }
}

/// `GET /api/metrics` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_trajectories: u64,
    pub avg_coverage_percent: f64,
    /// Seconds.
    pub avg_duration: f64,
    /// Absent until the first trajectory is stored.
    #[serde(default)]
    pub latest_timestamp: Option<String>,
}

/// `GET /api/health` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

impl Health {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
