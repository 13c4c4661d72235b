//! Command line and environment configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

use canvas::consts::{DEFAULT_CANVAS_HEIGHT_PX, DEFAULT_CANVAS_WIDTH_PX, DEFAULT_SPEED_SETTING};
use clap::{Args, Parser, Subcommand};
use net::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_RECONNECT_MS, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Headless frame period; roughly one display refresh.
pub const DEFAULT_FRAME_MS: u64 = 16;

#[derive(Parser, Debug)]
#[command(name = "wallpaint", about = "Plan, animate and follow painting-robot trajectories")]
pub struct Cli {
    #[arg(long, env = "WALLPAINT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Wait between push-channel reconnect attempts.
    #[arg(long, env = "WALLPAINT_RECONNECT_MS", default_value_t = DEFAULT_RECONNECT_MS)]
    pub reconnect_ms: u64,

    #[arg(long, env = "WALLPAINT_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Snapshot width in pixels.
    #[arg(long, env = "WALLPAINT_CANVAS_WIDTH", default_value_t = DEFAULT_CANVAS_WIDTH_PX)]
    pub canvas_width: f64,

    /// Snapshot height in pixels.
    #[arg(long, env = "WALLPAINT_CANVAS_HEIGHT", default_value_t = DEFAULT_CANVAS_HEIGHT_PX)]
    pub canvas_height: f64,

    /// Playback tick period.
    #[arg(long, default_value_t = DEFAULT_FRAME_MS)]
    pub frame_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Generate a trajectory for a room file and write an SVG snapshot.
    Plan(PlanArgs),
    /// Animate every trajectory pushed by the service.
    Follow(FollowArgs),
    /// Print service metrics and health.
    Metrics,
}

#[derive(Args, Debug, PartialEq)]
pub struct PlanArgs {
    /// Room model JSON: `{width, height, coverage_width?, obstacles?}`.
    #[arg(long)]
    pub room: PathBuf,

    #[arg(long, default_value = "scene.svg")]
    pub out: PathBuf,

    /// Animate the path before writing the snapshot.
    #[arg(long)]
    pub animate: bool,

    /// Speed slider, 0..=100.
    #[arg(long, default_value_t = DEFAULT_SPEED_SETTING)]
    pub speed: f64,
}

#[derive(Args, Debug, PartialEq)]
pub struct FollowArgs {
    #[arg(long, default_value = "scene.svg")]
    pub out: PathBuf,

    #[arg(long, default_value_t = DEFAULT_SPEED_SETTING)]
    pub speed: f64,
}

impl Cli {
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(&self.base_url);
        config.reconnect_delay = Duration::from_millis(self.reconnect_ms);
        config.request_timeout = Duration::from_secs(self.timeout_secs);
        config
    }

    #[must_use]
    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }
}
