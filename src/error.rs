use std::path::PathBuf;

use net::error::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: std::io::Error },
    #[error("invalid room model: {0}")]
    Room(#[from] serde_json::Error),
    #[error("invalid wall size {width} x {height}")]
    Wall { width: f64, height: f64 },
    #[error("invalid canvas size {width} x {height}")]
    Canvas { width: f64, height: f64 },
    #[error("snapshot render failed")]
    Render(#[from] std::fmt::Error),
    #[error("push subscription ended")]
    LiveEnded,
    #[error("signal handler failed: {0}")]
    Signal(std::io::Error),
}
