//! Network side of the planner: the trajectory REST service and the push
//! channel that announces newly generated trajectories.
//!
//! | Module | Role |
//! |--------|------|
//! | [`api`] | [`api::TrajectoryApi`] seam and its `reqwest` implementation |
//! | [`live`] | [`live::LiveUpdateClient`] push subscription with fixed-delay reconnect |
//! | [`types`] | Wire types for notifications, metrics and health |
//! | [`config`] | Base URL, reconnect delay and timeouts |
//! | [`error`] | Error enums |

pub mod api;
pub mod config;
pub mod error;
pub mod live;
pub mod types;
