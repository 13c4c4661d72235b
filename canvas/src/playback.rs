//! Time-based trajectory playback.
//!
//! The controller never looks at a clock itself. A [`crate::schedule::Scheduler`]
//! feeds it the milliseconds elapsed since the run started and it answers with
//! a [`Tick`] telling the caller whether a new frame has to be drawn. Because
//! the target index is derived from elapsed time against a fixed total
//! duration, playback speed does not depend on the host's frame rate.

#[cfg(test)]
#[path = "playback_test.rs"]
mod playback_test;

use crate::consts::{DEFAULT_SPEED_SETTING, MAX_SPEED_SETTING, MAX_WAYPOINTS_PER_SEC, MIN_WAYPOINTS_PER_SEC};

/// Clamp a slider value into `[0, 100]`; NaN is treated as the slowest setting.
#[must_use]
pub fn clamp_speed(speed_setting: f64) -> f64 {
    if speed_setting.is_nan() {
        return 0.0;
    }
    speed_setting.clamp(0.0, MAX_SPEED_SETTING)
}

/// Map a `[0, 100]` slider value linearly onto 1..=200 waypoints per second.
#[must_use]
pub fn waypoints_per_second(speed_setting: f64) -> f64 {
    let t = clamp_speed(speed_setting) / MAX_SPEED_SETTING;
    MIN_WAYPOINTS_PER_SEC + t * (MAX_WAYPOINTS_PER_SEC - MIN_WAYPOINTS_PER_SEC)
}

/// Wall-clock length of a full run over `len` waypoints.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn total_duration_ms(len: usize, speed_setting: f64) -> f64 {
    len as f64 / waypoints_per_second(speed_setting) * 1000.0
}

/// Outcome of one scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// No run in progress; the caller must not draw and should stop ticking.
    Inactive,
    /// Still running but the target index has not advanced; nothing to draw.
    Pending,
    /// Draw the path revealed up to and including this waypoint index.
    Frame(usize),
    /// The last waypoint was reached; the run is over.
    Finished,
}

/// State of a single playback run. Exists only while animating.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackRun {
    len: usize,
    total_duration_ms: f64,
    current_index: usize,
    last_rendered: Option<usize>,
}

impl PlaybackRun {
    fn new(len: usize, speed_setting: f64) -> Self {
        Self {
            len,
            total_duration_ms: total_duration_ms(len, speed_setting),
            current_index: 0,
            last_rendered: None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn total_duration_ms(&self) -> f64 {
        self.total_duration_ms
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn last_rendered(&self) -> Option<usize> {
        self.last_rendered
    }

    /// Waypoint index the run should have reached after `elapsed_ms`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn target_index(&self, elapsed_ms: f64) -> usize {
        let progress = if elapsed_ms.is_nan() {
            0.0
        } else {
            (elapsed_ms / self.total_duration_ms).clamp(0.0, 1.0)
        };
        let target = (progress * self.len as f64).floor() as usize;
        target.min(self.len.saturating_sub(1))
    }
}

/// Drives a waypoint index forward over time at a user-selected rate.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    speed_setting: f64,
    run: Option<PlaybackRun>,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED_SETTING)
    }
}

impl PlaybackController {
    #[must_use]
    pub fn new(speed_setting: f64) -> Self {
        Self { speed_setting: clamp_speed(speed_setting), run: None }
    }

    #[must_use]
    pub fn speed_setting(&self) -> f64 {
        self.speed_setting
    }

    /// Change the slider value. Takes effect on the next [`Self::start`].
    pub fn set_speed_setting(&mut self, speed_setting: f64) {
        self.speed_setting = clamp_speed(speed_setting);
    }

    /// Begin a fresh run over `len` waypoints, discarding any previous run.
    ///
    /// Returns `false` (and leaves the controller inactive) when `len == 0`.
    pub fn start(&mut self, len: usize) -> bool {
        if len == 0 {
            self.run = None;
            return false;
        }
        self.run = Some(PlaybackRun::new(len, self.speed_setting));
        true
    }

    /// End the current run. Returns `false` if nothing was running.
    pub fn stop(&mut self) -> bool {
        self.run.take().is_some()
    }

    /// Advance to the index implied by `elapsed_ms` since the run started.
    pub fn tick(&mut self, elapsed_ms: f64) -> Tick {
        let Some(run) = self.run.as_mut() else {
            return Tick::Inactive;
        };

        let target = run.target_index(elapsed_ms);
        if target + 1 >= run.len {
            self.run = None;
            return Tick::Finished;
        }
        if run.last_rendered.is_some_and(|last| target <= last) {
            return Tick::Pending;
        }

        run.current_index = target;
        run.last_rendered = Some(target);
        Tick::Frame(target)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.run.is_some()
    }

    /// The run in progress, if any.
    #[must_use]
    pub fn run(&self) -> Option<&PlaybackRun> {
        self.run.as_ref()
    }

    /// Index of the most recently drawn waypoint while a run is active.
    #[must_use]
    pub fn playback_index(&self) -> Option<usize> {
        self.run.as_ref().and_then(PlaybackRun::last_rendered)
    }
}
