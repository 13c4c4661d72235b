//! Headless host: drives the engine from the command line.
//!
//! The engine, the SVG surface and the interval scheduler all live on one
//! `LocalSet`. Network results arrive as values (REST replies, or
//! [`LiveEvent`]s over a channel) and are applied to the engine here, so the
//! engine itself is never touched from another task.

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

use std::cell::RefCell;
use std::future::Future;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use canvas::doc::{RoomModel, Trajectory, TrajectoryStats};
use canvas::engine::{Action, EngineCore};
use canvas::player;
use canvas::svg::SvgSurface;
use net::api::{HttpApi, TrajectoryApi};
use net::config::ClientConfig;
use net::live::{LiveEvent, LiveUpdateClient};
use tokio::sync::{mpsc, oneshot};

use crate::config::{Cli, Command, FollowArgs, PlanArgs};
use crate::error::AppError;
use crate::scheduler::IntervalScheduler;

/// Pending push events buffered ahead of the engine.
const LIVE_EVENT_BUFFER: usize = 16;

/// Dispatch one CLI invocation.
pub async fn run(cli: Cli) -> Result<(), AppError> {
    let config = cli.client_config();
    let api: Arc<dyn TrajectoryApi> = Arc::new(HttpApi::new(&config)?);
    let host = Host::new(api, cli.canvas_width, cli.canvas_height, cli.frame_period())?;

    match &cli.command {
        Command::Plan(args) => {
            let stats = host.plan(args).await?;
            print_stats(&stats);
            Ok(())
        }
        Command::Follow(args) => host.follow(args, &config).await,
        Command::Metrics => {
            let report = host.metrics_report().await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

fn print_stats(stats: &TrajectoryStats) {
    println!("waypoints:   {} ({} paint, {} move)", stats.waypoint_count, stats.paint_count, stats.move_count);
    println!("path length: {:.2} m", stats.path_length);
    println!("coverage:    {:.1}%", stats.coverage_percent);
}

pub struct Host {
    api: Arc<dyn TrajectoryApi>,
    core: Rc<RefCell<EngineCore>>,
    surface: Rc<RefCell<SvgSurface>>,
    frame: Duration,
}

impl Host {
    /// # Errors
    ///
    /// Returns [`AppError::Canvas`] for a non-finite or non-positive canvas size.
    pub fn new(api: Arc<dyn TrajectoryApi>, canvas_width: f64, canvas_height: f64, frame: Duration) -> Result<Self, AppError> {
        let mut core = EngineCore::new();
        if core.set_canvas_size(canvas_width, canvas_height) == Action::None {
            return Err(AppError::Canvas { width: canvas_width, height: canvas_height });
        }
        Ok(Self {
            api,
            core: Rc::new(RefCell::new(core)),
            surface: Rc::new(RefCell::new(SvgSurface::new(canvas_width, canvas_height))),
            frame,
        })
    }

    /// Load a room, generate its trajectory, optionally animate it, and write
    /// the static snapshot.
    pub async fn plan(&self, args: &PlanArgs) -> Result<TrajectoryStats, AppError> {
        let room = load_room(&args.room)?;
        let request = {
            let mut core = self.core.borrow_mut();
            if core.set_wall(room.width, room.height) == Action::None {
                return Err(AppError::Wall { width: room.width, height: room.height });
            }
            core.set_coverage_width(room.coverage_width);
            core.load_obstacles(room.obstacles);
            core.room_model()
        };

        let waypoints = self.api.create_trajectory(&request).await?;
        let trajectory = Trajectory::new(None, waypoints);
        let stats = trajectory.stats(request.width, request.height, request.coverage_width);
        self.core.borrow_mut().replace_trajectory(trajectory);

        if args.animate {
            self.animate(args.speed).await;
        }
        write_snapshot(&self.core.borrow(), &self.surface, &args.out)?;
        Ok(stats)
    }

    /// Play the current trajectory once and wait for the run to end.
    async fn animate(&self, speed: f64) {
        self.core.borrow_mut().set_speed(speed);
        let (done_tx, done_rx) = oneshot::channel();
        let mut done_tx = Some(done_tx);
        let mut scheduler = IntervalScheduler::new(self.frame);

        let started = player::play(&self.core, &self.surface, &mut scheduler, move |actions| {
            for action in actions {
                match action {
                    Action::PlaybackFrame(index) => tracing::debug!(index, "playback frame"),
                    Action::PlaybackFinished => {
                        if let Some(tx) = done_tx.take() {
                            if tx.send(()).is_err() {
                                tracing::debug!("playback finished after waiter left");
                            }
                        }
                    }
                    _ => {}
                }
            }
        });
        let Some(Action::PlaybackStarted { len, total_duration_ms }) = started.first() else {
            return;
        };
        tracing::info!(waypoints = len, total_duration_ms, "playback started");

        // The sender is dropped with the scheduler callback, so a run that
        // ends without finishing still releases this wait.
        match done_rx.await {
            Ok(()) => tracing::info!("playback finished"),
            Err(_) => tracing::info!("playback ended early"),
        }
    }

    /// Subscribe to pushed trajectories until ctrl-c.
    pub async fn follow(&self, args: &FollowArgs, config: &ClientConfig) -> Result<(), AppError> {
        let (tx, rx) = mpsc::channel(LIVE_EVENT_BUFFER);
        let task = LiveUpdateClient::new(Arc::clone(&self.api), config)?.spawn(tx);
        tracing::info!(base_url = %config.base_url, "following live trajectories");

        let result = self.watch(rx, args, tokio::signal::ctrl_c()).await;
        task.abort();
        result
    }

    /// Apply live events until `shutdown` resolves or the event stream ends.
    pub async fn watch<F>(&self, mut events: mpsc::Receiver<LiveEvent>, args: &FollowArgs, shutdown: F) -> Result<(), AppError>
    where
        F: Future<Output = std::io::Result<()>>,
    {
        self.core.borrow_mut().set_speed(args.speed);
        let mut scheduler = IntervalScheduler::new(self.frame);
        tokio::pin!(shutdown);

        let result = loop {
            tokio::select! {
                signal = &mut shutdown => {
                    tracing::info!("shutting down");
                    break signal.map_err(AppError::Signal);
                }
                event = events.recv() => match event {
                    Some(event) => self.apply_live_event(event, &mut scheduler, &args.out),
                    None => break Err(AppError::LiveEnded),
                },
            }
        };
        player::stop(&self.core, &self.surface, &mut scheduler);
        result
    }

    fn apply_live_event(&self, event: LiveEvent, scheduler: &mut IntervalScheduler, out: &Path) {
        match event {
            LiveEvent::Connected => tracing::info!("push channel connected"),
            LiveEvent::Disconnected => tracing::warn!("push channel lost; reconnecting"),
            LiveEvent::FetchFailed { notice, error } => {
                tracing::warn!(trajectory_id = %notice.trajectory_id, %error, "skipping live trajectory");
            }
            LiveEvent::Trajectory { notice, trajectory } => {
                tracing::info!("{}", notice.summary());
                {
                    let mut core = self.core.borrow_mut();
                    core.set_wall(notice.metadata.width, notice.metadata.height);
                    core.replace_trajectory(trajectory);
                }

                let core = Rc::clone(&self.core);
                let surface = Rc::clone(&self.surface);
                let snapshot_path = out.to_path_buf();
                let started = player::play(&self.core, &self.surface, scheduler, move |actions| {
                    if actions.contains(&Action::PlaybackFinished) {
                        if let Err(err) = write_snapshot(&core.borrow(), &surface, &snapshot_path) {
                            tracing::warn!(%err, "snapshot write failed");
                        }
                    }
                });
                // Nothing to animate; the static scene is already final.
                if started.is_empty() {
                    if let Err(err) = write_snapshot(&self.core.borrow(), &self.surface, out) {
                        tracing::warn!(%err, "snapshot write failed");
                    }
                }
            }
        }
    }

    /// Service health and metrics as one JSON document.
    pub async fn metrics_report(&self) -> Result<serde_json::Value, AppError> {
        let health = self.api.health().await?;
        let metrics = self.api.metrics().await?;
        if !health.is_ok() {
            tracing::warn!(status = %health.status, "service reports unhealthy");
        }
        Ok(serde_json::json!({ "health": health, "metrics": metrics }))
    }
}

fn load_room(path: &Path) -> Result<RoomModel, AppError> {
    let raw = std::fs::read_to_string(path).map_err(|source| AppError::Read { path: path.to_path_buf(), source })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Render the current state and write it as a standalone SVG file.
fn write_snapshot(core: &EngineCore, surface: &RefCell<SvgSurface>, path: &Path) -> Result<(), AppError> {
    let document = {
        let mut surface = surface.borrow_mut();
        core.render(&mut *surface)?;
        surface.finish()
    };
    std::fs::write(path, document).map_err(|source| AppError::Write { path: path.to_path_buf(), source })?;
    tracing::info!(path = %path.display(), "snapshot written");
    Ok(())
}
