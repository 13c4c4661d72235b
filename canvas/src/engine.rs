use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point};
use crate::consts::{
    DEFAULT_CANVAS_HEIGHT_PX, DEFAULT_CANVAS_WIDTH_PX, DEFAULT_COVERAGE_WIDTH_M, DEFAULT_WALL_HEIGHT_M,
    DEFAULT_WALL_WIDTH_M,
};
use crate::doc::{Obstacle, ObstacleList, RoomModel, Trajectory, TrajectoryStats};
use crate::input::{Button, InputState, Mode, PointerInput, Rect, UiState};
use crate::playback::{PlaybackController, Tick};
use crate::player;
use crate::render::{self, Scene, Surface};
use crate::schedule::{AnimationFrameScheduler, Scheduler};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from engine operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    ObstacleAdded { index: usize, obstacle: Obstacle },
    ObstacleRemoved { index: usize, obstacle: Obstacle },
    ObstaclesCleared { count: usize },
    TrajectoryReplaced { len: usize },
    PlaybackStarted { len: usize, total_duration_ms: f64 },
    PlaybackFrame(usize),
    PlaybackFinished,
    PlaybackStopped,
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// One instance per view; nothing here is global.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub obstacles: ObstacleList,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub wall_width: f64,
    pub wall_height: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub coverage_width: f64,
    pub trajectory: Option<Trajectory>,
    pub playback: PlaybackController,
}

impl Default for EngineCore {
    fn default() -> Self {
        let camera = Camera::fit(
            DEFAULT_WALL_WIDTH_M,
            DEFAULT_WALL_HEIGHT_M,
            DEFAULT_CANVAS_WIDTH_PX,
            DEFAULT_CANVAS_HEIGHT_PX,
        )
        .unwrap_or_default();
        Self {
            obstacles: ObstacleList::new(),
            camera,
            ui: UiState::default(),
            input: InputState::default(),
            wall_width: DEFAULT_WALL_WIDTH_M,
            wall_height: DEFAULT_WALL_HEIGHT_M,
            canvas_width: DEFAULT_CANVAS_WIDTH_PX,
            canvas_height: DEFAULT_CANVAS_HEIGHT_PX,
            coverage_width: DEFAULT_COVERAGE_WIDTH_M,
            trajectory: None,
            playback: PlaybackController::default(),
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Geometry ---

    /// Resize the wall and recompute the camera.
    ///
    /// Non-finite or non-positive dimensions are ignored and leave the
    /// current wall and camera untouched.
    pub fn set_wall(&mut self, width: f64, height: f64) -> Action {
        let Some(camera) = Camera::fit(width, height, self.canvas_width, self.canvas_height) else {
            tracing::debug!(width, height, "ignoring invalid wall dimensions");
            return Action::None;
        };
        self.wall_width = width;
        self.wall_height = height;
        self.camera = camera;
        Action::RenderNeeded
    }

    /// Resize the drawing surface and recompute the camera.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) -> Action {
        let Some(camera) = Camera::fit(self.wall_width, self.wall_height, width, height) else {
            tracing::debug!(width, height, "ignoring invalid canvas size");
            return Action::None;
        };
        self.canvas_width = width;
        self.canvas_height = height;
        self.camera = camera;
        Action::RenderNeeded
    }

    pub fn set_coverage_width(&mut self, coverage_width: f64) {
        if coverage_width.is_finite() && coverage_width > 0.0 {
            self.coverage_width = coverage_width;
        } else {
            tracing::debug!(coverage_width, "ignoring invalid coverage width");
        }
    }

    // --- Editing ---

    /// Switch editor mode. Any drag in progress is abandoned.
    pub fn set_mode(&mut self, mode: Mode) -> Action {
        self.ui.mode = mode;
        self.input = InputState::Idle;
        if self.ui.pending_rect.take().is_some() { Action::RenderNeeded } else { Action::None }
    }

    /// Append a validated obstacle.
    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> Vec<Action> {
        let index = self.obstacles.push(obstacle.clone());
        vec![Action::ObstacleAdded { index, obstacle }, Action::RenderNeeded]
    }

    /// Append an obstacle from manual-entry text fields.
    ///
    /// Invalid input is dropped without surfacing an error.
    pub fn add_obstacle_from_form(
        &mut self,
        x: &str,
        y: &str,
        width: &str,
        height: &str,
        name: Option<&str>,
    ) -> Vec<Action> {
        match Obstacle::from_form(x, y, width, height, name) {
            Ok(obstacle) => self.add_obstacle(obstacle),
            Err(err) => {
                tracing::debug!(%err, "discarding obstacle form entry");
                Vec::new()
            }
        }
    }

    /// Remove the obstacle at `index`, independent of mode.
    pub fn remove_obstacle(&mut self, index: usize) -> Vec<Action> {
        match self.obstacles.remove(index) {
            Some(obstacle) => vec![Action::ObstacleRemoved { index, obstacle }, Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    pub fn clear_obstacles(&mut self) -> Vec<Action> {
        match self.obstacles.clear() {
            0 => Vec::new(),
            count => vec![Action::ObstaclesCleared { count }, Action::RenderNeeded],
        }
    }

    /// Replace the obstacle list wholesale, e.g. from a loaded room file.
    pub fn load_obstacles(&mut self, obstacles: Vec<Obstacle>) -> Action {
        self.obstacles.load(obstacles);
        Action::RenderNeeded
    }

    // --- Trajectory ---

    /// Swap in a new trajectory. Any running playback is stopped first so no
    /// frame of the old run is drawn over the new path.
    pub fn replace_trajectory(&mut self, trajectory: Trajectory) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.playback.stop() {
            actions.push(Action::PlaybackStopped);
        }
        tracing::debug!(id = ?trajectory.id(), len = trajectory.len(), "trajectory replaced");
        actions.push(Action::TrajectoryReplaced { len: trajectory.len() });
        actions.push(Action::RenderNeeded);
        self.trajectory = Some(trajectory);
        actions
    }

    // --- Playback ---

    /// Set the `[0, 100]` speed slider. Applies to the next run.
    pub fn set_speed(&mut self, speed_setting: f64) {
        self.playback.set_speed_setting(speed_setting);
    }

    /// Start animating the current trajectory from the beginning.
    ///
    /// No-op when there is no trajectory or it is empty.
    pub fn start_playback(&mut self) -> Vec<Action> {
        let len = self.trajectory.as_ref().map_or(0, Trajectory::len);
        if !self.playback.start(len) {
            tracing::debug!("nothing to play");
            return Vec::new();
        }
        let total_duration_ms = self.playback.run().map_or(0.0, |run| run.total_duration_ms());
        vec![Action::PlaybackStarted { len, total_duration_ms }]
    }

    /// Stop the current run. The next render shows the full static path.
    pub fn stop_playback(&mut self) -> Vec<Action> {
        if self.playback.stop() { vec![Action::PlaybackStopped, Action::RenderNeeded] } else { Vec::new() }
    }

    /// Feed one scheduler tick to the playback controller.
    pub fn tick(&mut self, elapsed_ms: f64) -> Vec<Action> {
        match self.playback.tick(elapsed_ms) {
            Tick::Inactive | Tick::Pending => Vec::new(),
            Tick::Frame(index) => vec![Action::PlaybackFrame(index), Action::RenderNeeded],
            Tick::Finished => vec![Action::PlaybackFinished, Action::RenderNeeded],
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.ui.mode
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        self.obstacles.as_slice()
    }

    #[must_use]
    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.trajectory.as_ref()
    }

    /// Waypoint the robot marker sits on, while animating.
    #[must_use]
    pub fn playback_index(&self) -> Option<usize> {
        self.playback.playback_index()
    }

    #[must_use]
    pub fn stats(&self) -> Option<TrajectoryStats> {
        self.trajectory
            .as_ref()
            .map(|t| t.stats(self.wall_width, self.wall_height, self.coverage_width))
    }

    /// Request body for trajectory generation from the current state.
    #[must_use]
    pub fn room_model(&self) -> RoomModel {
        RoomModel {
            width: self.wall_width,
            height: self.wall_height,
            coverage_width: self.coverage_width,
            obstacles: self.obstacles.as_slice().to_vec(),
        }
    }

    // --- Render ---

    /// Borrow the current state as a renderable scene.
    #[must_use]
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            wall_width: self.wall_width,
            wall_height: self.wall_height,
            camera: self.camera,
            obstacles: self.obstacles.as_slice(),
            pending_rect: self.ui.pending_rect,
            waypoints: self.trajectory.as_ref().map_or(&[][..], Trajectory::waypoints),
            playback_index: self.playback_index(),
        }
    }

    /// Draw the current state.
    ///
    /// # Errors
    ///
    /// Propagates the first surface error.
    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        render::draw(surface, &self.scene())
    }
}

impl PointerInput for EngineCore {
    fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let world = self.camera.screen_to_world(screen_pt);
        match self.ui.mode {
            Mode::Draw => {
                self.input = InputState::Drawing { anchor_world: world };
                self.ui.pending_rect = Some(Rect::from_corners(world, world));
                Vec::new()
            }
            Mode::Remove => match self.obstacles.remove_at(world) {
                Some((index, obstacle)) => vec![Action::ObstacleRemoved { index, obstacle }, Action::RenderNeeded],
                None => Vec::new(),
            },
        }
    }

    fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let InputState::Drawing { anchor_world } = self.input else {
            return Vec::new();
        };
        let world = self.camera.screen_to_world(screen_pt);
        self.ui.pending_rect = Some(Rect::from_corners(anchor_world, world));
        vec![Action::RenderNeeded]
    }

    fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let InputState::Drawing { anchor_world } = self.input else {
            return Vec::new();
        };
        self.input = InputState::Idle;
        self.ui.pending_rect = None;

        let rect = Rect::from_corners(anchor_world, self.camera.screen_to_world(screen_pt));
        if !rect.is_committable() {
            tracing::debug!(width = rect.width, height = rect.height, "drag too small; discarded");
            return vec![Action::RenderNeeded];
        }
        match Obstacle::new(rect.x, rect.y, rect.width, rect.height) {
            Ok(obstacle) => self.add_obstacle(obstacle),
            Err(err) => {
                tracing::debug!(%err, "discarding dragged obstacle");
                vec![Action::RenderNeeded]
            }
        }
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: Rc<RefCell<CanvasRenderingContext2d>>,
    scheduler: AnimationFrameScheduler,
    pub core: Rc<RefCell<EngineCore>>,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Fails when the element has no 2D rendering context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        let mut core = EngineCore::new();
        core.set_canvas_size(f64::from(canvas.width()), f64::from(canvas.height()));
        Ok(Self {
            canvas,
            ctx: Rc::new(RefCell::new(ctx)),
            scheduler: AnimationFrameScheduler::new(),
            core: Rc::new(RefCell::new(core)),
        })
    }

    /// Pick up the element's current pixel size.
    pub fn sync_canvas_size(&mut self) -> Action {
        let (w, h) = (f64::from(self.canvas.width()), f64::from(self.canvas.height()));
        self.core.borrow_mut().set_canvas_size(w, h)
    }

    pub fn set_wall(&mut self, width: f64, height: f64) -> Action {
        self.core.borrow_mut().set_wall(width, height)
    }

    pub fn set_mode(&mut self, mode: Mode) -> Action {
        self.core.borrow_mut().set_mode(mode)
    }

    pub fn set_speed(&mut self, speed_setting: f64) {
        self.core.borrow_mut().set_speed(speed_setting);
    }

    pub fn add_obstacle_from_form(
        &mut self,
        x: &str,
        y: &str,
        width: &str,
        height: &str,
        name: Option<&str>,
    ) -> Vec<Action> {
        self.core.borrow_mut().add_obstacle_from_form(x, y, width, height, name)
    }

    pub fn remove_obstacle(&mut self, index: usize) -> Vec<Action> {
        self.core.borrow_mut().remove_obstacle(index)
    }

    pub fn clear_obstacles(&mut self) -> Vec<Action> {
        self.core.borrow_mut().clear_obstacles()
    }

    /// Install a freshly received trajectory; it is drawn statically.
    pub fn replace_trajectory(&mut self, trajectory: Trajectory) -> Vec<Action> {
        self.scheduler.cancel();
        self.core.borrow_mut().replace_trajectory(trajectory)
    }

    // --- Playback ---

    /// Animate the current trajectory on animation frames.
    pub fn start_playback(&mut self, observer: impl FnMut(&[Action]) + 'static) -> Vec<Action> {
        player::play(&self.core, &self.ctx, &mut self.scheduler, observer)
    }

    pub fn stop_playback(&mut self) -> Vec<Action> {
        player::stop(&self.core, &self.ctx, &mut self.scheduler)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Propagates canvas API failures.
    pub fn render(&self) -> Result<(), JsValue> {
        self.core.borrow().render(&mut *self.ctx.borrow_mut())
    }
}

impl PointerInput for Engine {
    fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.borrow_mut().on_pointer_down(screen_pt, button)
    }

    fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.borrow_mut().on_pointer_move(screen_pt)
    }

    fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.borrow_mut().on_pointer_up(screen_pt, button)
    }
}
