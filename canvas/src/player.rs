//! Playback driver: binds a [`Scheduler`] to an [`EngineCore`] and a [`Surface`].
//!
//! Each tick first checks whether the run is still active and bails out
//! without drawing if it is not, so a stop issued between ticks never lets a
//! stale frame through. Frames are drawn only when the controller reports a
//! new waypoint index; the finishing tick draws the full static path.

#[cfg(test)]
#[path = "player_test.rs"]
mod player_test;

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use crate::engine::{Action, EngineCore};
use crate::render::Surface;
use crate::schedule::{Scheduler, TickControl};

/// Start playback of the core's current trajectory on `scheduler`.
///
/// `observer` sees every non-empty batch of tick actions after the frame has
/// been drawn. Returns the start actions; empty when there was nothing to
/// play, in which case the scheduler is left untouched.
pub fn play<S>(
    core: &Rc<RefCell<EngineCore>>,
    surface: &Rc<RefCell<S>>,
    scheduler: &mut dyn Scheduler,
    mut observer: impl FnMut(&[Action]) + 'static,
) -> Vec<Action>
where
    S: Surface + 'static,
    S::Error: Debug,
{
    let started = core.borrow_mut().start_playback();
    if started.is_empty() {
        return started;
    }

    let core = Rc::clone(core);
    let surface = Rc::clone(surface);
    scheduler.start(Box::new(move |elapsed_ms| {
        let (actions, still_active) = {
            let mut core = core.borrow_mut();
            if !core.playback.is_active() {
                return TickControl::Break;
            }
            let actions = core.tick(elapsed_ms);
            if actions.contains(&Action::RenderNeeded) {
                redraw(&core, &surface);
            }
            (actions, core.playback.is_active())
        };
        if !actions.is_empty() {
            observer(&actions);
        }
        if still_active { TickControl::Continue } else { TickControl::Break }
    }));
    started
}

/// Stop playback, cancel the scheduler and redraw the full static path.
pub fn stop<S>(core: &Rc<RefCell<EngineCore>>, surface: &Rc<RefCell<S>>, scheduler: &mut dyn Scheduler) -> Vec<Action>
where
    S: Surface,
    S::Error: Debug,
{
    let actions = core.borrow_mut().stop_playback();
    scheduler.cancel();
    if actions.contains(&Action::RenderNeeded) {
        redraw(&core.borrow(), surface);
    }
    actions
}

fn redraw<S>(core: &EngineCore, surface: &RefCell<S>)
where
    S: Surface,
    S::Error: Debug,
{
    if let Err(err) = core.render(&mut *surface.borrow_mut()) {
        tracing::warn!(?err, "playback frame render failed");
    }
}
