//! Tick scheduling.
//!
//! A [`Scheduler`] repeatedly invokes a callback with the milliseconds elapsed
//! since `start`, until the callback returns [`TickControl::Break`] or the
//! scheduler is cancelled. Cancellation is cooperative: a tick that is
//! already executing runs to completion, and no further tick is delivered.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// Whether the scheduler should deliver another tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Break,
}

/// Per-tick callback. Receives milliseconds since the scheduler started.
pub type TickCallback = Box<dyn FnMut(f64) -> TickControl>;

pub trait Scheduler {
    /// Begin delivering ticks to `callback`, replacing any previous callback.
    fn start(&mut self, callback: TickCallback);

    /// Stop delivering ticks. No-op when idle.
    fn cancel(&mut self);

    /// Whether a callback is currently scheduled.
    fn is_running(&self) -> bool;
}

/// Deterministic scheduler advanced explicitly by the owner.
///
/// Used by tests and by hosts that already own a frame loop.
#[derive(Default)]
pub struct ManualScheduler {
    callback: Option<TickCallback>,
    elapsed_ms: f64,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds delivered to the most recent tick.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Move the clock forward by `delta_ms` and deliver one tick.
    ///
    /// Returns `true` while the callback wants more ticks.
    pub fn advance(&mut self, delta_ms: f64) -> bool {
        let Some(callback) = self.callback.as_mut() else {
            return false;
        };
        self.elapsed_ms += delta_ms;
        match callback(self.elapsed_ms) {
            TickControl::Continue => true,
            TickControl::Break => {
                self.callback = None;
                false
            }
        }
    }

    /// Tick every `frame_ms` until the callback breaks or `max_ticks` is hit.
    /// Returns the number of ticks delivered.
    pub fn run(&mut self, frame_ms: f64, max_ticks: usize) -> usize {
        let mut ticks = 0;
        if !self.is_running() {
            return ticks;
        }
        // First tick lands on t = 0, like a frame callback right after start.
        let mut delta = 0.0;
        while ticks < max_ticks {
            ticks += 1;
            if !self.advance(delta) {
                break;
            }
            delta = frame_ms;
        }
        ticks
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self, callback: TickCallback) {
        self.callback = Some(callback);
        self.elapsed_ms = 0.0;
    }

    fn cancel(&mut self) {
        self.callback = None;
    }

    fn is_running(&self) -> bool {
        self.callback.is_some()
    }
}

type FrameClosure = Closure<dyn FnMut(f64)>;

/// Take the frame closure out of `slot` and hand its drop to `defer`.
///
/// Breaks the closure's self-reference once the loop has ended on its own.
/// The drop must run after the current frame returns.
fn release_after_break<T: 'static>(slot: &RefCell<Option<T>>, defer: impl FnOnce(Box<dyn FnOnce()>)) {
    if let Some(closure) = slot.borrow_mut().take() {
        defer(Box::new(move || drop(closure)));
    }
}

/// Browser scheduler built on `window.requestAnimationFrame`.
///
/// Elapsed time is measured from the first frame timestamp after `start`.
#[derive(Default)]
pub struct AnimationFrameScheduler {
    running: Rc<Cell<bool>>,
    handle: Rc<Cell<Option<i32>>>,
    closure: Rc<RefCell<Option<FrameClosure>>>,
}

impl AnimationFrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for AnimationFrameScheduler {
    fn start(&mut self, mut callback: TickCallback) {
        self.cancel();

        let Some(window) = web_sys::window() else {
            tracing::warn!("no window; animation frames unavailable");
            return;
        };

        let running = Rc::new(Cell::new(true));
        let handle = Rc::new(Cell::new(None));
        let slot: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));

        let frame_running = Rc::clone(&running);
        let frame_handle = Rc::clone(&handle);
        let frame_slot = Rc::clone(&slot);
        let frame_window = window.clone();
        let origin: Cell<Option<f64>> = Cell::new(None);

        let closure = Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            if !frame_running.get() {
                return;
            }
            let start = origin.get().unwrap_or(timestamp);
            origin.set(Some(start));

            if callback(timestamp - start) == TickControl::Break {
                frame_running.set(false);
                frame_handle.set(None);
                // This closure is still executing; drop it from a microtask.
                release_after_break(&frame_slot, |release| {
                    let task = Closure::once_into_js(move || release());
                    frame_window.queue_microtask(task.unchecked_ref());
                });
                return;
            }

            if let Some(next) = frame_slot.borrow().as_ref() {
                match frame_window.request_animation_frame(next.as_ref().unchecked_ref()) {
                    Ok(id) => frame_handle.set(Some(id)),
                    Err(err) => {
                        tracing::warn!(?err, "requestAnimationFrame failed");
                        frame_running.set(false);
                    }
                }
            }
        });

        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => handle.set(Some(id)),
            Err(err) => {
                tracing::warn!(?err, "requestAnimationFrame failed");
                return;
            }
        }
        *slot.borrow_mut() = Some(closure);

        self.running = running;
        self.handle = handle;
        self.closure = slot;
    }

    fn cancel(&mut self) {
        self.running.set(false);
        if let Some(id) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.cancel_animation_frame(id) {
                    tracing::warn!(?err, "cancelAnimationFrame failed");
                }
            }
        }
        // Breaks the closure's self-reference so it can be dropped.
        self.closure.borrow_mut().take();
    }

    fn is_running(&self) -> bool {
        self.running.get()
    }
}
