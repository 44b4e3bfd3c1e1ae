//! Frame driver: owns an engine and its surface and runs them tick by tick.
//!
//! A tick is one fade, step, and draw pass. The driver never schedules itself;
//! a host calls [`Animation::tick`] from whatever clock it has (a browser
//! animation frame, or [`Animation::run`] with a [`FramePacer`] natively).
//! Teardown and resizes arrive through cloneable handles so they can be
//! posted from other callbacks or threads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use swirl_core::error::EngineError;
use swirl_core::surface::Surface;
use swirl_core::Engine;
use tracing::{debug, trace};

/// Outcome of a single [`Animation::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// A frame was produced; schedule the next one.
    Continue,
    /// The stop flag is set; nothing was done and nothing should be scheduled.
    Stopped,
}

/// Shared stop flag. Once stopped, an animation never ticks again.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Pending resize request. Only the latest request survives until the next tick.
#[derive(Debug, Clone, Default)]
pub struct ResizeHandle(Arc<Mutex<Option<(f64, f64)>>>);

impl ResizeHandle {
    pub fn request(&self, width: f64, height: f64) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = Some((width, height));
    }

    /// Removes and returns the pending request.
    pub fn take(&self) -> Option<(f64, f64)> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).take()
    }

    pub fn is_pending(&self) -> bool {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}

/// Source of frame timing for [`Animation::run`].
pub trait FramePacer {
    /// Blocks until the next frame is due and returns a timestamp in
    /// milliseconds. The engine does not use the timestamp.
    fn wait_for_frame(&mut self) -> f64;
}

/// Returns immediately. For offline rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unpaced {
    frames: u64,
}

impl FramePacer for Unpaced {
    fn wait_for_frame(&mut self) -> f64 {
        self.frames += 1;
        self.frames as f64
    }
}

/// Sleeps to hold a fixed frame rate. A late frame is not made up for;
/// the schedule restarts from the late frame.
#[derive(Debug, Clone)]
pub struct FixedRate {
    interval: Duration,
    epoch: Instant,
    next: Option<Instant>,
}

impl FixedRate {
    /// Paces at `fps` frames per second (at least 1).
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            epoch: Instant::now(),
            next: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl FramePacer for FixedRate {
    fn wait_for_frame(&mut self) -> f64 {
        let mut now = Instant::now();
        if let Some(due) = self.next {
            if due > now {
                thread::sleep(due - now);
                now = Instant::now();
            }
        }
        let base = self.next.map_or(now, |due| due.max(now));
        self.next = Some(base + self.interval);
        now.duration_since(self.epoch).as_secs_f64() * 1000.0
    }
}

/// An engine bound to the surface it draws on.
pub struct Animation<E, S> {
    engine: E,
    surface: S,
    stop: StopHandle,
    resize: ResizeHandle,
    started: bool,
    frames: u64,
}

impl<E: Engine, S: Surface> Animation<E, S> {
    pub fn new(engine: E, surface: S) -> Self {
        Self {
            engine,
            surface,
            stop: StopHandle::default(),
            resize: ResizeHandle::default(),
            started: false,
            frames: 0,
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn resize_handle(&self) -> ResizeHandle {
        self.resize.clone()
    }

    /// Prepares the surface for the first frame. Later calls do nothing.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.engine.prepare(&mut self.surface);
        self.started = true;
        debug!(
            width = self.surface.width(),
            height = self.surface.height(),
            "animation started"
        );
    }

    /// Runs one frame unless stopped.
    ///
    /// A pending resize is applied to the surface and the engine before the
    /// step, so the whole frame sees one set of bounds. Resizing clears the
    /// surface, so it is prepared again.
    pub fn tick(&mut self) -> Result<Tick, EngineError> {
        if self.stop.is_stopped() {
            return Ok(Tick::Stopped);
        }
        self.start();
        if let Some((width, height)) = self.resize.take() {
            self.surface.resize(width, height)?;
            self.engine.resize(width, height)?;
            self.engine.prepare(&mut self.surface);
            debug!(width, height, frame = self.frames, "applied resize");
        }
        self.engine.step()?;
        self.engine.draw(&mut self.surface);
        self.frames += 1;
        trace!(frame = self.frames, "tick");
        Ok(Tick::Continue)
    }

    /// Ticks until stopped or `max_frames` frames have run, waiting on
    /// `pacer` before each one. Returns the number of frames run by this call.
    pub fn run(&mut self, pacer: &mut dyn FramePacer, max_frames: Option<u64>) -> Result<u64, EngineError> {
        let mut count = 0;
        while max_frames.map_or(true, |max| count < max) {
            pacer.wait_for_frame();
            match self.tick()? {
                Tick::Continue => count += 1,
                Tick::Stopped => {
                    debug!(frames = count, "animation stopped");
                    break;
                }
            }
        }
        Ok(count)
    }

    /// Frames produced since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_parts(self) -> (E, S) {
        (self.engine, self.surface)
    }
}
