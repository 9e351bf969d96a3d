//! Frame scheduling seam and the visibility gate.
//!
//! The browser drives frames through `requestAnimationFrame`; tests drive them
//! by hand through [`ManualScheduler`]. Both hand out a [`FrameHandle`] whose
//! cancellation stops further callbacks.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Debug, Default)]
pub struct FrameHandle(Rc<Cell<bool>>);

impl FrameHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Callback receives the frame time in seconds.
pub type FrameCallback = Box<dyn FnMut(f64)>;

pub trait Scheduler {
    fn every_frame(&mut self, callback: FrameCallback) -> FrameHandle;
}

#[derive(Default)]
pub struct ManualScheduler {
    callbacks: Vec<(FrameHandle, FrameCallback)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one frame at `now` for every live callback.
    pub fn advance(&mut self, now: f64) {
        self.callbacks.retain(|(handle, _)| !handle.is_cancelled());
        for (handle, cb) in self.callbacks.iter_mut() {
            if !handle.is_cancelled() {
                cb(now);
            }
        }
    }

    pub fn pending(&self) -> usize {
        self.callbacks
            .iter()
            .filter(|(handle, _)| !handle.is_cancelled())
            .count()
    }
}

impl Scheduler for ManualScheduler {
    fn every_frame(&mut self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle::new();
        self.callbacks.push((handle.clone(), callback));
        handle
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameState {
    /// Scrolled out of view; frames do nothing.
    Idle,
    Active,
}

#[derive(Clone, Copy, Debug)]
pub struct FrameGate {
    state: FrameState,
}

impl Default for FrameGate {
    fn default() -> Self {
        Self {
            state: FrameState::Idle,
        }
    }
}

impl FrameGate {
    #[inline]
    pub fn state(&self) -> FrameState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == FrameState::Active
    }

    /// Returns true on a state transition.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        let next = if visible {
            FrameState::Active
        } else {
            FrameState::Idle
        };
        let changed = next != self.state;
        self.state = next;
        changed
    }
}
