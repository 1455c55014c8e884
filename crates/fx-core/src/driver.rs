//! Frame driver shared by every animation loop.
//!
//! The host scheduler (requestAnimationFrame on the web) calls [`FrameDriver::tick`]
//! once per display refresh and keeps rescheduling while it returns `true`.
//! A frame that fails is logged and the loop carries on. Losing the GL
//! context suspends drawing until the host reports it restored.

use crate::constants::FAULT_LOG_EVERY;
use crate::error::RenderError;

/// One animated scene.
pub trait Animation {
    fn frame(&mut self, timestamp_ms: f64) -> Result<(), RenderError>;

    /// The GL context is gone along with every object created on it.
    fn context_lost(&mut self) {}

    /// A fresh context is available; GPU objects must be created again.
    fn context_restored(&mut self) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

pub struct FrameDriver<A> {
    name: &'static str,
    animation: Option<A>,
    state: LoopState,
    frames: u64,
    faults: u64,
}

impl<A: Animation> FrameDriver<A> {
    pub fn new(name: &'static str, animation: A) -> Self {
        Self {
            name,
            animation: Some(animation),
            state: LoopState::Idle,
            frames: 0,
            faults: 0,
        }
    }

    /// `Idle -> Running`. Returns `false` if the driver was already started or stopped.
    pub fn start(&mut self) -> bool {
        if self.state != LoopState::Idle {
            return false;
        }
        self.state = LoopState::Running;
        log::info!("[{}] loop running", self.name);
        true
    }

    /// Run one frame. Returns whether the host should schedule another tick.
    pub fn tick(&mut self, timestamp_ms: f64) -> bool {
        if self.state != LoopState::Running {
            return false;
        }
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        self.frames += 1;
        if let Err(e) = animation.frame(timestamp_ms) {
            self.faults += 1;
            if self.faults == 1 || self.faults % FAULT_LOG_EVERY == 0 {
                log::warn!(
                    "[{}] frame {} failed ({} faults so far): {}",
                    self.name,
                    self.frames,
                    self.faults,
                    e
                );
            }
        }
        true
    }

    pub fn context_lost(&mut self) {
        if let Some(animation) = self.animation.as_mut() {
            log::error!("[{}] GL context lost, drawing suspended", self.name);
            animation.context_lost();
        }
    }

    pub fn context_restored(&mut self) {
        if let Some(animation) = self.animation.as_mut() {
            log::info!("[{}] GL context restored", self.name);
            animation.context_restored();
        }
    }

    /// Terminal. Drops the animation, which releases its GPU resources.
    pub fn stop(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.state = LoopState::Stopped;
        self.animation = None;
        log::info!(
            "[{}] loop stopped after {} frames ({} faults)",
            self.name,
            self.frames,
            self.faults
        );
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn animation(&self) -> Option<&A> {
        self.animation.as_ref()
    }

    pub fn animation_mut(&mut self) -> Option<&mut A> {
        self.animation.as_mut()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn faults(&self) -> u64 {
        self.faults
    }
}
