//! Touch edge detection.
//!
//! Two states: `Idle` (no touch last cycle) and `Pressed` (touch last cycle).
//! Only the Idle -> Pressed transition produces a press. There is no debounce
//! filter beyond the poll interval itself, so a contact bouncing faster than
//! the interval can be seen as two presses or none.

use crate::input::{TouchPoint, TouchSample};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollState {
    #[default]
    Idle,
    Pressed,
}

/// Classification of one cycle against the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Off -> on: the only edge that can select and dispatch.
    Rising(TouchPoint),
    /// On -> on.
    Held(TouchPoint),
    /// On -> off.
    Released,
    /// Off -> off.
    Idle,
}

impl Edge {
    pub fn is_rising(&self) -> bool {
        matches!(self, Edge::Rising(_))
    }
}

/// Remembers the previous sample between cycles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Poller {
    previous: TouchSample,
}

impl Poller {
    pub const fn new() -> Self {
        Self { previous: None }
    }

    pub fn state(&self) -> PollState {
        if self.previous.is_some() {
            PollState::Pressed
        } else {
            PollState::Idle
        }
    }

    /// Classify `sample` and store it as the previous sample.
    pub fn cycle(&mut self, sample: TouchSample) -> Edge {
        let edge = match (self.previous, sample) {
            (None, Some(point)) => Edge::Rising(point),
            (Some(_), Some(point)) => Edge::Held(point),
            (Some(_), None) => Edge::Released,
            (None, None) => Edge::Idle,
        };
        self.previous = sample;
        edge
    }
}
