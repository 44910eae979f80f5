//! Redraw cadence for a board.
//!
//! A `FrameLoop` answers one question each time the host offers a frame:
//! should this board be painted? Once stopped it never asks for another
//! frame, so a closed window cannot leave a redraw callback spinning.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// When a board is repainted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RedrawPolicy {
    /// Clear and repaint every display frame.
    Continuous,
    /// Repaint only after the shape list changed or a repaint was requested.
    #[default]
    OnChange,
}

/// Result of offering a frame to the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDecision {
    Draw,
    Skip,
    Stopped,
}

/// Frame scheduling state for one board.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    policy: RedrawPolicy,
    running: bool,
    /// Registry revision at the last drawn frame.
    drawn_revision: Option<u64>,
    /// Repaint requested regardless of revision (resize, page switch).
    invalidated: bool,
    frames_drawn: u64,
    last_frame: Option<Instant>,
    last_interval: Option<Duration>,
}

impl FrameLoop {
    pub fn new(policy: RedrawPolicy) -> Self {
        Self {
            policy,
            running: true,
            drawn_revision: None,
            invalidated: true,
            frames_drawn: 0,
            last_frame: None,
            last_interval: None,
        }
    }

    pub fn policy(&self) -> RedrawPolicy {
        self.policy
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Force the next offered frame to draw.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    /// Stop scheduling. Every later offer returns `Stopped`.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("Frame loop stopped after {} frames", self.frames_drawn);
        }
        self.running = false;
    }

    /// Whether the host should schedule another frame right after this one.
    pub fn wants_next_frame(&self) -> bool {
        self.running && self.policy == RedrawPolicy::Continuous
    }

    /// Whether a repaint is owed for `revision` without waiting for a frame.
    pub fn needs_redraw(&self, revision: u64) -> bool {
        self.running
            && (self.invalidated
                || self.policy == RedrawPolicy::Continuous
                || self.drawn_revision != Some(revision))
    }

    /// Offer a frame. `revision` is the board's current registry revision.
    pub fn next_frame(&mut self, revision: u64) -> FrameDecision {
        if !self.running {
            return FrameDecision::Stopped;
        }
        if !self.needs_redraw(revision) {
            return FrameDecision::Skip;
        }

        let now = Instant::now();
        self.last_interval = self.last_frame.map(|prev| now.duration_since(prev));
        self.last_frame = Some(now);
        self.drawn_revision = Some(revision);
        self.invalidated = false;
        self.frames_drawn += 1;
        FrameDecision::Draw
    }

    /// Number of frames that were drawn.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Time between the last two drawn frames.
    pub fn last_interval(&self) -> Option<Duration> {
        self.last_interval
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(RedrawPolicy::default())
    }
}
