//! Rep cycle timing
//!
//! Maps a host-driven clock onto the phase consumed by the pose solvers.
//! A cycle is: first leg, pause at the far end, second leg, pause back at
//! the start. Eccentric-first families lower the load on the first leg.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::movement::Movement;

/// Shortest duration of any moving leg, seconds
pub const MIN_PHASE_DURATION: f64 = 0.1;

/// Concentric bar velocity used when none is given, m/s
pub const DEFAULT_VELOCITY: f64 = 0.5;

/// Timing of one repetition, seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepCycleConfig {
    pub concentric_duration: f64,
    pub eccentric_duration: f64,
    /// Pause where the load is lowest
    pub bottom_pause: f64,
    /// Pause where the load is highest
    pub top_pause: f64,
    pub total_duration: f64,
    /// Concentric bar velocity the durations were derived from, m/s
    pub velocity: f64,
}

impl RepCycleConfig {
    /// Scale the eccentric leg relative to the concentric one
    pub fn with_eccentric_ratio(self, ratio: f64) -> Self {
        let ratio = if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 };
        Self {
            eccentric_duration: (self.concentric_duration * ratio).max(MIN_PHASE_DURATION),
            ..self
        }
        .retotal()
    }

    pub fn with_pauses(self, bottom: f64, top: f64) -> Self {
        Self {
            bottom_pause: non_negative(bottom),
            top_pause: non_negative(top),
            ..self
        }
        .retotal()
    }

    fn retotal(self) -> Self {
        Self {
            total_duration: self.concentric_duration
                + self.eccentric_duration
                + self.bottom_pause
                + self.top_pause,
            ..self
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Symmetric cycle for a bar travelling `rom` meters at `velocity` m/s.
///
/// A non-positive or non-finite velocity falls back to [`DEFAULT_VELOCITY`].
pub fn calculate_rep_cycle(rom: f64, velocity: f64) -> RepCycleConfig {
    let velocity = if velocity.is_finite() && velocity > 0.0 {
        velocity
    } else {
        DEFAULT_VELOCITY
    };
    let concentric = (non_negative(rom) / velocity).max(MIN_PHASE_DURATION);

    RepCycleConfig {
        concentric_duration: concentric,
        eccentric_duration: concentric,
        bottom_pause: 0.0,
        top_pause: 0.0,
        total_duration: 2.0 * concentric,
        velocity,
    }
}

/// Cosine ease-in-out on [0, 1]
#[inline]
pub(crate) fn ease(t: f64) -> f64 {
    0.5 - 0.5 * (PI * t.clamp(0.0, 1.0)).cos()
}

/// Solver phase for a rep progress value.
///
/// `progress` wraps into [0, 1); non-finite progress is the start of the rep.
pub fn get_animation_phase(movement: Movement, progress: f64, cycle: &RepCycleConfig) -> f64 {
    let progress = if progress.is_finite() {
        progress.rem_euclid(1.0)
    } else {
        0.0
    };

    // The thruster solver sequences and eases its composite rep itself
    if movement == Movement::Thruster {
        return progress;
    }

    let (first, far_pause, second) = if movement.eccentric_first() {
        (cycle.eccentric_duration, cycle.bottom_pause, cycle.concentric_duration)
    } else {
        (cycle.concentric_duration, cycle.top_pause, cycle.eccentric_duration)
    };
    let near_pause = if movement.eccentric_first() {
        cycle.top_pause
    } else {
        cycle.bottom_pause
    };

    let total = first + far_pause + second + near_pause;
    if total <= 0.0 || !total.is_finite() {
        return 0.0;
    }

    let t = progress * total;
    if t < first {
        ease(t / first)
    } else if t < first + far_pause {
        1.0
    } else if t < first + far_pause + second {
        1.0 - ease((t - first - far_pause) / second)
    } else {
        0.0
    }
}

/// Rep playback clock
///
/// Immutable value type - can be replaced entirely each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepPlayback {
    pub movement: Movement,
    /// Seconds since the first rep started (not wrapped)
    pub elapsed: f64,
}

impl RepPlayback {
    pub fn new(movement: Movement) -> Self {
        Self {
            movement,
            elapsed: 0.0,
        }
    }

    /// Advance time by delta (does not wrap - that's done when sampling)
    pub fn advance(self, delta_seconds: f64) -> RepPlayback {
        RepPlayback {
            elapsed: self.elapsed + non_negative(delta_seconds),
            ..self
        }
    }

    /// Change movement, reset time
    pub fn set_movement(self, movement: Movement) -> RepPlayback {
        RepPlayback::new(movement)
    }

    /// Progress through the current rep, [0, 1)
    pub fn progress(&self, cycle: &RepCycleConfig) -> f64 {
        if cycle.total_duration > 0.0 {
            (self.elapsed / cycle.total_duration).rem_euclid(1.0)
        } else {
            0.0
        }
    }

    pub fn completed_reps(&self, cycle: &RepCycleConfig) -> u32 {
        if cycle.total_duration > 0.0 {
            (self.elapsed / cycle.total_duration).floor() as u32
        } else {
            0
        }
    }

    pub fn phase(&self, cycle: &RepCycleConfig) -> f64 {
        get_animation_phase(self.movement, self.progress(cycle), cycle)
    }
}
