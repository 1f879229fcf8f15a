//! Per-lifter work, demand and energy metrics.
//!
//! Everything here is a pure function of one lifter's inputs; nothing is
//! cached between comparisons.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::movement::{Movement, MovementOptions};
use crate::rep_cycle::calculate_rep_cycle;

/// Standard gravity, m/s²
pub const GRAVITY: f64 = 9.80665;

/// Joules per kilocalorie
pub const JOULES_PER_KCAL: f64 = 4184.0;

/// Peak muscular efficiency at zero velocity
pub const PEAK_EFFICIENCY: f64 = 0.25;

/// Fastest average bar speed accepted for energy estimates, m/s
pub const MAX_BAR_VELOCITY: f64 = 10.0;

/// Exponent for allometric scaling by body weight
pub const ALLOMETRIC_EXPONENT: f64 = 2.0 / 3.0;

/// Fraction of body mass the lifter also moves
pub fn body_mass_fraction(movement: Movement) -> f64 {
    match movement {
        Movement::Squat | Movement::Thruster => 0.971,
        Movement::Deadlift => 0.678,
        Movement::Bench | Movement::OverheadPress => 0.10,
        Movement::PullUp => 0.988,
        Movement::PushUp => 0.64,
    }
}

/// External load, belt/vest weight and the moved share of body mass, kg
pub fn effective_mass(
    movement: Movement,
    options: &MovementOptions,
    load: f64,
    body_weight: f64,
) -> f64 {
    load + options.added_weight().max(0.0) + body_mass_fraction(movement) * body_weight
}

/// Leverage-weighted difficulty; the square root damps pure range of motion
#[inline]
pub fn demand_factor(moment_arm: f64, displacement: f64) -> f64 {
    moment_arm * displacement.max(0.0).sqrt()
}

/// Mechanical efficiency falling off with bar speed
#[inline]
pub fn mechanical_efficiency(velocity: f64) -> f64 {
    PEAK_EFFICIENCY * (-0.5 * velocity * velocity).exp()
}

/// Inputs for one lifter's metrics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsInput {
    pub movement: Movement,
    pub options: MovementOptions,
    pub body_weight: f64,
    pub load: f64,
    pub reps: u32,
    pub displacement: f64,
    pub primary_moment_arm: f64,
    /// Seconds per rep; derived from `velocity` when absent
    pub time_per_rep: Option<f64>,
    /// Concentric bar velocity, m/s
    pub velocity: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub displacement: f64,
    pub effective_mass: f64,
    pub work_per_rep: f64,
    pub total_work: f64,
    pub score_p4p: f64,
    pub demand_factor: f64,
    pub time_per_rep: f64,
    /// Metabolic cost, kcal
    pub calories: f64,
    /// Watts
    pub peak_power: f64,
    /// kcal per minute
    pub burn_rate: f64,
}

/// Metrics for one lifter.
///
/// Fails when the rep timing implies an average bar speed above
/// [`MAX_BAR_VELOCITY`], where the efficiency model stops being meaningful
/// and the energy terms diverge.
pub fn calculate_metrics(input: &MetricsInput) -> Result<Metrics, InputError> {
    let displacement = input.displacement.max(0.0);
    let effective_mass =
        effective_mass(input.movement, &input.options, input.load, input.body_weight);
    let work_per_rep = effective_mass * GRAVITY * displacement;
    let total_work = work_per_rep * input.reps as f64;

    let cycle = calculate_rep_cycle(displacement, input.velocity);
    let (time_per_rep, concentric) = match input.time_per_rep {
        Some(t) if t.is_finite() && t > 0.0 => (t, 0.5 * t),
        _ => (cycle.total_duration, cycle.concentric_duration),
    };

    let velocity = displacement / time_per_rep;
    if !(velocity <= MAX_BAR_VELOCITY) {
        return Err(InputError::TooLarge {
            field: "barVelocity",
            value: velocity,
            max: MAX_BAR_VELOCITY,
        });
    }
    let metabolic = total_work / mechanical_efficiency(velocity);
    let calories = metabolic / JOULES_PER_KCAL;
    let minutes = input.reps as f64 * time_per_rep / 60.0;

    Ok(Metrics {
        displacement,
        effective_mass,
        work_per_rep,
        total_work,
        score_p4p: total_work / input.body_weight.powf(ALLOMETRIC_EXPONENT),
        demand_factor: demand_factor(input.primary_moment_arm, displacement),
        time_per_rep,
        calories,
        peak_power: effective_mass * GRAVITY * FRAC_PI_2 * (displacement / concentric),
        burn_rate: if minutes > 0.0 { calories / minutes } else { 0.0 },
    })
}
