//! Pose solvers, one per movement family
//!
//! Every family implements [`PoseSolver`]. Dispatch goes through a fixed
//! table indexed by [`Movement::index`], so adding a family means adding a
//! variant, a solver and a table slot.
//!
//! ## Phase convention
//!
//! `phase` is clamped to [0, 1]. 0 is the lift's start position and 1 the
//! opposite end (squat bottom, deadlift lockout, bench chest, OHP lockout,
//! pull-up top, push-up bottom). The thruster covers its whole composite
//! rep, so its phase 0 and phase 1 coincide.

mod bench;
mod deadlift;
mod overhead;
mod pullup;
mod pushup;
mod squat;
mod thruster;

pub use bench::BenchSolver;
pub use deadlift::DeadliftSolver;
pub use overhead::OverheadPressSolver;
pub use pullup::PullUpSolver;
pub use pushup::PushUpSolver;
pub use squat::{SquatSolver, MAX_TRUNK_ANGLE_DEG, MIN_TRUNK_ANGLE_DEG};
pub use thruster::ThrusterSolver;

use glam::DVec2;

use crate::anthropometry::{Anthropometry, SegmentLengths};
use crate::ik::{solve_two_bone, Bend};
use crate::movement::{GripWidth, Movement, MovementOptions};
use crate::pose::{
    validate_rigidity, Contact, ContactKind, JointPositions, KinematicSolution, Pose2D,
    SolveResult, RIGIDITY_TOLERANCE,
};

/// Common contract of every family solver. Implementations are stateless.
pub trait PoseSolver: Sync {
    fn movement(&self) -> Movement;

    /// Geometry at the family's defining reference pose, including ROM
    fn reference(&self, anthro: &Anthropometry, options: &MovementOptions) -> KinematicSolution;

    /// Full joint configuration at a clamped phase
    fn solve(&self, anthro: &Anthropometry, options: &MovementOptions, phase: f64)
        -> SolveResult;

    /// Bar displacement over one repetition, meters
    fn rom(&self, anthro: &Anthropometry, options: &MovementOptions) -> f64 {
        self.reference(anthro, options).displacement
    }
}

/// Solver lookup table, ordered like [`Movement::ALL`]
static SOLVERS: [&dyn PoseSolver; Movement::COUNT] = [
    &SquatSolver,
    &DeadliftSolver,
    &BenchSolver,
    &OverheadPressSolver,
    &PullUpSolver,
    &PushUpSolver,
    &ThrusterSolver,
];

#[inline]
pub fn solver_for(movement: Movement) -> &'static dyn PoseSolver {
    SOLVERS[movement.index()]
}

/// Total bar displacement for one repetition
pub fn get_rom(anthro: &Anthropometry, movement: Movement, options: &MovementOptions) -> f64 {
    solver_for(movement).rom(anthro, options)
}

/// Joint configuration at `phase`
pub fn solve(
    anthro: &Anthropometry,
    movement: Movement,
    options: &MovementOptions,
    phase: f64,
) -> SolveResult {
    solver_for(movement).solve(anthro, options, phase)
}

/// Reference-pose geometry (moment arms, angles, ROM)
pub fn reference_solution(
    anthro: &Anthropometry,
    movement: Movement,
    options: &MovementOptions,
) -> KinematicSolution {
    solver_for(movement).reference(anthro, options)
}

/// Clamp to [0, 1]; anything non-finite is the start position
pub(crate) fn clamp_phase(phase: f64) -> f64 {
    if phase.is_finite() {
        phase.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[inline]
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Grip width as a multiple of shoulder width, per family
pub(crate) fn grip_multiple(grip: GripWidth, multiples: [f64; 3]) -> f64 {
    match grip {
        GripWidth::Narrow => multiples[0],
        GripWidth::Medium => multiples[1],
        GripWidth::Wide => multiples[2],
    }
}

/// Sagittal projection of a straight arm whose hand sits `multiple`
/// shoulder widths apart. `None` when the hand is out to the side further
/// than the arm can reach.
pub(crate) fn projected_reach(anthro: &Anthropometry, multiple: f64) -> Option<f64> {
    let lateral = 0.5 * (multiple - 1.0).max(0.0) * anthro.shoulder_width();
    let reach = anthro.arm_reach();
    if lateral >= reach {
        return None;
    }
    Some((reach * reach - lateral * lateral).sqrt())
}

/// Elbow and wrist for a hand at `hand`, with both arm bones shortened by the
/// same sagittal projection factor.
pub(crate) fn arm_chain(
    anthro: &Anthropometry,
    shoulder: DVec2,
    hand: DVec2,
    projection: f64,
    bend: Bend,
) -> (DVec2, DVec2) {
    let upper = anthro.segments.upper_arm * projection;
    let lower = anthro.forearm_reach() * projection;
    let chain = solve_two_bone(shoulder, hand, upper, lower, bend);
    (chain.joint, chain.end)
}

/// Feet contact on the floor under the ankle
pub(crate) fn floor_contact(positions: &JointPositions, segments: &SegmentLengths) -> Contact {
    Contact::new(
        ContactKind::Feet,
        positions.ankle - DVec2::new(0.0, segments.foot_height),
    )
}

/// Build the frame result, re-checking rigidity of the leg/trunk chain
pub(crate) fn finish(
    positions: JointPositions,
    contacts: Vec<Contact>,
    segments: &SegmentLengths,
    valid: bool,
    mut errors: Vec<String>,
) -> SolveResult {
    let rigidity = validate_rigidity(&positions, segments, RIGIDITY_TOLERANCE);
    let valid = valid && rigidity.is_empty();
    errors.extend(rigidity);

    SolveResult {
        pose: Pose2D {
            positions,
            // Sagittal view: the bar is seen end-on and never tilts
            bar_angle: 0.0,
            contacts,
        },
        valid,
        errors,
    }
}
