//! Deadlift solver
//!
//! Bar stays over the ankle with the arms hanging vertically, so the
//! shoulder is always straight above the bar. The shin angle sets the knee
//! and the hip closes the knee→shoulder gap through two-bone IK.

use std::f64::consts::FRAC_PI_2;

use glam::DVec2;
use log::warn;

use super::{clamp_phase, finish, floor_contact, lerp, PoseSolver};
use crate::anthropometry::Anthropometry;
use crate::ik::{along, solve_two_bone, Bend};
use crate::movement::{DeadliftOptions, DeadliftStance, Movement, MovementOptions};
use crate::pose::{
    Contact, ContactKind, JointAngles, JointPositions, KinematicSolution, MomentArms,
    PrimaryJoint, SolveResult,
};

/// Bar centre above the floor with standard plates, meters
pub const PLATE_RADIUS: f64 = 0.225;

/// Shin step when backing off from the stance's nominal angle, degrees
pub const SHIN_BACKOFF_STEP_DEG: f64 = 0.25;

fn nominal_shin_deg(stance: DeadliftStance) -> f64 {
    match stance {
        DeadliftStance::Conventional => 15.0,
        DeadliftStance::Sumo => 5.0,
    }
}

/// Setup position found for one lifter
#[derive(Debug, Clone, Copy, PartialEq)]
struct Setup {
    /// Shin angle forward of vertical, degrees
    shin_deg: f64,
    bar_y: f64,
    lockout_bar_y: f64,
    reachable: bool,
}

impl Setup {
    fn find(anthro: &Anthropometry, options: &DeadliftOptions) -> Self {
        let s = &anthro.segments;
        let offset = if options.bar_start_offset.is_finite() {
            options.bar_start_offset
        } else {
            0.0
        };
        let bar_y = -s.foot_height + PLATE_RADIUS + offset;
        let shoulder = DVec2::new(0.0, bar_y + anthro.arm_reach());
        let lockout_bar_y = s.tibia + s.femur + s.torso - anthro.arm_reach();

        let min_gap = (s.femur - s.torso).abs();
        let max_gap = s.femur + s.torso;
        let mut shin_deg = nominal_shin_deg(options.stance);
        loop {
            let knee = shin_knee(s.tibia, shin_deg);
            let gap = knee.distance(shoulder);
            if gap >= min_gap && gap <= max_gap {
                return Self {
                    shin_deg,
                    bar_y,
                    lockout_bar_y,
                    reachable: true,
                };
            }
            if shin_deg <= 0.0 {
                break;
            }
            shin_deg = (shin_deg - SHIN_BACKOFF_STEP_DEG).max(0.0);
        }

        warn!("deadlift: shoulder out of reach of the hip chain at setup");
        Self {
            shin_deg: nominal_shin_deg(options.stance),
            bar_y,
            lockout_bar_y,
            reachable: false,
        }
    }

    fn rom(&self) -> f64 {
        self.lockout_bar_y - self.bar_y
    }

    /// Pose between floor (0) and lockout (1)
    fn at(&self, anthro: &Anthropometry, t: f64) -> (JointPositions, bool) {
        let s = &anthro.segments;
        let bar = DVec2::new(0.0, lerp(self.bar_y, self.lockout_bar_y, t));
        let knee = shin_knee(s.tibia, lerp(self.shin_deg, 0.0, t));
        let target = bar + DVec2::new(0.0, anthro.arm_reach());

        // Hip sits behind the knee→shoulder line
        let chain = solve_two_bone(knee, target, s.femur, s.torso, Bend::Ccw);
        let shoulder = chain.end;
        let trunk = (shoulder - chain.joint).normalize_or(DVec2::Y);
        let elbow = shoulder - DVec2::new(0.0, s.upper_arm);

        let positions = JointPositions {
            ankle: DVec2::ZERO,
            knee,
            hip: chain.joint,
            shoulder,
            head: shoulder + trunk * s.head_neck,
            elbow: Some(elbow),
            wrist: Some(elbow - DVec2::new(0.0, anthro.forearm_reach())),
            bar,
        };
        (positions, chain.reached)
    }
}

fn shin_knee(tibia: f64, shin_deg: f64) -> DVec2 {
    along(DVec2::ZERO, FRAC_PI_2 - shin_deg.to_radians(), tibia)
}

const OUT_OF_REACH_ERROR: &str = "shoulder out of reach of the hip chain";

pub struct DeadliftSolver;

impl PoseSolver for DeadliftSolver {
    fn movement(&self) -> Movement {
        Movement::Deadlift
    }

    fn reference(&self, anthro: &Anthropometry, options: &MovementOptions) -> KinematicSolution {
        let setup = Setup::find(anthro, &options.deadlift());
        let (positions, reached) = setup.at(anthro, 0.0);
        let valid = setup.reachable && reached;
        KinematicSolution {
            positions,
            angles: JointAngles::from_positions(&positions),
            moment_arms: MomentArms::measure(&positions, positions.bar, PrimaryJoint::Hip),
            displacement: setup.rom().max(0.0),
            valid,
            errors: if valid {
                Vec::new()
            } else {
                vec![OUT_OF_REACH_ERROR.to_string()]
            },
        }
    }

    fn solve(
        &self,
        anthro: &Anthropometry,
        options: &MovementOptions,
        phase: f64,
    ) -> SolveResult {
        let setup = Setup::find(anthro, &options.deadlift());
        let (positions, reached) = setup.at(anthro, clamp_phase(phase));
        let valid = setup.reachable && reached;

        let mut contacts = vec![floor_contact(&positions, &anthro.segments)];
        if let Some(wrist) = positions.wrist {
            contacts.push(Contact::new(ContactKind::Hands, wrist));
        }
        let errors = if valid {
            Vec::new()
        } else {
            vec![OUT_OF_REACH_ERROR.to_string()]
        };
        finish(positions, contacts, &anthro.segments, valid, errors)
    }
}
