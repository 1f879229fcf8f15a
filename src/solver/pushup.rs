//! Push-up solver
//!
//! Hands at the origin on the floor. The body is a rigid plank pivoting
//! about the ankle; the shoulder is the load point.

use glam::DVec2;
use log::warn;

use super::{
    arm_chain, clamp_phase, finish, grip_multiple, lerp, projected_reach, PoseSolver,
};
use crate::anthropometry::Anthropometry;
use crate::ik::{along, Bend};
use crate::movement::{Movement, MovementOptions};
use crate::pose::{
    Contact, ContactKind, JointAngles, JointPositions, KinematicSolution, MomentArms,
    PrimaryJoint, SolveResult,
};

/// Hand widths as multiples of shoulder width (narrow, medium, wide)
pub const WIDTH_MULTIPLES: [f64; 3] = [1.0, 1.3, 1.8];

/// Shoulder height above the floor at the bottom, as a fraction of height
pub const BOTTOM_SHOULDER_FRACTION: f64 = 0.07;

struct Plank {
    ankle: DVec2,
    /// Plank angle above horizontal at the top and bottom, radians
    top: f64,
    bottom: f64,
    projection: f64,
    rom: f64,
    errors: Vec<String>,
}

impl Plank {
    fn new(anthro: &Anthropometry, options: &MovementOptions) -> Self {
        let s = &anthro.segments;
        let width = grip_multiple(options.push_up().width, WIDTH_MULTIPLES);
        let mut errors = Vec::new();
        let reach = match projected_reach(anthro, width) {
            Some(reach) => reach,
            None => {
                warn!("push-up: hands wider than arm reach");
                errors.push("hands wider than arm reach".to_string());
                0.0
            }
        };

        let length = s.tibia + s.femur + s.torso;
        let bottom_y = BOTTOM_SHOULDER_FRACTION * anthro.height;
        let top_y = reach.max(bottom_y);
        if errors.is_empty() && reach <= bottom_y {
            errors.push("arms too short to lift the chest".to_string());
        }

        let top = ((top_y - s.foot_height) / length).clamp(-1.0, 1.0).asin();
        let bottom = ((bottom_y - s.foot_height) / length).clamp(-1.0, 1.0).asin();
        // Shoulder straight over the hands at the top
        let ankle = DVec2::new(-length * top.cos(), s.foot_height);

        Self {
            ankle,
            top,
            bottom,
            projection: reach / anthro.arm_reach(),
            rom: top_y - bottom_y,
            errors,
        }
    }

    fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Pose between top (0) and bottom (1)
    fn at(&self, anthro: &Anthropometry, t: f64) -> JointPositions {
        let s = &anthro.segments;
        let angle = lerp(self.top, self.bottom, t);
        let knee = along(self.ankle, angle, s.tibia);
        let hip = along(knee, angle, s.femur);
        let shoulder = along(hip, angle, s.torso);

        // Elbows flare back toward the feet
        let (elbow, wrist) =
            arm_chain(anthro, shoulder, DVec2::ZERO, self.projection, Bend::Cw);
        JointPositions {
            ankle: self.ankle,
            knee,
            hip,
            shoulder,
            head: along(shoulder, angle, s.head_neck),
            elbow: Some(elbow),
            wrist: Some(wrist),
            bar: shoulder,
        }
    }
}

pub struct PushUpSolver;

impl PoseSolver for PushUpSolver {
    fn movement(&self) -> Movement {
        Movement::PushUp
    }

    fn reference(&self, anthro: &Anthropometry, options: &MovementOptions) -> KinematicSolution {
        let plank = Plank::new(anthro, options);
        let positions = plank.at(anthro, 1.0);
        KinematicSolution {
            positions,
            angles: JointAngles::from_positions(&positions),
            moment_arms: MomentArms::measure(&positions, positions.shoulder, PrimaryJoint::Elbow),
            displacement: plank.rom,
            valid: plank.valid(),
            errors: plank.errors,
        }
    }

    fn solve(
        &self,
        anthro: &Anthropometry,
        options: &MovementOptions,
        phase: f64,
    ) -> SolveResult {
        let plank = Plank::new(anthro, options);
        let positions = plank.at(anthro, clamp_phase(phase));
        let contacts = vec![
            Contact::new(ContactKind::Hands, DVec2::ZERO),
            Contact::new(ContactKind::Feet, DVec2::new(plank.ankle.x, 0.0)),
        ];
        let valid = plank.valid();
        finish(positions, contacts, &anthro.segments, valid, plank.errors)
    }
}
