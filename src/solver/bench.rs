//! Bench press solver
//!
//! Shoulder joint at the origin, lying along +x toward the hips. The bar
//! travels from lockout over the shoulder down to a touch point on the chest.

use glam::DVec2;
use log::warn;

use super::{arm_chain, clamp_phase, finish, grip_multiple, lerp, projected_reach, PoseSolver};
use crate::anthropometry::Anthropometry;
use crate::ik::{along, Bend};
use crate::movement::{BenchArch, BenchOptions, Movement, MovementOptions};
use crate::pose::{
    Contact, ContactKind, JointAngles, JointPositions, KinematicSolution, MomentArms,
    PrimaryJoint, SolveResult,
};

/// Chest surface above the shoulder joint with a flat back, meters
pub const CHEST_HEIGHT: f64 = 0.14;

/// Bar touch point along the torso, as a fraction of torso length
pub const TOUCH_FRACTION: f64 = 0.35;

/// Grip widths as multiples of shoulder width (narrow, medium, wide)
pub const GRIP_MULTIPLES: [f64; 3] = [1.0, 1.5, 2.0];

/// Thigh angle below horizontal with the feet planted, degrees
const THIGH_DROP_DEG: f64 = 15.0;

fn arch_height(arch: BenchArch) -> f64 {
    match arch {
        BenchArch::Flat => 0.0,
        BenchArch::Moderate => 0.04,
        BenchArch::Competitive => 0.08,
    }
}

struct BenchPath {
    lockout: DVec2,
    touch: DVec2,
    projection: f64,
    errors: Vec<String>,
}

impl BenchPath {
    fn new(anthro: &Anthropometry, options: &BenchOptions) -> Self {
        let mut errors = Vec::new();
        let reach = match projected_reach(anthro, grip_multiple(options.grip, GRIP_MULTIPLES)) {
            Some(reach) => reach,
            None => {
                warn!("bench: grip wider than arm reach");
                errors.push("grip wider than arm reach".to_string());
                0.0
            }
        };

        let lockout = DVec2::new(0.0, reach);
        let touch = DVec2::new(
            TOUCH_FRACTION * anthro.segments.torso,
            CHEST_HEIGHT + arch_height(options.arch),
        );
        if errors.is_empty() && touch.y >= lockout.y {
            errors.push("chest touch point above lockout".to_string());
        }

        Self {
            lockout,
            touch,
            projection: reach / anthro.arm_reach(),
            errors,
        }
    }

    fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn rom(&self) -> f64 {
        (self.lockout.y - self.touch.y).max(0.0)
    }

    /// Pose between lockout (0) and chest (1)
    fn at(&self, anthro: &Anthropometry, t: f64) -> JointPositions {
        let s = &anthro.segments;
        let shoulder = DVec2::ZERO;
        let hip = DVec2::new(s.torso, 0.0);
        let knee = along(hip, -THIGH_DROP_DEG.to_radians(), s.femur);
        let ankle = knee - DVec2::new(0.0, s.tibia);
        let bar = DVec2::new(
            lerp(self.lockout.x, self.touch.x, t),
            lerp(self.lockout.y, self.touch.y, t),
        );
        // Elbows drop below the bar toward the hips
        let (elbow, wrist) = arm_chain(anthro, shoulder, bar, self.projection, Bend::Cw);

        JointPositions {
            ankle,
            knee,
            hip,
            shoulder,
            head: DVec2::new(-s.head_neck, 0.0),
            elbow: Some(elbow),
            wrist: Some(wrist),
            bar,
        }
    }
}

pub struct BenchSolver;

impl PoseSolver for BenchSolver {
    fn movement(&self) -> Movement {
        Movement::Bench
    }

    fn reference(&self, anthro: &Anthropometry, options: &MovementOptions) -> KinematicSolution {
        let path = BenchPath::new(anthro, &options.bench());
        let positions = path.at(anthro, 1.0);
        KinematicSolution {
            positions,
            angles: JointAngles::from_positions(&positions),
            moment_arms: MomentArms::measure(&positions, positions.bar, PrimaryJoint::Shoulder),
            displacement: path.rom(),
            valid: path.valid(),
            errors: path.errors,
        }
    }

    fn solve(
        &self,
        anthro: &Anthropometry,
        options: &MovementOptions,
        phase: f64,
    ) -> SolveResult {
        let path = BenchPath::new(anthro, &options.bench());
        let positions = path.at(anthro, clamp_phase(phase));
        let s = &anthro.segments;

        let mut contacts = vec![
            Contact::new(ContactKind::Back, DVec2::new(0.5 * s.torso, 0.0)),
            Contact::new(ContactKind::Hips, positions.hip),
            Contact::new(
                ContactKind::Feet,
                positions.ankle - DVec2::new(0.0, s.foot_height),
            ),
        ];
        if let Some(wrist) = positions.wrist {
            contacts.push(Contact::new(ContactKind::Hands, wrist));
        }
        let valid = path.valid();
        finish(positions, contacts, s, valid, path.errors)
    }
}
