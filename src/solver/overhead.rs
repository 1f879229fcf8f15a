//! Overhead press solver
//!
//! Standing with legs and trunk stacked over the ankle. The bar leaves the
//! front rack, clears the face and finishes over the shoulder joint.
//! [`PressPath`] is shared with the thruster, which starts its press from
//! the front-squat rack position.

use glam::DVec2;
use log::warn;

use super::{
    arm_chain, clamp_phase, finish, floor_contact, grip_multiple, lerp, projected_reach,
    PoseSolver,
};
use crate::anthropometry::{Anthropometry, SegmentLengths};
use crate::ik::Bend;
use crate::movement::{GripWidth, Movement, MovementOptions};
use crate::pose::{
    Contact, ContactKind, JointAngles, JointPositions, KinematicSolution, MomentArms,
    PrimaryJoint, SolveResult,
};

/// Grip widths as multiples of shoulder width (narrow, medium, wide)
pub const GRIP_MULTIPLES: [f64; 3] = [1.0, 1.3, 1.8];

/// Rack position forward of the shoulder, as a fraction of head-neck length
pub const RACK_FORWARD_FRACTION: f64 = 0.35;

/// Rack height above the shoulder joint, meters
pub const RACK_HEIGHT: f64 = 0.03;

/// Bar path for a standing press from `rack` to lockout over the shoulder
pub(crate) struct PressPath {
    pub rack: DVec2,
    pub lockout: DVec2,
    projection: f64,
    pub errors: Vec<String>,
}

impl PressPath {
    pub fn new(anthro: &Anthropometry, grip: GripWidth, rack: DVec2) -> Self {
        let shoulder = standing(&anthro.segments).shoulder;
        let mut errors = Vec::new();
        let reach = match projected_reach(anthro, grip_multiple(grip, GRIP_MULTIPLES)) {
            Some(reach) => reach,
            None => {
                warn!("press: grip wider than arm reach");
                errors.push("grip wider than arm reach".to_string());
                0.0
            }
        };
        let lockout = shoulder + DVec2::new(0.0, reach);
        if errors.is_empty() && rack.y >= lockout.y {
            errors.push("rack position above lockout".to_string());
        }

        Self {
            rack,
            lockout,
            projection: reach / anthro.arm_reach(),
            errors,
        }
    }

    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn rom(&self) -> f64 {
        (self.lockout.y - self.rack.y).max(0.0)
    }

    /// Bar between rack (0) and lockout (1). Stays forward early so it
    /// clears the face.
    pub fn bar(&self, t: f64) -> DVec2 {
        DVec2::new(
            lerp(self.rack.x, self.lockout.x, t * t),
            lerp(self.rack.y, self.lockout.y, t),
        )
    }

    /// Arms from `shoulder` to a bar at `bar`; elbows in front of the body
    pub fn arms(
        &self,
        anthro: &Anthropometry,
        positions: JointPositions,
        bar: DVec2,
    ) -> JointPositions {
        let (elbow, wrist) =
            arm_chain(anthro, positions.shoulder, bar, self.projection, Bend::Cw);
        JointPositions {
            elbow: Some(elbow),
            wrist: Some(wrist),
            bar,
            ..positions
        }
    }

    pub fn at(&self, anthro: &Anthropometry, t: f64) -> JointPositions {
        self.arms(anthro, standing(&anthro.segments), self.bar(t))
    }
}

fn standing(segments: &SegmentLengths) -> JointPositions {
    JointPositions::stacked(segments)
}

/// Front-rack bar position for a standing lifter
pub(crate) fn rack_position(segments: &SegmentLengths) -> DVec2 {
    standing(segments).shoulder
        + DVec2::new(RACK_FORWARD_FRACTION * segments.head_neck, RACK_HEIGHT)
}

pub struct OverheadPressSolver;

impl OverheadPressSolver {
    fn path(anthro: &Anthropometry, options: &MovementOptions) -> PressPath {
        PressPath::new(
            anthro,
            options.overhead_press().grip,
            rack_position(&anthro.segments),
        )
    }
}

impl PoseSolver for OverheadPressSolver {
    fn movement(&self) -> Movement {
        Movement::OverheadPress
    }

    fn reference(&self, anthro: &Anthropometry, options: &MovementOptions) -> KinematicSolution {
        let path = Self::path(anthro, options);
        let positions = path.at(anthro, 0.0);
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
        let path = Self::path(anthro, options);
        let positions = path.at(anthro, clamp_phase(phase));
        let mut contacts = vec![floor_contact(&positions, &anthro.segments)];
        if let Some(wrist) = positions.wrist {
            contacts.push(Contact::new(ContactKind::Hands, wrist));
        }
        let valid = path.valid();
        finish(positions, contacts, &anthro.segments, valid, path.errors)
    }
}
