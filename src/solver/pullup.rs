//! Pull-up solver. Bar at the origin, body hanging straight below the
//! shoulder; the load point is the body itself, so the bar never moves and
//! the shoulder travels instead.

use glam::DVec2;
use log::warn;

use super::{arm_chain, clamp_phase, finish, grip_multiple, lerp, projected_reach, PoseSolver};
use crate::anthropometry::Anthropometry;
use crate::ik::Bend;
use crate::movement::{Movement, MovementOptions};
use crate::pose::{
    Contact, ContactKind, JointAngles, JointPositions, KinematicSolution, MomentArms,
    PrimaryJoint, SolveResult,
};

/// Grip widths as multiples of shoulder width (narrow, medium, wide)
pub const GRIP_MULTIPLES: [f64; 3] = [1.0, 1.2, 2.0];

/// Shoulder below the bar at the top: this fraction of head-neck length
/// plus [`TOP_CLEARANCE`] (chin over the bar)
pub const TOP_HEAD_FRACTION: f64 = 0.4;
pub const TOP_CLEARANCE: f64 = 0.02;

/// Phase used as the reference pose
const REFERENCE_PHASE: f64 = 0.5;

struct HangPath {
    hang_y: f64,
    top_y: f64,
    projection: f64,
    errors: Vec<String>,
}

impl HangPath {
    fn new(anthro: &Anthropometry, options: &MovementOptions) -> Self {
        let grip = grip_multiple(options.pull_up().grip, GRIP_MULTIPLES);
        let mut errors = Vec::new();
        let reach = match projected_reach(anthro, grip) {
            Some(reach) => reach,
            None => {
                warn!("pull-up: grip wider than arm reach");
                errors.push("grip wider than arm reach".to_string());
                0.0
            }
        };
        let top_y = -(TOP_HEAD_FRACTION * anthro.segments.head_neck + TOP_CLEARANCE);
        if errors.is_empty() && -reach >= top_y {
            errors.push("arms too short to hang below the top position".to_string());
        }

        Self {
            hang_y: -reach,
            top_y,
            projection: reach / anthro.arm_reach(),
            errors,
        }
    }

    fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn rom(&self) -> f64 {
        (self.top_y - self.hang_y).max(0.0)
    }

    /// Pose between dead hang (0) and chin over bar (1)
    fn at(&self, anthro: &Anthropometry, t: f64) -> JointPositions {
        let shoulder = DVec2::new(0.0, lerp(self.hang_y, self.top_y, t));
        let stacked = JointPositions::stacked(&anthro.segments);
        let body = stacked.translated(shoulder - stacked.shoulder);

        // Elbows travel forward of the body
        let (elbow, wrist) =
            arm_chain(anthro, body.shoulder, DVec2::ZERO, self.projection, Bend::Cw);
        JointPositions {
            elbow: Some(elbow),
            wrist: Some(wrist),
            bar: DVec2::ZERO,
            ..body
        }
    }
}

pub struct PullUpSolver;

impl PoseSolver for PullUpSolver {
    fn movement(&self) -> Movement {
        Movement::PullUp
    }

    fn reference(&self, anthro: &Anthropometry, options: &MovementOptions) -> KinematicSolution {
        let path = HangPath::new(anthro, options);
        let positions = path.at(anthro, REFERENCE_PHASE);
        KinematicSolution {
            positions,
            angles: JointAngles::from_positions(&positions),
            moment_arms: MomentArms::measure(&positions, positions.bar, PrimaryJoint::Elbow),
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
        let path = HangPath::new(anthro, options);
        let positions = path.at(anthro, clamp_phase(phase));
        let contacts = vec![Contact::new(ContactKind::Hands, DVec2::ZERO)];
        let valid = path.valid();
        finish(positions, contacts, &anthro.segments, valid, path.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anthropometry::{build_profile, SdModifiers, Sex};
    use crate::movement::{GripWidth, PullUpOptions};
    use wasm_bindgen_test::*;

    fn options(grip: GripWidth) -> MovementOptions {
        MovementOptions::PullUp(PullUpOptions {
            grip,
            added_weight: 0.0,
        })
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_hang_and_top() {
        let anthro = build_profile(1.8, 80.0, Sex::Male, &SdModifiers::default()).unwrap();
        let hang = PullUpSolver.solve(&anthro, &options(GripWidth::Narrow), 0.0);
        let top = PullUpSolver.solve(&anthro, &options(GripWidth::Narrow), 1.0);
        assert!(hang.valid && top.valid);

        assert!((hang.pose.positions.shoulder.y + anthro.arm_reach()).abs() < 1e-12);
        // Chin over the bar
        assert!(top.pose.positions.head.y > 0.0);
        assert!(top.pose.positions.shoulder.y < 0.0);
        assert_eq!(top.pose.contacts[0].kind, ContactKind::Hands);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_longer_arms_travel_further() {
        let short = build_profile(1.8, 80.0, Sex::Male, &SdModifiers::groups(-1.0, 0.0, 0.0)).unwrap();
        let long = build_profile(1.8, 80.0, Sex::Male, &SdModifiers::groups(1.0, 0.0, 0.0)).unwrap();
        let opts = options(GripWidth::Medium);
        assert!(PullUpSolver.rom(&long, &opts) > PullUpSolver.rom(&short, &opts));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_elbow_is_primary_moment_arm() {
        let anthro = build_profile(1.7, 70.0, Sex::Female, &SdModifiers::default()).unwrap();
        let solution = PullUpSolver.reference(&anthro, &options(GripWidth::Wide));
        assert!(solution.valid);
        assert!(solution.moment_arms.hip.abs() < 1e-12);
        assert_eq!(Some(solution.moment_arms.primary), solution.moment_arms.elbow);
        assert!(solution.moment_arms.primary > 0.0);
    }
}
