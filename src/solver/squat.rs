//! Squat solver
//!
//! The reference pose is the bottom position: femur at the requested depth
//! (parallel by default) and the bar directly over the ankle. With the ankle
//! fixed at the origin the free unknowns are the shin angle and the trunk
//! angle. Shin angles are scanned in fixed steps; for each one the trunk
//! angle that puts the bar over the ankle is found with [`find_root`]. The
//! first shin angle with a converged trunk angle inside the anatomical bound
//! wins.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec2;
use log::{debug, warn};

use super::{clamp_phase, finish, floor_contact, lerp, PoseSolver};
use crate::anthropometry::{Anthropometry, SegmentLengths};
use crate::ik::along;
use crate::movement::{Movement, MovementOptions, SquatVariant};
use crate::pose::{
    JointAngles, JointPositions, KinematicSolution, MomentArms, PrimaryJoint, SolveResult,
};
use crate::roots::{find_root, RootFailure, MAX_ROOT_ITERATIONS, ROOT_TOLERANCE};

/// Trunk inclination bound, degrees from horizontal
pub const MIN_TRUNK_ANGLE_DEG: f64 = 20.0;
pub const MAX_TRUNK_ANGLE_DEG: f64 = 80.0;

/// Shin search range, degrees forward of vertical
pub const MIN_SHIN_ANGLE_DEG: f64 = 25.0;
pub const MAX_SHIN_ANGLE_DEG: f64 = 45.0;
pub const SHIN_ANGLE_STEP_DEG: f64 = 0.25;

/// Depth override bound, degrees below (positive) or above parallel
pub const MAX_DEPTH_DEG: f64 = 30.0;

pub const NO_TRUNK_ANGLE_ERROR: &str = "no valid trunk angle found in range";

/// Bar position relative to the shoulder, in the trunk frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BarOffset {
    /// Along the trunk, toward the head
    pub along: f64,
    /// Perpendicular to the trunk, toward the back
    pub posterior: f64,
}

impl BarOffset {
    pub fn for_variant(variant: SquatVariant) -> Self {
        let (along, posterior) = match variant {
            SquatVariant::HighBar => (0.0, 0.05),
            SquatVariant::LowBar => (-0.06, 0.06),
            SquatVariant::Front => (0.0, -0.07),
        };
        Self { along, posterior }
    }

    /// World-space offset for a trunk at `trunk` radians from +x
    fn at(self, trunk: f64) -> DVec2 {
        let (sin, cos) = trunk.sin_cos();
        DVec2::new(cos, sin) * self.along + DVec2::new(-sin, cos) * self.posterior
    }
}

/// Absolute segment directions, radians from +x
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ChainAngles {
    /// Ankle to knee
    pub shin: f64,
    /// Knee to hip
    pub thigh: f64,
    /// Hip to shoulder
    pub trunk: f64,
}

impl ChainAngles {
    pub const STANDING: ChainAngles = ChainAngles {
        shin: FRAC_PI_2,
        thigh: FRAC_PI_2,
        trunk: FRAC_PI_2,
    };

    fn lerp(self, other: ChainAngles, t: f64) -> ChainAngles {
        ChainAngles {
            shin: lerp(self.shin, other.shin, t),
            thigh: lerp(self.thigh, other.thigh, t),
            trunk: lerp(self.trunk, other.trunk, t),
        }
    }
}

/// Forward kinematics of the leg/trunk chain from an ankle at the origin
pub(crate) fn chain_positions(
    segments: &SegmentLengths,
    angles: ChainAngles,
    offset: BarOffset,
) -> JointPositions {
    let ankle = DVec2::ZERO;
    let knee = along(ankle, angles.shin, segments.tibia);
    let hip = along(knee, angles.thigh, segments.femur);
    let shoulder = along(hip, angles.trunk, segments.torso);
    JointPositions {
        ankle,
        knee,
        hip,
        shoulder,
        head: along(shoulder, angles.trunk, segments.head_neck),
        elbow: None,
        wrist: None,
        bar: shoulder + offset.at(angles.trunk),
    }
}

/// Outcome of the bottom-position search
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SquatReference {
    pub bottom: ChainAngles,
    pub offset: BarOffset,
    /// False when no shin angle produced a trunk angle in bounds. `bottom`
    /// then holds the closest clamped candidate.
    pub converged: bool,
}

impl SquatReference {
    pub fn search(segments: &SegmentLengths, variant: SquatVariant, depth_deg: f64) -> Self {
        let offset = BarOffset::for_variant(variant);
        let depth = if depth_deg.is_finite() {
            depth_deg.clamp(-MAX_DEPTH_DEG, MAX_DEPTH_DEG)
        } else {
            0.0
        };
        let thigh = PI + depth.to_radians();
        let trunk_lo = MIN_TRUNK_ANGLE_DEG.to_radians();
        let trunk_hi = MAX_TRUNK_ANGLE_DEG.to_radians();
        let reach = segments.torso + offset.along;

        let steps =
            ((MAX_SHIN_ANGLE_DEG - MIN_SHIN_ANGLE_DEG) / SHIN_ANGLE_STEP_DEG).round() as u32;
        let mut best: Option<(f64, ChainAngles)> = None;

        for step in 0..=steps {
            let shin_deg = MIN_SHIN_ANGLE_DEG + step as f64 * SHIN_ANGLE_STEP_DEG;
            let shin = FRAC_PI_2 - shin_deg.to_radians();
            let knee = along(DVec2::ZERO, shin, segments.tibia);
            let hip_x = along(knee, thigh, segments.femur).x;

            // Horizontal bar-to-ankle offset as a function of trunk angle
            let bar_x = |trunk: f64| {
                let (sin, cos) = trunk.sin_cos();
                (
                    hip_x + reach * cos - offset.posterior * sin,
                    -reach * sin - offset.posterior * cos,
                )
            };

            let (trunk, residual) =
                match find_root(bar_x, trunk_lo, trunk_hi, ROOT_TOLERANCE, MAX_ROOT_ITERATIONS) {
                    Ok(root) => {
                        debug!(
                            "squat: shin {:.2}° trunk {:.2}° after {} iterations",
                            shin_deg,
                            root.x.to_degrees(),
                            root.iterations
                        );
                        return Self {
                            bottom: ChainAngles {
                                shin,
                                thigh,
                                trunk: root.x,
                            },
                            offset,
                            converged: true,
                        };
                    }
                    Err(RootFailure::NotBracketed { f_lo, f_hi }) => {
                        if f_lo.abs() < f_hi.abs() {
                            (trunk_lo, f_lo)
                        } else {
                            (trunk_hi, f_hi)
                        }
                    }
                    Err(RootFailure::NotConverged { best, residual }) => (best, residual),
                };

            let candidate = ChainAngles { shin, thigh, trunk };
            if best.map_or(true, |(r, _)| residual.abs() < r) {
                best = Some((residual.abs(), candidate));
            }
        }

        let (residual, bottom) = best.unwrap_or((f64::INFINITY, ChainAngles::STANDING));
        warn!(
            "squat: {} (closest bar offset {:.4}m)",
            NO_TRUNK_ANGLE_ERROR, residual
        );
        Self {
            bottom,
            offset,
            converged: false,
        }
    }

    pub fn standing(&self, segments: &SegmentLengths) -> JointPositions {
        chain_positions(segments, ChainAngles::STANDING, self.offset)
    }

    pub fn bottom(&self, segments: &SegmentLengths) -> JointPositions {
        chain_positions(segments, self.bottom, self.offset)
    }

    /// Pose between standing (0) and bottom (1)
    pub fn at(&self, segments: &SegmentLengths, t: f64) -> JointPositions {
        chain_positions(segments, ChainAngles::STANDING.lerp(self.bottom, t), self.offset)
    }

    pub fn rom(&self, segments: &SegmentLengths) -> f64 {
        self.standing(segments).bar.y - self.bottom(segments).bar.y
    }

    pub fn error(&self) -> Vec<String> {
        if self.converged {
            Vec::new()
        } else {
            vec![format!(
                "{} [{}°, {}°]",
                NO_TRUNK_ANGLE_ERROR, MIN_TRUNK_ANGLE_DEG, MAX_TRUNK_ANGLE_DEG
            )]
        }
    }

    /// Reference solution; an unconverged search reports the standing pose
    /// with best-effort ROM and moment arms
    pub fn solution(&self, segments: &SegmentLengths) -> KinematicSolution {
        let bottom = self.bottom(segments);
        let positions = if self.converged {
            bottom
        } else {
            self.standing(segments)
        };
        KinematicSolution {
            positions,
            angles: JointAngles::from_positions(&positions),
            moment_arms: MomentArms::measure(&bottom, bottom.bar, PrimaryJoint::Hip),
            displacement: self.rom(segments).max(0.0),
            valid: self.converged,
            errors: self.error(),
        }
    }
}

pub struct SquatSolver;

impl SquatSolver {
    fn search(anthro: &Anthropometry, options: &MovementOptions) -> SquatReference {
        let options = options.squat();
        SquatReference::search(&anthro.segments, options.variant, options.depth_deg)
    }
}

impl PoseSolver for SquatSolver {
    fn movement(&self) -> Movement {
        Movement::Squat
    }

    fn reference(&self, anthro: &Anthropometry, options: &MovementOptions) -> KinematicSolution {
        Self::search(anthro, options).solution(&anthro.segments)
    }

    fn solve(
        &self,
        anthro: &Anthropometry,
        options: &MovementOptions,
        phase: f64,
    ) -> SolveResult {
        let segments = &anthro.segments;
        let reference = Self::search(anthro, options);
        let positions = if reference.converged {
            reference.at(segments, clamp_phase(phase))
        } else {
            reference.standing(segments)
        };
        let contacts = vec![floor_contact(&positions, segments)];
        finish(
            positions,
            contacts,
            segments,
            reference.converged,
            reference.error(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anthropometry::{build_profile, SdModifiers, Segment, Sex};
    use crate::movement::SquatOptions;
    use wasm_bindgen_test::*;

    fn lifter(modifiers: SdModifiers) -> Anthropometry {
        build_profile(1.8, 85.0, Sex::Male, &modifiers).unwrap()
    }

    fn options(variant: SquatVariant, depth_deg: f64) -> MovementOptions {
        MovementOptions::Squat(SquatOptions { variant, depth_deg })
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_bar_over_ankle_at_bottom() {
        let anthro = lifter(SdModifiers::default());
        for variant in [SquatVariant::HighBar, SquatVariant::LowBar, SquatVariant::Front] {
            let solution = SquatSolver.reference(&anthro, &options(variant, 0.0));
            assert!(solution.valid, "{:?}", variant);
            assert!(solution.positions.bar.x.abs() < 1e-8, "{:?}", variant);
            // Femur horizontal at parallel
            assert!((solution.positions.hip.y - solution.positions.knee.y).abs() < 1e-12);
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_trunk_angle_in_bounds() {
        let anthro = lifter(SdModifiers::default());
        let solution = SquatSolver.reference(&anthro, &options(SquatVariant::HighBar, 0.0));
        let trunk = solution.angles.trunk;
        assert!((MIN_TRUNK_ANGLE_DEG..=MAX_TRUNK_ANGLE_DEG).contains(&trunk));
        assert!(solution.angles.ankle >= MIN_SHIN_ANGLE_DEG - 1e-9);
        assert!(solution.angles.ankle <= MAX_SHIN_ANGLE_DEG + 1e-9);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_low_bar_leans_more_than_front() {
        let anthro = lifter(SdModifiers::default());
        let trunk = |variant| {
            SquatSolver
                .reference(&anthro, &options(variant, 0.0))
                .angles
                .trunk
        };
        assert!(trunk(SquatVariant::LowBar) < trunk(SquatVariant::HighBar));
        assert!(trunk(SquatVariant::HighBar) < trunk(SquatVariant::Front));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_rom_is_standing_minus_bottom() {
        let anthro = lifter(SdModifiers::default());
        let opts = options(SquatVariant::HighBar, 0.0);
        let rom = SquatSolver.rom(&anthro, &opts);
        let top = SquatSolver.solve(&anthro, &opts, 0.0).pose.positions.bar.y;
        let bottom = SquatSolver.solve(&anthro, &opts, 1.0).pose.positions.bar.y;
        assert!((rom - (top - bottom)).abs() < 1e-12);
        assert!(rom > 0.4 && rom < 0.7, "rom {}", rom);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_deeper_squat_has_more_rom() {
        let anthro = lifter(SdModifiers::default());
        let parallel = SquatSolver.rom(&anthro, &options(SquatVariant::HighBar, 0.0));
        let deep = SquatSolver.rom(&anthro, &options(SquatVariant::HighBar, 10.0));
        assert!(deep > parallel);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_longer_femur_increases_hip_moment_arm() {
        let base = lifter(SdModifiers::default());
        let long = lifter(SdModifiers::default().with_segment(Segment::Femur, 1.0));
        let opts = options(SquatVariant::HighBar, 0.0);

        let a = SquatSolver.reference(&base, &opts);
        let b = SquatSolver.reference(&long, &opts);
        assert!(a.valid && b.valid);
        assert!(b.moment_arms.hip > a.moment_arms.hip);
        assert_eq!(b.moment_arms.primary, b.moment_arms.hip);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_unreachable_proportions_are_invalid() {
        let modifiers = SdModifiers::groups(0.0, 4.0, -4.0)
            .with_segment(Segment::Femur, 4.0)
            .with_segment(Segment::Tibia, -4.0)
            .with_segment(Segment::Torso, -4.0);
        let anthro = lifter(modifiers);
        let opts = options(SquatVariant::HighBar, 0.0);

        let solution = SquatSolver.reference(&anthro, &opts);
        assert!(!solution.valid);
        assert!(solution.errors[0].starts_with(NO_TRUNK_ANGLE_ERROR));
        // Degraded values stay usable
        assert!(solution.displacement > 0.0);
        assert!(solution.moment_arms.hip > 0.0);

        let frame = SquatSolver.solve(&anthro, &opts, 0.5);
        assert!(!frame.valid);
        let standing = JointPositions::stacked(&anthro.segments);
        assert!(frame.pose.positions.hip.distance(standing.hip) < 1e-12);
        assert!(frame.pose.positions.shoulder.distance(standing.shoulder) < 1e-12);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_phase_interpolates_rigidly() {
        let anthro = lifter(SdModifiers::groups(0.5, -0.5, 0.0));
        let opts = options(SquatVariant::LowBar, 5.0);
        for i in 0..=20 {
            let frame = SquatSolver.solve(&anthro, &opts, i as f64 / 20.0);
            assert!(frame.valid, "{:?}", frame.errors);
        }

        let bottom = SquatSolver.solve(&anthro, &opts, 1.0).pose.positions;
        let reference = SquatSolver.reference(&anthro, &opts).positions;
        assert_eq!(bottom, reference);
    }
}
