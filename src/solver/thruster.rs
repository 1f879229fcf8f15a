//! Thruster solver: a front squat flowing into a press.
//!
//! One rep covers the whole cycle, so phase 0 and phase 1 are the same
//! standing front-rack pose.

use super::overhead::PressPath;
use super::squat::SquatReference;
use super::{clamp_phase, finish, floor_contact, PoseSolver};
use crate::anthropometry::Anthropometry;
use crate::movement::{GripWidth, Movement, MovementOptions, SquatVariant};
use crate::pose::{Contact, ContactKind, KinematicSolution, SolveResult};
use crate::rep_cycle::ease;

/// End of the descent
pub const DESCENT_END: f64 = 0.35;
/// End of the drive and press
pub const PRESS_END: f64 = 0.7;

struct Thruster {
    squat: SquatReference,
    press: PressPath,
}

impl Thruster {
    fn new(anthro: &Anthropometry, options: &MovementOptions) -> Self {
        let squat = SquatReference::search(
            &anthro.segments,
            SquatVariant::Front,
            options.thruster().depth_deg,
        );
        let rack = squat.standing(&anthro.segments).bar;
        let press = PressPath::new(anthro, GripWidth::Medium, rack);
        Self { squat, press }
    }

    fn errors(&self) -> Vec<String> {
        let mut errors = self.squat.error();
        errors.extend(self.press.errors.iter().cloned());
        errors
    }

    fn valid(&self) -> bool {
        self.squat.converged && self.press.valid()
    }

    /// Squat depth (0 standing, 1 bottom) and press progress (0 rack,
    /// 1 lockout) at a phase of the full cycle. Each sub-motion is eased,
    /// so the bar is at rest at every window boundary.
    fn split(phase: f64) -> (f64, f64) {
        if phase <= DESCENT_END {
            (ease(phase / DESCENT_END), 0.0)
        } else if phase <= PRESS_END {
            // First half of the window drives up, second half presses
            let s = (phase - DESCENT_END) / (PRESS_END - DESCENT_END);
            (ease(1.0 - 2.0 * s), ease(2.0 * s - 1.0))
        } else {
            (0.0, 1.0 - ease((phase - PRESS_END) / (1.0 - PRESS_END)))
        }
    }
}

pub struct ThrusterSolver;

impl PoseSolver for ThrusterSolver {
    fn movement(&self) -> Movement {
        Movement::Thruster
    }

    fn reference(&self, anthro: &Anthropometry, options: &MovementOptions) -> KinematicSolution {
        let thruster = Thruster::new(anthro, options);
        let squat = thruster.squat.solution(&anthro.segments);
        KinematicSolution {
            displacement: squat.displacement + thruster.press.rom(),
            valid: thruster.valid(),
            errors: thruster.errors(),
            ..squat
        }
    }

    fn solve(
        &self,
        anthro: &Anthropometry,
        options: &MovementOptions,
        phase: f64,
    ) -> SolveResult {
        let segments = &anthro.segments;
        let thruster = Thruster::new(anthro, options);
        let (depth, press) = Thruster::split(clamp_phase(phase));

        let positions = if !thruster.squat.converged {
            thruster.press.at(anthro, 0.0)
        } else if press > 0.0 {
            thruster.press.at(anthro, press)
        } else {
            let body = thruster.squat.at(segments, depth);
            thruster.press.arms(anthro, body, body.bar)
        };

        let mut contacts = vec![floor_contact(&positions, segments)];
        if let Some(wrist) = positions.wrist {
            contacts.push(Contact::new(ContactKind::Hands, wrist));
        }
        let valid = thruster.valid();
        finish(positions, contacts, segments, valid, thruster.errors())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anthropometry::{build_profile, SdModifiers, Sex};
    use crate::movement::{SquatOptions, ThrusterOptions};
    use crate::solver::{OverheadPressSolver, SquatSolver};
    use wasm_bindgen_test::*;

    fn lifter() -> Anthropometry {
        build_profile(1.76, 78.0, Sex::Male, &SdModifiers::default()).unwrap()
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_rom_is_squat_plus_press() {
        let anthro = lifter();
        let options = MovementOptions::Thruster(ThrusterOptions { depth_deg: 0.0 });
        let front = MovementOptions::Squat(SquatOptions {
            variant: SquatVariant::Front,
            depth_deg: 0.0,
        });

        let squat_rom = SquatSolver.rom(&anthro, &front);
        let total = ThrusterSolver.rom(&anthro, &options);
        assert!(total > squat_rom);
        // Press starts from the front-squat rack, lower than the OHP rack
        let ohp_options = MovementOptions::defaults_for(Movement::OverheadPress);
        let ohp = OverheadPressSolver.rom(&anthro, &ohp_options);
        assert!((total - squat_rom - ohp).abs() < 0.05);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_cycle_starts_and_ends_in_rack() {
        let anthro = lifter();
        let options = MovementOptions::defaults_for(Movement::Thruster);
        let start = ThrusterSolver.solve(&anthro, &options, 0.0);
        let end = ThrusterSolver.solve(&anthro, &options, 1.0);
        assert!(start.valid);
        assert!(start.pose.positions.bar.distance(end.pose.positions.bar) < 1e-12);
        assert!(start.pose.positions.hip.distance(end.pose.positions.hip) < 1e-12);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_phase_windows() {
        assert_eq!(Thruster::split(0.0), (0.0, 0.0));
        assert_eq!(Thruster::split(DESCENT_END), (1.0, 0.0));
        assert_eq!(Thruster::split(PRESS_END), (0.0, 1.0));
        assert_eq!(Thruster::split(1.0), (0.0, 0.0));

        // Halfway through the descent is half depth
        let (depth, _) = Thruster::split(0.5 * DESCENT_END);
        assert!((depth - 0.5).abs() < 1e-12);

        let anthro = lifter();
        let options = MovementOptions::defaults_for(Movement::Thruster);
        let bottom = ThrusterSolver.solve(&anthro, &options, DESCENT_END).pose.positions;
        let lockout = ThrusterSolver.solve(&anthro, &options, PRESS_END).pose.positions;
        let start = ThrusterSolver.solve(&anthro, &options, 0.0).pose.positions;
        assert!(bottom.bar.y < start.bar.y);
        assert!(lockout.bar.y > start.bar.y);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_sub_motions_start_and_stop_at_rest() {
        let h = 1e-4;
        let step = |a: f64, b: f64| {
            let (da, pa) = Thruster::split(a);
            let (db, pb) = Thruster::split(b);
            (db - da).abs().max((pb - pa).abs())
        };
        // A linear split would move h / 0.175 ≈ 6e-4 per step here
        for boundary in [0.0, DESCENT_END, 0.5 * (DESCENT_END + PRESS_END), PRESS_END] {
            assert!(step(boundary, boundary + h) < 1e-5, "leaving {}", boundary);
        }
        for boundary in [DESCENT_END, PRESS_END, 1.0] {
            assert!(step(boundary - h, boundary) < 1e-5, "reaching {}", boundary);
        }
        // Mid-window the motion is faster than linear
        let mid = 0.5 * DESCENT_END;
        assert!(step(mid, mid + h) > h / DESCENT_END);
    }
}
