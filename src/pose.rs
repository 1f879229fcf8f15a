//! Planar poses and kinematic solutions shared by every solver.
//!
//! Coordinates are meters in the sagittal plane: +x forward (toward the toes),
//! +y up, origin at the family's reference point.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::anthropometry::SegmentLengths;

/// Rigidity tolerance for poses handed to the renderer (1 mm)
pub const RIGIDITY_TOLERANCE: f64 = 1e-3;

/// Joint positions of one sagittal stick figure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JointPositions {
    pub ankle: DVec2,
    pub knee: DVec2,
    pub hip: DVec2,
    pub shoulder: DVec2,
    /// Top of the head, along the trunk line
    pub head: DVec2,
    pub elbow: Option<DVec2>,
    pub wrist: Option<DVec2>,
    pub bar: DVec2,
}

impl JointPositions {
    /// Standing with ankle, knee, hip, shoulder and head stacked above the origin.
    /// The bar is placed by the caller.
    pub fn stacked(segments: &SegmentLengths) -> Self {
        let knee = DVec2::new(0.0, segments.tibia);
        let hip = knee + DVec2::new(0.0, segments.femur);
        let shoulder = hip + DVec2::new(0.0, segments.torso);
        Self {
            ankle: DVec2::ZERO,
            knee,
            hip,
            shoulder,
            head: shoulder + DVec2::new(0.0, segments.head_neck),
            elbow: None,
            wrist: None,
            bar: shoulder,
        }
    }

    /// Same pose shifted by `offset`
    pub fn translated(self, offset: DVec2) -> Self {
        Self {
            ankle: self.ankle + offset,
            knee: self.knee + offset,
            hip: self.hip + offset,
            shoulder: self.shoulder + offset,
            head: self.head + offset,
            elbow: self.elbow.map(|e| e + offset),
            wrist: self.wrist.map(|w| w + offset),
            bar: self.bar + offset,
        }
    }
}

/// Where the body touches the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactKind {
    Feet,
    Hands,
    Back,
    Hips,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub kind: ContactKind,
    pub position: DVec2,
}

impl Contact {
    pub fn new(kind: ContactKind, position: DVec2) -> Self {
        Self { kind, position }
    }
}

/// One animation frame: immutable once built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pose2D {
    pub positions: JointPositions,
    /// Bar rotation in the sagittal plane, radians. The bar is seen end-on,
    /// so solvers always leave it at 0; it only orients the frame marker.
    pub bar_angle: f64,
    pub contacts: Vec<Contact>,
}

/// Joint angles in degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JointAngles {
    /// Trunk inclination from horizontal
    pub trunk: f64,
    /// Shin inclination from vertical
    pub ankle: f64,
    /// Included angle at the knee (180 = straight)
    pub knee: f64,
    /// Included angle at the hip (180 = straight)
    pub hip: f64,
}

impl JointAngles {
    pub fn from_positions(p: &JointPositions) -> Self {
        let trunk_dir = p.shoulder - p.hip;
        let shin_dir = p.knee - p.ankle;
        Self {
            trunk: trunk_dir.y.atan2(trunk_dir.x.abs()).to_degrees(),
            ankle: shin_dir.x.atan2(shin_dir.y).to_degrees(),
            knee: included_angle(p.ankle, p.knee, p.hip),
            hip: included_angle(p.knee, p.hip, p.shoulder),
        }
    }
}

/// Angle at `b` between `a` and `c`, degrees
fn included_angle(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    let u = a - b;
    let v = c - b;
    let denom = u.length() * v.length();
    if denom <= 0.0 {
        return 180.0;
    }
    (u.dot(v) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Horizontal joint-to-bar distances at the reference pose, meters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentArms {
    pub hip: f64,
    pub knee: f64,
    pub shoulder: Option<f64>,
    pub elbow: Option<f64>,
    /// The arm that drives the family's demand factor
    pub primary: f64,
}

/// Which joint's moment arm drives a family's demand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryJoint {
    Hip,
    Shoulder,
    Elbow,
}

impl MomentArms {
    /// Horizontal distances from each joint to the load point
    pub fn measure(p: &JointPositions, load_point: DVec2, primary: PrimaryJoint) -> Self {
        let hip = (load_point.x - p.hip.x).abs();
        let knee = (load_point.x - p.knee.x).abs();
        let shoulder = (load_point.x - p.shoulder.x).abs();
        let elbow = p.elbow.map(|e| (load_point.x - e.x).abs());
        let primary = match primary {
            PrimaryJoint::Hip => hip,
            PrimaryJoint::Shoulder => shoulder,
            PrimaryJoint::Elbow => elbow.unwrap_or(shoulder),
        };
        Self {
            hip,
            knee,
            shoulder: Some(shoulder),
            elbow,
            primary,
        }
    }
}

/// Geometry of a family's defining reference pose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinematicSolution {
    pub positions: JointPositions,
    pub angles: JointAngles,
    pub moment_arms: MomentArms,
    /// Bar travel over one full repetition, meters
    pub displacement: f64,
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Output of a phase solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResult {
    pub pose: Pose2D,
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Check adjacent joint distances against the lifter's segment lengths.
///
/// Returns one line per segment that is off by more than `tolerance`.
pub fn validate_rigidity(
    positions: &JointPositions,
    segments: &SegmentLengths,
    tolerance: f64,
) -> Vec<String> {
    let mut errors = Vec::new();

    // Helper to check a bone length
    let mut check = |name: &str, a: DVec2, b: DVec2, expected: f64| {
        let actual = a.distance(b);
        let diff = (actual - expected).abs();
        if diff > tolerance {
            errors.push(format!(
                "{} length: expected {:.4}m, got {:.4}m (diff: {:.4}m)",
                name, expected, actual, diff
            ));
        }
    };

    check("Shin (ankle→knee)", positions.ankle, positions.knee, segments.tibia);
    check("Thigh (knee→hip)", positions.knee, positions.hip, segments.femur);
    check(
        "Trunk (hip→shoulder)",
        positions.hip,
        positions.shoulder,
        segments.torso,
    );

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anthropometry::{build_profile, SdModifiers, Sex};
    use wasm_bindgen_test::*;

    fn segments() -> SegmentLengths {
        build_profile(1.8, 80.0, Sex::Male, &SdModifiers::default())
            .unwrap()
            .segments
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_stacked_pose_is_rigid() {
        let segments = segments();
        let positions = JointPositions::stacked(&segments);
        assert!(validate_rigidity(&positions, &segments, 1e-9).is_empty());

        let angles = JointAngles::from_positions(&positions);
        assert!((angles.trunk - 90.0).abs() < 1e-9);
        assert!(angles.ankle.abs() < 1e-9);
        assert!((angles.knee - 180.0).abs() < 1e-9);
        assert!((angles.hip - 180.0).abs() < 1e-9);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_rigidity_reports_stretched_segment() {
        let segments = segments();
        let mut positions = JointPositions::stacked(&segments);
        positions.hip.y += 0.01;

        let errors = validate_rigidity(&positions, &segments, RIGIDITY_TOLERANCE);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("Thigh"));
        assert!(errors[1].starts_with("Trunk"));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_moment_arms_are_horizontal_distances() {
        let segments = segments();
        let mut positions = JointPositions::stacked(&segments);
        positions.hip.x = -0.2;
        positions.knee.x = 0.1;

        let arms = MomentArms::measure(&positions, DVec2::ZERO, PrimaryJoint::Hip);
        assert!((arms.hip - 0.2).abs() < 1e-12);
        assert!((arms.knee - 0.1).abs() < 1e-12);
        assert_eq!(arms.primary, arms.hip);
        assert_eq!(arms.elbow, None);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_translated_keeps_distances() {
        let segments = segments();
        let positions = JointPositions::stacked(&segments).translated(DVec2::new(0.4, -1.0));
        assert!(validate_rigidity(&positions, &segments, 1e-9).is_empty());
        assert_eq!(positions.ankle, DVec2::new(0.4, -1.0));
    }
}
