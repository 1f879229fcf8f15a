use glam::DVec2;

/// Below this the root→target direction is treated as undefined
const DEGENERATE_DISTANCE: f64 = 1e-12;

/// Side of the root→target line the middle joint bends toward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bend {
    /// Counter-clockwise from the root→target direction
    Ccw,
    /// Clockwise from the root→target direction
    Cw,
}

impl Bend {
    fn sign(self) -> f64 {
        match self {
            Bend::Ccw => 1.0,
            Bend::Cw => -1.0,
        }
    }
}

/// Result of a planar two-bone solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoBoneSolution {
    /// Middle joint (knee, elbow, hip...)
    pub joint: DVec2,
    /// End effector; equals the target when `reached`
    pub end: DVec2,
    /// False when the target was outside the annulus of reachable points
    pub reached: bool,
}

/// Solve a planar two-bone chain analytically
///
/// # Arguments
/// * `root` - Fixed position of the chain's base joint
/// * `target` - Desired end effector position
/// * `upper` - Length of the bone attached to the root
/// * `lower` - Length of the bone carrying the end effector
/// * `bend` - Which side the middle joint goes
///
/// # Returns
/// Joint positions with both bone lengths preserved exactly. If the target is
/// out of reach the chain is stretched (or folded) toward it instead.
pub fn solve_two_bone(
    root: DVec2,
    target: DVec2,
    upper: f64,
    lower: f64,
    bend: Bend,
) -> TwoBoneSolution {
    let offset = target - root;
    let dist = offset.length();
    let dir = if dist > DEGENERATE_DISTANCE {
        offset / dist
    } else {
        DVec2::X
    };

    let min_reach = (upper - lower).abs();
    let max_reach = upper + lower;
    let reach = dist.clamp(min_reach, max_reach);
    let reached =
        dist >= min_reach - DEGENERATE_DISTANCE && dist <= max_reach + DEGENERATE_DISTANCE;

    // Fully folded chain with equal bones
    if reach < DEGENERATE_DISTANCE {
        let joint = root + dir.perp() * bend.sign() * upper;
        return TwoBoneSolution {
            joint,
            end: root,
            reached,
        };
    }

    // Law of cosines for the angle at the root
    let cos_root = ((upper * upper + reach * reach - lower * lower) / (2.0 * upper * reach))
        .clamp(-1.0, 1.0);
    let angle = cos_root.acos() * bend.sign();
    let joint = root + DVec2::from_angle(angle).rotate(dir) * upper;

    let end_target = root + dir * reach;
    let end = joint + (end_target - joint).normalize_or(dir) * lower;

    TwoBoneSolution {
        joint,
        end,
        reached,
    }
}

/// Point at `length` from `origin` along an absolute angle (radians from +x)
#[inline]
pub fn along(origin: DVec2, angle: f64, length: f64) -> DVec2 {
    origin + DVec2::from_angle(angle) * length
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[test]
    #[wasm_bindgen_test]
    fn test_two_bone_reachable_target() {
        let target = DVec2::new(1.0, 1.0); // dist sqrt(2) from base
        let result = solve_two_bone(DVec2::ZERO, target, 1.0, 1.0, Bend::Ccw);

        assert!(result.reached);
        assert!(result.end.distance(target) < 1e-9);
        // Check lengths preserved
        assert!((result.joint.length() - 1.0).abs() < 1e-12);
        assert!((result.joint.distance(result.end) - 1.0).abs() < 1e-12);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_two_bone_unreachable_target() {
        // Target beyond max reach 2.0
        let target = DVec2::new(3.0, 0.0);
        let result = solve_two_bone(DVec2::ZERO, target, 1.0, 1.0, Bend::Cw);

        assert!(!result.reached);
        // Should stretch towards target
        assert!(result.joint.distance(DVec2::new(1.0, 0.0)) < 1e-9);
        assert!(result.end.distance(DVec2::new(2.0, 0.0)) < 1e-9);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_two_bone_too_close_folds() {
        // Min reach is 0.5
        let target = DVec2::new(0.1, 0.0);
        let result = solve_two_bone(DVec2::ZERO, target, 1.0, 0.5, Bend::Ccw);

        assert!(!result.reached);
        assert!((result.joint.length() - 1.0).abs() < 1e-12);
        assert!((result.joint.distance(result.end) - 0.5).abs() < 1e-12);
        assert!((result.end.length() - 0.5).abs() < 1e-9);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_bend_direction() {
        let target = DVec2::new(0.0, -1.5);
        let ccw = solve_two_bone(DVec2::ZERO, target, 1.0, 1.0, Bend::Ccw);
        let cw = solve_two_bone(DVec2::ZERO, target, 1.0, 1.0, Bend::Cw);

        // Pointing down, counter-clockwise swings the joint toward +x
        assert!(ccw.joint.x > 0.0);
        assert!(cw.joint.x < 0.0);
        assert!(ccw.end.distance(cw.end) < 1e-9);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_two_bone_preserves_root() {
        let root = DVec2::new(0.3, -0.2);
        let result = solve_two_bone(root, DVec2::new(0.5, 0.5), 0.4, 0.4, Bend::Ccw);
        assert!((result.joint.distance(root) - 0.4).abs() < 1e-12);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_along() {
        let p = along(DVec2::new(1.0, 1.0), std::f64::consts::FRAC_PI_2, 2.0);
        assert!(p.distance(DVec2::new(1.0, 3.0)) < 1e-12);
    }
}
