//! Stick-figure vertex buffer for the render host.
//!
//! A line list: every consecutive pair of vertices is one segment.

use glam::DVec2;
use static_assertions::const_assert_eq;

use crate::pose::Pose2D;

/// Half the arm length of the cross drawn at the bar, meters
pub const BAR_MARKER_HALF: f64 = 0.025;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StickVertex {
    pub position: [f32; 2],
}

// JS reads the buffer as tightly packed [x, y] pairs
const_assert_eq!(std::mem::size_of::<StickVertex>(), 8);

impl From<DVec2> for StickVertex {
    fn from(p: DVec2) -> Self {
        Self {
            position: p.as_vec2().to_array(),
        }
    }
}

/// Segment endpoints of the figure plus the bar marker
pub fn pose_lines(pose: &Pose2D) -> Vec<StickVertex> {
    let p = &pose.positions;
    let mut lines = vec![
        p.head, p.shoulder, //
        p.shoulder, p.hip, //
        p.hip, p.knee, //
        p.knee, p.ankle,
    ];

    if let Some(elbow) = p.elbow {
        lines.extend([p.shoulder, elbow]);
        if let Some(wrist) = p.wrist {
            lines.extend([elbow, wrist]);
        }
    }

    let (sin, cos) = pose.bar_angle.sin_cos();
    let along = DVec2::new(cos, sin) * BAR_MARKER_HALF;
    let across = along.perp();
    lines.extend([
        p.bar - along,
        p.bar + along,
        p.bar - across,
        p.bar + across,
    ]);

    lines.into_iter().map(StickVertex::from).collect()
}

/// Flat `[x0, y0, x1, y1, ...]` copy of [`pose_lines`]
pub fn pose_vertex_buffer(pose: &Pose2D) -> Vec<f32> {
    bytemuck::cast_slice(&pose_lines(pose)).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anthropometry::{build_profile, SdModifiers, Sex};
    use crate::movement::{Movement, MovementOptions};
    use crate::solver::solve;
    use wasm_bindgen_test::*;

    fn pose(movement: Movement) -> Pose2D {
        let anthro = build_profile(1.8, 80.0, Sex::Male, &SdModifiers::default()).unwrap();
        solve(&anthro, movement, &MovementOptions::defaults_for(movement), 0.5).pose
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_squat_has_body_and_bar() {
        let squat = pose(Movement::Squat);
        let buffer = pose_vertex_buffer(&squat);
        // 4 body segments + 2 bar strokes, 2 vertices each, 2 floats per vertex
        assert_eq!(buffer.len(), 6 * 2 * 2);
        assert_eq!(buffer[6], squat.positions.hip.x as f32);
        assert_eq!(buffer[7], squat.positions.hip.y as f32);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_arms_add_two_segments() {
        let bench = pose(Movement::Bench);
        assert!(bench.positions.wrist.is_some());
        assert_eq!(pose_lines(&bench).len(), 8 * 2);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_bar_marker_is_centred() {
        let deadlift = pose(Movement::Deadlift);
        let lines = pose_lines(&deadlift);
        let marker = &lines[lines.len() - 4..];
        let bar = deadlift.positions.bar.as_vec2();
        for pair in marker.chunks(2) {
            let (a, b) = (pair[0].position, pair[1].position);
            let mid = (glam::Vec2::from(a) + glam::Vec2::from(b)) * 0.5;
            assert!(mid.distance(bar) < 1e-6);
        }
    }
}
