//! Lift Leverage - Wasm Core
//!
//! Anthropometric lifting biomechanics: builds a lifter's segment lengths,
//! solves sagittal stick-figure poses for seven movement families and
//! compares two lifters' work and leverage demand.
//!
//! Everything outside [`bindings`] is plain Rust and runs natively.

pub mod anthropometry;
pub mod capacity;
pub mod compare;
pub mod error;
pub mod frame;
pub mod ik;
pub mod metrics;
pub mod movement;
pub mod pose;
pub mod rep_cycle;
pub mod roots;
pub mod solver;

#[cfg(target_arch = "wasm32")]
pub mod bindings;

pub use anthropometry::{
    build_from_category, build_from_input, build_from_measurements, build_profile,
    Anthropometry, ProportionCategory, ProportionInput, SdModifiers, Segment, SegmentLengths,
    Sex,
};
pub use capacity::CapacityTable;
pub use compare::{
    compare_lifts, AdvantageDirection, ComparisonRequest, ComparisonResult, ComparisonSettings,
    LiftPerformance, LifterInput,
};
pub use error::InputError;
pub use frame::pose_vertex_buffer;
pub use metrics::{calculate_metrics, Metrics, MetricsInput};
pub use movement::{Movement, MovementOptions};
pub use pose::{validate_rigidity, JointPositions, KinematicSolution, Pose2D, SolveResult};
pub use rep_cycle::{calculate_rep_cycle, get_animation_phase, RepCycleConfig, RepPlayback};
pub use solver::{get_rom, reference_solution, solve, PoseSolver};
