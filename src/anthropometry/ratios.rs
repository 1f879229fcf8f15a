//! Population-average segment ratios shared by build.rs and the runtime.
//!
//! This file is included by the build script through `#[path]`, so it must not
//! reference anything from the crate. Every value is a fraction of standing height.

// Some items are only read by build.rs
#![allow(dead_code)]

/// Segment ratio table for one sex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioTable {
    pub head_neck: f64, // vertex → shoulder joint
    pub torso: f64,     // shoulder joint → hip joint
    pub femur: f64,     // hip joint → knee joint
    pub tibia: f64,     // knee joint → ankle joint
    pub foot_height: f64, // ankle joint → floor
    pub upper_arm: f64,
    pub forearm: f64,
    pub hand: f64,
    pub foot: f64,
    /// Biacromial width, used for grip-width geometry
    pub shoulder_width: f64,
}

impl RatioTable {
    /// Sum of the segments that stack vertically when standing.
    pub fn vertical_stack(&self) -> f64 {
        self.head_neck + self.torso + self.femur + self.tibia + self.foot_height
    }

    /// Every ratio in declaration order, with a label for diagnostics.
    pub fn entries(&self) -> [(&'static str, f64); 10] {
        [
            ("head_neck", self.head_neck),
            ("torso", self.torso),
            ("femur", self.femur),
            ("tibia", self.tibia),
            ("foot_height", self.foot_height),
            ("upper_arm", self.upper_arm),
            ("forearm", self.forearm),
            ("hand", self.hand),
            ("foot", self.foot),
            ("shoulder_width", self.shoulder_width),
        ]
    }
}

/// Drillis & Contini style ratios, male population.
pub const MALE_RATIOS: RatioTable = RatioTable {
    head_neck: 0.182,
    torso: 0.288,
    femur: 0.245,
    tibia: 0.246,
    foot_height: 0.039,
    upper_arm: 0.186,
    forearm: 0.146,
    hand: 0.108,
    foot: 0.152,
    shoulder_width: 0.230,
};

/// Female population ratios.
pub const FEMALE_RATIOS: RatioTable = RatioTable {
    head_neck: 0.180,
    torso: 0.290,
    femur: 0.242,
    tibia: 0.248,
    foot_height: 0.040,
    upper_arm: 0.181,
    forearm: 0.141,
    hand: 0.106,
    foot: 0.147,
    shoulder_width: 0.220,
};

/// Allowed deviation of the vertical stack from 1.0
pub const STACK_TOLERANCE: f64 = 0.02;
