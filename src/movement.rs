//! Movement families and their per-family options.

use serde::{Deserialize, Serialize};

/// The fixed set of movement families.
/// Ordered to match the solver lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Movement {
    Squat = 0,
    Deadlift = 1,
    Bench = 2,
    OverheadPress = 3,
    PullUp = 4,
    PushUp = 5,
    Thruster = 6,
}

impl Movement {
    pub const COUNT: usize = 7;

    pub const ALL: [Movement; Self::COUNT] = [
        Movement::Squat,
        Movement::Deadlift,
        Movement::Bench,
        Movement::OverheadPress,
        Movement::PullUp,
        Movement::PushUp,
        Movement::Thruster,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether a rep starts by lowering the load
    pub const fn eccentric_first(self) -> bool {
        matches!(self, Movement::Squat | Movement::Bench | Movement::PushUp)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Movement::Squat => "squat",
            Movement::Deadlift => "deadlift",
            Movement::Bench => "bench press",
            Movement::OverheadPress => "overhead press",
            Movement::PullUp => "pull-up",
            Movement::PushUp => "push-up",
            Movement::Thruster => "thruster",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SquatVariant {
    #[default]
    HighBar,
    LowBar,
    Front,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SquatOptions {
    pub variant: SquatVariant,
    /// Femur angle below horizontal at the bottom, degrees (0 = parallel)
    pub depth_deg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeadliftStance {
    #[default]
    Conventional,
    Sumo,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeadliftOptions {
    pub stance: DeadliftStance,
    /// Bar start height offset in meters (blocks > 0, deficit < 0)
    pub bar_start_offset: f64,
}

/// Grip or hand width, as a multiple of shoulder width per family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GripWidth {
    Narrow,
    #[default]
    Medium,
    Wide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BenchArch {
    #[default]
    Flat,
    Moderate,
    Competitive,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BenchOptions {
    pub grip: GripWidth,
    pub arch: BenchArch,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverheadPressOptions {
    pub grip: GripWidth,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PullUpOptions {
    pub grip: GripWidth,
    /// Belt weight in kg
    pub added_weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PushUpOptions {
    pub width: GripWidth,
    /// Plate or vest weight in kg
    pub added_weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThrusterOptions {
    pub depth_deg: f64,
}

/// Per-family configuration, tagged by family.
///
/// A solver handed another family's options falls back to its own defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "movement", rename_all = "camelCase")]
pub enum MovementOptions {
    Squat(SquatOptions),
    Deadlift(DeadliftOptions),
    Bench(BenchOptions),
    OverheadPress(OverheadPressOptions),
    PullUp(PullUpOptions),
    PushUp(PushUpOptions),
    Thruster(ThrusterOptions),
}

impl MovementOptions {
    /// Default options for a family
    pub fn defaults_for(movement: Movement) -> Self {
        match movement {
            Movement::Squat => MovementOptions::Squat(SquatOptions::default()),
            Movement::Deadlift => MovementOptions::Deadlift(DeadliftOptions::default()),
            Movement::Bench => MovementOptions::Bench(BenchOptions::default()),
            Movement::OverheadPress => {
                MovementOptions::OverheadPress(OverheadPressOptions::default())
            }
            Movement::PullUp => MovementOptions::PullUp(PullUpOptions::default()),
            Movement::PushUp => MovementOptions::PushUp(PushUpOptions::default()),
            Movement::Thruster => MovementOptions::Thruster(ThrusterOptions::default()),
        }
    }

    pub fn movement(&self) -> Movement {
        match self {
            MovementOptions::Squat(_) => Movement::Squat,
            MovementOptions::Deadlift(_) => Movement::Deadlift,
            MovementOptions::Bench(_) => Movement::Bench,
            MovementOptions::OverheadPress(_) => Movement::OverheadPress,
            MovementOptions::PullUp(_) => Movement::PullUp,
            MovementOptions::PushUp(_) => Movement::PushUp,
            MovementOptions::Thruster(_) => Movement::Thruster,
        }
    }

    pub fn squat(&self) -> SquatOptions {
        match self {
            MovementOptions::Squat(o) => *o,
            _ => SquatOptions::default(),
        }
    }

    pub fn deadlift(&self) -> DeadliftOptions {
        match self {
            MovementOptions::Deadlift(o) => *o,
            _ => DeadliftOptions::default(),
        }
    }

    pub fn bench(&self) -> BenchOptions {
        match self {
            MovementOptions::Bench(o) => *o,
            _ => BenchOptions::default(),
        }
    }

    pub fn overhead_press(&self) -> OverheadPressOptions {
        match self {
            MovementOptions::OverheadPress(o) => *o,
            _ => OverheadPressOptions::default(),
        }
    }

    pub fn pull_up(&self) -> PullUpOptions {
        match self {
            MovementOptions::PullUp(o) => *o,
            _ => PullUpOptions::default(),
        }
    }

    pub fn push_up(&self) -> PushUpOptions {
        match self {
            MovementOptions::PushUp(o) => *o,
            _ => PushUpOptions::default(),
        }
    }

    pub fn thruster(&self) -> ThrusterOptions {
        match self {
            MovementOptions::Thruster(o) => *o,
            _ => ThrusterOptions::default(),
        }
    }

    /// Extra load carried on the body for bodyweight families, in kg
    pub fn added_weight(&self) -> f64 {
        match self {
            MovementOptions::PullUp(o) => o.added_weight,
            MovementOptions::PushUp(o) => o.added_weight,
            _ => 0.0,
        }
    }
}
