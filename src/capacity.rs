//! Capacity multipliers
//!
//! Empirical, variant-specific corrections for how much load a lifter can
//! typically handle (e.g. low-bar squats move more weight than high-bar).
//! A multiplier above 1 lowers the adjusted demand. Values are configuration:
//! a default table is compiled in and can be replaced from JSON.

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, InputError};
use crate::movement::{BenchArch, DeadliftStance, MovementOptions, SquatVariant};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CapacityTable {
    pub squat_high_bar: f64,
    pub squat_low_bar: f64,
    pub squat_front: f64,
    pub deadlift_conventional: f64,
    pub deadlift_sumo: f64,
    pub bench_flat: f64,
    pub bench_moderate: f64,
    pub bench_competitive: f64,
    pub overhead_press: f64,
    pub pull_up: f64,
    pub push_up: f64,
    pub thruster: f64,
}

impl Default for CapacityTable {
    fn default() -> Self {
        Self {
            squat_high_bar: 1.0,
            squat_low_bar: 1.05,
            squat_front: 0.85,
            deadlift_conventional: 1.0,
            deadlift_sumo: 1.0,
            bench_flat: 1.0,
            bench_moderate: 1.0,
            bench_competitive: 1.03,
            overhead_press: 1.0,
            pull_up: 1.0,
            push_up: 1.0,
            thruster: 1.0,
        }
    }
}

impl CapacityTable {
    /// Parse a table from JSON; missing entries keep their default value.
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        let table: CapacityTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), InputError> {
        for (name, value) in self.entries() {
            require_positive(name, value)?;
        }
        Ok(())
    }

    fn entries(&self) -> [(&'static str, f64); 12] {
        [
            ("squatHighBar", self.squat_high_bar),
            ("squatLowBar", self.squat_low_bar),
            ("squatFront", self.squat_front),
            ("deadliftConventional", self.deadlift_conventional),
            ("deadliftSumo", self.deadlift_sumo),
            ("benchFlat", self.bench_flat),
            ("benchModerate", self.bench_moderate),
            ("benchCompetitive", self.bench_competitive),
            ("overheadPress", self.overhead_press),
            ("pullUp", self.pull_up),
            ("pushUp", self.push_up),
            ("thruster", self.thruster),
        ]
    }

    /// Multiplier for the variant described by `options`
    pub fn multiplier(&self, options: &MovementOptions) -> f64 {
        match options {
            MovementOptions::Squat(o) => match o.variant {
                SquatVariant::HighBar => self.squat_high_bar,
                SquatVariant::LowBar => self.squat_low_bar,
                SquatVariant::Front => self.squat_front,
            },
            MovementOptions::Deadlift(o) => match o.stance {
                DeadliftStance::Conventional => self.deadlift_conventional,
                DeadliftStance::Sumo => self.deadlift_sumo,
            },
            MovementOptions::Bench(o) => match o.arch {
                BenchArch::Flat => self.bench_flat,
                BenchArch::Moderate => self.bench_moderate,
                BenchArch::Competitive => self.bench_competitive,
            },
            MovementOptions::OverheadPress(_) => self.overhead_press,
            MovementOptions::PullUp(_) => self.pull_up,
            MovementOptions::PushUp(_) => self.push_up,
            MovementOptions::Thruster(_) => self.thruster,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::{Movement, SquatOptions};
    use wasm_bindgen_test::*;

    #[test]
    #[wasm_bindgen_test]
    fn test_default_multipliers() {
        let table = CapacityTable::default();
        let low_bar = MovementOptions::Squat(SquatOptions {
            variant: SquatVariant::LowBar,
            depth_deg: 0.0,
        });
        assert_eq!(table.multiplier(&low_bar), 1.05);
        assert_eq!(
            table.multiplier(&MovementOptions::defaults_for(Movement::Squat)),
            1.0
        );
        assert!(table.validate().is_ok());
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_from_json_overrides_and_defaults() {
        let table = CapacityTable::from_json(r#"{ "squatLowBar": 1.1, "deadliftSumo": 1.02 }"#)
            .unwrap();
        assert_eq!(table.squat_low_bar, 1.1);
        assert_eq!(table.deadlift_sumo, 1.02);
        assert_eq!(table.squat_front, 0.85);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            CapacityTable::from_json(r#"{ "benchFlat": 0 }"#),
            Err(InputError::NonPositive {
                field: "benchFlat",
                ..
            })
        ));
        assert!(matches!(
            CapacityTable::from_json("{ not json"),
            Err(InputError::Config(_))
        ));
    }
}
