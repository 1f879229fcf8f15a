//! Comparison engine
//!
//! Runs two lifters through profile building, the movement's pose solver and
//! the metrics formulas, then derives cross-lifter ratios, equivalent
//! performances and an optional capacity-adjusted comparison.
//!
//! Ratios are `B / A`. A ratio with a zero or non-finite side is reported
//! as `None` in both directions and never leaks `NaN` into the output.

use serde::{Deserialize, Serialize};

use crate::anthropometry::{build_from_input, Anthropometry, ProportionInput, Sex};
use crate::capacity::CapacityTable;
use crate::error::{require_non_negative, require_positive, InputError};
use crate::metrics::{calculate_metrics, Metrics, MetricsInput};
use crate::movement::{Movement, MovementOptions};
use crate::pose::KinematicSolution;
use crate::rep_cycle::DEFAULT_VELOCITY;
use crate::solver::reference_solution;

/// Relative demand difference treated as no advantage
pub const NEUTRAL_BAND: f64 = 0.02;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifterInput {
    #[serde(default)]
    pub name: String,
    pub height: f64,
    pub weight: f64,
    #[serde(default)]
    pub sex: Sex,
    #[serde(default)]
    pub proportions: ProportionInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiftPerformance {
    /// External load, kg
    pub load: f64,
    pub reps: u32,
    /// Seconds per rep; derived from the bar velocity when absent
    #[serde(default)]
    pub time_per_rep: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComparisonSettings {
    pub neutral_band: f64,
    /// Concentric bar velocity for timing, m/s
    pub velocity: f64,
    pub capacity_adjustment: bool,
    pub capacity_table: CapacityTable,
}

impl Default for ComparisonSettings {
    fn default() -> Self {
        Self {
            neutral_band: NEUTRAL_BAND,
            velocity: DEFAULT_VELOCITY,
            capacity_adjustment: true,
            capacity_table: CapacityTable::default(),
        }
    }
}

/// Everything one comparison needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRequest {
    pub lifter_a: LifterInput,
    pub lifter_b: LifterInput,
    pub movement: Movement,
    /// Variant for lifter A; family defaults when absent
    #[serde(default)]
    pub options_a: Option<MovementOptions>,
    #[serde(default)]
    pub options_b: Option<MovementOptions>,
    pub performance_a: LiftPerformance,
    pub performance_b: LiftPerformance,
    #[serde(default)]
    pub settings: ComparisonSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvantageDirection {
    /// B's demand is higher: A has the easier lift
    #[serde(rename = "advantage_A")]
    AdvantageA,
    #[serde(rename = "advantage_B")]
    AdvantageB,
    #[serde(rename = "neutral")]
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonBlock {
    pub demand_ratio: Option<f64>,
    pub displacement_ratio: Option<f64>,
    pub advantage_direction: AdvantageDirection,
    /// Signed, `(demand_ratio - 1) * 100`
    pub advantage_percentage: Option<f64>,
}

impl ComparisonBlock {
    fn new(
        demand_a: f64,
        demand_b: f64,
        displacement_a: f64,
        displacement_b: f64,
        band: f64,
    ) -> Self {
        let demand_ratio = ratio(demand_b, demand_a);
        Self {
            demand_ratio,
            displacement_ratio: ratio(displacement_b, displacement_a),
            advantage_direction: direction(demand_ratio, band),
            advantage_percentage: demand_ratio.map(|r| (r - 1.0) * 100.0),
        }
    }
}

/// Demand after dividing by each variant's capacity multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityAdjusted {
    pub multiplier_a: f64,
    pub multiplier_b: f64,
    pub demand_a: f64,
    pub demand_b: f64,
    pub comparison: ComparisonBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifterResult {
    pub name: String,
    pub anthropometry: Anthropometry,
    pub options: MovementOptions,
    pub solution: Option<KinematicSolution>,
    pub metrics: Metrics,
    /// Load matching the other lifter's performance
    pub equivalent_load: Option<f64>,
    pub equivalent_reps: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub movement: Movement,
    pub lifter_a: LifterResult,
    pub lifter_b: LifterResult,
    /// Pure physics
    pub comparison: ComparisonBlock,
    pub capacity_adjusted: Option<CapacityAdjusted>,
    pub explanations: Vec<String>,
    /// False when either lifter's pose solve did not converge
    pub valid: bool,
}

/// `numerator / denominator`, or `None` when either side is zero or
/// non-finite, so `ratio(a, b)` and `ratio(b, a)` are defined together
fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if !(denominator.is_finite() && numerator.is_finite())
        || denominator == 0.0
        || numerator == 0.0
    {
        log::warn!(
            "degenerate ratio {} / {}; reporting as undefined",
            numerator,
            denominator
        );
        return None;
    }
    let r = numerator / denominator;
    r.is_finite().then_some(r)
}

fn direction(demand_ratio: Option<f64>, band: f64) -> AdvantageDirection {
    match demand_ratio {
        Some(r) if r > 1.0 + band => AdvantageDirection::AdvantageA,
        Some(r) if r < 1.0 / (1.0 + band) => AdvantageDirection::AdvantageB,
        _ => AdvantageDirection::Neutral,
    }
}

/// Options for `movement`; another family's options are replaced by defaults
fn resolve_options(movement: Movement, options: Option<MovementOptions>) -> MovementOptions {
    match options {
        Some(o) if o.movement() == movement => o,
        Some(o) => {
            log::warn!(
                "{:?} options given for {:?}; using defaults",
                o.movement(),
                movement
            );
            MovementOptions::defaults_for(movement)
        }
        None => MovementOptions::defaults_for(movement),
    }
}

fn validate_performance(performance: &LiftPerformance) -> Result<(), InputError> {
    require_non_negative("load", performance.load)?;
    if performance.reps == 0 {
        return Err(InputError::NonPositive {
            field: "reps",
            value: 0.0,
        });
    }
    if let Some(time) = performance.time_per_rep {
        require_positive("timePerRep", time)?;
    }
    Ok(())
}

struct Evaluated {
    name: String,
    anthro: Anthropometry,
    options: MovementOptions,
    solution: KinematicSolution,
    metrics: Metrics,
}

fn evaluate(
    lifter: &LifterInput,
    movement: Movement,
    options: MovementOptions,
    performance: &LiftPerformance,
    settings: &ComparisonSettings,
) -> Result<Evaluated, InputError> {
    validate_performance(performance)?;
    require_non_negative("addedWeight", options.added_weight())?;
    let anthro = build_from_input(lifter.height, lifter.weight, lifter.sex, &lifter.proportions)?;

    let solution = reference_solution(&anthro, movement, &options);
    if !solution.valid {
        log::warn!(
            "{}: {} solution invalid: {}",
            lifter.name,
            movement.label(),
            solution.errors.join("; ")
        );
    }

    let metrics = calculate_metrics(&MetricsInput {
        movement,
        options,
        body_weight: anthro.weight,
        load: performance.load,
        reps: performance.reps,
        displacement: solution.displacement,
        primary_moment_arm: solution.moment_arms.primary,
        time_per_rep: performance.time_per_rep,
        velocity: settings.velocity,
    })?;
    log::debug!(
        "{}: rom {:.3}m, demand {:.4}, work/rep {:.1}J",
        lifter.name,
        metrics.displacement,
        metrics.demand_factor,
        metrics.work_per_rep
    );

    Ok(Evaluated {
        name: lifter.name.clone(),
        anthro,
        options,
        solution,
        metrics,
    })
}

fn primary_joint(movement: Movement) -> &'static str {
    match movement {
        Movement::Squat | Movement::Deadlift | Movement::Thruster => "hip",
        Movement::Bench | Movement::OverheadPress => "shoulder",
        Movement::PullUp | Movement::PushUp => "elbow",
    }
}

/// "12.3% more" / "4.0% less" / "the same"
fn relative(b: f64, a: f64, more: &str, less: &str) -> Option<String> {
    let r = ratio(b, a)?;
    let pct = (r - 1.0) * 100.0;
    Some(if pct.abs() < 0.05 {
        "the same".to_string()
    } else if pct > 0.0 {
        format!("{:.1}% {}", pct, more)
    } else {
        format!("{:.1}% {}", -pct, less)
    })
}

fn explain(
    movement: Movement,
    a: &Evaluated,
    b: &Evaluated,
    comparison: &ComparisonBlock,
    adjusted: Option<&CapacityAdjusted>,
) -> Vec<String> {
    let mut lines = Vec::new();
    let (ma, mb) = (&a.metrics, &b.metrics);

    if let Some(text) = relative(mb.displacement, ma.displacement, "farther", "shorter") {
        lines.push(format!(
            "{} moves the bar {} than {} ({:.3} m vs {:.3} m).",
            b.name, text, a.name, mb.displacement, ma.displacement
        ));
    }

    let joint = primary_joint(movement);
    let arm_a = a.solution.moment_arms.primary;
    let arm_b = b.solution.moment_arms.primary;
    if let Some(text) = relative(arm_b, arm_a, "longer", "shorter") {
        lines.push(format!(
            "{}'s {} moment arm is {} than {}'s ({:.3} m vs {:.3} m).",
            b.name, joint, text, a.name, arm_b, arm_a
        ));
    }

    if let Some(text) = relative(mb.work_per_rep, ma.work_per_rep, "more", "less") {
        lines.push(format!(
            "{} does {} work per rep than {} ({:.0} J vs {:.0} J).",
            b.name, text, a.name, mb.work_per_rep, ma.work_per_rep
        ));
    }

    match (comparison.advantage_direction, comparison.advantage_percentage) {
        (AdvantageDirection::AdvantageA, Some(pct)) => lines.push(format!(
            "{} has the mechanical advantage: {}'s lift demands {:.1}% more.",
            a.name, b.name, pct
        )),
        (AdvantageDirection::AdvantageB, Some(pct)) => lines.push(format!(
            "{} has the mechanical advantage: their lift demands {:.1}% less than {}'s.",
            b.name, -pct, a.name
        )),
        (_, None) => lines.push(
            "Demand ratio is undefined for these inputs; no advantage is reported.".to_string(),
        ),
        _ => lines.push("Neither lifter has a meaningful mechanical advantage.".to_string()),
    }

    if let Some(adjusted) = adjusted {
        if adjusted.comparison.advantage_direction != comparison.advantage_direction {
            lines.push(format!(
                "After capacity adjustment the advantage becomes {:?}.",
                adjusted.comparison.advantage_direction
            ));
        }
    }

    for lifter in [a, b] {
        if !lifter.solution.valid {
            lines.push(format!(
                "Warning: {}'s {} pose did not solve ({}); metrics are approximate.",
                lifter.name,
                movement.label(),
                lifter.solution.errors.join("; ")
            ));
        }
    }

    lines
}

/// Compare two lifters performing the same movement family.
pub fn compare_lifts(request: &ComparisonRequest) -> Result<ComparisonResult, InputError> {
    let settings = &request.settings;
    require_non_negative("neutralBand", settings.neutral_band)?;
    require_positive("velocity", settings.velocity)?;
    settings.capacity_table.validate()?;

    let movement = request.movement;
    let a = evaluate(
        &request.lifter_a,
        movement,
        resolve_options(movement, request.options_a),
        &request.performance_a,
        settings,
    )?;
    let b = evaluate(
        &request.lifter_b,
        movement,
        resolve_options(movement, request.options_b),
        &request.performance_b,
        settings,
    )?;

    let (da, db) = (a.metrics.demand_factor, b.metrics.demand_factor);
    let comparison = ComparisonBlock::new(
        da,
        db,
        a.metrics.displacement,
        b.metrics.displacement,
        settings.neutral_band,
    );

    let capacity_adjusted = settings.capacity_adjustment.then(|| {
        let multiplier_a = settings.capacity_table.multiplier(&a.options);
        let multiplier_b = settings.capacity_table.multiplier(&b.options);
        let demand_a = da / multiplier_a;
        let demand_b = db / multiplier_b;
        CapacityAdjusted {
            multiplier_a,
            multiplier_b,
            demand_a,
            demand_b,
            comparison: ComparisonBlock::new(
                demand_a,
                demand_b,
                a.metrics.displacement,
                b.metrics.displacement,
                settings.neutral_band,
            ),
        }
    });

    let explanations = explain(movement, &a, &b, &comparison, capacity_adjusted.as_ref());
    let valid = a.solution.valid && b.solution.valid;

    let (pa, pb) = (&request.performance_a, &request.performance_b);
    let lifter_a = LifterResult {
        equivalent_load: ratio(db, da).map(|r| pb.load * r),
        equivalent_reps: ratio(da, db).map(|r| pb.reps as f64 * r),
        ..lifter_result(a)
    };
    let lifter_b = LifterResult {
        equivalent_load: ratio(da, db).map(|r| pa.load * r),
        equivalent_reps: ratio(db, da).map(|r| pa.reps as f64 * r),
        ..lifter_result(b)
    };

    Ok(ComparisonResult {
        movement,
        lifter_a,
        lifter_b,
        comparison,
        capacity_adjusted,
        explanations,
        valid,
    })
}

fn lifter_result(evaluated: Evaluated) -> LifterResult {
    LifterResult {
        name: evaluated.name,
        anthropometry: evaluated.anthro,
        options: evaluated.options,
        solution: Some(evaluated.solution),
        metrics: evaluated.metrics,
        equivalent_load: None,
        equivalent_reps: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anthropometry::{ProportionCategory, SdModifiers, Segment};
    use crate::movement::{SquatOptions, SquatVariant};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use wasm_bindgen_test::*;

    fn lifter(name: &str, height: f64, proportions: ProportionInput) -> LifterInput {
        LifterInput {
            name: name.to_string(),
            height,
            weight: 80.0,
            sex: Sex::Male,
            proportions,
        }
    }

    fn average() -> ProportionInput {
        ProportionInput::default()
    }

    fn request(a: LifterInput, b: LifterInput, movement: Movement) -> ComparisonRequest {
        let performance = LiftPerformance {
            load: 100.0,
            reps: 5,
            time_per_rep: None,
        };
        ComparisonRequest {
            lifter_a: a,
            lifter_b: b,
            movement,
            options_a: None,
            options_b: None,
            performance_a: performance,
            performance_b: performance,
            settings: ComparisonSettings::default(),
        }
    }

    fn swapped(request: &ComparisonRequest) -> ComparisonRequest {
        ComparisonRequest {
            lifter_a: request.lifter_b.clone(),
            lifter_b: request.lifter_a.clone(),
            options_a: request.options_b,
            options_b: request.options_a,
            performance_a: request.performance_b,
            performance_b: request.performance_a,
            ..request.clone()
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_identical_lifters_are_neutral() {
        let req = request(
            lifter("A", 1.8, average()),
            lifter("B", 1.8, average()),
            Movement::Squat,
        );
        let result = compare_lifts(&req).unwrap();
        assert!(result.valid);
        assert_eq!(result.comparison.demand_ratio, Some(1.0));
        assert_eq!(result.comparison.advantage_direction, AdvantageDirection::Neutral);
        assert_eq!(result.comparison.advantage_percentage, Some(0.0));
        assert_eq!(result.lifter_b.equivalent_load, Some(100.0));
        assert_eq!(result.lifter_a.equivalent_reps, Some(5.0));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_longer_femur_has_higher_demand() {
        let long = ProportionInput::Sd {
            modifiers: SdModifiers::default().with_segment(Segment::Femur, 2.0),
        };
        let req = request(
            lifter("Avg", 1.8, average()),
            lifter("Long", 1.8, long),
            Movement::Squat,
        );
        let result = compare_lifts(&req).unwrap();

        let arm = |r: &LifterResult| r.solution.as_ref().unwrap().moment_arms.hip;
        assert!(arm(&result.lifter_b) > arm(&result.lifter_a));
        assert!(result.lifter_b.metrics.demand_factor > result.lifter_a.metrics.demand_factor);
        assert_eq!(result.comparison.advantage_direction, AdvantageDirection::AdvantageA);
        // B needs less load to match A's demand
        assert!(result.lifter_b.equivalent_load.unwrap() < 100.0);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_swap_inverts_ratios() {
        let mut rng = StdRng::seed_from_u64(42);
        let categories = [
            ProportionCategory::Average,
            ProportionCategory::LongLegs,
            ProportionCategory::LongTorso,
            ProportionCategory::LongArms,
            ProportionCategory::ShortArms,
            ProportionCategory::LongFemurs,
        ];
        for movement in Movement::ALL {
            let mut pick = || ProportionInput::Category {
                category: categories[rng.random_range(0..categories.len())],
            };
            let (pa, pb) = (pick(), pick());
            let a = lifter("A", rng.random_range(1.55..2.0), pa);
            let b = lifter("B", rng.random_range(1.55..2.0), pb);
            let req = request(a, b, movement);

            let ab = compare_lifts(&req).unwrap().comparison;
            let ba = compare_lifts(&swapped(&req)).unwrap().comparison;

            let (r_ab, r_ba) = (ab.demand_ratio.unwrap(), ba.demand_ratio.unwrap());
            assert!((r_ab * r_ba - 1.0).abs() < 1e-12, "{:?}", movement);
            let (d_ab, d_ba) = (ab.displacement_ratio.unwrap(), ba.displacement_ratio.unwrap());
            assert!((d_ab * d_ba - 1.0).abs() < 1e-12);

            let expected = match ab.advantage_direction {
                AdvantageDirection::AdvantageA => AdvantageDirection::AdvantageB,
                AdvantageDirection::AdvantageB => AdvantageDirection::AdvantageA,
                AdvantageDirection::Neutral => AdvantageDirection::Neutral,
            };
            assert_eq!(ba.advantage_direction, expected, "{:?}", movement);
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_invalid_solution_degrades() {
        let extreme = ProportionInput::Sd {
            modifiers: SdModifiers::groups(0.0, 4.0, -4.0)
                .with_segment(Segment::Femur, 4.0)
                .with_segment(Segment::Tibia, -4.0)
                .with_segment(Segment::Torso, -4.0),
        };
        let req = request(
            lifter("A", 1.8, average()),
            lifter("B", 1.8, extreme),
            Movement::Squat,
        );
        let result = compare_lifts(&req).unwrap();

        assert!(!result.valid);
        assert!(result.lifter_a.solution.as_ref().unwrap().valid);
        assert!(!result.lifter_b.solution.as_ref().unwrap().valid);
        assert!(result.lifter_b.metrics.work_per_rep.is_finite());
        assert!(result.lifter_b.metrics.work_per_rep > 0.0);
        assert!(result.explanations.iter().any(|l| l.starts_with("Warning: B")));

        // A's metrics do not depend on B
        let baseline = compare_lifts(&request(
            lifter("A", 1.8, average()),
            lifter("B", 1.8, average()),
            Movement::Squat,
        ))
        .unwrap();
        assert_eq!(result.lifter_a.metrics, baseline.lifter_a.metrics);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_capacity_adjustment() {
        let mut req = request(
            lifter("A", 1.8, average()),
            lifter("B", 1.8, average()),
            Movement::Squat,
        );
        req.options_a = Some(MovementOptions::Squat(SquatOptions {
            variant: SquatVariant::LowBar,
            depth_deg: 0.0,
        }));
        let result = compare_lifts(&req).unwrap();
        let adjusted = result.capacity_adjusted.unwrap();

        assert_eq!(adjusted.multiplier_a, 1.05);
        assert_eq!(adjusted.multiplier_b, 1.0);
        let pure = result.comparison.demand_ratio.unwrap();
        let capacity = adjusted.comparison.demand_ratio.unwrap();
        assert!((capacity - pure * 1.05).abs() < 1e-12);

        req.settings.capacity_adjustment = false;
        assert!(compare_lifts(&req).unwrap().capacity_adjusted.is_none());
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_foreign_options_fall_back_to_defaults() {
        let mut req = request(
            lifter("A", 1.8, average()),
            lifter("B", 1.8, average()),
            Movement::Deadlift,
        );
        req.options_a = Some(MovementOptions::defaults_for(Movement::Bench));
        let result = compare_lifts(&req).unwrap();
        assert_eq!(result.lifter_a.options, MovementOptions::defaults_for(Movement::Deadlift));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_degenerate_ratio_is_flagged() {
        assert_eq!(ratio(1.0, 0.0), None);
        assert_eq!(ratio(0.0, 1.0), None);
        assert_eq!(ratio(f64::NAN, 1.0), None);
        assert_eq!(ratio(1.0, f64::INFINITY), None);
        assert_eq!(direction(None, NEUTRAL_BAND), AdvantageDirection::Neutral);

        let block = ComparisonBlock::new(0.0, 0.3, 0.5, 0.5, NEUTRAL_BAND);
        assert_eq!(block.demand_ratio, None);
        assert_eq!(block.advantage_percentage, None);
        assert_eq!(block.advantage_direction, AdvantageDirection::Neutral);
        assert_eq!(block.displacement_ratio, Some(1.0));

        // Zero demand on either side is undefined in both directions
        let swapped = ComparisonBlock::new(0.3, 0.0, 0.5, 0.5, NEUTRAL_BAND);
        assert_eq!(swapped, block);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_neutral_band_edges() {
        assert_eq!(direction(Some(1.019), NEUTRAL_BAND), AdvantageDirection::Neutral);
        assert_eq!(direction(Some(1.021), NEUTRAL_BAND), AdvantageDirection::AdvantageA);
        assert_eq!(direction(Some(1.0 / 1.021), NEUTRAL_BAND), AdvantageDirection::AdvantageB);
        assert_eq!(direction(Some(1.0 / 1.019), NEUTRAL_BAND), AdvantageDirection::Neutral);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_input_errors() {
        let mut req = request(
            lifter("A", 0.0, average()),
            lifter("B", 1.8, average()),
            Movement::Bench,
        );
        assert!(matches!(
            compare_lifts(&req),
            Err(InputError::NonPositive { field: "height", .. })
        ));

        req.lifter_a.height = 1.8;
        req.performance_b.reps = 0;
        assert!(matches!(
            compare_lifts(&req),
            Err(InputError::NonPositive { field: "reps", .. })
        ));

        req.performance_b.reps = 3;
        req.performance_b.load = -10.0;
        assert!(matches!(
            compare_lifts(&req),
            Err(InputError::Negative { field: "load", .. })
        ));

        // A squat in a millisecond has no meaningful energy cost
        req.movement = Movement::Squat;
        req.performance_b.load = 100.0;
        req.performance_b.time_per_rep = Some(0.001);
        assert!(matches!(
            compare_lifts(&req),
            Err(InputError::TooLarge { field: "barVelocity", .. })
        ));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_request_from_json() {
        let json = r#"{
            "lifterA": { "name": "Ann", "height": 1.65, "weight": 60, "sex": "female" },
            "lifterB": {
                "name": "Bob", "height": 1.9, "weight": 95,
                "proportions": { "mode": "category", "category": "longLegs" }
            },
            "movement": "deadlift",
            "optionsB": { "movement": "deadlift", "stance": "sumo" },
            "performanceA": { "load": 120, "reps": 3 },
            "performanceB": { "load": 180, "reps": 1, "timePerRep": 4.0 }
        }"#;
        let req: ComparisonRequest = serde_json::from_str(json).unwrap();
        let result = compare_lifts(&req).unwrap();
        assert_eq!(result.lifter_b.metrics.time_per_rep, 4.0);

        let out = serde_json::to_value(&result).unwrap();
        let direction = out["comparison"]["advantageDirection"].as_str().unwrap();
        assert!(["advantage_A", "advantage_B", "neutral"].contains(&direction));
        assert!(out["lifterA"]["metrics"]["workPerRep"].as_f64().unwrap() > 0.0);
    }
}
