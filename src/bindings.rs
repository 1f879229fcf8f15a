//! JavaScript exports
//!
//! Thin wrappers: records cross the boundary through serde-wasm-bindgen,
//! errors come back as strings.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::anthropometry::{self, Anthropometry, ProportionInput, Sex};
use crate::capacity::CapacityTable;
use crate::compare::{self, ComparisonRequest};
use crate::error::InputError;
use crate::frame;
use crate::movement::{Movement, MovementOptions};
use crate::pose::Pose2D;
use crate::rep_cycle::{self, RepCycleConfig, RepPlayback};
use crate::solver;

fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("invalid {}: {}", what, e)))
}

/// Plain objects and `null` for `None`, so results survive `JSON.stringify`
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn input_error(err: InputError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Family options, or the family defaults when the host passes nothing
fn options_from_js(movement: Movement, options: JsValue) -> Result<MovementOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(MovementOptions::defaults_for(movement))
    } else {
        from_js(options, "movement options")
    }
}

/// Install the panic hook and console logger. Call once before anything else.
#[wasm_bindgen(js_name = initCore)]
pub fn init_core() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("lift-leverage core initialized");
}

#[wasm_bindgen(js_name = buildProfile)]
pub fn build_profile(
    height: f64,
    weight: f64,
    sex: JsValue,
    proportions: JsValue,
) -> Result<JsValue, JsValue> {
    let sex: Sex = from_js(sex, "sex")?;
    let proportions: ProportionInput = if proportions.is_undefined() || proportions.is_null() {
        ProportionInput::default()
    } else {
        from_js(proportions, "proportions")?
    };
    let profile = anthropometry::build_from_input(height, weight, sex, &proportions)
        .map_err(input_error)?;
    to_js(&profile)
}

#[wasm_bindgen(js_name = getROM)]
pub fn get_rom(profile: JsValue, movement: JsValue, options: JsValue) -> Result<f64, JsValue> {
    let profile: Anthropometry = from_js(profile, "profile")?;
    let movement: Movement = from_js(movement, "movement")?;
    let options = options_from_js(movement, options)?;
    Ok(solver::get_rom(&profile, movement, &options))
}

#[wasm_bindgen(js_name = solvePose)]
pub fn solve_pose(
    profile: JsValue,
    movement: JsValue,
    options: JsValue,
    phase: f64,
) -> Result<JsValue, JsValue> {
    let profile: Anthropometry = from_js(profile, "profile")?;
    let movement: Movement = from_js(movement, "movement")?;
    let options = options_from_js(movement, options)?;
    to_js(&solver::solve(&profile, movement, &options, phase))
}

#[wasm_bindgen(js_name = referenceSolution)]
pub fn reference_solution(
    profile: JsValue,
    movement: JsValue,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let profile: Anthropometry = from_js(profile, "profile")?;
    let movement: Movement = from_js(movement, "movement")?;
    let options = options_from_js(movement, options)?;
    to_js(&solver::reference_solution(&profile, movement, &options))
}

/// Line-list `[x, y]` pairs for a pose, as a `Float32Array`
#[wasm_bindgen(js_name = poseVertexBuffer)]
pub fn pose_vertex_buffer(pose: JsValue) -> Result<Vec<f32>, JsValue> {
    let pose: Pose2D = from_js(pose, "pose")?;
    Ok(frame::pose_vertex_buffer(&pose))
}

#[wasm_bindgen(js_name = calculateRepCycle)]
pub fn calculate_rep_cycle(rom: f64, velocity: f64) -> Result<JsValue, JsValue> {
    to_js(&rep_cycle::calculate_rep_cycle(rom, velocity))
}

#[wasm_bindgen(js_name = getAnimationPhase)]
pub fn get_animation_phase(
    movement: JsValue,
    progress: f64,
    cycle: JsValue,
) -> Result<f64, JsValue> {
    let movement: Movement = from_js(movement, "movement")?;
    let cycle: RepCycleConfig = from_js(cycle, "rep cycle")?;
    Ok(rep_cycle::get_animation_phase(movement, progress, &cycle))
}

/// Advance a playback clock value by `delta_seconds`
#[wasm_bindgen(js_name = advancePlayback)]
pub fn advance_playback(playback: JsValue, delta_seconds: f64) -> Result<JsValue, JsValue> {
    let playback: RepPlayback = from_js(playback, "playback")?;
    to_js(&playback.advance(delta_seconds))
}

#[wasm_bindgen(js_name = playbackPhase)]
pub fn playback_phase(playback: JsValue, cycle: JsValue) -> Result<f64, JsValue> {
    let playback: RepPlayback = from_js(playback, "playback")?;
    let cycle: RepCycleConfig = from_js(cycle, "rep cycle")?;
    Ok(playback.phase(&cycle))
}

#[wasm_bindgen(js_name = compareLifts)]
pub fn compare_lifts(request: JsValue) -> Result<JsValue, JsValue> {
    let request: ComparisonRequest = from_js(request, "comparison request")?;
    let result = compare::compare_lifts(&request).map_err(|e| {
        log::info!("comparison rejected: {}", e);
        input_error(e)
    })?;
    log::info!(
        "compared {} vs {} ({}): {:?}",
        result.lifter_a.name,
        result.lifter_b.name,
        request.movement.label(),
        result.comparison.advantage_direction
    );
    to_js(&result)
}

/// Validate a capacity table given as JSON and return it as an object
#[wasm_bindgen(js_name = parseCapacityTable)]
pub fn parse_capacity_table(json: &str) -> Result<JsValue, JsValue> {
    let table = CapacityTable::from_json(json).map_err(input_error)?;
    log::info!("loaded capacity table");
    to_js(&table)
}
