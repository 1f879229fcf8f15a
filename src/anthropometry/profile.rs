use serde::{Deserialize, Serialize};

use super::modifiers::{
    sd_from_measurement, ProportionCategory, SdModifiers, Segment, SegmentSds,
};
use super::ratios::{RatioTable, FEMALE_RATIOS, MALE_RATIOS};
use crate::error::{require_positive, InputError};

/// Biological sex, selecting the population ratio table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    pub fn ratios(self) -> &'static RatioTable {
        match self {
            Sex::Male => &MALE_RATIOS,
            Sex::Female => &FEMALE_RATIOS,
        }
    }
}

/// Segment lengths in meters. Every length is strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentLengths {
    pub torso: f64,
    pub upper_arm: f64,
    pub forearm: f64,
    pub hand: f64,
    pub femur: f64,
    pub tibia: f64,
    pub foot: f64,
    pub foot_height: f64,
    pub head_neck: f64,
    /// Sum of the vertical stack; close to, but not forced to, the input height
    pub total_height: f64,
}

impl SegmentLengths {
    fn from_fn(mut length: impl FnMut(Segment) -> f64) -> Self {
        let mut lengths = Self {
            torso: length(Segment::Torso),
            upper_arm: length(Segment::UpperArm),
            forearm: length(Segment::Forearm),
            hand: length(Segment::Hand),
            femur: length(Segment::Femur),
            tibia: length(Segment::Tibia),
            foot: length(Segment::Foot),
            foot_height: length(Segment::FootHeight),
            head_neck: length(Segment::HeadNeck),
            total_height: 0.0,
        };
        lengths.total_height = lengths.head_neck
            + lengths.torso
            + lengths.femur
            + lengths.tibia
            + lengths.foot_height;
        lengths
    }

    pub fn get(&self, segment: Segment) -> f64 {
        match segment {
            Segment::HeadNeck => self.head_neck,
            Segment::Torso => self.torso,
            Segment::Femur => self.femur,
            Segment::Tibia => self.tibia,
            Segment::FootHeight => self.foot_height,
            Segment::UpperArm => self.upper_arm,
            Segment::Forearm => self.forearm,
            Segment::Hand => self.hand,
            Segment::Foot => self.foot,
        }
    }
}

/// Literal measured lengths; missing segments fall back to population average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SegmentMeasurements {
    pub head_neck: Option<f64>,
    pub torso: Option<f64>,
    pub femur: Option<f64>,
    pub tibia: Option<f64>,
    pub foot_height: Option<f64>,
    pub upper_arm: Option<f64>,
    pub forearm: Option<f64>,
    pub hand: Option<f64>,
    pub foot: Option<f64>,
}

impl SegmentMeasurements {
    pub fn get(&self, segment: Segment) -> Option<f64> {
        match segment {
            Segment::HeadNeck => self.head_neck,
            Segment::Torso => self.torso,
            Segment::Femur => self.femur,
            Segment::Tibia => self.tibia,
            Segment::FootHeight => self.foot_height,
            Segment::UpperArm => self.upper_arm,
            Segment::Forearm => self.forearm,
            Segment::Hand => self.hand,
            Segment::Foot => self.foot,
        }
    }
}

/// How a lifter's proportions were specified
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ProportionInput {
    Category { category: ProportionCategory },
    Sd { modifiers: SdModifiers },
    Measured { lengths: SegmentMeasurements },
}

impl Default for ProportionInput {
    fn default() -> Self {
        ProportionInput::Category {
            category: ProportionCategory::Average,
        }
    }
}

/// Immutable lifter profile, built once per lifter per comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anthropometry {
    pub height: f64,
    pub weight: f64,
    pub sex: Sex,
    pub segments: SegmentLengths,
    /// Effective per-segment SDs, for reporting
    pub sds: SegmentSds,
}

impl Anthropometry {
    /// Biacromial width, derived from height
    pub fn shoulder_width(&self) -> f64 {
        self.height * self.sex.ratios().shoulder_width
    }

    /// Shoulder-to-grip reach along a straight arm (grip at mid-hand)
    pub fn arm_reach(&self) -> f64 {
        self.segments.upper_arm + self.forearm_reach()
    }

    /// Elbow-to-grip length (grip at mid-hand)
    pub fn forearm_reach(&self) -> f64 {
        self.segments.forearm + 0.5 * self.segments.hand
    }
}

fn validate_body(height: f64, weight: f64) -> Result<(), InputError> {
    require_positive("height", height)?;
    require_positive("weight", weight)?;
    Ok(())
}

/// Build a profile from SD modifiers.
pub fn build_profile(
    height: f64,
    weight: f64,
    sex: Sex,
    modifiers: &SdModifiers,
) -> Result<Anthropometry, InputError> {
    validate_body(height, weight)?;
    modifiers.validate()?;

    let table = sex.ratios();
    let segments =
        SegmentLengths::from_fn(|s| height * s.base_ratio(table) * modifiers.scale(s));

    Ok(Anthropometry {
        height,
        weight,
        sex,
        segments,
        sds: effective_sds(&segments, height, sex),
    })
}

/// Per-segment SDs that reproduce the built lengths, group modifiers included
fn effective_sds(segments: &SegmentLengths, height: f64, sex: Sex) -> SegmentSds {
    Segment::ALL.iter().fold(SegmentSds::default(), |sds, &s| {
        sds.with(s, sd_from_measurement(segments.get(s), height, sex, s))
    })
}

/// Build a profile from a symbolic proportion category.
pub fn build_from_category(
    height: f64,
    weight: f64,
    sex: Sex,
    category: ProportionCategory,
) -> Result<Anthropometry, InputError> {
    build_profile(height, weight, sex, &category.modifiers())
}

/// Build a profile from literal measurements; the equivalent SDs are
/// back-solved and clamped for reporting, the lengths are kept as measured.
pub fn build_from_measurements(
    height: f64,
    weight: f64,
    sex: Sex,
    measured: &SegmentMeasurements,
) -> Result<Anthropometry, InputError> {
    validate_body(height, weight)?;

    for segment in Segment::ALL {
        if let Some(value) = measured.get(segment) {
            if !value.is_finite() || value <= 0.0 {
                return Err(InputError::InvalidMeasurement {
                    segment: segment.name(),
                    value,
                });
            }
        }
    }

    let table = sex.ratios();
    let segments = SegmentLengths::from_fn(|s| {
        measured
            .get(s)
            .unwrap_or_else(|| height * s.base_ratio(table))
    });

    Ok(Anthropometry {
        height,
        weight,
        sex,
        segments,
        sds: effective_sds(&segments, height, sex),
    })
}

/// Dispatch on how the proportions were given.
pub fn build_from_input(
    height: f64,
    weight: f64,
    sex: Sex,
    proportions: &ProportionInput,
) -> Result<Anthropometry, InputError> {
    match proportions {
        ProportionInput::Category { category } => {
            build_from_category(height, weight, sex, *category)
        }
        ProportionInput::Sd { modifiers } => build_profile(height, weight, sex, modifiers),
        ProportionInput::Measured { lengths } => {
            build_from_measurements(height, weight, sex, lengths)
        }
    }
}
