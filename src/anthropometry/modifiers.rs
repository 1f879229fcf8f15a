//! Standard-deviation proportion modifiers and their conversion to lengths.
//!
//! A modifier shifts a segment's base ratio by a fixed percentage per SD.
//! Two layers stack multiplicatively: a per-segment SD and a coarser
//! arms/legs/torso group SD with its own coefficient.

use serde::{Deserialize, Serialize};

use super::ratios::RatioTable;
use super::Sex;
use crate::error::InputError;

/// Lowest supported SD offset
pub const MIN_SD: f64 = -4.0;
/// Highest supported SD offset
pub const MAX_SD: f64 = 4.0;

/// Fractional change of a segment's length per SD
pub const SEGMENT_VARIATION_PER_SD: f64 = 0.05;

/// Fractional change per unit of an arms/legs/torso group modifier
pub const GROUP_VARIATION_PER_SD: f64 = 0.04;

/// Skeletal segment identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Segment {
    HeadNeck = 0,
    Torso = 1,
    Femur = 2,
    Tibia = 3,
    FootHeight = 4,
    UpperArm = 5,
    Forearm = 6,
    Hand = 7,
    Foot = 8,
}

/// Coarse grouping used by the arms/legs/torso modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentGroup {
    Arms,
    Legs,
    Torso,
}

impl Segment {
    pub const COUNT: usize = 9;

    pub const ALL: [Segment; Self::COUNT] = [
        Segment::HeadNeck,
        Segment::Torso,
        Segment::Femur,
        Segment::Tibia,
        Segment::FootHeight,
        Segment::UpperArm,
        Segment::Forearm,
        Segment::Hand,
        Segment::Foot,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Segment::HeadNeck => "headNeck",
            Segment::Torso => "torso",
            Segment::Femur => "femur",
            Segment::Tibia => "tibia",
            Segment::FootHeight => "footHeight",
            Segment::UpperArm => "upperArm",
            Segment::Forearm => "forearm",
            Segment::Hand => "hand",
            Segment::Foot => "foot",
        }
    }

    pub const fn group(self) -> Option<SegmentGroup> {
        match self {
            Segment::UpperArm | Segment::Forearm | Segment::Hand => Some(SegmentGroup::Arms),
            Segment::Femur | Segment::Tibia => Some(SegmentGroup::Legs),
            Segment::Torso => Some(SegmentGroup::Torso),
            Segment::HeadNeck | Segment::FootHeight | Segment::Foot => None,
        }
    }

    /// Base ratio of height for this segment in a table
    pub fn base_ratio(self, table: &RatioTable) -> f64 {
        match self {
            Segment::HeadNeck => table.head_neck,
            Segment::Torso => table.torso,
            Segment::Femur => table.femur,
            Segment::Tibia => table.tibia,
            Segment::FootHeight => table.foot_height,
            Segment::UpperArm => table.upper_arm,
            Segment::Forearm => table.forearm,
            Segment::Hand => table.hand,
            Segment::Foot => table.foot,
        }
    }
}

/// Per-segment SD values, zero meaning population average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SegmentSds {
    pub head_neck: f64,
    pub torso: f64,
    pub femur: f64,
    pub tibia: f64,
    pub foot_height: f64,
    pub upper_arm: f64,
    pub forearm: f64,
    pub hand: f64,
    pub foot: f64,
}

impl SegmentSds {
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

    /// Return a copy with one segment's SD replaced
    pub fn with(self, segment: Segment, sd: f64) -> Self {
        let mut next = self;
        let slot = match segment {
            Segment::HeadNeck => &mut next.head_neck,
            Segment::Torso => &mut next.torso,
            Segment::Femur => &mut next.femur,
            Segment::Tibia => &mut next.tibia,
            Segment::FootHeight => &mut next.foot_height,
            Segment::UpperArm => &mut next.upper_arm,
            Segment::Forearm => &mut next.forearm,
            Segment::Hand => &mut next.hand,
            Segment::Foot => &mut next.foot,
        };
        *slot = sd;
        next
    }
}

/// Full modifier set: coarse arms/legs/torso triple plus per-segment SDs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SdModifiers {
    pub arms: f64,
    pub legs: f64,
    pub torso: f64,
    pub segments: SegmentSds,
}

impl SdModifiers {
    /// Modifiers with only the coarse triple set
    pub fn groups(arms: f64, legs: f64, torso: f64) -> Self {
        Self {
            arms,
            legs,
            torso,
            segments: SegmentSds::default(),
        }
    }

    /// Return a copy with one segment's SD replaced
    pub fn with_segment(self, segment: Segment, sd: f64) -> Self {
        Self {
            segments: self.segments.with(segment, sd),
            ..self
        }
    }

    fn group_sd(&self, group: SegmentGroup) -> f64 {
        match group {
            SegmentGroup::Arms => self.arms,
            SegmentGroup::Legs => self.legs,
            SegmentGroup::Torso => self.torso,
        }
    }

    /// Reject non-finite or out-of-range values. Direct SD input is never clamped.
    pub fn validate(&self) -> Result<(), InputError> {
        let groups = [("arms", self.arms), ("legs", self.legs), ("torso", self.torso)];
        let segments = Segment::ALL.map(|s| (s.name(), self.segments.get(s)));

        for (name, value) in groups.into_iter().chain(segments) {
            if !value.is_finite() {
                return Err(InputError::NonFinite { field: name });
            }
            if !(MIN_SD..=MAX_SD).contains(&value) {
                return Err(InputError::SdOutOfRange {
                    segment: name,
                    value,
                    min: MIN_SD,
                    max: MAX_SD,
                });
            }
        }
        Ok(())
    }

    /// Multiplicative scale applied to a segment's base length
    pub fn scale(&self, segment: Segment) -> f64 {
        let segment_scale = 1.0 + self.segments.get(segment) * SEGMENT_VARIATION_PER_SD;
        let group_scale = segment
            .group()
            .map_or(1.0, |g| 1.0 + self.group_sd(g) * GROUP_VARIATION_PER_SD);
        segment_scale * group_scale
    }
}

/// Symbolic proportion categories offered to casual users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProportionCategory {
    #[default]
    Average,
    LongLegs,
    LongTorso,
    LongArms,
    ShortArms,
    LongFemurs,
}

impl ProportionCategory {
    pub fn modifiers(self) -> SdModifiers {
        match self {
            ProportionCategory::Average => SdModifiers::default(),
            ProportionCategory::LongLegs => SdModifiers::groups(0.0, 1.0, -1.0),
            ProportionCategory::LongTorso => SdModifiers::groups(0.0, -1.0, 1.0),
            ProportionCategory::LongArms => SdModifiers::groups(1.0, 0.0, 0.0),
            ProportionCategory::ShortArms => SdModifiers::groups(-1.0, 0.0, 0.0),
            ProportionCategory::LongFemurs => {
                SdModifiers::default().with_segment(Segment::Femur, 1.5)
            }
        }
    }
}

/// Length of a segment at a given SD offset (group modifiers excluded).
pub fn measurement_from_sd(sd: f64, height: f64, sex: Sex, segment: Segment) -> f64 {
    let base = height * segment.base_ratio(sex.ratios());
    base * (1.0 + sd * SEGMENT_VARIATION_PER_SD)
}

/// Back-solve the SD that reproduces a measured length, clamped to the
/// supported range.
pub fn sd_from_measurement(measured: f64, height: f64, sex: Sex, segment: Segment) -> f64 {
    let base = height * segment.base_ratio(sex.ratios());
    let sd = (measured / base - 1.0) / SEGMENT_VARIATION_PER_SD;
    sd.clamp(MIN_SD, MAX_SD)
}
