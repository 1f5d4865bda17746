//! Scoring Engine
//!
//! Turns a set of Likert responses into four axis scores and a
//! four-letter type code. Everything here is pure: no storage, no
//! logging, no randomness.

pub mod type_code;
pub mod result;

pub use result::{assess, Assessment, AxisResult};
pub use type_code::{TypeCode, TypeCodeError};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::bank::{Axis, Pole, QuestionBank};

/// Midpoint of the 7-point scale (0 = strongly disagree, 6 = strongly agree)
pub const SCALE_MIDPOINT: i32 = 3;
pub const SCALE_MIN: i32 = 0;
pub const SCALE_MAX: i32 = 6;

/// Item id -> response, in the order the user answered.
pub type Responses = IndexMap<String, i32>;

/// Mean signed response per axis, nominally within `[-3, 3]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisScores {
    #[serde(rename = "MP")]
    pub mp: f64,
    #[serde(rename = "AS")]
    pub as_: f64,
    #[serde(rename = "CU")]
    pub cu: f64,
    #[serde(rename = "IN")]
    pub in_: f64,
}

impl AxisScores {
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::MP => self.mp,
            Axis::AS => self.as_,
            Axis::CU => self.cu,
            Axis::IN => self.in_,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::MP => self.mp = value,
            Axis::AS => self.as_ = value,
            Axis::CU => self.cu = value,
            Axis::IN => self.in_ = value,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Axis, f64)> + '_ {
        Axis::ALL.into_iter().map(move |axis| (axis, self.get(axis)))
    }
}

impl Index<Axis> for AxisScores {
    type Output = f64;

    fn index(&self, axis: Axis) -> &f64 {
        match axis {
            Axis::MP => &self.mp,
            Axis::AS => &self.as_,
            Axis::CU => &self.cu,
            Axis::IN => &self.in_,
        }
    }
}

/// Average the signed contributions of every answered bank item per axis.
///
/// Ids that are not in the bank are ignored. Values outside `[0, 6]` are
/// not clamped. An axis with no answered items scores exactly `0.0`.
pub fn score(bank: &QuestionBank, responses: &Responses) -> AxisScores {
    let mut sums = [0i64; 4];
    let mut counts = [0u32; 4];

    for item in bank.items() {
        let Some(&value) = responses.get(&item.id) else { continue };
        let contribution = i64::from(item.agree_side.sign()) * (i64::from(value) - i64::from(SCALE_MIDPOINT));
        sums[item.axis.index()] += contribution;
        counts[item.axis.index()] += 1;
    }

    let mut scores = AxisScores::default();
    for axis in Axis::ALL {
        let i = axis.index();
        if counts[i] > 0 {
            scores.set(axis, sums[i] as f64 / f64::from(counts[i]));
        }
    }
    scores
}

/// Map each axis score to a letter by sign. Exactly zero resolves to the
/// right-hand letter (`P`, `S`, `U`, `N`).
pub fn classify(scores: &AxisScores) -> TypeCode {
    let mut poles = [Pole::R; 4];
    for (axis, value) in scores.iter() {
        poles[axis.index()] = if value >= 0.0 { Pole::R } else { Pole::L };
    }
    TypeCode::new(poles)
}
