//! Result presentation data: per-axis breakdown and the combined assessment

use serde::{Deserialize, Serialize};

use super::{classify, score, AxisScores, Responses, TypeCode};
use crate::bank::{Axis, Pole, QuestionBank};

/// Display range for axis scores
const SCORE_BOUND: f64 = 3.0;

/// How one axis score is shown on the result page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisResult {
    pub axis: Axis,
    pub score: f64,
    /// Letter this axis contributes to the type code
    pub letter: char,
    pub pole_label: String,
    /// Position of the marker on a 0-100 bar, left pole at 0
    pub right_percent: u8,
    pub left_percent: u8,
    /// Percentage shown next to the dominant pole
    pub dominant_percent: u8,
}

impl AxisResult {
    pub fn new(axis: Axis, score: f64) -> Self {
        let pole = if score >= 0.0 { Pole::R } else { Pole::L };
        let clamped = score.clamp(-SCORE_BOUND, SCORE_BOUND);
        let position = (clamped + SCORE_BOUND) / (2.0 * SCORE_BOUND) * 100.0;
        let right_percent = position.round() as u8;
        let left_percent = 100 - right_percent;
        let dominant_percent = if clamped < 0.0 { left_percent } else { right_percent };

        Self {
            axis,
            score,
            letter: axis.letter(pole),
            pole_label: axis.pole_label(pole).to_string(),
            right_percent,
            left_percent,
            dominant_percent,
        }
    }
}

/// Everything the result page needs from a finished response set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub scores: AxisScores,
    pub type_code: TypeCode,
    pub axes: Vec<AxisResult>,
}

impl Assessment {
    pub fn from_scores(scores: AxisScores) -> Self {
        Self {
            type_code: classify(&scores),
            axes: scores.iter().map(|(axis, s)| AxisResult::new(axis, s)).collect(),
            scores,
        }
    }
}

/// `score` then `classify`, plus the per-axis breakdown.
pub fn assess(bank: &QuestionBank, responses: &Responses) -> Assessment {
    Assessment::from_scores(score(bank, responses))
}
