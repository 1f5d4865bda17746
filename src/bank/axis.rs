//! Axis and pole definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four bipolar dimensions, in classification order.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    MP,
    AS,
    CU,
    IN,
}

impl Axis {
    /// All axes in the order their letters appear in a type code.
    pub const ALL: [Axis; 4] = [Axis::MP, Axis::AS, Axis::CU, Axis::IN];

    /// Position of this axis inside a type code.
    pub fn index(self) -> usize {
        match self {
            Axis::MP => 0,
            Axis::AS => 1,
            Axis::CU => 2,
            Axis::IN => 3,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Axis::MP => "MP",
            Axis::AS => "AS",
            Axis::CU => "CU",
            Axis::IN => "IN",
        }
    }

    /// Letter for the given pole of this axis.
    pub fn letter(self, pole: Pole) -> char {
        let code = self.code().as_bytes();
        match pole {
            Pole::L => code[0] as char,
            Pole::R => code[1] as char,
        }
    }

    /// Resolve a type-code letter back to its pole on this axis.
    pub fn pole_of(self, letter: char) -> Option<Pole> {
        if letter == self.letter(Pole::L) {
            Some(Pole::L)
        } else if letter == self.letter(Pole::R) {
            Some(Pole::R)
        } else {
            None
        }
    }

    /// Display labels for the two poles (left, right).
    pub fn pole_labels(self) -> (&'static str, &'static str) {
        match self {
            Axis::MP => ("Mastery", "Performance"),
            Axis::AS => ("Aspiration", "Security"),
            Axis::CU => ("Conventional", "Unconventional"),
            Axis::IN => ("Individual", "Network"),
        }
    }

    pub fn pole_label(self, pole: Pole) -> &'static str {
        let (left, right) = self.pole_labels();
        match pole {
            Pole::L => left,
            Pole::R => right,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Axis::ALL
            .into_iter()
            .find(|axis| axis.code() == s)
            .ok_or_else(|| format!("unknown axis '{}'", s))
    }
}

/// Which letter of an axis agreeing with a statement pushes towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pole {
    L,
    R,
}

impl Pole {
    /// `+1` for the right pole, `-1` for the left.
    pub fn sign(self) -> i32 {
        match self {
            Pole::R => 1,
            Pole::L => -1,
        }
    }

    pub fn flipped(self) -> Pole {
        match self {
            Pole::L => Pole::R,
            Pole::R => Pole::L,
        }
    }
}
