//! Four-letter type codes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::bank::{Axis, Pole};

#[derive(Debug, Error, PartialEq)]
pub enum TypeCodeError {
    #[error("type code must be exactly 4 letters, got {0}")]
    Length(usize),
    #[error("'{letter}' is not a valid letter for axis {axis}")]
    Letter { axis: Axis, letter: char },
}

/// One pole per axis, in the fixed order MP, AS, CU, IN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeCode([Pole; 4]);

impl TypeCode {
    pub fn new(poles: [Pole; 4]) -> Self {
        Self(poles)
    }

    pub fn pole(&self, axis: Axis) -> Pole {
        self.0[axis.index()]
    }

    pub fn letter(&self, axis: Axis) -> char {
        axis.letter(self.pole(axis))
    }

    /// Copy of this code with one axis set to `pole`
    pub fn with_pole(mut self, axis: Axis, pole: Pole) -> Self {
        self.0[axis.index()] = pole;
        self
    }

    /// All sixteen codes, starting at `PSUN` and ending at `MACI`.
    pub fn all() -> Vec<TypeCode> {
        (0u8..16)
            .map(|bits| {
                let mut poles = [Pole::R; 4];
                for (i, pole) in poles.iter_mut().enumerate() {
                    if bits & (0b1000 >> i) != 0 {
                        *pole = Pole::L;
                    }
                }
                TypeCode(poles)
            })
            .collect()
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for axis in Axis::ALL {
            write!(f, "{}", self.letter(axis))?;
        }
        Ok(())
    }
}

impl FromStr for TypeCode {
    type Err = TypeCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letters: Vec<char> = s.chars().collect();
        if letters.len() != 4 {
            return Err(TypeCodeError::Length(letters.len()));
        }

        let mut poles = [Pole::R; 4];
        for (axis, letter) in Axis::ALL.into_iter().zip(letters) {
            poles[axis.index()] = axis
                .pole_of(letter)
                .ok_or(TypeCodeError::Letter { axis, letter })?;
        }
        Ok(TypeCode(poles))
    }
}

impl TryFrom<String> for TypeCode {
    type Error = TypeCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeCode> for String {
    fn from(code: TypeCode) -> Self {
        code.to_string()
    }
}
