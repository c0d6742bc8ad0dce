//! Roman-numeral scale degrees.

use serde::Serialize;

use crate::circular::CircularSet;
use crate::error::{Result, TheoryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Degree {
    pub roman: &'static str,
    /// 1-based scale step.
    pub step: u8,
    /// 0-based position in a key.
    pub index: usize,
}

const fn degree(roman: &'static str, step: u8) -> Degree {
    Degree {
        roman,
        step,
        index: step as usize - 1,
    }
}

pub static DEGREES: CircularSet<Degree, 7> = CircularSet::new([
    degree("I", 1),
    degree("II", 2),
    degree("III", 3),
    degree("IV", 4),
    degree("V", 5),
    degree("VI", 6),
    degree("VII", 7),
]);

impl Degree {
    pub const TONIC: Degree = degree("I", 1);
    pub const SUBMEDIANT: Degree = degree("VI", 6);

    /// Case-insensitive lookup of `I` through `VII`.
    pub fn from_roman(roman: &str) -> Result<Degree> {
        DEGREES
            .iter()
            .find(|d| d.roman.eq_ignore_ascii_case(roman))
            .copied()
            .ok_or_else(|| TheoryError::UnknownDegree(roman.to_string()))
    }

    /// Degree at a 0-based index, wrapping past VII.
    pub fn from_index(index: i32) -> Degree {
        *DEGREES.get(index)
    }
}
