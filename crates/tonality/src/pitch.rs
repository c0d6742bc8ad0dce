//! The seven diatonic letters and their spacing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::circular::CircularSet;
use crate::error::{Result, TheoryError};

/// Semitones from each letter to the next, starting at C.
pub const DIATONIC_STEPS: [i32; 7] = [2, 2, 1, 2, 2, 2, 1];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Case-insensitive lookup.
    pub fn from_char(c: char) -> Result<Self> {
        match c.to_ascii_uppercase() {
            'C' => Ok(Letter::C),
            'D' => Ok(Letter::D),
            'E' => Ok(Letter::E),
            'F' => Ok(Letter::F),
            'G' => Ok(Letter::G),
            'A' => Ok(Letter::A),
            'B' => Ok(Letter::B),
            _ => Err(TheoryError::InvalidLetter(c)),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }

    /// Position within C D E F G A B.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn pitch_class(self) -> &'static PitchClass {
        PITCH_CLASSES.get(self.index() as i32)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A letter together with its place in the C major reference scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PitchClass {
    pub letter: Letter,
    pub index: usize,
    /// Semitones up to the next letter (1 for E and B, 2 otherwise).
    pub width: i32,
    /// Semitones above C.
    pub chromatic: i32,
}

impl PitchClass {
    /// Case-insensitive lookup by letter name.
    pub fn from_letter(c: char) -> Result<&'static PitchClass> {
        Letter::from_char(c).map(Letter::pitch_class)
    }

    /// Walk `offset` letters forward (or backward when negative).
    pub fn inc(&self, offset: i32) -> &'static PitchClass {
        PITCH_CLASSES.get(self.index as i32 + offset)
    }
}

const fn build_pitch_classes() -> [PitchClass; 7] {
    let mut classes = [PitchClass {
        letter: Letter::C,
        index: 0,
        width: 0,
        chromatic: 0,
    }; 7];
    let mut chromatic = 0;
    let mut i = 0;
    while i < 7 {
        classes[i] = PitchClass {
            letter: Letter::ALL[i],
            index: i,
            width: DIATONIC_STEPS[i],
            chromatic,
        };
        chromatic += DIATONIC_STEPS[i];
        i += 1;
    }
    classes
}

/// All seven pitch classes, C first.
pub static PITCH_CLASSES: CircularSet<PitchClass, 7> = CircularSet::new(build_pitch_classes());
