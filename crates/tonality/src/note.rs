//! Spelled notes: a letter plus an accidental.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::circular::bound_modulo;
use crate::error::{Result, TheoryError};
use crate::parser;
use crate::pitch::{Letter, PitchClass};

const ASCII_ACCIDENTALS: [&str; 5] = ["bb", "b", "", "#", "##"];
const UNICODE_ACCIDENTALS: [&str; 5] = ["𝄫", "♭", "", "♯", "𝄪"];

/// Widest accidental [`Note::altered`] will produce.
pub const MAX_ACCIDENTAL: i8 = 64;

/// Glyph for an accidental in -2..=2; wider offsets repeat the single glyph.
///
/// Only -2..=2 read back through [`Note::from_name`]: `bbb` or `###` render
/// but do not parse.
pub fn accidental_text(accidental: i8, unicode: bool) -> Cow<'static, str> {
    let table = if unicode {
        &UNICODE_ACCIDENTALS
    } else {
        &ASCII_ACCIDENTALS
    };
    match accidental {
        -2..=2 => Cow::Borrowed(table[(accidental + 2) as usize]),
        n if n < 0 => Cow::Owned(table[1].repeat(n.unsigned_abs() as usize)),
        n => Cow::Owned(table[3].repeat(n as usize)),
    }
}

/// A pitch spelled with a letter and an accidental.
///
/// Equality is by spelling: `C#` and `Db` are different notes that share a
/// chromatic value. Use [`Note::is_enharmonic`] to compare sounding pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    letter: Letter,
    accidental: i8,
}

impl Note {
    pub const fn new(letter: Letter, accidental: i8) -> Self {
        Self { letter, accidental }
    }

    /// Parse `C`, `f#`, `Bb`, `E𝄫`, `G♮`, ...
    pub fn from_name(text: &str) -> Result<Self> {
        let mut chars = text.chars();
        let first = chars
            .next()
            .ok_or_else(|| TheoryError::InvalidNote(text.to_string()))?;
        let letter = Letter::from_char(first)?;
        let rest = chars.as_str();
        let accidental = parser::parse_all(parser::accidental, rest)
            .ok_or_else(|| TheoryError::InvalidAccidental(rest.to_string()))?;
        Ok(Self::new(letter, accidental))
    }

    pub fn letter(&self) -> Letter {
        self.letter
    }

    pub fn accidental(&self) -> i8 {
        self.accidental
    }

    pub fn pitch_class(&self) -> &'static PitchClass {
        self.letter.pitch_class()
    }

    /// Semitones above C, in 0..12.
    pub fn chromatic(&self) -> i32 {
        bound_modulo(12, self.pitch_class().chromatic + self.accidental as i32)
    }

    pub fn is_enharmonic(&self, other: &Note) -> bool {
        self.chromatic() == other.chromatic()
    }

    /// The note on the next letter that lies `semitones` above this one.
    ///
    /// Accidentals saturate at the `i8` range.
    pub fn next_note(&self, semitones: i32) -> Note {
        let pitch_class = self.pitch_class();
        let accidental = self.accidental as i32 + semitones - pitch_class.width;
        let accidental = accidental.clamp(i8::MIN as i32, i8::MAX as i32) as i8;
        Note::new(pitch_class.inc(1).letter, accidental)
    }

    /// Same letter, accidental shifted by `delta`.
    ///
    /// Fails once the result leaves `-MAX_ACCIDENTAL..=MAX_ACCIDENTAL`.
    pub fn altered(&self, delta: i8) -> Result<Note> {
        let accidental = self.accidental as i32 + delta as i32;
        if accidental.abs() > MAX_ACCIDENTAL as i32 {
            return Err(TheoryError::AccidentalOutOfRange(accidental));
        }
        Ok(Note::new(self.letter, accidental as i8))
    }

    pub fn to_text(&self, unicode: bool) -> String {
        format!("{}{}", self.letter, accidental_text(self.accidental, unicode))
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str(&self.to_text(true))
        } else {
            f.write_str(&self.to_text(false))
        }
    }
}

impl FromStr for Note {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        Note::from_name(s)
    }
}

impl Serialize for Note {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_text(false))
    }
}
