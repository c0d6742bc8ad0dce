//! How often each chord turns up in a key.
//!
//! Weights are relative: a diatonic tonic triad is 10, rare chromatic colour
//! is 1 or 2. When two entries match a chord with the same weight the one
//! listed first wins, so order within a table matters.

use serde::Serialize;

use crate::chord::ChordType;
use crate::chord::ChordType::{
    Augmented as Aug, Diminished as Dim, Diminished7 as Dim7, Dominant7 as Dom7,
    HalfDiminished7 as HalfDim7, Major as Maj, Major7 as Maj7, Minor as Min, Minor7 as Min7,
    MinorMajor7 as MinMaj7,
};
use crate::key::KeyMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Usage {
    /// Roman numeral of the chord root, resolved with
    /// [`Key::note_from_roman`](crate::key::Key::note_from_roman).
    pub roman: &'static str,
    pub chord_type: ChordType,
    pub weight: i32,
}

impl Usage {
    /// Dominant-function chords: the major V and the leading-tone chords.
    pub fn is_dominant(&self) -> bool {
        match self.roman {
            "V" => matches!(self.chord_type, ChordType::Major | ChordType::Dominant7),
            "vii" | "#vii" => matches!(
                self.chord_type,
                ChordType::Diminished | ChordType::Diminished7 | ChordType::HalfDiminished7
            ),
            _ => false,
        }
    }
}

const fn usage(roman: &'static str, chord_type: ChordType, weight: i32) -> Usage {
    Usage {
        roman,
        chord_type,
        weight,
    }
}

pub static MAJOR_USAGE: [Usage; 32] = [
    usage("I", Maj, 10),
    usage("I", Maj7, 6),
    usage("ii", Min, 8),
    usage("ii", Min7, 7),
    usage("iii", Min, 5),
    usage("iii", Min7, 4),
    usage("IV", Maj, 9),
    usage("IV", Maj7, 5),
    usage("V", Maj, 9),
    usage("V", Dom7, 9),
    usage("vi", Min, 8),
    usage("vi", Min7, 5),
    usage("vii", Dim, 3),
    usage("vii", HalfDim7, 4),
    // Borrowed from the parallel minor
    usage("iv", Min, 4),
    usage("bVII", Maj, 4),
    usage("bVI", Maj, 3),
    usage("bIII", Maj, 2),
    usage("ii", HalfDim7, 2),
    usage("vii", Dim7, 3),
    // Secondary dominants
    usage("V/V", Maj, 5),
    usage("V/V", Dom7, 5),
    usage("V/vi", Maj, 4),
    usage("V/vi", Dom7, 4),
    usage("V/ii", Dom7, 4),
    usage("V/ii", Maj, 3),
    usage("V/IV", Dom7, 4),
    usage("V/iii", Dom7, 2),
    usage("#iv", Dim7, 3),
    usage("#iv", Dim, 2),
    // Chromatic substitutes
    usage("subV", Dom7, 2),
    usage("Ger+6", Dom7, 1),
];

pub static MINOR_USAGE: [Usage; 27] = [
    usage("i", Min, 10),
    usage("i", Min7, 5),
    usage("ii", Dim, 5),
    usage("ii", HalfDim7, 6),
    usage("III", Maj, 7),
    usage("III", Maj7, 4),
    usage("iv", Min, 8),
    usage("iv", Min7, 5),
    usage("v", Min, 4),
    usage("v", Min7, 2),
    usage("V", Maj, 8),
    usage("V", Dom7, 9),
    usage("VI", Maj, 8),
    usage("VI", Maj7, 5),
    usage("VII", Maj, 7),
    usage("VII", Dom7, 5),
    usage("#vii", Dim, 4),
    usage("#vii", Dim7, 6),
    usage("i", MinMaj7, 2),
    // Dorian, Neapolitan and Picardy colours
    usage("IV", Maj, 3),
    usage("bII", Maj, 4),
    usage("III", Aug, 2),
    usage("V/iv", Dom7, 3),
    usage("V/V", Dom7, 3),
    usage("subV", Dom7, 2),
    // German sixth, spelled as the dominant seventh it sounds like
    usage("VI", Dom7, 3),
    usage("I", Maj, 2),
];

pub fn usage_table(mode: KeyMode) -> &'static [Usage] {
    match mode {
        KeyMode::Major => &MAJOR_USAGE,
        KeyMode::Minor => &MINOR_USAGE,
    }
}
