use std::fmt;

use serde::Serialize;

use crate::circular::bound_modulo;
use crate::note::Note;

/// `(letters, semitones)` to interval name, upward within one octave.
const INTERVAL_NAMES: [((i32, i32), &str); 25] = [
    ((0, 0), "P1"),
    ((0, 1), "A1"),
    ((1, 0), "d2"),
    ((1, 1), "m2"),
    ((1, 2), "M2"),
    ((1, 3), "A2"),
    ((2, 2), "d3"),
    ((2, 3), "m3"),
    ((2, 4), "M3"),
    ((2, 5), "A3"),
    ((3, 4), "d4"),
    ((3, 5), "P4"),
    ((3, 6), "A4"),
    ((4, 6), "d5"),
    ((4, 7), "P5"),
    ((4, 8), "A5"),
    ((5, 7), "d6"),
    ((5, 8), "m6"),
    ((5, 9), "M6"),
    ((5, 10), "A6"),
    ((6, 9), "d7"),
    ((6, 10), "m7"),
    ((6, 11), "M7"),
    ((6, 0), "A7"),
    ((0, 11), "d8"),
];

/// The distance from one spelled note up to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    /// Letter steps, 0..7.
    pub letters: i32,
    /// Semitones, 0..12.
    pub semitones: i32,
    name: Option<&'static str>,
}

impl Interval {
    pub fn between(from: &Note, to: &Note) -> Self {
        let letters = bound_modulo(
            7,
            to.pitch_class().index as i32 - from.pitch_class().index as i32,
        );
        let semitones = bound_modulo(12, to.chromatic() - from.chromatic());
        let name = INTERVAL_NAMES
            .iter()
            .find(|(key, _)| *key == (letters, semitones))
            .map(|(_, name)| *name);

        Self {
            letters,
            semitones,
            name,
        }
    }

    /// Standard name such as `m3` or `A4`; `None` for spellings outside the table
    /// (e.g. a doubly augmented fourth).
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    pub fn is_enharmonic_unison(&self) -> bool {
        self.semitones == 0
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.unwrap_or(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(a: &str, b: &str) -> Interval {
        Interval::between(&Note::from_name(a).unwrap(), &Note::from_name(b).unwrap())
    }

    #[test]
    fn common_intervals() {
        assert_eq!(interval("C", "C").name(), Some("P1"));
        assert_eq!(interval("C", "E").name(), Some("M3"));
        assert_eq!(interval("C", "Eb").name(), Some("m3"));
        assert_eq!(interval("C", "G").name(), Some("P5"));
        assert_eq!(interval("C", "F#").name(), Some("A4"));
        assert_eq!(interval("C", "Gb").name(), Some("d5"));
        assert_eq!(interval("A", "C").name(), Some("m3"));
        assert_eq!(interval("B", "F").name(), Some("d5"));
    }

    #[test]
    fn wraps_across_octave() {
        let i = interval("G", "D");
        assert_eq!(i.letters, 4);
        assert_eq!(i.semitones, 7);
        assert_eq!(i.to_string(), "P5");
    }

    #[test]
    fn enharmonic_unisons() {
        let d8 = interval("C#", "C");
        assert_eq!(d8.name(), Some("d8"));
        assert!(!d8.is_enharmonic_unison());

        let a7 = interval("C", "B#");
        assert_eq!(a7.name(), Some("A7"));
        assert!(a7.is_enharmonic_unison());

        let d2 = interval("B#", "C");
        assert_eq!(d2.name(), Some("d2"));
        assert!(d2.is_enharmonic_unison());
    }

    #[test]
    fn unknown_spelling_has_no_name() {
        let i = interval("Cb", "F#");
        assert_eq!(i.letters, 3);
        assert_eq!(i.semitones, 7);
        assert_eq!(i.name(), None);
        assert_eq!(i.to_string(), "");
    }
}
