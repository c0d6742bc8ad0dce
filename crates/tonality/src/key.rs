//! Seven-note keys and roman-numeral resolution.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::circular::CircularSet;
use crate::degree::Degree;
use crate::error::{Result, TheoryError};
use crate::interval::Interval;
use crate::note::Note;
use crate::parser;
use crate::pitch::DIATONIC_STEPS;

/// Secondary functions chained deeper than this are rejected.
pub const MAX_SECONDARY_DEPTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMode {
    Major,
    Minor,
}

impl fmt::Display for KeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMode::Major => write!(f, "major"),
            KeyMode::Minor => write!(f, "minor"),
        }
    }
}

/// A diatonic key: seven spelled notes, tonic first.
///
/// Every note sits on its own letter, so a key built on `F#` contains `E#`
/// rather than `F`, and one built on `Gb` contains `Cb` rather than `B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    notes: CircularSet<Note, 7>,
}

impl Key {
    /// Build the scale that starts on `tonic` and follows the diatonic step
    /// pattern from `start`.
    pub fn create(tonic: Note, start: Degree) -> Self {
        let mut notes = [tonic; 7];
        for i in 1..7 {
            let step = DIATONIC_STEPS[(start.index + i - 1) % 7];
            notes[i] = notes[i - 1].next_note(step);
        }
        Self {
            notes: CircularSet::new(notes),
        }
    }

    pub fn major(tonic: Note) -> Self {
        Self::create(tonic, Degree::TONIC)
    }

    /// Natural minor: the major step pattern read from its sixth degree.
    pub fn minor(tonic: Note) -> Self {
        Self::create(tonic, Degree::SUBMEDIANT)
    }

    pub fn with_mode(tonic: Note, mode: KeyMode) -> Self {
        match mode {
            KeyMode::Major => Self::major(tonic),
            KeyMode::Minor => Self::minor(tonic),
        }
    }

    pub fn tonic(&self) -> Note {
        *self.notes.get(0)
    }

    /// Scale note at a 0-based index, wrapping.
    pub fn note(&self, index: i32) -> Note {
        *self.notes.get(index)
    }

    pub fn notes(&self) -> &CircularSet<Note, 7> {
        &self.notes
    }

    pub fn note_names(&self, unicode: bool) -> Vec<String> {
        self.notes.iter().map(|n| n.to_text(unicode)).collect()
    }

    /// Major when the third degree is a major third above the tonic.
    pub fn mode(&self) -> KeyMode {
        if Interval::between(&self.note(0), &self.note(2)).semitones == 4 {
            KeyMode::Major
        } else {
            KeyMode::Minor
        }
    }

    /// Copy of this key with one non-tonic degree raised or lowered.
    pub fn with_altered(&self, degree: Degree, delta: i8) -> Result<Key> {
        if degree.index == 0 {
            return Err(TheoryError::AlterTonic);
        }
        let mut notes = [self.tonic(); 7];
        for (i, note) in self.notes.iter().enumerate() {
            notes[i] = if i == degree.index {
                note.altered(delta)?
            } else {
                *note
            };
        }
        Ok(Key {
            notes: CircularSet::new(notes),
        })
    }

    /// Resolve a roman-numeral expression to a note in this key.
    ///
    /// Accepts `V`, `bIII`, `#iv`, secondary functions such as `V/ii` or
    /// `vii/V/vi`, the tritone substitute `subV` (or `Vsub`), and augmented
    /// sixths `+6`, `It+6`, `Fr+6`, `Ger+6`. At most [`MAX_SECONDARY_DEPTH`]
    /// slashes are followed.
    pub fn note_from_roman(&self, expr: &str) -> Result<Note> {
        if expr.matches('/').count() > MAX_SECONDARY_DEPTH {
            return Err(TheoryError::RomanTooDeep(expr.to_string()));
        }
        self.resolve_roman(expr)
    }

    fn resolve_roman(&self, expr: &str) -> Result<Note> {
        if let Some((function, target)) = expr.rsplit_once('/') {
            let target = self.resolve_roman(target)?;
            return Key::major(target).resolve_roman(function);
        }

        if expr.eq_ignore_ascii_case("subV") || expr.eq_ignore_ascii_case("Vsub") {
            return self.resolve_roman("bII");
        }

        if parser::parse_all(parser::augmented_sixth, expr).is_some() {
            return self.resolve_roman("bVI");
        }

        let unparseable = || TheoryError::UnparseableDegree(expr.to_string());
        let (accidental, numeral) =
            parser::parse_all((parser::roman_accidental, parser::roman_letters), expr)
                .ok_or_else(unparseable)?;
        let degree = Degree::from_roman(numeral).map_err(|_| unparseable())?;

        self.note(degree.index as i32).altered(accidental)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{:#} {}", self.tonic(), self.mode())
        } else {
            write!(f, "{} {}", self.tonic(), self.mode())
        }
    }
}

/// Parse `C`, `Cm`, `F# minor`, `Bb maj`, `ebm`.
impl FromStr for Key {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TheoryError::InvalidKey(s.to_string());

        let mut input = s.trim();
        let tonic = parser::note_name(&mut input).map_err(|_| invalid())?;

        let mode = match input.trim().to_ascii_lowercase().as_str() {
            "" | "maj" | "major" => KeyMode::Major,
            "m" | "min" | "minor" => KeyMode::Minor,
            _ => return Err(invalid()),
        };

        Ok(Key::with_mode(tonic, mode))
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Key", 3)?;
        state.serialize_field("tonic", &self.tonic())?;
        state.serialize_field("mode", &self.mode())?;
        state.serialize_field("notes", &self.notes)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::MAX_ACCIDENTAL;
    use crate::pitch::Letter;
    use pretty_assertions::assert_eq;

    fn note(name: &str) -> Note {
        Note::from_name(name).unwrap()
    }

    fn c_major() -> Key {
        Key::major(note("C"))
    }

    #[test]
    fn major_and_minor_spellings() {
        assert_eq!(
            c_major().note_names(false),
            vec!["C", "D", "E", "F", "G", "A", "B"]
        );
        assert_eq!(
            Key::minor(note("C")).note_names(false),
            vec!["C", "D", "Eb", "F", "G", "Ab", "Bb"]
        );
        assert_eq!(
            Key::major(note("F#")).note_names(false),
            vec!["F#", "G#", "A#", "B", "C#", "D#", "E#"]
        );
        assert_eq!(
            Key::major(note("Gb")).note_names(true),
            vec!["G♭", "A♭", "B♭", "C♭", "D♭", "E♭", "F"]
        );
    }

    #[test]
    fn create_from_other_degrees() {
        let dorian = Key::create(note("D"), Degree::from_roman("II").unwrap());
        assert_eq!(
            dorian.note_names(false),
            vec!["D", "E", "F", "G", "A", "B", "C"]
        );
        assert_eq!(dorian.mode(), KeyMode::Minor);
    }

    #[test]
    fn mode_from_third() {
        assert_eq!(c_major().mode(), KeyMode::Major);
        assert_eq!(Key::minor(note("A")).mode(), KeyMode::Minor);
    }

    #[test]
    fn simple_numerals() {
        let key = c_major();
        assert_eq!(key.note_from_roman("I").unwrap(), note("C"));
        assert_eq!(key.note_from_roman("V").unwrap(), note("G"));
        assert_eq!(key.note_from_roman("vi").unwrap(), note("A"));
        assert_eq!(key.note_from_roman("bVII").unwrap(), note("Bb"));
        assert_eq!(key.note_from_roman("#iv").unwrap(), note("F#"));
        assert_eq!(key.note_from_roman("♭III").unwrap(), note("Eb"));
    }

    #[test]
    fn accidentals_stack_on_scale_notes() {
        let key = Key::minor(note("C"));
        assert_eq!(key.note_from_roman("#vii").unwrap(), note("B"));
        assert_eq!(key.note_from_roman("bVI").unwrap(), note("Abb"));
        assert_eq!(key.note_from_roman("VI").unwrap(), note("Ab"));
    }

    #[test]
    fn secondary_functions() {
        let key = c_major();
        assert_eq!(key.note_from_roman("V/ii").unwrap(), note("A"));
        assert_eq!(key.note_from_roman("V/V").unwrap(), note("D"));
        assert_eq!(key.note_from_roman("vii/V").unwrap(), note("F#"));
        assert_eq!(key.note_from_roman("V/V/V").unwrap(), note("A"));
        assert_eq!(Key::minor(note("C")).note_from_roman("V/iv").unwrap(), note("C"));
    }

    #[test]
    fn substitutions() {
        let key = c_major();
        assert_eq!(key.note_from_roman("subV").unwrap(), note("Db"));
        assert_eq!(key.note_from_roman("Vsub").unwrap(), note("Db"));
        assert_eq!(key.note_from_roman("SUBV").unwrap(), note("Db"));
        assert_eq!(key.note_from_roman("subV/V").unwrap(), note("Ab"));
        assert_eq!(key.note_from_roman("Ger+6").unwrap(), note("Ab"));
        assert_eq!(key.note_from_roman("+6").unwrap(), note("Ab"));
    }

    #[test]
    fn unparseable_expressions() {
        let key = c_major();
        for expr in ["", "X", "VIII", "IIII", "V/", "/V", "+7", "#"] {
            assert!(
                matches!(key.note_from_roman(expr), Err(TheoryError::UnparseableDegree(_))),
                "{expr:?} should not parse"
            );
        }
    }

    #[test]
    fn long_secondary_chains_are_rejected() {
        let key = c_major();
        let eight = format!("{}I", "#I/".repeat(MAX_SECONDARY_DEPTH));
        assert_eq!(key.note_from_roman(&eight).unwrap(), note("C#").altered(7).unwrap());

        let deep = format!("{}I", "#I/".repeat(130));
        assert_eq!(
            key.note_from_roman(&deep),
            Err(TheoryError::RomanTooDeep(deep.clone()))
        );
    }

    #[test]
    fn sharpening_past_the_limit_fails() {
        let key = Key::major(Note::new(Letter::C, MAX_ACCIDENTAL));
        assert!(matches!(
            key.note_from_roman("#I"),
            Err(TheoryError::AccidentalOutOfRange(_))
        ));
    }

    #[test]
    fn altering_degrees() {
        let harmonic = Key::minor(note("A"))
            .with_altered(Degree::from_roman("VII").unwrap(), 1)
            .unwrap();
        assert_eq!(
            harmonic.note_names(false),
            vec!["A", "B", "C", "D", "E", "F", "G#"]
        );
        assert_eq!(
            c_major().with_altered(Degree::TONIC, 1),
            Err(TheoryError::AlterTonic)
        );
    }

    #[test]
    fn parse_key_names() {
        assert_eq!("C".parse::<Key>().unwrap(), c_major());
        assert_eq!("Cm".parse::<Key>().unwrap(), Key::minor(note("C")));
        assert_eq!("ebm".parse::<Key>().unwrap(), Key::minor(note("Eb")));
        assert_eq!(
            "F# minor".parse::<Key>().unwrap().note_names(false),
            vec!["F#", "G#", "A", "B", "C#", "D", "E"]
        );
        assert_eq!("Bb maj".parse::<Key>().unwrap(), Key::major(note("Bb")));
        assert!(matches!("H".parse::<Key>(), Err(TheoryError::InvalidKey(_))));
        assert!("C dorian".parse::<Key>().is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Key::minor(note("Eb")).to_string(), "Eb minor");
        assert_eq!(format!("{:#}", Key::minor(note("Eb"))), "E♭ minor");
    }
}
