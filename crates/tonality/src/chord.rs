//! Chord qualities, chord symbols, and pitch-class signatures.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::circular::bound_modulo;
use crate::key::KeyMode;
use crate::note::Note;
use crate::parser;

/// The chord qualities the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordType {
    Major,
    Minor,
    Diminished,
    Augmented,
    Dominant7,
    Major7,
    Minor7,
    MinorMajor7,
    Diminished7,
    HalfDiminished7,
}

impl ChordType {
    pub const ALL: [ChordType; 10] = [
        ChordType::Major,
        ChordType::Minor,
        ChordType::Diminished,
        ChordType::Augmented,
        ChordType::Dominant7,
        ChordType::Major7,
        ChordType::Minor7,
        ChordType::MinorMajor7,
        ChordType::Diminished7,
        ChordType::HalfDiminished7,
    ];

    /// Canonical suffix for chord symbols.
    pub fn symbol(self) -> &'static str {
        match self {
            ChordType::Major => "",
            ChordType::Minor => "m",
            ChordType::Diminished => "dim",
            ChordType::Augmented => "aug",
            ChordType::Dominant7 => "7",
            ChordType::Major7 => "maj7",
            ChordType::Minor7 => "m7",
            ChordType::MinorMajor7 => "mMaj7",
            ChordType::Diminished7 => "dim7",
            ChordType::HalfDiminished7 => "m7b5",
        }
    }

    /// Other suffixes accepted when parsing.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            ChordType::Major => &["M", "maj"],
            ChordType::Minor => &["min", "-"],
            ChordType::Diminished => &["o", "°"],
            ChordType::Augmented => &["+"],
            ChordType::Dominant7 => &["dom7"],
            ChordType::Major7 => &["M7", "Δ7", "Δ"],
            ChordType::Minor7 => &["min7", "-7"],
            ChordType::MinorMajor7 => &["mM7", "m(maj7)", "minMaj7"],
            ChordType::Diminished7 => &["o7", "°7"],
            ChordType::HalfDiminished7 => &["ø", "ø7", "m7♭5", "min7b5"],
        }
    }

    /// Semitones above the root: third, fifth, and seventh if present.
    pub fn intervals(self) -> &'static [i32] {
        match self {
            ChordType::Major => &[4, 7],
            ChordType::Minor => &[3, 7],
            ChordType::Diminished => &[3, 6],
            ChordType::Augmented => &[4, 8],
            ChordType::Dominant7 => &[4, 7, 10],
            ChordType::Major7 => &[4, 7, 11],
            ChordType::Minor7 => &[3, 7, 10],
            ChordType::MinorMajor7 => &[3, 7, 11],
            ChordType::Diminished7 => &[3, 6, 9],
            ChordType::HalfDiminished7 => &[3, 6, 10],
        }
    }

    /// Exact match against symbols and aliases.
    pub fn from_symbol(symbol: &str) -> Option<ChordType> {
        Self::ALL
            .into_iter()
            .find(|t| t.symbol() == symbol || t.aliases().iter().any(|a| *a == symbol))
    }

    pub fn has_seventh(self) -> bool {
        self.intervals().len() == 3
    }

    /// The key quality this chord can act as tonic of.
    pub fn mode(self) -> Option<KeyMode> {
        match self {
            ChordType::Major | ChordType::Major7 | ChordType::Dominant7 => Some(KeyMode::Major),
            ChordType::Minor | ChordType::Minor7 | ChordType::MinorMajor7 => Some(KeyMode::Minor),
            _ => None,
        }
    }

    /// Diminished triad or fully diminished seventh.
    pub fn is_diminished(self) -> bool {
        matches!(self, ChordType::Diminished | ChordType::Diminished7)
    }

    /// Figure written after a roman numeral. Diminished triads and sevenths
    /// carry no marker here; scoring adds `°` from the chord actually played.
    pub fn roman_figure(self) -> &'static str {
        match self {
            ChordType::Major | ChordType::Minor | ChordType::Diminished => "",
            ChordType::Augmented => "+",
            ChordType::Dominant7 | ChordType::Minor7 | ChordType::Diminished7 => "7",
            ChordType::Major7 | ChordType::MinorMajor7 => "maj7",
            ChordType::HalfDiminished7 => "ø7",
        }
    }
}

/// A set of pitch classes stored as a 12-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PitchSet(u16);

impl PitchSet {
    pub fn from_chromatics(chromatics: impl IntoIterator<Item = i32>) -> Self {
        let mut mask = 0u16;
        for c in chromatics {
            mask |= 1 << bound_modulo(12, c);
        }
        Self(mask)
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn contains(self, chromatic: i32) -> bool {
        self.0 & (1 << bound_modulo(12, chromatic)) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_subset(self, other: PitchSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn union(self, other: PitchSet) -> PitchSet {
        PitchSet(self.0 | other.0)
    }

    /// Members in ascending order.
    pub fn iter(self) -> impl Iterator<Item = i32> {
        (0..12).filter(move |&c| self.contains(c))
    }

    /// The `n` lowest members.
    pub fn lowest(self, n: usize) -> PitchSet {
        PitchSet::from_chromatics(self.iter().take(n))
    }
}

/// Renders as the sorted, comma-separated members: `0,4,7`.
impl fmt::Display for PitchSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for c in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{}", c)?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for PitchSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Spelling-independent identity of a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ChordPitches {
    pub triad: PitchSet,
    pub seventh: Option<PitchSet>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Chord {
    pub root: Note,
    pub chord_type: ChordType,
}

impl Chord {
    pub fn new(root: Note, chord_type: ChordType) -> Self {
        Self { root, chord_type }
    }

    /// Chromatic values of each chord tone, root first.
    pub fn tones(&self) -> impl Iterator<Item = i32> + '_ {
        let root = self.root.chromatic();
        std::iter::once(root).chain(self.chord_type.intervals().iter().map(move |i| root + i))
    }

    /// Root, third and fifth as a pitch set, for every quality.
    pub fn root_triad(&self) -> PitchSet {
        PitchSet::from_chromatics(self.tones().take(3))
    }

    /// Triad and seventh signatures.
    ///
    /// A diminished seventh divides the octave evenly, so any of its tones can
    /// be heard as the root. Its triad signature is taken from the lowest three
    /// pitch classes of the whole chord, which makes `Cdim7`, `Ebdim7`, `F#dim7`
    /// and `Adim7` indistinguishable. Compare against other qualities with
    /// [`Chord::root_triad`].
    pub fn pitches(&self) -> ChordPitches {
        let all = PitchSet::from_chromatics(self.tones());
        let seventh = self.chord_type.has_seventh().then_some(all);
        let triad = if self.chord_type == ChordType::Diminished7 {
            all.lowest(3)
        } else {
            self.root_triad()
        };
        ChordPitches { triad, seventh }
    }

    pub fn to_text(&self, unicode: bool) -> String {
        format!("{}{}", self.root.to_text(unicode), self.chord_type.symbol())
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(f.alternate()))
    }
}

/// A chord along with the spelling it was written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedChord {
    pub chord: Chord,
    pub given_root: String,
    pub given_type: String,
}

impl fmt::Display for ParsedChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.given_root, self.given_type)
    }
}

/// Read a chord symbol such as `C`, `F#m7`, `Bbmaj7`, `C#m7b5`, `E♭°7`.
///
/// Returns `None` when the root or the suffix is not recognized.
pub fn parse_chord(text: &str) -> Option<ParsedChord> {
    let text = text.trim();
    let mut rest = text;
    let root = parser::note_name(&mut rest).ok()?;
    let given_root = &text[..text.len() - rest.len()];
    let chord_type = ChordType::from_symbol(rest)?;

    Some(ParsedChord {
        chord: Chord::new(root, chord_type),
        given_root: given_root.to_string(),
        given_type: rest.to_string(),
    })
}
