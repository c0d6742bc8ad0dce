//! Symbolic music theory for chord progressions.
//!
//! Notes keep their spelling (`C#` and `Db` are different notes that sound
//! the same), keys are spelled one letter per degree, and roman numerals
//! resolve to notes, including secondary functions like `V/ii` and the
//! tritone substitute `subV`. On top of that sits a scorer that ranks all
//! 24 major and minor keys for a progression of chord symbols.
//!
//! # Example
//!
//! ```
//! use tonality::{parse_chord, score_progression, Key, Note};
//!
//! let c_major: Key = "C".parse().unwrap();
//! assert_eq!(c_major.note_from_roman("V/ii").unwrap(), Note::from_name("A").unwrap());
//!
//! let chords: Vec<_> = ["C", "F", "G", "C"]
//!     .iter()
//!     .filter_map(|s| parse_chord(s))
//!     .map(|p| p.chord)
//!     .collect();
//! let ranked = score_progression(&chords);
//! assert_eq!(ranked[0].key, c_major);
//! ```

pub mod chord;
pub mod circular;
pub mod degree;
pub mod error;
pub mod interval;
pub mod key;
pub mod note;
mod parser;
pub mod pitch;
pub mod scale_degree;
pub mod scoring;

pub use chord::{parse_chord, Chord, ChordPitches, ChordType, ParsedChord, PitchSet};
pub use circular::{bound_modulo, CircularSet};
pub use degree::Degree;
pub use error::{Result, TheoryError};
pub use interval::Interval;
pub use key::{Key, KeyMode};
pub use note::Note;
pub use pitch::{Letter, PitchClass};
pub use scale_degree::{scale_degrees, CacheMode, ScaleDegreeCache};
pub use scoring::{
    all_keys, score_progression, score_progression_with, AppliedBoost, BoostKind, BoostWeights,
    KeyScore, ScoreAttribute, ScoredChord,
};
