//! Rank the 24 major and minor keys against a chord progression.
//!
//! Each chord is looked up in every key's usage table by pitch-class content
//! (spelling and voicing are ignored). The best-weighted entry it matches is
//! its score in that key; chords that match nothing are penalized. Boosts for
//! tonic chords, matched sevenths and diatonic or dominant harmony separate
//! keys that share most of their chords.

mod boosts;
mod usage;

use std::sync::OnceLock;

use serde::Serialize;
use tracing::{debug, trace, warn};

pub use boosts::{AppliedBoost, BoostKind, BoostWeights, ScoreAttribute};
pub use usage::{usage_table, Usage, MAJOR_USAGE, MINOR_USAGE};

use crate::chord::{Chord, ChordPitches, ChordType, PitchSet};
use crate::key::{Key, KeyMode};
use crate::note::Note;
use crate::pitch::Letter;

const MAJOR_TONICS: [Note; 12] = [
    Note::new(Letter::C, 0),
    Note::new(Letter::D, -1),
    Note::new(Letter::D, 0),
    Note::new(Letter::E, -1),
    Note::new(Letter::E, 0),
    Note::new(Letter::F, 0),
    Note::new(Letter::F, 1),
    Note::new(Letter::G, 0),
    Note::new(Letter::A, -1),
    Note::new(Letter::A, 0),
    Note::new(Letter::B, -1),
    Note::new(Letter::B, 0),
];

const MINOR_TONICS: [Note; 12] = [
    Note::new(Letter::C, 0),
    Note::new(Letter::C, 1),
    Note::new(Letter::D, 0),
    Note::new(Letter::E, -1),
    Note::new(Letter::E, 0),
    Note::new(Letter::F, 0),
    Note::new(Letter::F, 1),
    Note::new(Letter::G, 0),
    Note::new(Letter::G, 1),
    Note::new(Letter::A, 0),
    Note::new(Letter::B, -1),
    Note::new(Letter::B, 0),
];

/// The 24 keys scored, majors first, each spelled with its usual tonic.
pub fn all_keys() -> Vec<Key> {
    let majors = MAJOR_TONICS.iter().map(|&t| Key::with_mode(t, KeyMode::Major));
    let minors = MINOR_TONICS.iter().map(|&t| Key::with_mode(t, KeyMode::Minor));
    majors.chain(minors).collect()
}

/// A usage entry resolved to a concrete chord in one key.
struct Candidate {
    usage: &'static Usage,
    chord: Chord,
    pitches: ChordPitches,
    root_triad: PitchSet,
    /// Every chord tone is a scale note of the key.
    diatonic: bool,
}

impl Candidate {
    fn matches(&self, given: &Chord, pitches: &ChordPitches) -> bool {
        let both_dim7 = given.chord_type == ChordType::Diminished7
            && self.usage.chord_type == ChordType::Diminished7;
        if !both_dim7 && given.root_triad() != self.root_triad {
            return false;
        }
        match (pitches.seventh, self.pitches.seventh) {
            (Some(given), Some(candidate)) => given == candidate,
            _ => true,
        }
    }

    /// Counts towards the progression's diatonic-or-dominant boost.
    fn anchors_key(&self) -> bool {
        self.diatonic || self.usage.is_dominant()
    }
}

struct KeyTable {
    key: Key,
    candidates: Vec<Candidate>,
}

impl KeyTable {
    fn resolve(key: Key) -> Self {
        let scale = PitchSet::from_chromatics(key.notes().iter().map(Note::chromatic));
        let candidates = usage_table(key.mode())
            .iter()
            .filter_map(|usage| match key.note_from_roman(usage.roman) {
                Ok(root) => {
                    let chord = Chord::new(root, usage.chord_type);
                    let diatonic = chord.tones().all(|tone| scale.contains(tone));
                    Some(Candidate {
                        usage,
                        chord,
                        pitches: chord.pitches(),
                        root_triad: chord.root_triad(),
                        diatonic,
                    })
                }
                Err(err) => {
                    warn!(key = %key, roman = usage.roman, error = %err, "usage entry does not resolve");
                    None
                }
            })
            .collect();
        Self { key, candidates }
    }

    /// Highest weight wins; the earlier entry wins a tie.
    fn best_match(&self, given: &Chord, pitches: &ChordPitches) -> Option<&Candidate> {
        let mut best: Option<&Candidate> = None;
        for candidate in self.candidates.iter().filter(|c| c.matches(given, pitches)) {
            if best.map_or(true, |b| candidate.usage.weight > b.usage.weight) {
                best = Some(candidate);
            }
        }
        best
    }
}

static KEY_TABLES: OnceLock<Vec<KeyTable>> = OnceLock::new();

fn key_tables() -> &'static [KeyTable] {
    KEY_TABLES.get_or_init(|| all_keys().into_iter().map(KeyTable::resolve).collect())
}

/// One chord of a progression, scored in one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoredChord {
    Match {
        given: Chord,
        matched: Chord,
        roman: String,
        usage: i32,
        boosts: Vec<AppliedBoost>,
        attributes: Vec<ScoreAttribute>,
    },
    NonMatch {
        given: Chord,
        boost: AppliedBoost,
    },
}

impl ScoredChord {
    pub fn given(&self) -> &Chord {
        match self {
            ScoredChord::Match { given, .. } | ScoredChord::NonMatch { given, .. } => given,
        }
    }

    pub fn roman(&self) -> Option<&str> {
        match self {
            ScoredChord::Match { roman, .. } => Some(roman),
            ScoredChord::NonMatch { .. } => None,
        }
    }

    pub fn total(&self) -> i32 {
        match self {
            ScoredChord::Match { usage, boosts, .. } => {
                usage + boosts.iter().map(|b| b.score).sum::<i32>()
            }
            ScoredChord::NonMatch { boost, .. } => boost.score,
        }
    }

    pub fn is_tonic(&self) -> bool {
        match self {
            ScoredChord::Match { attributes, .. } => attributes.contains(&ScoreAttribute::Tonic),
            ScoredChord::NonMatch { .. } => false,
        }
    }
}

/// A key's score for a whole progression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyScore {
    pub key: Key,
    pub total: i32,
    pub progression: Vec<ScoredChord>,
    /// Progression-wide boosts, counted once.
    pub boosts: Vec<AppliedBoost>,
}

impl KeyScore {
    /// Multi-line explanation of how the total was reached.
    pub fn breakdown(&self) -> String {
        let mut lines = vec![format!("{}: {}", self.key, self.total)];

        for scored in &self.progression {
            let given = scored.given().to_string();
            let line = match scored {
                ScoredChord::Match {
                    roman,
                    usage,
                    boosts,
                    ..
                } => {
                    let mut line = format!("  {given:<8} {roman:<10} {usage:>3}");
                    for boost in boosts {
                        line.push_str(&format!("  {boost}"));
                    }
                    line
                }
                ScoredChord::NonMatch { boost, .. } => {
                    format!("  {given:<8} {:<10} {:>3}", "-", boost.score)
                }
            };
            lines.push(line);
        }

        for boost in &self.boosts {
            lines.push(format!("  {boost}"));
        }
        lines.join("\n")
    }
}

/// Roman numeral shown for a match, figured from the chord actually played.
///
/// A diminished chord always shows `°`; a diminished chord on `#iv` reads as
/// the leading-tone chord of V.
fn roman_label(roman: &str, given: ChordType) -> String {
    let diminished = given.is_diminished();
    let roman = if diminished && roman == "#iv" {
        "vii/V"
    } else {
        roman
    };

    let (function, target) = match roman.split_once('/') {
        Some((function, target)) => (function, Some(target)),
        None => (roman, None),
    };

    let figure = if function.ends_with("+6") {
        ""
    } else {
        given.roman_figure()
    };
    let marker = if diminished && !function.contains('°') {
        "°"
    } else {
        ""
    };

    match target {
        Some(target) => format!("{function}{marker}{figure}/{target}"),
        None => format!("{function}{marker}{figure}"),
    }
}

fn score_chord(
    table: &KeyTable,
    given: &Chord,
    pitches: &ChordPitches,
    weights: &BoostWeights,
) -> (ScoredChord, bool) {
    let Some(candidate) = table.best_match(given, pitches) else {
        let scored = ScoredChord::NonMatch {
            given: *given,
            boost: weights.apply(BoostKind::NonMatch),
        };
        return (scored, false);
    };

    let mut attributes = Vec::new();
    if candidate.chord.root == table.key.tonic()
        && candidate.usage.chord_type.mode() == Some(table.key.mode())
    {
        attributes.push(ScoreAttribute::Tonic);
    }
    if given.chord_type.has_seventh() {
        attributes.push(ScoreAttribute::MatchesSeventh);
    }

    let scored = ScoredChord::Match {
        given: *given,
        matched: candidate.chord,
        roman: roman_label(candidate.usage.roman, given.chord_type),
        usage: candidate.usage.weight,
        boosts: attributes.iter().map(|a| weights.apply(a.boost())).collect(),
        attributes,
    };
    (scored, candidate.anchors_key())
}

fn score_key(table: &KeyTable, chords: &[(Chord, ChordPitches)], weights: &BoostWeights) -> KeyScore {
    let mut has_anchor = false;
    let progression: Vec<ScoredChord> = chords
        .iter()
        .map(|(chord, pitches)| {
            let (scored, anchor) = score_chord(table, chord, pitches, weights);
            has_anchor |= anchor;
            scored
        })
        .collect();

    let mut boosts = Vec::new();
    if progression.first().is_some_and(ScoredChord::is_tonic) {
        boosts.push(weights.apply(BoostKind::FirstChordTonic));
    }
    if !progression.iter().any(ScoredChord::is_tonic) {
        boosts.push(weights.apply(BoostKind::NoTonic));
    }
    if has_anchor {
        boosts.push(weights.apply(BoostKind::HasDominant));
    }

    let total = progression.iter().map(ScoredChord::total).sum::<i32>()
        + boosts.iter().map(|b| b.score).sum::<i32>();
    trace!(key = %table.key, total, "scored key");

    KeyScore {
        key: table.key,
        total,
        progression,
        boosts,
    }
}

/// Score `chords` in all 24 keys with the default boosts, best first.
pub fn score_progression(chords: &[Chord]) -> Vec<KeyScore> {
    score_progression_with(chords, &BoostWeights::default())
}

/// Score `chords` in all 24 keys, best first. Equal totals keep key order.
pub fn score_progression_with(chords: &[Chord], weights: &BoostWeights) -> Vec<KeyScore> {
    let chords: Vec<(Chord, ChordPitches)> = chords.iter().map(|c| (*c, c.pitches())).collect();

    let mut scores: Vec<KeyScore> = key_tables()
        .iter()
        .map(|table| score_key(table, &chords, weights))
        .collect();
    scores.sort_by(|a, b| b.total.cmp(&a.total));

    if let Some(best) = scores.first() {
        debug!(chords = chords.len(), best = %best.key, total = best.total, "ranked keys");
    }
    scores
}
