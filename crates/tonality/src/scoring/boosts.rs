use std::fmt;

use serde::{Deserialize, Serialize};

/// Adjustments applied on top of usage weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoostKind {
    /// Chord is the key's own tonic triad or seventh.
    Tonic,
    /// The chord's seventh matched too, not just its triad.
    MatchesSeventh,
    /// Chord fits nowhere in the key.
    NonMatch,
    FirstChordTonic,
    NoTonic,
    /// Some chord is diatonic to the key or acts as its dominant.
    HasDominant,
}

impl BoostKind {
    pub fn label(self) -> &'static str {
        match self {
            BoostKind::Tonic => "tonic",
            BoostKind::MatchesSeventh => "matches seventh",
            BoostKind::NonMatch => "not in key",
            BoostKind::FirstChordTonic => "first chord is tonic",
            BoostKind::NoTonic => "no tonic chord",
            BoostKind::HasDominant => "diatonic or dominant chord",
        }
    }
}

impl fmt::Display for BoostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score delta for each [`BoostKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostWeights {
    pub tonic: i32,
    pub matches_seventh: i32,
    pub non_match: i32,
    pub first_chord_tonic: i32,
    pub no_tonic: i32,
    pub has_dominant: i32,
}

impl Default for BoostWeights {
    fn default() -> Self {
        Self {
            tonic: 3,
            matches_seventh: 1,
            non_match: -5,
            first_chord_tonic: 3,
            no_tonic: -4,
            has_dominant: 2,
        }
    }
}

impl BoostWeights {
    pub fn score(&self, kind: BoostKind) -> i32 {
        match kind {
            BoostKind::Tonic => self.tonic,
            BoostKind::MatchesSeventh => self.matches_seventh,
            BoostKind::NonMatch => self.non_match,
            BoostKind::FirstChordTonic => self.first_chord_tonic,
            BoostKind::NoTonic => self.no_tonic,
            BoostKind::HasDominant => self.has_dominant,
        }
    }

    pub fn apply(&self, kind: BoostKind) -> AppliedBoost {
        AppliedBoost {
            kind,
            score: self.score(kind),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedBoost {
    pub kind: BoostKind,
    pub score: i32,
}

impl fmt::Display for AppliedBoost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+} ({})", self.score, self.kind)
    }
}

/// Facts about a matched chord that earn per-chord boosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreAttribute {
    Tonic,
    MatchesSeventh,
}

impl ScoreAttribute {
    pub fn boost(self) -> BoostKind {
        match self {
            ScoreAttribute::Tonic => BoostKind::Tonic,
            ScoreAttribute::MatchesSeventh => BoostKind::MatchesSeventh,
        }
    }
}
