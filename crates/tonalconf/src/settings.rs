//! Configuration sections.

use serde::{Deserialize, Serialize};

/// Score deltas for key ranking, mirrored onto `tonality::BoostWeights`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Added when a chord is the key's tonic.
    #[serde(default = "ScoringConfig::default_tonic")]
    pub tonic: i32,

    /// Added when a chord carries a seventh that fits the key.
    #[serde(default = "ScoringConfig::default_matches_seventh")]
    pub matches_seventh: i32,

    /// Added (usually negative) for a chord that fits nowhere in the key.
    #[serde(default = "ScoringConfig::default_non_match")]
    pub non_match: i32,

    #[serde(default = "ScoringConfig::default_first_chord_tonic")]
    pub first_chord_tonic: i32,

    #[serde(default = "ScoringConfig::default_no_tonic")]
    pub no_tonic: i32,

    #[serde(default = "ScoringConfig::default_has_dominant")]
    pub has_dominant: i32,

    /// Number of keys `rank` prints when `--top` is not given.
    /// Default: 5
    #[serde(default = "ScoringConfig::default_top")]
    pub top: usize,
}

impl ScoringConfig {
    fn default_tonic() -> i32 {
        3
    }

    fn default_matches_seventh() -> i32 {
        1
    }

    fn default_non_match() -> i32 {
        -5
    }

    fn default_first_chord_tonic() -> i32 {
        3
    }

    fn default_no_tonic() -> i32 {
        -4
    }

    fn default_has_dominant() -> i32 {
        2
    }

    fn default_top() -> usize {
        5
    }

    /// Set a boost weight by its field name, as used by `TONAL_BOOST_<NAME>`.
    ///
    /// Returns `false` for an unknown name.
    pub fn set_boost(&mut self, name: &str, value: i32) -> bool {
        let slot = match name {
            "tonic" => &mut self.tonic,
            "matches_seventh" => &mut self.matches_seventh,
            "non_match" => &mut self.non_match,
            "first_chord_tonic" => &mut self.first_chord_tonic,
            "no_tonic" => &mut self.no_tonic,
            "has_dominant" => &mut self.has_dominant,
            _ => return false,
        };
        *slot = value;
        true
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            tonic: Self::default_tonic(),
            matches_seventh: Self::default_matches_seventh(),
            non_match: Self::default_non_match(),
            first_chord_tonic: Self::default_first_chord_tonic(),
            no_tonic: Self::default_no_tonic(),
            has_dominant: Self::default_has_dominant(),
            top: Self::default_top(),
        }
    }
}

/// How notes and results are printed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Print `♭`/`♯` instead of `b`/`#`.
    #[serde(default)]
    pub unicode: bool,

    /// Print the full scoring breakdown for each ranked key.
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Filter directive for tracing-subscriber when `RUST_LOG` is unset.
    /// Default: "warn"
    #[serde(default = "TelemetryConfig::default_log_level")]
    pub log_level: String,
}

impl TelemetryConfig {
    fn default_log_level() -> String {
        "warn".to_string()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}
