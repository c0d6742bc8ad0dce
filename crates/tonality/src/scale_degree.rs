//! Scale-degree labels for the notes currently held down.
//!
//! Labels default to flat spellings (`♭3`, `♭6`, ...). When the held notes
//! form a recognizable chromatic chord, the chord's shape decides the
//! spelling instead, so `D F# A` in C major reads `2 #4 6` rather than
//! `2 ♭5 6`.

use std::collections::BTreeMap;

use tracing::trace;

use crate::chord::PitchSet;
use crate::circular::bound_modulo;
use crate::key::{Key, KeyMode};

const FLAT_LABELS: [&str; 12] = [
    "1", "♭2", "2", "♭3", "3", "4", "♭5", "5", "♭6", "6", "♭7", "7",
];

/// A chord shape relative to the tonic, with spelling overrides.
struct ChordShape {
    mode: Option<KeyMode>,
    required: &'static [i32],
    optional: &'static [i32],
    spelling: &'static [(i32, &'static str)],
}

impl ChordShape {
    fn matches(&self, mode: KeyMode, active: PitchSet) -> bool {
        if self.mode.is_some_and(|m| m != mode) {
            return false;
        }
        let required = PitchSet::from_chromatics(self.required.iter().copied());
        let allowed = required.union(PitchSet::from_chromatics(self.optional.iter().copied()));
        active.is_subset(allowed) && required.is_subset(active)
    }
}

const fn shape(
    mode: Option<KeyMode>,
    required: &'static [i32],
    optional: &'static [i32],
    spelling: &'static [(i32, &'static str)],
) -> ChordShape {
    ChordShape {
        mode,
        required,
        optional,
        spelling,
    }
}

const MAJOR: Option<KeyMode> = Some(KeyMode::Major);
const MINOR: Option<KeyMode> = Some(KeyMode::Minor);
const ANY: Option<KeyMode> = None;

/// Checked in order; the first match wins.
static SHAPES: [ChordShape; 26] = [
    // Augmented sixths
    shape(ANY, &[8, 0, 6], &[], &[(6, "#4")]),
    shape(ANY, &[8, 0, 2, 6], &[], &[(6, "#4")]),
    shape(ANY, &[8, 0, 3, 6], &[], &[(6, "#4")]),
    // Secondary dominants and leading-tone chords in major
    shape(MAJOR, &[2, 6, 9], &[0], &[(6, "#4")]),
    shape(MAJOR, &[6, 9, 0], &[3], &[(6, "#4")]),
    shape(MAJOR, &[4, 8, 11], &[2], &[(8, "#5")]),
    shape(MAJOR, &[8, 11, 2], &[5], &[(8, "#5")]),
    shape(MAJOR, &[9, 1, 4], &[7], &[(1, "#1")]),
    shape(MAJOR, &[1, 4, 7], &[10], &[(1, "#1")]),
    shape(MAJOR, &[11, 3, 6], &[9], &[(3, "#2"), (6, "#4")]),
    shape(MAJOR, &[3, 6, 9], &[0], &[(3, "#2"), (6, "#4")]),
    shape(MAJOR, &[0, 4, 8], &[], &[(8, "#5")]),
    shape(MAJOR, &[5, 9, 1], &[], &[(1, "#1")]),
    // Borrowed from the parallel minor, spelled flat
    shape(MAJOR, &[5, 8, 0], &[3], &[]),
    shape(MAJOR, &[8, 0, 3], &[7], &[]),
    shape(MAJOR, &[3, 7, 10], &[2], &[]),
    shape(MAJOR, &[10, 2, 5], &[8], &[]),
    shape(MAJOR, &[1, 5, 8], &[0, 11], &[]),
    // Minor keys
    shape(MINOR, &[7, 11, 2], &[5], &[]),
    shape(MINOR, &[11, 2, 5, 8], &[], &[]),
    shape(MINOR, &[2, 6, 9], &[0], &[(6, "#4")]),
    shape(MINOR, &[6, 9, 0], &[3], &[(6, "#4")]),
    shape(MINOR, &[5, 9, 0], &[3], &[]),
    shape(MINOR, &[0, 4, 7], &[10], &[]),
    shape(MINOR, &[3, 7, 11], &[], &[]),
    shape(MINOR, &[1, 5, 8], &[0], &[]),
];

/// `{7, ♭2, ♭4}` in minor reads as the flat tonic triad.
const FLAT_TONIC_IN_MINOR: [i32; 3] = [11, 3, 6];

/// Per-offset labels (index 0 is the tonic) for a set of active offsets.
fn label_table(mode: KeyMode, active: PitchSet) -> [&'static str; 12] {
    let mut labels = FLAT_LABELS;

    if mode == KeyMode::Minor
        && PitchSet::from_chromatics(FLAT_TONIC_IN_MINOR).is_subset(active)
    {
        labels[11] = "♭1";
        return labels;
    }

    if let Some(shape) = SHAPES.iter().find(|s| s.matches(mode, active)) {
        for &(offset, label) in shape.spelling {
            labels[offset as usize] = label;
        }
    }
    labels
}

fn offset_from_tonic(key: &Key, midi_note: u8) -> i32 {
    bound_modulo(12, midi_note as i32 - key.tonic().chromatic())
}

fn active_offsets(key: &Key, active_notes: &[u8]) -> PitchSet {
    PitchSet::from_chromatics(active_notes.iter().map(|&n| offset_from_tonic(key, n)))
}

fn apply(key: &Key, active_notes: &[u8], labels: &[&'static str; 12]) -> BTreeMap<u8, &'static str> {
    active_notes
        .iter()
        .map(|&n| (n, labels[offset_from_tonic(key, n) as usize]))
        .collect()
}

/// Label each active MIDI note with its scale degree in `key`, without caching.
pub fn scale_degrees(key: &Key, active_notes: &[u8]) -> BTreeMap<u8, &'static str> {
    let labels = label_table(key.mode(), active_offsets(key, active_notes));
    apply(key, active_notes, &labels)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Reuse the previous labels when no new pitch class appeared.
    #[default]
    Reuse,
    /// Always recompute.
    Refresh,
}

#[derive(Debug, Clone)]
struct CachedLabels {
    key: Key,
    active: PitchSet,
    labels: [&'static str; 12],
}

/// Single-slot memo for [`scale_degrees`], owned by whoever displays labels.
///
/// While notes are only being released, labels keep the spelling chosen when
/// the fuller chord was held: releasing `D` and `A` from `D F# A` leaves the
/// `F#` labelled `#4`.
#[derive(Debug, Clone, Default)]
pub struct ScaleDegreeCache {
    last: Option<CachedLabels>,
}

impl ScaleDegreeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.last = None;
    }

    pub fn scale_degrees(
        &mut self,
        key: &Key,
        active_notes: &[u8],
        mode: CacheMode,
    ) -> BTreeMap<u8, &'static str> {
        let active = active_offsets(key, active_notes);

        let reusable = match (&self.last, mode) {
            (Some(last), CacheMode::Reuse) => last.key == *key && active.is_subset(last.active),
            _ => false,
        };

        let labels = match (&self.last, reusable) {
            (Some(last), true) => {
                trace!(key = %key, active = %active, "scale degree cache hit");
                last.labels
            }
            _ => {
                trace!(key = %key, active = %active, "scale degree cache miss");
                label_table(key.mode(), active)
            }
        };

        self.last = Some(CachedLabels {
            key: *key,
            active,
            labels,
        });

        apply(key, active_notes, &labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Note;
    use pretty_assertions::assert_eq;

    fn key(name: &str) -> Key {
        name.parse().unwrap()
    }

    fn labels(map: &BTreeMap<u8, &'static str>) -> Vec<&'static str> {
        map.values().copied().collect()
    }

    #[test]
    fn diatonic_notes() {
        let result = scale_degrees(&key("C"), &[60, 64, 67]);
        assert_eq!(labels(&result), vec!["1", "3", "5"]);
    }

    #[test]
    fn single_chromatic_notes_default_to_flats() {
        let result = scale_degrees(&key("C"), &[61, 66, 70]);
        assert_eq!(labels(&result), vec!["♭2", "♭5", "♭7"]);
    }

    #[test]
    fn secondary_dominant_spelled_sharp() {
        let result = scale_degrees(&key("C"), &[62, 66, 69]);
        assert_eq!(labels(&result), vec!["2", "#4", "6"]);

        let result = scale_degrees(&key("C"), &[64, 68, 71, 74]);
        assert_eq!(labels(&result), vec!["3", "#5", "7", "2"]);
    }

    #[test]
    fn borrowed_chords_spelled_flat() {
        let result = scale_degrees(&key("C"), &[56, 60, 63]);
        assert_eq!(labels(&result), vec!["♭6", "1", "♭3"]);
    }

    #[test]
    fn augmented_sixth() {
        let result = scale_degrees(&key("C"), &[56, 60, 63, 66]);
        assert_eq!(labels(&result), vec!["♭6", "1", "♭3", "#4"]);
    }

    #[test]
    fn relative_to_tonic_in_other_keys() {
        // E G# B in D major is V/V
        let result = scale_degrees(&key("D"), &[64, 68, 71]);
        assert_eq!(labels(&result), vec!["2", "#4", "6"]);
    }

    #[test]
    fn minor_key_flat_tonic() {
        let result = scale_degrees(&key("Cm"), &[59, 63, 66]);
        assert_eq!(labels(&result), vec!["♭1", "♭3", "♭5"]);
    }

    #[test]
    fn minor_key_leading_tone() {
        let result = scale_degrees(&key("Am"), &[64, 68, 71]);
        assert_eq!(labels(&result), vec!["5", "7", "2"]);
    }

    #[test]
    fn cache_keeps_labels_while_notes_release() {
        let mut cache = ScaleDegreeCache::new();
        let c = key("C");

        let full = cache.scale_degrees(&c, &[62, 66, 69], CacheMode::Reuse);
        assert_eq!(full[&66], "#4");

        let released = cache.scale_degrees(&c, &[66], CacheMode::Reuse);
        assert_eq!(released[&66], "#4");

        // Uncached, a lone F# reads as a flat fifth.
        assert_eq!(scale_degrees(&c, &[66])[&66], "♭5");
    }

    #[test]
    fn cache_recomputes_on_new_pitch_class() {
        let mut cache = ScaleDegreeCache::new();
        let c = key("C");

        cache.scale_degrees(&c, &[62, 66, 69], CacheMode::Reuse);
        let result = cache.scale_degrees(&c, &[66, 70], CacheMode::Reuse);
        assert_eq!(labels(&result), vec!["♭5", "♭7"]);
    }

    #[test]
    fn cache_recomputes_on_key_change_or_refresh() {
        let mut cache = ScaleDegreeCache::new();
        cache.scale_degrees(&key("C"), &[62, 66, 69], CacheMode::Reuse);

        let other_key = cache.scale_degrees(&key("G"), &[66], CacheMode::Reuse);
        assert_eq!(other_key[&66], "7");

        cache.scale_degrees(&key("C"), &[62, 66, 69], CacheMode::Reuse);
        let refreshed = cache.scale_degrees(&key("C"), &[66], CacheMode::Refresh);
        assert_eq!(refreshed[&66], "♭5");
    }

    #[test]
    fn octaves_share_a_label() {
        let result = scale_degrees(&Key::major(Note::from_name("C").unwrap()), &[48, 60, 72]);
        assert_eq!(labels(&result), vec!["1", "1", "1"]);
    }

    #[test]
    fn empty_input() {
        let mut cache = ScaleDegreeCache::new();
        assert!(cache.scale_degrees(&key("C"), &[], CacheMode::Reuse).is_empty());
    }
}
