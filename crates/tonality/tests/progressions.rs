//! Fixture-based ranking tests.
//!
//! Each .prog file in tests/fixtures/ holds the expected best key on a
//! `# <key>` line followed by whitespace-separated chord symbols.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tonality::{
    parse_chord, scale_degrees, score_progression, CacheMode, Chord, Key, ScaleDegreeCache,
    ScoredChord,
};

fn load_fixture(name: &str) -> (Key, Vec<Chord>) {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.prog", name));

    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e));

    let mut expected = None;
    let mut chords = Vec::new();
    for line in content.lines() {
        if let Some(key) = line.strip_prefix('#') {
            expected = Some(
                key.trim()
                    .parse::<Key>()
                    .unwrap_or_else(|e| panic!("Fixture {} has a bad key: {}", name, e)),
            );
            continue;
        }
        for symbol in line.split_whitespace() {
            let parsed = parse_chord(symbol)
                .unwrap_or_else(|| panic!("Fixture {} has a bad chord: {}", name, symbol));
            chords.push(parsed.chord);
        }
    }

    let expected = expected.unwrap_or_else(|| panic!("Fixture {} has no key line", name));
    (expected, chords)
}

fn test_fixture(name: &str) {
    let (expected, chords) = load_fixture(name);
    let ranked = score_progression(&chords);

    assert_eq!(ranked.len(), 24);
    assert!(
        ranked.windows(2).all(|w| w[0].total >= w[1].total),
        "Fixture {} is not sorted",
        name
    );
    assert_eq!(
        ranked[0].key,
        expected,
        "Fixture {} ranked:\n{}",
        name,
        ranked[0].breakdown()
    );

    for score in &ranked {
        assert_eq!(score.progression.len(), chords.len());
    }
}

#[test]
fn test_fixture_pop_axis() {
    test_fixture("pop_axis");
}

#[test]
fn test_fixture_two_five_one() {
    test_fixture("two_five_one");
}

#[test]
fn test_fixture_minor_cadence() {
    test_fixture("minor_cadence");
}

#[test]
fn test_fixture_andalusian() {
    test_fixture("andalusian");
}

#[test]
fn test_fixture_secondary_dominant() {
    test_fixture("secondary_dominant");
}

#[test]
fn test_fixture_sharp_key() {
    test_fixture("sharp_key");
}

#[test]
fn test_fixture_enharmonic_spelling() {
    test_fixture("enharmonic_spelling");
}

#[test]
fn test_given_spelling_survives_scoring() {
    let (_, chords) = load_fixture("enharmonic_spelling");
    let ranked = score_progression(&chords);

    let given: Vec<String> = ranked[0]
        .progression
        .iter()
        .map(|c| c.given().to_string())
        .collect();
    assert_eq!(given, vec!["Gb", "Db", "Ebm", "Cb", "Gb"]);

    match &ranked[0].progression[0] {
        ScoredChord::Match { matched, .. } => assert_eq!(matched.to_string(), "F#"),
        other => panic!("expected a match, got {:?}", other),
    }
}

#[test]
fn test_ranking_serializes() {
    let (_, chords) = load_fixture("pop_axis");
    let ranked = score_progression(&chords);
    let json = serde_json::to_value(&ranked).expect("ranking should serialize");

    let keys = json.as_array().expect("ranking is an array");
    assert_eq!(keys.len(), 24);
    assert_eq!(keys[0]["key"]["mode"], "major");
    assert_eq!(keys[0]["key"]["notes"][4], "G");
    assert_eq!(keys[0]["progression"][1]["roman"], "V");
}

#[test]
fn test_live_overlay_while_playing() {
    let key: Key = "C".parse().unwrap();
    let mut cache = ScaleDegreeCache::new();

    // D7 held, then released one note at a time.
    let held = cache.scale_degrees(&key, &[62, 66, 69, 72], CacheMode::Reuse);
    assert_eq!(held.values().copied().collect::<Vec<_>>(), vec!["2", "#4", "6", "1"]);

    let partial = cache.scale_degrees(&key, &[66, 72], CacheMode::Reuse);
    assert_eq!(partial[&66], "#4");
    assert_eq!(scale_degrees(&key, &[66, 72])[&66], "♭5");
}
