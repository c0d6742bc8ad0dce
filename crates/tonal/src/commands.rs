//! Subcommand implementations.

use anyhow::{bail, ensure, Context, Result};
use tonalconf::{ConfigSources, ScoringConfig, TonalConfig};
use tonality::{
    parse_chord, score_progression_with, BoostWeights, CacheMode, Chord, Interval, Key, Note,
    ScaleDegreeCache,
};
use tracing::debug;

pub fn boost_weights(scoring: &ScoringConfig) -> BoostWeights {
    BoostWeights {
        tonic: scoring.tonic,
        matches_seventh: scoring.matches_seventh,
        non_match: scoring.non_match,
        first_chord_tonic: scoring.first_chord_tonic,
        no_tonic: scoring.no_tonic,
        has_dominant: scoring.has_dominant,
    }
}

fn parse_key(name: &str) -> Result<Key> {
    name.parse()
        .with_context(|| format!("'{}' is not a key name (try C, F#m or \"Bb major\")", name))
}

fn parse_note(name: &str) -> Result<Note> {
    Note::from_name(name).with_context(|| format!("'{}' is not a note name", name))
}

fn key_name(key: &Key, unicode: bool) -> String {
    if unicode {
        format!("{:#}", key)
    } else {
        key.to_string()
    }
}

pub fn rank(
    symbols: &[String],
    config: &TonalConfig,
    top: usize,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let mut chords: Vec<Chord> = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        match parse_chord(symbol) {
            Some(parsed) => chords.push(parsed.chord),
            None => bail!("invalid chord '{}'", symbol),
        }
    }

    let weights = boost_weights(&config.scoring);
    let ranked = score_progression_with(&chords, &weights);
    let shown = &ranked[..top.min(ranked.len())];
    debug!(chords = chords.len(), shown = shown.len(), "ranked progression");

    if json {
        println!("{}", serde_json::to_string_pretty(shown)?);
        return Ok(());
    }

    for (i, score) in shown.iter().enumerate() {
        println!(
            "{:>2}. {:<10} {:>4}",
            i + 1,
            key_name(&score.key, config.display.unicode),
            score.total
        );
        if verbose {
            for line in score.breakdown().lines().skip(1) {
                println!("    {}", line);
            }
        }
    }

    Ok(())
}

pub fn scale(name: &str, config: &TonalConfig) -> Result<()> {
    let key = parse_key(name)?;
    let unicode = config.display.unicode;
    println!(
        "{}: {}",
        key_name(&key, unicode),
        key.note_names(unicode).join(" ")
    );
    Ok(())
}

pub fn roman(name: &str, exprs: &[String], config: &TonalConfig) -> Result<()> {
    let key = parse_key(name)?;
    for expr in exprs {
        let note = key
            .note_from_roman(expr)
            .with_context(|| format!("cannot resolve '{}' in {}", expr, key))?;
        println!("{:<8} {}", expr, note.to_text(config.display.unicode));
    }
    Ok(())
}

pub fn interval(from: &str, to: &str) -> Result<()> {
    let interval = Interval::between(&parse_note(from)?, &parse_note(to)?);
    println!(
        "{} ({} letters, {} semitones)",
        interval.name().unwrap_or("unnamed"),
        interval.letters,
        interval.semitones
    );
    Ok(())
}

fn parse_frame(frame: &str) -> Result<Vec<u8>> {
    frame
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| -> Result<u8> {
            let note: u8 = s
                .parse()
                .with_context(|| format!("'{}' is not a MIDI note number", s))?;
            ensure!(note <= 127, "MIDI note {} is out of range 0-127", note);
            Ok(note)
        })
        .collect()
}

pub fn degrees(name: &str, frames: &[String], config: &TonalConfig) -> Result<()> {
    let key = parse_key(name)?;
    let mut cache = ScaleDegreeCache::new();

    for frame in frames {
        let notes = parse_frame(frame)?;
        let labels = cache.scale_degrees(&key, &notes, CacheMode::Reuse);
        let line: Vec<String> = labels
            .iter()
            .map(|(note, label)| {
                if config.display.unicode {
                    format!("{}:{}", note, label)
                } else {
                    format!("{}:{}", note, label.replace('♭', "b"))
                }
            })
            .collect();
        println!("{}", line.join(" "));
    }

    Ok(())
}

pub fn show_config(config: &TonalConfig, sources: &ConfigSources) {
    print!("{}", config.to_toml());

    if !sources.files.is_empty() || !sources.env_overrides.is_empty() {
        println!();
    }
    for file in &sources.files {
        println!("# loaded {}", file.display());
    }
    for var in &sources.env_overrides {
        println!("# overridden by ${}", var);
    }
}
