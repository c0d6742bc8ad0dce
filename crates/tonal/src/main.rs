//! tonal - key finder and music theory calculator
//!
//! Subcommands:
//! - `tonal rank <chord>...` - Rank the 24 keys for a chord progression
//! - `tonal scale <key>` - Spell a key's scale
//! - `tonal roman <key> <expr>...` - Resolve roman numerals to notes
//! - `tonal interval <a> <b>` - Name the interval between two notes
//! - `tonal degrees <key> <notes>...` - Label held MIDI notes with scale degrees
//! - `tonal config` - Show the effective configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tonalconf::TonalConfig;

mod commands;

#[derive(Parser)]
#[command(name = "tonal")]
#[command(about = "Key finder and music theory calculator")]
#[command(version)]
struct Cli {
    /// Config file to load in place of ./tonal.toml
    #[arg(long, global = true, env = "TONAL_CONFIG")]
    config: Option<String>,

    /// Print ♭ and ♯ instead of b and #
    #[arg(long, global = true)]
    unicode: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the 24 major and minor keys for a chord progression
    Rank {
        /// Chord symbols, e.g. C Am7 Dm7 G7
        #[arg(required = true)]
        chords: Vec<String>,

        /// Number of keys to show (default from config)
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Print the ranking as JSON
        #[arg(long)]
        json: bool,

        /// Explain each key's score
        #[arg(short, long)]
        verbose: bool,
    },

    /// Spell the notes of a key
    Scale {
        /// Key name, e.g. C, F#m, "Bb major"
        key: String,
    },

    /// Resolve roman numerals in a key
    Roman {
        /// Key name
        key: String,

        /// Expressions such as V, bVII, V/ii, subV, Ger+6
        #[arg(required = true)]
        exprs: Vec<String>,
    },

    /// Name the interval from one note up to another
    Interval {
        from: String,
        to: String,
    },

    /// Label MIDI notes with scale degrees
    ///
    /// Each argument is one moment of held notes, comma separated. Labels
    /// chosen while a chord is held stay put as its notes are released.
    Degrees {
        /// Key name
        key: String,

        /// Held MIDI note numbers, e.g. 62,66,69 66
        #[arg(required = true)]
        frames: Vec<String>,
    },

    /// Show the effective configuration and where it came from
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.as_deref().map(tonalconf::expand_path);
    let (mut config, sources) = TonalConfig::load_with_sources_from(config_path.as_deref())
        .context("Failed to load configuration")?;
    if cli.unicode {
        config.display.unicode = true;
    }

    init_tracing(&config);
    tracing::debug!(files = ?sources.files, env = ?sources.env_overrides, "loaded configuration");

    match cli.command {
        Commands::Rank {
            chords,
            top,
            json,
            verbose,
        } => {
            let top = top.unwrap_or(config.scoring.top);
            let verbose = verbose || config.display.verbose;
            commands::rank(&chords, &config, top, json, verbose)?;
        }
        Commands::Scale { key } => {
            commands::scale(&key, &config)?;
        }
        Commands::Roman { key, exprs } => {
            commands::roman(&key, &exprs, &config)?;
        }
        Commands::Interval { from, to } => {
            commands::interval(&from, &to)?;
        }
        Commands::Degrees { key, frames } => {
            commands::degrees(&key, &frames, &config)?;
        }
        Commands::Config => {
            commands::show_config(&config, &sources);
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over the configured level.
fn init_tracing(config: &TonalConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.telemetry.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
