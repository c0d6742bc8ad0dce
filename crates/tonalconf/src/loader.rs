//! Config file discovery, loading, and environment variable overlay.

use crate::{ConfigError, TonalConfig};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

/// Discover config files in standard locations.
///
/// Returns paths in load order (system, user, local).
/// Only returns files that exist.
pub fn discover_config_files() -> Vec<PathBuf> {
    discover_config_files_with_override(None)
}

/// Discover config files, optionally with a CLI override path.
///
/// If `cli_path` is provided it replaces the local override. It is returned
/// even when missing, so loading reports the bad path instead of skipping it.
pub fn discover_config_files_with_override(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    // System config
    let system = PathBuf::from("/etc/tonal/config.toml");
    if system.exists() {
        files.push(system);
    }

    // User config (XDG_CONFIG_HOME or ~/.config)
    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("tonal/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    if let Some(path) = cli_path {
        files.push(path.to_path_buf());
        return files;
    }

    // Local override (current directory)
    let local = PathBuf::from("tonal.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

/// Read a config file as a raw TOML table.
pub fn load_table(path: &Path) -> Result<toml::Table, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    contents.parse().map_err(|e: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Merge `overlay` into `base`. Nested tables merge key by key; any other
/// value in `overlay` replaces the one in `base`.
pub fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(overlay_table) = value {
            if let Some(toml::Value::Table(base_table)) = base.get_mut(&key) {
                merge_tables(base_table, overlay_table);
                continue;
            }
            base.insert(key, toml::Value::Table(overlay_table));
        } else {
            base.insert(key, value);
        }
    }
}

/// Deserialize a merged table; missing sections and fields take defaults.
pub fn from_table(table: toml::Table) -> Result<TonalConfig, ConfigError> {
    toml::Value::Table(table)
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::Invalid {
            message: e.to_string(),
        })
}

/// Apply environment variable overrides to config.
pub fn apply_env_overrides(config: &mut TonalConfig, sources: &mut ConfigSources) {
    apply_overrides_from(config, sources, env::vars());
}

/// Apply overrides from an explicit set of variables.
///
/// `RUST_LOG` wins over `TONAL_LOG_LEVEL`. `TONAL_BOOST_<NAME>` sets the
/// scoring weight `<name>`; unknown names and unparseable values are ignored.
pub fn apply_overrides_from<I>(config: &mut TonalConfig, sources: &mut ConfigSources, vars: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    let vars: BTreeMap<String, String> = vars.into_iter().collect();

    if let Some(v) = vars.get("TONAL_LOG_LEVEL") {
        config.telemetry.log_level = v.clone();
        sources.env_overrides.push("TONAL_LOG_LEVEL".to_string());
    }
    // Also support RUST_LOG
    if let Some(v) = vars.get("RUST_LOG") {
        config.telemetry.log_level = v.clone();
        sources.env_overrides.push("RUST_LOG".to_string());
    }

    if let Some(unicode) = vars.get("TONAL_UNICODE").and_then(|v| parse_bool(v)) {
        config.display.unicode = unicode;
        sources.env_overrides.push("TONAL_UNICODE".to_string());
    }

    // Boost weights (TONAL_BOOST_<NAME>)
    for (key, value) in &vars {
        let Some(name) = key.strip_prefix("TONAL_BOOST_") else {
            continue;
        };
        if let Ok(weight) = value.trim().parse() {
            if config.scoring.set_boost(&name.to_lowercase(), weight) {
                sources.env_overrides.push(key.clone());
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Expand ~ and environment variables in a path.
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(stripped);
        }
    } else if let Some(stripped) = path.strip_prefix('$') {
        // Handle $VAR/rest/of/path
        let (var_name, rest) = match stripped.find('/') {
            Some(slash_pos) => (&stripped[..slash_pos], &stripped[slash_pos + 1..]),
            None => (stripped, ""),
        };
        if let Ok(var_value) = env::var(var_name) {
            return PathBuf::from(var_value).join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn table(contents: &str) -> toml::Table {
        contents.parse().unwrap()
    }

    #[test]
    fn test_expand_path_tilde() {
        let expanded = expand_path("~/test/path");
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_absolute() {
        let expanded = expand_path("/absolute/path");
        assert_eq!(expanded, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_discover_config_files() {
        // Just verify it doesn't panic
        let _files = discover_config_files();
    }

    #[test]
    fn test_cli_path_is_always_listed() {
        let missing = Path::new("/nonexistent/tonal.toml");
        let files = discover_config_files_with_override(Some(missing));
        assert_eq!(files.last().map(PathBuf::as_path), Some(missing));
    }

    #[test]
    fn test_merge_nested_tables() {
        let mut base = table(
            r#"
[scoring]
tonic = 5
no_tonic = -2

[display]
unicode = true
"#,
        );
        let overlay = table(
            r#"
[scoring]
tonic = 7

[telemetry]
log_level = "debug"
"#,
        );

        merge_tables(&mut base, overlay);
        let config = from_table(base).unwrap();

        assert_eq!(config.scoring.tonic, 7);
        assert_eq!(config.scoring.no_tonic, -2);
        assert!(config.display.unicode);
        assert_eq!(config.telemetry.log_level, "debug");
    }

    #[test]
    fn test_partial_table_takes_defaults() {
        let config = from_table(table("[scoring]\ntop = 3\n")).unwrap();
        assert_eq!(config.scoring.top, 3);
        assert_eq!(config.scoring.non_match, -5);
        assert!(!config.display.unicode);
        assert_eq!(config.telemetry.log_level, "warn");
    }

    #[test]
    fn test_wrong_type_is_invalid() {
        let err = from_table(table("[scoring]\ntonic = \"lots\"\n")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_load_table_errors() {
        let missing = load_table(Path::new("/nonexistent/tonal.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::FileRead { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scoring").unwrap();
        let broken = load_table(file.path()).unwrap_err();
        assert!(matches!(broken, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = TonalConfig::default();
        let mut sources = ConfigSources::default();

        apply_overrides_from(
            &mut config,
            &mut sources,
            vars(&[
                ("TONAL_LOG_LEVEL", "info"),
                ("RUST_LOG", "tonality=trace"),
                ("TONAL_UNICODE", "yes"),
                ("TONAL_BOOST_NO_TONIC", "-9"),
                ("TONAL_BOOST_BOGUS", "1"),
                ("TONAL_BOOST_TONIC", "many"),
                ("HOME", "/home/someone"),
            ]),
        );

        assert_eq!(config.telemetry.log_level, "tonality=trace");
        assert!(config.display.unicode);
        assert_eq!(config.scoring.no_tonic, -9);
        assert_eq!(config.scoring.tonic, 3);
        assert_eq!(
            sources.env_overrides,
            vec!["TONAL_LOG_LEVEL", "RUST_LOG", "TONAL_UNICODE", "TONAL_BOOST_NO_TONIC"]
        );
    }

    #[test]
    fn test_unrecognized_bool_is_ignored() {
        let mut config = TonalConfig::default();
        let mut sources = ConfigSources::default();
        apply_overrides_from(&mut config, &mut sources, vars(&[("TONAL_UNICODE", "maybe")]));
        assert!(!config.display.unicode);
        assert!(sources.env_overrides.is_empty());
    }
}
