//! Configuration file loading with precedence handling.

use crate::program::{DelimiterPair, LanguageSpec, LanguageTable, MarkerSyntax};
use crate::view_state::highlighter::{is_valid_theme, DEFAULT_THEME};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SEQCAT_CONFIG";

/// Environment variable overriding the highlight theme.
pub const THEME_ENV_VAR: &str = "SEQCAT_THEME";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A well-formed value that cannot be used.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Dotted key of the offending value.
        key: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/seqcat/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Highlight theme name (e.g., "gruvbox-dark").
    #[serde(default)]
    pub theme: Option<String>,

    /// Start with every card expanded.
    #[serde(default)]
    pub expand_all: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Program listing rules.
    #[serde(default)]
    pub programs: Option<ProgramsSection>,
}

/// `[programs]` section.
///
/// ```toml
/// [programs]
/// delimiters = ["()", "[]"]
/// inline_markers = true
/// max_label_len = 40
///
/// [programs.languages.pari]
/// aliases = ["PARI/GP", "gp"]
/// syntax = "c"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProgramsSection {
    /// Delimiter pairs written as two-character strings.
    #[serde(default)]
    pub delimiters: Option<Vec<String>>,

    /// Whether labels may share a line with code.
    #[serde(default)]
    pub inline_markers: Option<bool>,

    /// Maximum label length in characters.
    #[serde(default)]
    pub max_label_len: Option<usize>,

    /// Languages to add to, or override in, the built-in table.
    #[serde(default)]
    pub languages: BTreeMap<String, LanguageEntry>,
}

/// One `[programs.languages.<id>]` table.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LanguageEntry {
    /// Labels resolving to this language.
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Highlighter token; omitted means plain text.
    #[serde(default)]
    pub syntax: Option<String>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Theme name.
    pub theme: String,
    /// Start with every card expanded.
    pub expand_all: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Marker recognition rules.
    pub marker_syntax: MarkerSyntax,
    /// Language table.
    pub languages: LanguageTable,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            expand_all: false,
            log_file_path: default_log_path(),
            marker_syntax: MarkerSyntax::default(),
            languages: LanguageTable::builtin(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/seqcat/seqcat.log` on Linux, or the platform
/// equivalent. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("seqcat").join("seqcat.log")
    } else {
        PathBuf::from("seqcat.log")
    }
}

/// Resolve default config file path.
///
/// Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("seqcat").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SEQCAT_CONFIG` environment variable
/// 3. Default path `~/.config/seqcat/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for unusable delimiter pairs or a zero
/// label length.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let (marker_syntax, languages) = match config.programs {
        Some(programs) => resolve_programs(programs, defaults.marker_syntax, defaults.languages)?,
        None => (defaults.marker_syntax, defaults.languages),
    };

    Ok(ResolvedConfig {
        theme: config.theme.unwrap_or(defaults.theme),
        expand_all: config.expand_all.unwrap_or(defaults.expand_all),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        marker_syntax,
        languages,
    })
}

fn resolve_programs(
    programs: ProgramsSection,
    mut syntax: MarkerSyntax,
    mut languages: LanguageTable,
) -> Result<(MarkerSyntax, LanguageTable), ConfigError> {
    if let Some(delimiters) = programs.delimiters {
        syntax.delimiters = delimiters
            .iter()
            .map(|raw| {
                raw.parse::<DelimiterPair>()
                    .map_err(|e| ConfigError::InvalidValue {
                        key: "programs.delimiters".to_string(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<_, _>>()?;
    }

    if let Some(inline) = programs.inline_markers {
        syntax.inline_markers = inline;
    }

    if let Some(max) = programs.max_label_len {
        if max == 0 {
            return Err(ConfigError::InvalidValue {
                key: "programs.max_label_len".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        syntax.max_label_len = max;
    }

    for (canonical, entry) in programs.languages {
        let aliases: Vec<&str> = entry.aliases.iter().map(String::as_str).collect();
        languages.insert(LanguageSpec::new(
            &canonical,
            &aliases,
            entry.syntax.as_deref(),
        ));
    }

    Ok((syntax, languages))
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `SEQCAT_THEME`: Override theme
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(theme) = std::env::var(THEME_ENV_VAR) {
        config.theme = theme;
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest).
/// Only flags the user actually set are passed as `Some`.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    theme_override: Option<String>,
    expand_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(theme) = theme_override {
        config.theme = theme;
    }

    if let Some(expand) = expand_override {
        config.expand_all = expand;
    }

    if !is_valid_theme(&config.theme) {
        warn!(theme = %config.theme, fallback = DEFAULT_THEME, "Unknown theme, using default");
        config.theme = DEFAULT_THEME.to_string();
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
