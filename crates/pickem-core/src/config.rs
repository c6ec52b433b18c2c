// Configuration loading and parsing (pickem.toml, credentials.toml).

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::leaderboard::MainTieBreak;
use crate::tier::Tier;
use crate::validate::PickSchedule;

/// Environment variable that overrides `cfbd_api_key` from credentials.toml.
pub const API_KEY_ENV: &str = "CFBD_API_KEY";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub season: SeasonConfig,
    pub provider: ProviderConfig,
    pub credentials: CredentialsConfig,
    /// Empty means "use the platform data directory".
    pub db_path: String,
    pub schedule: PickSchedule,
    pub main_tie_break: MainTieBreak,
}

impl Config {
    /// Resolve where the SQLite file lives.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if !self.db_path.trim().is_empty() {
            return Ok(PathBuf::from(&self.db_path));
        }
        directories::ProjectDirs::from("org", "cfbpickem", "cfbpickem")
            .map(|dirs| dirs.data_dir().join("cfbpickem.db"))
            .ok_or_else(|| ConfigError::ValidationError {
                field: "database.path".into(),
                message: "empty and no platform data directory is available".into(),
            })
    }
}

// ---------------------------------------------------------------------------
// pickem.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire pickem.toml file.
#[derive(Debug, Clone, Deserialize)]
struct PickemFile {
    season: SeasonConfig,
    provider: ProviderConfig,
    database: DatabaseSection,
    picks: PicksSection,
    #[serde(default)]
    standings: StandingsSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonConfig {
    pub year: i32,
    /// Provider classification to keep when refreshing records ("fbs").
    pub classification: String,
    /// Poll used for preseason ranks ("AP Top 25").
    pub poll: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct DatabaseSection {
    #[serde(default)]
    path: String,
}

/// Required pick counts keyed by tier number. TOML table keys are strings,
/// so tiers arrive as "1".."5".
#[derive(Debug, Clone, Deserialize)]
struct PicksSection {
    required: HashMap<String, usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StandingsSection {
    #[serde(default)]
    main_tie_break: MainTieBreak,
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub cfbd_api_key: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/pickem.toml` and
/// (optionally) `config/credentials.toml`, both relative to `base_dir`.
///
/// This does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- pickem.toml (required) ---
    let pickem_path = config_dir.join("pickem.toml");
    let pickem_text = read_file(&pickem_path)?;
    let file: PickemFile = toml::from_str(&pickem_text).map_err(|e| ConfigError::ParseError {
        path: pickem_path.clone(),
        source: e,
    })?;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let mut credentials: CredentialsConfig = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };
    credentials.cfbd_api_key =
        resolve_api_key(std::env::var(API_KEY_ENV).ok(), credentials.cfbd_api_key);

    let schedule = parse_schedule(&file.picks.required)?;

    let config = Config {
        season: file.season,
        provider: file.provider,
        credentials,
        db_path: file.database.path,
        schedule,
        main_tie_break: file.standings.main_tie_break,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Loads config relative to the current working directory, copying default
/// files into `config/` first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

/// A non-blank environment value wins over the credentials file.
fn resolve_api_key(env: Option<String>, file: Option<String>) -> Option<String> {
    env.filter(|k| !k.trim().is_empty())
        .or(file)
        .filter(|k| !k.trim().is_empty())
}

fn parse_schedule(required: &HashMap<String, usize>) -> Result<PickSchedule, ConfigError> {
    let mut counts = Vec::with_capacity(required.len());
    for (key, &count) in required {
        let tier = key
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|n| Tier::from_number(n).ok())
            .ok_or_else(|| ConfigError::ValidationError {
                field: format!("picks.required.{key}"),
                message: "key must be a tier number from 1 to 5".into(),
            })?;
        counts.push((tier, count));
    }
    Ok(PickSchedule::new(counts))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let year = config.season.year;
    if !(1869..=2100).contains(&year) {
        return Err(ConfigError::ValidationError {
            field: "season.year".into(),
            message: format!("must be between 1869 and 2100, got {year}"),
        });
    }

    let text_fields: &[(&str, &str)] = &[
        ("season.classification", config.season.classification.as_str()),
        ("season.poll", config.season.poll.as_str()),
        ("provider.base_url", config.provider.base_url.as_str()),
    ];
    for (name, val) in text_fields {
        if val.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    if config.provider.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "provider.timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    for tier in Tier::ALL {
        if config.schedule.required(tier) == 0 {
            return Err(ConfigError::ValidationError {
                field: format!("picks.required.{}", tier.number()),
                message: "every tier needs a pick count greater than 0".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
