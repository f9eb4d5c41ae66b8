use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub db_max_connections: u32,
    pub run_migrations: bool,
    pub engine: EngineConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: optional_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            db_max_connections: optional_env("DB_MAX_CONNECTIONS", 10)?,
            run_migrations: optional_env("RUN_MIGRATIONS", false)?,
            engine: EngineConfig::from_env()?,
        })
    }
}

/// Thresholds used by the matching engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Score at or above which an opportunity is admitted outright.
    pub clear_match_threshold: f64,
    /// Minimum score for an opportunity to be considered a growth-zone stretch.
    pub growth_min_score: f64,
    /// Maximum number of missing skills for a growth-zone stretch.
    pub growth_max_missing: usize,
    /// How many of the top-ranked opportunities feed learning-path targets.
    pub learning_path_top_n: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            clear_match_threshold: 70.0,
            growth_min_score: 50.0,
            growth_max_missing: 3,
            learning_path_top_n: 5,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            clear_match_threshold: optional_env(
                "MATCH_CLEAR_THRESHOLD",
                defaults.clear_match_threshold,
            )?,
            growth_min_score: optional_env("GROWTH_MIN_SCORE", defaults.growth_min_score)?,
            growth_max_missing: optional_env("GROWTH_MAX_MISSING", defaults.growth_max_missing)?,
            learning_path_top_n: optional_env(
                "LEARNING_PATH_TOP_N",
                defaults.learning_path_top_n,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Both score thresholds must be finite and within 0 to 100.
    pub fn validate(&self) -> Result<()> {
        check_score("MATCH_CLEAR_THRESHOLD", self.clear_match_threshold)?;
        check_score("GROWTH_MIN_SCORE", self.growth_min_score)?;
        Ok(())
    }
}

fn check_score(key: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        bail!("{key} must be a number between 0 and 100, got '{value}'");
    }
    Ok(())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_optional(key, std::env::var(key).ok(), default)
}

fn parse_optional<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{value}'")),
        None => Ok(default),
    }
}
