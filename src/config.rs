use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::roster::{self, RosterLookup};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SavedSettings {
    pub team_a_name: Option<String>,
    pub team_b_name: Option<String>,
    pub overs_limit: Option<u32>,
    pub rosters: Option<BTreeMap<String, Vec<String>>>,
    pub autosave: Option<bool>,
}

impl SavedSettings {
    pub fn load() -> Self {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    /// Missing or unreadable settings fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match Self::read(path) {
            Ok(Some(saved)) => saved,
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring saved settings");
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let saved = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(Some(saved))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize settings")?;
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            team_a_name: Some(config.team_a_name.clone()).filter(|s| !s.is_empty()),
            team_b_name: Some(config.team_b_name.clone()).filter(|s| !s.is_empty()),
            overs_limit: Some(config.overs_limit),
            rosters: Some(config.rosters.clone()),
            autosave: Some(config.autosave),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub team_a_name: String,
    pub team_b_name: String,
    pub overs_limit: u32,
    pub rosters: BTreeMap<String, Vec<String>>,

    pub db_path: String,
    pub autosave: bool,
    pub stdin_signals: bool,
    pub log_level: String,

    pub http_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_saved(SavedSettings::load())
    }

    /// Saved settings win over the environment, which wins over defaults.
    pub fn from_saved(saved: SavedSettings) -> Result<Self> {
        Ok(Self {
            team_a_name: saved.team_a_name
                .unwrap_or_else(|| env_or("TEAM_A_NAME", "Shivneri")),
            team_b_name: saved.team_b_name
                .unwrap_or_else(|| env_or("TEAM_B_NAME", "Rajgad")),
            overs_limit: match saved.overs_limit {
                Some(o) => o,
                None => parse_env("OVERS_LIMIT", "7")?,
            },
            rosters: saved.rosters.unwrap_or_else(roster::default_rosters),

            db_path: env_or("DB_PATH", "scorer.db"),
            autosave: saved.autosave
                .unwrap_or_else(|| env_or("AUTOSAVE", "true").parse().unwrap_or(true)),
            stdin_signals: env_or("STDIN_SIGNALS", "false").parse().unwrap_or(false),
            log_level: env_or("LOG_LEVEL", "info"),

            http_port: parse_env("HTTP_PORT", "3000")?,
        })
    }

    /// Writes team names, overs, rosters and autosave back to `settings.json`.
    pub fn persist(&self) {
        if let Err(e) = SavedSettings::from_config(self).save_to(Path::new(SETTINGS_FILE)) {
            tracing::warn!(error = %e, "settings not saved");
        }
    }

    pub fn team_names(&self) -> Vec<&str> {
        self.rosters.keys().map(String::as_str).collect()
    }
}

impl RosterLookup for Config {
    fn roster(&self, team: &str) -> Option<Vec<String>> {
        self.rosters.roster(team)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = env_or(key, default);
    raw.parse().with_context(|| format!("invalid value for {key}: {raw}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_settings_override_defaults() {
        let saved = SavedSettings {
            team_a_name: Some("Raigad".into()),
            team_b_name: Some("Sinhgad".into()),
            overs_limit: Some(5),
            rosters: None,
            autosave: Some(false),
        };
        let config = Config::from_saved(saved).unwrap();
        assert_eq!(config.team_a_name, "Raigad");
        assert_eq!(config.overs_limit, 5);
        assert!(!config.autosave);
        assert_eq!(config.team_names(), vec!["Raigad", "Rajgad", "Shivneri", "Sinhgad"]);
        assert_eq!(config.roster("Sinhgad").map(|r| r.len()), Some(6));
    }

    #[test]
    fn missing_settings_file_falls_back_to_defaults() {
        let saved = SavedSettings::load_from(Path::new("does-not-exist/settings.json"));
        assert!(saved.team_a_name.is_none());
        assert!(saved.rosters.is_none());
    }

    #[test]
    fn settings_round_trip_through_file() {
        let config = Config::from_saved(SavedSettings::default()).unwrap();
        let path = std::env::temp_dir().join(format!("cricket-scorer-{}.json", std::process::id()));
        SavedSettings::from_config(&config).save_to(&path).unwrap();

        let back = SavedSettings::load_from(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(back.overs_limit, Some(config.overs_limit));
        assert_eq!(back.rosters.as_ref(), Some(&config.rosters));
    }

    #[test]
    fn corrupt_settings_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("cricket-scorer-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{not json").unwrap();

        let saved = SavedSettings::load_from(&path);
        std::fs::remove_file(&path).ok();
        assert!(saved.overs_limit.is_none());
    }
}
