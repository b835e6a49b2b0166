//! Configuration management for assistant-tools-rs.
//!
//! Loads config from YAML files in standard locations. Every section has
//! sensible defaults so the service runs with no config file at all.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: Option<PathBuf>,
    pub todo_file: String,
    pub notes_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            todo_file: "todo.json".into(),
            notes_file: "notes.json".into(),
        }
    }
}

impl StorageConfig {
    /// Resolve the data directory, defaulting to ~/.assistant-tools.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".assistant-tools")
        })
    }

    pub fn todo_path(&self) -> PathBuf {
        self.resolved_data_dir().join(&self.todo_file)
    }

    pub fn notes_path(&self) -> PathBuf {
        self.resolved_data_dir().join(&self.notes_file)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_server: "smtp.gmail.com".into(),
            smtp_port: 587,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub endpoint: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://wttr.in".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub endpoint: String,
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.duckduckgo.com".into(),
            max_results: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WikipediaConfig {
    pub endpoint: String,
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://en.wikipedia.org/api/rest_v1".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub country: String,
    pub count: usize,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://newsapi.org/v2".into(),
            api_key: None,
            country: "us".into(),
            count: 5,
        }
    }
}

impl NewsConfig {
    /// Config key, then NEWS_API_KEY env, then the rate-limited demo key.
    pub fn resolved_api_key(&self) -> String {
        self.api_key
            .clone()
            .or_else(|| std::env::var("NEWS_API_KEY").ok())
            .unwrap_or_else(|| "demo".into())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    pub endpoint: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.exchangerate.host".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub endpoint: String,
    pub calendar_id: String,
    pub token_file: Option<PathBuf>,
    pub max_events: usize,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.googleapis.com/calendar/v3".into(),
            calendar_id: "primary".into(),
            token_file: None,
            max_events: 20,
        }
    }
}

impl CalendarConfig {
    pub fn resolved_token_file(&self) -> PathBuf {
        self.token_file.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".assistant-tools/calendar-token")
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub enabled: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct McpConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 8765,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub email: EmailConfig,
    pub weather: WeatherConfig,
    pub search: SearchConfig,
    pub wikipedia: WikipediaConfig,
    pub news: NewsConfig,
    pub currency: CurrencyConfig,
    pub calendar: CalendarConfig,
    pub notifications: NotificationConfig,
    pub mcp: McpConfig,
}

impl Config {
    /// Load configuration from YAML file.
    ///
    /// Searches standard locations if no path is provided:
    /// 1. ./config.yaml
    /// 2. ~/.config/assistant-tools/config.yaml
    /// 3. /etc/assistant-tools/config.yaml
    pub fn load(path: Option<&Path>) -> Self {
        let resolved = path.map(PathBuf::from).or_else(|| {
            let candidates = [
                std::env::current_dir().ok().map(|d| d.join("config.yaml")),
                dirs::home_dir().map(|h| h.join(".config/assistant-tools/config.yaml")),
                Some(PathBuf::from("/etc/assistant-tools/config.yaml")),
            ];
            candidates.into_iter().flatten().find(|p| p.exists())
        });

        let Some(config_path) = resolved else {
            info!("No config file found, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match serde_yml::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, using defaults", config_path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}, using defaults", config_path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let config = Config::default();
        assert_eq!(config.email.smtp_port, 587);
        assert_eq!(config.news.country, "us");
        assert_eq!(config.calendar.calendar_id, "primary");
        assert!(config.mcp.enabled);
    }

    #[test]
    fn partial_yaml_keeps_section_defaults() {
        let yaml = "news:\n  country: de\nmcp:\n  port: 9000\n";
        let config: Config = serde_yml::from_str(yaml).expect("should parse");
        assert_eq!(config.news.country, "de");
        assert_eq!(config.news.count, 5, "unset field keeps default");
        assert_eq!(config.mcp.port, 9000);
        assert_eq!(config.email.smtp_server, "smtp.gmail.com");
    }

    #[test]
    fn storage_paths_join_data_dir() {
        let storage = StorageConfig {
            data_dir: Some(PathBuf::from("/tmp/assistant-test")),
            ..StorageConfig::default()
        };
        assert_eq!(storage.todo_path(), PathBuf::from("/tmp/assistant-test/todo.json"));
        assert_eq!(storage.notes_path(), PathBuf::from("/tmp/assistant-test/notes.json"));
    }
}
