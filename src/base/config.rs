//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use super::types::{Res, Void};

/// Default database endpoint (embedded, in-memory).
fn default_db_endpoint() -> String {
    "mem://".to_string()
}

/// Default database namespace.
fn default_db_namespace() -> String {
    "agenda".to_string()
}

/// Default database name.
fn default_db_database() -> String {
    "bot".to_string()
}

/// Configuration for the agenda-bot application.
#[derive(Debug, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Slack app token used for the socket mode connection (`SLACK_APP_TOKEN`).
    #[serde(default)]
    pub slack_app_token: String,
    /// Slack bot token used to post replies (`SLACK_BOT_TOKEN`).
    #[serde(default)]
    pub slack_bot_token: String,
    /// Database endpoint URL (`DB_ENDPOINT`), e.g. `mem://` or `ws://localhost:8000`.
    #[serde(default = "default_db_endpoint")]
    pub db_endpoint: String,
    /// Database username (`DB_USERNAME`); sign-in is skipped when empty.
    #[serde(default)]
    pub db_username: String,
    /// Database password (`DB_PASSWORD`).
    #[serde(default)]
    pub db_password: String,
    /// Database namespace (`DB_NAMESPACE`).
    #[serde(default = "default_db_namespace")]
    pub db_namespace: String,
    /// Database name (`DB_DATABASE`).
    #[serde(default = "default_db_database")]
    pub db_database: String,
}

impl Config {
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("AGENDA_BOT"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }

    /// Checks that the required secrets are present.
    pub fn validate(&self) -> Void {
        if self.slack_app_token.trim().is_empty() {
            return Err(anyhow::anyhow!("Slack app token is not set (`AGENDA_BOT_SLACK_APP_TOKEN`)."));
        }

        if self.slack_bot_token.trim().is_empty() {
            return Err(anyhow::anyhow!("Slack bot token is not set (`AGENDA_BOT_SLACK_BOT_TOKEN`)."));
        }

        if self.db_endpoint.trim().is_empty() {
            return Err(anyhow::anyhow!("Database endpoint must not be empty."));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(inner: ConfigInner) -> Config {
        Config { inner: Arc::new(inner) }
    }

    #[test]
    fn test_validate_accepts_both_tokens() {
        let cfg = config(ConfigInner {
            slack_app_token: "xapp-test".to_string(),
            slack_bot_token: "xoxb-test".to_string(),
            db_endpoint: default_db_endpoint(),
            ..Default::default()
        });

        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_bot_token() {
        let cfg = config(ConfigInner {
            slack_app_token: "xapp-test".to_string(),
            db_endpoint: default_db_endpoint(),
            ..Default::default()
        });

        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("AGENDA_BOT_SLACK_BOT_TOKEN"));
    }

    #[test]
    fn test_validate_rejects_blank_app_token() {
        let cfg = config(ConfigInner {
            slack_app_token: "   ".to_string(),
            slack_bot_token: "xoxb-test".to_string(),
            db_endpoint: default_db_endpoint(),
            ..Default::default()
        });

        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("AGENDA_BOT_SLACK_APP_TOKEN"));
    }

    #[test]
    fn test_load_reads_file_and_defaults() {
        let dir = std::env::temp_dir().join(format!("agenda-bot-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "slack_app_token = \"xapp-file\"\nslack_bot_token = \"xoxb-file\"\n").unwrap();

        let cfg = Config::load(Some(path.as_path())).unwrap();

        assert_eq!(cfg.slack_app_token, "xapp-file");
        assert_eq!(cfg.slack_bot_token, "xoxb-file");
        assert_eq!(cfg.db_endpoint, "mem://");
        assert_eq!(cfg.db_namespace, "agenda");
        assert_eq!(cfg.db_database, "bot");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
