//! Configuration types, read from the environment.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::profile::UserProfile;

/// Content type sent with the archive upload.
pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Profile bot configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Dialog identifier; namespaces the stored dialog state.
    pub dialog_id: String,
    /// libSQL file for durable state. `None` keeps state in memory.
    pub db_path: Option<PathBuf>,
    /// Port for the status routes. `None` disables the HTTP server.
    pub http_port: Option<u16>,
    /// Seed for conversations that have no profile yet.
    pub initial_profile: Option<UserProfile>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            dialog_id: "user_profile".to_string(),
            db_path: None,
            http_port: None,
            initial_profile: None,
        }
    }
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let dialog_id = std::env::var("PROFILE_BOT_DIALOG_ID")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.dialog_id);

        let db_path = optional_env("PROFILE_BOT_DB_PATH").map(PathBuf::from);

        let http_port = match optional_env("PROFILE_BOT_HTTP_PORT") {
            Some(raw) => Some(raw.trim().parse::<u16>().map_err(|e| {
                ConfigError::InvalidValue {
                    key: "PROFILE_BOT_HTTP_PORT".to_string(),
                    message: e.to_string(),
                }
            })?),
            None => None,
        };

        let initial_profile = match optional_env("PROFILE_BOT_INITIAL_PROFILE") {
            Some(raw) => Some(serde_json::from_str(&raw).map_err(|e| {
                ConfigError::InvalidValue {
                    key: "PROFILE_BOT_INITIAL_PROFILE".to_string(),
                    message: e.to_string(),
                }
            })?),
            None => None,
        };

        Ok(Self {
            dialog_id,
            db_path,
            http_port,
            initial_profile,
        })
    }
}

/// Publish tool configuration.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Upload endpoint; receives a single PUT.
    pub url: String,
    pub username: String,
    pub password: SecretString,
    /// Directory tree to compress.
    pub source_dir: PathBuf,
    /// Where the archive is written.
    pub archive_path: PathBuf,
    pub content_type: String,
}

impl PublishConfig {
    /// Build a config with the default sibling archive path and content type.
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
        source_dir: impl Into<PathBuf>,
    ) -> Self {
        let source_dir = source_dir.into();
        Self {
            url: url.into(),
            username: username.into(),
            password,
            archive_path: default_archive_path(&source_dir),
            source_dir,
            content_type: ZIP_CONTENT_TYPE.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let url = required_env("PUBLISH_URL")?;
        let username = required_env("PUBLISH_USERNAME")?;
        let password = SecretString::from(required_env("PUBLISH_PASSWORD")?);

        let source_dir = optional_env("PUBLISH_SOURCE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let source_dir = source_dir.canonicalize()?;

        let mut config = Self::new(url, username, password, source_dir);

        if let Some(path) = optional_env("PUBLISH_ARCHIVE_PATH") {
            config.archive_path = PathBuf::from(path);
        }
        if let Some(content_type) = optional_env("PUBLISH_CONTENT_TYPE") {
            config.content_type = content_type;
        }
        if config.content_type != ZIP_CONTENT_TYPE {
            tracing::warn!(
                content_type = %config.content_type,
                "Uploading with a non-standard Content-Type (expected {})",
                ZIP_CONTENT_TYPE
            );
        }

        Ok(config)
    }
}

/// `<parent>/<dir-name>.zip` next to the source directory.
pub fn default_archive_path(source_dir: &Path) -> PathBuf {
    let name = source_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "publish".to_string());
    let parent = source_dir.parent().unwrap_or(source_dir);
    parent.join(format!("{name}.zip"))
}

/// An empty variable counts as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn required_env(key: &str) -> Result<String, ConfigError> {
    optional_env(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}
