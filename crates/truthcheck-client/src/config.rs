//! Client configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level truthcheck configuration.
///
/// Note: Custom Debug impl masks the admin password to prevent accidental
/// exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the quiz service.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Username for the admin endpoints.
    #[serde(default)]
    pub admin_username: String,
    /// Password for the admin endpoints.
    #[serde(default)]
    pub admin_password: String,
    /// Directory exported CSV files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("server_url", &self.server_url)
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"***")
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

fn default_server_url() -> String {
    "http://localhost:1323".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            admin_username: String::new(),
            admin_password: String::new(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `truthcheck.toml` in the current directory
/// 2. `~/.config/truthcheck/config.toml`
///
/// Environment variable overrides: `TRUTHCHECK_SERVER_URL`,
/// `TRUTHCHECK_ADMIN_USERNAME`, `TRUTHCHECK_ADMIN_PASSWORD`.
pub fn load_config() -> Result<ClientConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ClientConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("truthcheck.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ClientConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ClientConfig::default(),
    };

    // Apply env var overrides
    if let Ok(url) = std::env::var("TRUTHCHECK_SERVER_URL") {
        config.server_url = url;
    }
    if let Ok(username) = std::env::var("TRUTHCHECK_ADMIN_USERNAME") {
        config.admin_username = username;
    }
    if let Ok(password) = std::env::var("TRUTHCHECK_ADMIN_PASSWORD") {
        config.admin_password = password;
    }

    // Resolve env vars in all string values
    config.server_url = resolve_env_vars(&config.server_url);
    config.admin_username = resolve_env_vars(&config.admin_username);
    config.admin_password = resolve_env_vars(&config.admin_password);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("truthcheck"))
}
