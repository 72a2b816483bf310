//! Configuration loading utilities.

use super::{types::ServerConfig, validation::validate_config};
use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// Load configuration from various sources.
///
/// Sources are layered in order: embedded defaults, an optional config file,
/// then `MEDLINK__SECTION__KEY` environment variables.
pub struct ConfigLoader {
    config_path: Option<String>,
    env_prefix: String,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: "MEDLINK".to_string(),
        }
    }

    /// Set config file path.
    pub fn with_config_path(mut self, path: impl Into<String>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Set environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration without validating it.
    pub fn load(&self) -> Result<ServerConfig> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::File::from_str(
            include_str!("defaults.toml"),
            config::FileFormat::Toml,
        ));

        if let Some(path) = &self.config_path {
            if Path::new(path).exists() {
                info!(path = %path, "Loading config file");
                builder = builder.add_source(config::File::with_name(path));
            } else {
                warn!(path = %path, "Config file not found, using defaults");
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("access.protected_path_prefixes")
                .with_list_parse_key("access.auth_only_paths"),
        );

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Load and validate configuration, reporting every problem at once.
    pub fn load_validated(&self) -> Result<ServerConfig> {
        let config = self.load()?;

        if let Err(errors) = validate_config(&config) {
            let listing = errors
                .iter()
                .map(|e| format!("  - {e}"))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("Invalid configuration:\n{listing}");
        }

        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and validate configuration from `config_path`, falling back to the
/// `CONFIG_PATH` environment variable when no path is given.
pub fn load_config(config_path: Option<String>) -> Result<ServerConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = config_path.or_else(|| std::env::var("CONFIG_PATH").ok()) {
        loader = loader.with_config_path(path);
    }

    loader.load_validated()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_with_secret_from_file() {
        let file = write_config(
            r#"
            [auth]
            token_secret = "0123456789abcdef0123456789abcdef"
            "#,
        );

        let config = ConfigLoader::new()
            .with_env_prefix("MEDLINK_TEST_DEFAULTS")
            .with_config_path(file.path().to_string_lossy())
            .load_validated()
            .unwrap();

        assert_eq!(config.auth.session_cookie, "__session");
        assert_eq!(config.access.sign_in_path, "/signin");
        assert_eq!(config.access.default_landing_path, "/dashboard");
        assert_eq!(config.access.protected_path_prefixes.len(), 8);
        assert_eq!(config.access.auth_only_paths, vec!["/signin", "/register"]);
        assert_eq!(config.api.prefix, "/api");
        assert!(!config.access.require_ownership_on_read);
    }

    #[test]
    fn test_missing_secret_fails_validation() {
        let result = ConfigLoader::new()
            .with_env_prefix("MEDLINK_TEST_MISSING")
            .load_validated();

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("token secret"));
    }

    #[test]
    fn test_overlapping_lists_fail_at_load() {
        let file = write_config(
            r#"
            [auth]
            token_secret = "0123456789abcdef0123456789abcdef"

            [access]
            protected_path_prefixes = ["/dashboard", "/signin"]
            auth_only_paths = ["/signin"]
            "#,
        );

        let result = ConfigLoader::new()
            .with_env_prefix("MEDLINK_TEST_OVERLAP")
            .with_config_path(file.path().to_string_lossy())
            .load_validated();

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("also covered by protected prefix"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = write_config(
            r#"
            [auth]
            token_secret = "0123456789abcdef0123456789abcdef"
            "#,
        );

        std::env::set_var("MEDLINK_TEST_ENV__ACCESS__REQUIRE_OWNERSHIP_ON_READ", "true");
        std::env::set_var("MEDLINK_TEST_ENV__SERVER__PORT", "8088");

        let config = ConfigLoader::new()
            .with_env_prefix("MEDLINK_TEST_ENV")
            .with_config_path(file.path().to_string_lossy())
            .load_validated()
            .unwrap();

        std::env::remove_var("MEDLINK_TEST_ENV__ACCESS__REQUIRE_OWNERSHIP_ON_READ");
        std::env::remove_var("MEDLINK_TEST_ENV__SERVER__PORT");

        assert!(config.access.require_ownership_on_read);
        assert_eq!(config.server.port, 8088);
    }

    #[test]
    fn test_load_config_uses_given_path() {
        let file = write_config(
            r#"
            [auth]
            token_secret = "0123456789abcdef0123456789abcdef"

            [server]
            port = 4100
            "#,
        );

        let config = load_config(Some(file.path().to_string_lossy().into_owned())).unwrap();

        assert_eq!(config.server.port, 4100);
    }
}
