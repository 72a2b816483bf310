//! Configuration validation.

use super::types::{AccessConfig, ServerConfig, INTERNAL_PREFIX};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid token secret: must be at least 32 characters")]
    InvalidTokenSecret,

    #[error("Session cookie name must not be empty")]
    EmptySessionCookie,

    #[error("Invalid port: {0}")]
    InvalidPort(u16),

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Path must be absolute: {0:?}")]
    RelativePath(String),

    #[error("Auth-only path {auth_path:?} is also covered by protected prefix {prefix:?}")]
    OverlappingPaths { auth_path: String, prefix: String },

    #[error("Sign-in path {0:?} is protected")]
    SignInPathProtected(String),

    #[error("Default landing path {0:?} is an auth-only path")]
    LandingPathIsAuthOnly(String),

    #[error("Prefix {0:?} is covered by a protected prefix")]
    ReservedPrefixProtected(String),

    #[error("API prefix must be an absolute path without a trailing slash: {0:?}")]
    InvalidApiPrefix(String),
}

/// Validate server configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.auth.token_secret.len() < 32 {
        errors.push(ConfigError::InvalidTokenSecret);
    }

    if config.auth.session_cookie.trim().is_empty() {
        errors.push(ConfigError::EmptySessionCookie);
    }

    if config.server.port == 0 {
        errors.push(ConfigError::InvalidPort(0));
    }

    if config.socket_addr().is_err() {
        errors.push(ConfigError::InvalidBindAddress(config.server.host.clone()));
    }

    errors.extend(validate_access(&config.access));

    let api_prefix = config.api.prefix.as_str();
    if !api_prefix.starts_with('/') || api_prefix.ends_with('/') {
        errors.push(ConfigError::InvalidApiPrefix(api_prefix.to_string()));
    }

    // API and internal routes answer 401 themselves; the gate must not redirect them.
    for reserved in [config.api.prefix.as_str(), INTERNAL_PREFIX] {
        if is_covered(&config.access, reserved) {
            errors.push(ConfigError::ReservedPrefixProtected(reserved.to_string()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate the route access lists on their own.
///
/// A path may never classify as both protected and auth-only, so every
/// auth-only path is checked against every protected prefix.
pub fn validate_access(access: &AccessConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    let all_paths = access
        .protected_path_prefixes
        .iter()
        .chain(&access.auth_only_paths)
        .chain([&access.sign_in_path, &access.default_landing_path]);

    for path in all_paths {
        if !path.starts_with('/') {
            errors.push(ConfigError::RelativePath(path.clone()));
        }
    }

    for auth_path in &access.auth_only_paths {
        if let Some(prefix) = access
            .protected_path_prefixes
            .iter()
            .find(|prefix| auth_path.starts_with(prefix.as_str()))
        {
            errors.push(ConfigError::OverlappingPaths {
                auth_path: auth_path.clone(),
                prefix: prefix.clone(),
            });
        }
    }

    if is_covered(access, &access.sign_in_path) {
        errors.push(ConfigError::SignInPathProtected(access.sign_in_path.clone()));
    }

    if access.auth_only_paths.contains(&access.default_landing_path) {
        errors.push(ConfigError::LandingPathIsAuthOnly(
            access.default_landing_path.clone(),
        ));
    }

    errors
}

fn is_covered(access: &AccessConfig, path: &str) -> bool {
    access
        .protected_path_prefixes
        .iter()
        .any(|prefix| path.starts_with(prefix.as_str()))
}
