//! Shared application state.

use crate::{
    config::ServerConfig,
    middleware::{AccessPolicy, JwtVerifier, SessionVerifier},
    store::{DocumentStore, MemoryStore},
};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub store: Arc<dyn DocumentStore>,
    pub verifier: Arc<dyn SessionVerifier>,
}

impl AppState {
    /// Build state from configuration: a JWT verifier over the configured
    /// secret and an in-memory store, seeded when `store.seed_path` is set.
    pub async fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        let verifier = JwtVerifier::new(&config.auth.token_secret, config.auth.leeway_secs);

        let store = match &config.store.seed_path {
            Some(path) => MemoryStore::from_seed_file(path)
                .await
                .with_context(|| format!("Failed to seed store from {}", path.display()))?,
            None => {
                info!("No seed file configured, starting with an empty store");
                MemoryStore::new()
            }
        };

        Ok(Self::with_parts(config.clone(), Arc::new(store), Arc::new(verifier)))
    }

    /// Assemble state from already-built parts.
    pub fn with_parts(
        config: ServerConfig,
        store: Arc<dyn DocumentStore>,
        verifier: Arc<dyn SessionVerifier>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            verifier,
        }
    }

    /// Policy applied to document reads.
    pub fn read_policy(&self) -> AccessPolicy {
        AccessPolicy::for_reads(self.config.access.require_ownership_on_read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_config;
    use serde_json::json;
    use std::io::Write;

    #[tokio::test]
    async fn test_new_seeds_store_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            json!({ "requests": { "r1": { "donorId": "u1", "status": "pending" } } })
        )
        .unwrap();

        let mut config = test_config();
        config.store.seed_path = Some(file.path().to_path_buf());

        let state = AppState::new(&config).await.unwrap();
        assert!(state.store.request("r1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_new_fails_on_missing_seed_file() {
        let mut config = test_config();
        config.store.seed_path = Some("/nonexistent/medlink-seed.json".into());

        let err = AppState::new(&config).await.err().unwrap();
        assert!(format!("{err:#}").contains("Failed to seed store"));
    }

    #[tokio::test]
    async fn test_read_policy_follows_config() {
        let mut config = test_config();
        assert_eq!(
            AppState::new(&config).await.unwrap().read_policy(),
            AccessPolicy::Authenticated
        );

        config.access.require_ownership_on_read = true;
        assert_eq!(
            AppState::new(&config).await.unwrap().read_policy(),
            AccessPolicy::OwnerOrAdmin
        );
    }
}
