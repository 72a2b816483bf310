//! Fixtures shared by unit tests.

use crate::{
    config::{AccessConfig, AuthConfig, ServerBindConfig, ServerConfig},
    middleware::{auth::encode_token, Claims, JwtVerifier, Role},
    state::AppState,
    store::MemoryStore,
};
use std::sync::Arc;

pub const TEST_SECRET: &str = "medlink_test_secret_key_32_chars!";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        server: ServerBindConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout_secs: 30,
        },
        auth: AuthConfig {
            token_secret: TEST_SECRET.to_string(),
            session_cookie: "__session".to_string(),
            leeway_secs: 0,
        },
        access: AccessConfig::default(),
        api: Default::default(),
        store: Default::default(),
        pages: Default::default(),
        logging: Default::default(),
    }
}

pub fn token_for(id: &str, role: Option<Role>) -> String {
    encode_token(&Claims::new(id, role, 3600), TEST_SECRET).unwrap()
}

pub fn state_with(store: MemoryStore) -> AppState {
    AppState::with_parts(
        test_config(),
        Arc::new(store),
        Arc::new(JwtVerifier::new(TEST_SECRET, 0)),
    )
}
