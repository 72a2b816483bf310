//! Shared harness for HTTP-level tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use medlink_server::{
    config::{AccessConfig, AuthConfig, ServerBindConfig, ServerConfig},
    middleware::{auth::encode_token, Claims, JwtVerifier, Role},
    routes::create_router,
    store::{MemoryStore, SeedData},
    AppState,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const SECRET: &str = "integration_secret_key_32_chars!!";

pub fn config() -> ServerConfig {
    ServerConfig {
        server: ServerBindConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout_secs: 30,
        },
        auth: AuthConfig {
            token_secret: SECRET.to_string(),
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

/// Two medications and two requests. `u1` donates `m1` and owns `r1`;
/// `r2` has no recorded owner.
pub fn seed() -> SeedData {
    serde_json::from_value(json!({
        "medications": {
            "m1": {
                "donorId": "u1",
                "name": "Insulin glargine",
                "status": "available",
                "createdAt": { "_seconds": 1714564800, "_nanoseconds": 0 }
            },
            "m2": { "donorId": "u3", "name": "Salbutamol", "status": "approved" }
        },
        "requests": {
            "r1": { "donorId": "u1", "medicationId": "m1", "status": "pending" },
            "r2": { "donorId": "", "medicationId": "m2", "status": "pending" }
        }
    }))
    .unwrap()
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(config())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        let store = Arc::new(MemoryStore::from_seed(seed()));
        let state = AppState::with_parts(
            config,
            store.clone(),
            Arc::new(JwtVerifier::new(SECRET, 0)),
        );

        Self {
            router: create_router(state),
            store,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        TestResponse {
            status,
            headers,
            body: bytes.to_vec(),
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }
}

pub fn token(id: &str, role: Option<Role>) -> String {
    encode_token(&Claims::new(id, role, 3600), SECRET).unwrap()
}

pub fn session_cookie(id: &str, role: Option<Role>) -> String {
    format!("__session={}", token(id, role))
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn patch_json(uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    patch_raw(uri, cookie, body.to_string())
}

pub fn patch_raw(uri: &str, cookie: Option<&str>, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::PATCH)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(body.into()).unwrap()
}
