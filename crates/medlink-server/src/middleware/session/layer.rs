//! Session gate middleware layer.

use super::gate::{canonical_path, requested_next, GateAction, SessionGate};
use crate::middleware::auth::session_token;
use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Redirect, Response},
};
use futures::future::BoxFuture;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::debug;

/// Layer running every request through the [`SessionGate`].
#[derive(Clone)]
pub struct SessionGateLayer {
    gate: Arc<SessionGate>,
    cookie_name: Arc<str>,
}

impl SessionGateLayer {
    pub fn new(gate: SessionGate, cookie_name: impl Into<Arc<str>>) -> Self {
        Self {
            gate: Arc::new(gate),
            cookie_name: cookie_name.into(),
        }
    }
}

impl<S> Layer<S> for SessionGateLayer {
    type Service = SessionGateMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionGateMiddleware {
            inner,
            gate: self.gate.clone(),
            cookie_name: self.cookie_name.clone(),
        }
    }
}

/// Session gate middleware service.
#[derive(Clone)]
pub struct SessionGateMiddleware<S> {
    inner: S,
    gate: Arc<SessionGate>,
    cookie_name: Arc<str>,
}

impl<S> Service<Request<Body>> for SessionGateMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let has_session = session_token(req.headers(), &self.cookie_name).is_some();
        let next = requested_next(req.uri().query());
        let path = canonical_path(req.uri().path());
        let action = self.gate.decide(&path, has_session, next.as_deref());

        let location = self.gate.location(&action);

        if let Some(location) = location {
            debug!(
                path = %path,
                has_session,
                location = %location,
                action = ?action,
                "Session gate redirect"
            );
            return Box::pin(async move { Ok(Redirect::temporary(&location).into_response()) });
        }

        debug_assert_eq!(action, GateAction::Allow);

        // Call the instance that was polled ready.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move { inner.call(req).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccessConfig;
    use axum::{http::StatusCode, routing::get, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/dashboard", get(|| async { "dashboard" }))
            .route("/signin", get(|| async { "signin" }))
            .route("/about", get(|| async { "about" }))
            .layer(SessionGateLayer::new(
                SessionGate::new(&AccessConfig::default()),
                "__session",
            ))
    }

    async fn send(uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header("Cookie", cookie);
        }
        app().oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
    }

    fn location(response: &Response) -> &str {
        response.headers()["location"].to_str().unwrap()
    }

    #[tokio::test]
    async fn test_protected_page_without_cookie_redirects_to_sign_in() {
        let response = send("/dashboard", None).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/signin?next=%2Fdashboard");
    }

    #[tokio::test]
    async fn test_protected_page_with_cookie_passes() {
        let response = send("/dashboard", Some("__session=opaque")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_sign_in_with_cookie_redirects_to_next() {
        let response = send("/signin?next=%2Fngo%2Frequests", Some("__session=opaque")).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/ngo/requests");
    }

    #[tokio::test]
    async fn test_sign_in_with_cookie_ignores_offsite_next() {
        let response = send(
            "/signin?next=https%3A%2F%2Fevil.example",
            Some("__session=opaque"),
        )
        .await;
        assert_eq!(location(&response), "/dashboard");
    }

    #[tokio::test]
    async fn test_public_page_passes_either_way() {
        assert_eq!(send("/about", None).await.status(), StatusCode::OK);
        assert_eq!(
            send("/about", Some("__session=opaque")).await.status(),
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_encoded_protected_path_is_gated() {
        for uri in ["/%64ashboard", "/./dashboard", "/about/../dashboard"] {
            let response = send(uri, None).await;
            assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{uri}");
            assert_eq!(location(&response), "/signin?next=%2Fdashboard");
        }
    }

    // Forgets readiness on clone, so only the polled instance answers 200.
    #[derive(Default)]
    struct ReadyTracking {
        ready: bool,
    }

    impl Clone for ReadyTracking {
        fn clone(&self) -> Self {
            Self { ready: false }
        }
    }

    impl Service<Request<Body>> for ReadyTracking {
        type Response = Response;
        type Error = std::convert::Infallible;
        type Future = std::future::Ready<Result<Response, Self::Error>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            self.ready = true;
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, _req: Request<Body>) -> Self::Future {
            let status = if self.ready {
                StatusCode::OK
            } else {
                StatusCode::SERVICE_UNAVAILABLE
            };
            std::future::ready(Ok(status.into_response()))
        }
    }

    #[tokio::test]
    async fn test_forwards_to_the_service_polled_ready() {
        let mut service = SessionGateLayer::new(SessionGate::new(&AccessConfig::default()), "__session")
            .layer(ReadyTracking::default());

        let request = Request::builder().uri("/about").body(Body::empty()).unwrap();
        let response = service.ready().await.unwrap().call(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_other_cookie_names_do_not_count() {
        let response = send("/dashboard", Some("access_token=opaque")).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    }
}
