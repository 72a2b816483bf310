//! Route configuration for the MedLink server.

mod internal;
pub mod medications;
pub mod requests;

use crate::{
    config::INTERNAL_PREFIX,
    error::ApiError,
    middleware::{SessionGate, SessionGateLayer},
    state::AppState,
};
use axum::{
    routing::{get, patch},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Create the main application router.
///
/// Every request, matched or not, passes the session gate first; API routes
/// then do their own token verification and ownership checks.
pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    let common_middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::new(config.server.request_timeout()));

    let router = Router::new()
        .nest(&config.api.prefix, api_router())
        .nest(INTERNAL_PREFIX, internal::router());

    let router = match &config.pages.static_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "Serving pages from directory");
            router.fallback_service(ServeDir::new(dir))
        }
        None => router.fallback(fallback_handler),
    };

    router
        .layer(SessionGateLayer::new(
            SessionGate::new(&config.access),
            config.auth.session_cookie.as_str(),
        ))
        .layer(common_middleware)
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/medications/:id", get(medications::get_medication))
        .route(
            "/medications/status/:id",
            patch(medications::update_medication_status),
        )
        .route("/requests/:id", get(requests::get_request))
        .route("/requests/status/:id", patch(requests::update_request_status))
}

async fn fallback_handler() -> ApiError {
    ApiError::NotFound("The requested resource was not found".to_string())
}
