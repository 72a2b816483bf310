//! Request handlers.

use crate::{
    domain::{RecordView, RequestStatus},
    error::{ApiError, ApiResult, ErrorContext, OptionExt},
    middleware::{check_resource_access, AccessPolicy, ResourceKind, Session},
    request::RequestStatusRequest,
    response::Ack,
    state::AppState,
    store::StoreError,
};
use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use tracing::info;

/// `GET /requests/{id}`
pub async fn get_request(
    State(state): State<AppState>,
    Session(principal): Session,
    Path(id): Path<String>,
) -> ApiResult<Json<RecordView<RequestStatus>>> {
    let request = state
        .store
        .request(&id)
        .await
        .context("Failed to load request")?
        .not_found(ResourceKind::Request.not_found_message())?;

    check_resource_access(
        &principal,
        &request,
        ResourceKind::Request,
        &id,
        state.read_policy(),
    )?;

    Ok(Json(request.view(Utc::now())))
}

/// `PATCH /requests/status/{id}`
///
/// Only the request's owner or an admin may change its status.
pub async fn update_request_status(
    State(state): State<AppState>,
    Session(principal): Session,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<RequestStatusRequest>, ApiError>,
) -> ApiResult<Json<Ack>> {
    let update = body.into_update()?;

    let request = state
        .store
        .request(&id)
        .await
        .context("Failed to load request")?
        .not_found(ResourceKind::Request.not_found_message())?;

    check_resource_access(
        &principal,
        &request,
        ResourceKind::Request,
        &id,
        AccessPolicy::OwnerOrAdmin,
    )?;

    state
        .store
        .update_request_status(&id, &update, Utc::now())
        .await
        .map_err(|err| match err {
            StoreError::NotFound { .. } => {
                ApiError::NotFound(ResourceKind::Request.not_found_message())
            }
            other => other.into(),
        })?;

    info!(
        request_id = %id,
        user_id = %principal.id,
        status = %update.status,
        "Request status updated"
    );

    Ok(Json(Ack::ok()))
}
