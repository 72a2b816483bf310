//! Medication handlers.

use crate::{
    domain::{MedicationStatus, RecordView},
    error::{ApiError, ApiResult, ErrorContext, OptionExt},
    middleware::{check_resource_access, AccessPolicy, ResourceKind, Session},
    request::MedicationStatusRequest,
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

/// `GET /medications/{id}`
pub async fn get_medication(
    State(state): State<AppState>,
    Session(principal): Session,
    Path(id): Path<String>,
) -> ApiResult<Json<RecordView<MedicationStatus>>> {
    let medication = state
        .store
        .medication(&id)
        .await
        .context("Failed to load medication")?
        .not_found(ResourceKind::Medication.not_found_message())?;

    check_resource_access(
        &principal,
        &medication,
        ResourceKind::Medication,
        &id,
        state.read_policy(),
    )?;

    Ok(Json(medication.view(Utc::now())))
}

/// `PATCH /medications/status/{id}`
///
/// Only the listing's donor or an admin may change its status.
pub async fn update_medication_status(
    State(state): State<AppState>,
    Session(principal): Session,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<MedicationStatusRequest>, ApiError>,
) -> ApiResult<Json<Ack>> {
    let update = body.into_update()?;

    let medication = state
        .store
        .medication(&id)
        .await
        .context("Failed to load medication")?
        .not_found(ResourceKind::Medication.not_found_message())?;

    check_resource_access(
        &principal,
        &medication,
        ResourceKind::Medication,
        &id,
        AccessPolicy::OwnerOrAdmin,
    )?;

    state
        .store
        .update_medication_status(&id, &update, Utc::now())
        .await
        .map_err(|err| match err {
            StoreError::NotFound { .. } => {
                ApiError::NotFound(ResourceKind::Medication.not_found_message())
            }
            other => other.into(),
        })?;

    info!(
        medication_id = %id,
        user_id = %principal.id,
        status = %update.status,
        "Medication status updated"
    );

    Ok(Json(Ack::ok()))
}
