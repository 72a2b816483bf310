//! Request data transfer objects.

use crate::{
    domain::{MedicationStatus, RequestStatus, StatusParseError, StatusUpdate},
    error::{ApiError, ApiResult},
};
use serde::Deserialize;
use std::str::FromStr;
use validator::Validate;

/// Body of `PATCH /medications/status/{id}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MedicationStatusRequest {
    #[validate(length(min = 1, max = 32))]
    pub status: String,
    #[validate(length(max = 1000))]
    pub reason: Option<String>,
    #[validate(length(max = 64))]
    pub tracking_number: Option<String>,
}

impl MedicationStatusRequest {
    /// Validate the body and turn it into a typed update.
    pub fn into_update(self) -> ApiResult<StatusUpdate<MedicationStatus>> {
        self.validate()?;
        Ok(StatusUpdate {
            status: parse_status(&self.status)?,
            reason: non_blank(self.reason),
            tracking_number: non_blank(self.tracking_number),
        })
    }
}

/// Body of `PATCH /requests/status/{id}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RequestStatusRequest {
    #[validate(length(min = 1, max = 32))]
    pub status: String,
    #[validate(length(max = 1000))]
    pub reason: Option<String>,
}

impl RequestStatusRequest {
    /// Validate the body and turn it into a typed update.
    pub fn into_update(self) -> ApiResult<StatusUpdate<RequestStatus>> {
        self.validate()?;
        Ok(StatusUpdate {
            status: parse_status(&self.status)?,
            reason: non_blank(self.reason),
            tracking_number: None,
        })
    }
}

fn parse_status<S>(raw: &str) -> ApiResult<S>
where
    S: FromStr<Err = StatusParseError>,
{
    raw.trim()
        .parse()
        .map_err(|err: StatusParseError| ApiError::BadRequest(err.to_string()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn medication_body(value: serde_json::Value) -> MedicationStatusRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_medication_update_from_camel_case_body() {
        let update = medication_body(json!({
            "status": "shipped",
            "reason": "  Picked up by courier ",
            "trackingNumber": "TRK-9"
        }))
        .into_update()
        .unwrap();

        assert_eq!(update.status, MedicationStatus::Shipped);
        assert_eq!(update.reason.as_deref(), Some("Picked up by courier"));
        assert_eq!(update.tracking_number.as_deref(), Some("TRK-9"));
    }

    #[test]
    fn test_blank_optional_fields_become_none() {
        let update = medication_body(json!({ "status": "approved", "reason": "   " }))
            .into_update()
            .unwrap();

        assert_eq!(update.reason, None);
        assert_eq!(update.tracking_number, None);
    }

    #[test]
    fn test_unknown_status_is_bad_request() {
        let err = medication_body(json!({ "status": "teleported" }))
            .into_update()
            .unwrap_err();

        assert!(matches!(err, ApiError::BadRequest(ref m) if m.contains("teleported")));
    }

    #[test]
    fn test_empty_status_fails_validation() {
        let err = medication_body(json!({ "status": "" })).into_update().unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m.contains("status")));
    }

    #[test]
    fn test_request_update_ignores_tracking() {
        let body: RequestStatusRequest =
            serde_json::from_value(json!({ "status": "approved", "trackingNumber": "x" })).unwrap();
        let update = body.into_update().unwrap();

        assert_eq!(update.status, RequestStatus::Approved);
        assert_eq!(update.tracking_number, None);
    }
}
