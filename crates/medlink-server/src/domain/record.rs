//! Medication and request documents.
//!
//! Only the fields the guards and status endpoints touch are typed; every
//! other document field is carried through untouched in `fields`.

use super::{
    status::{MedicationStatus, RequestStatus},
    timestamp::{iso_or_now, StoredTimestamp},
};
use crate::middleware::authz::Owned;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored document with an owner and a status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<S> {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor_id: Option<String>,
    #[serde(default)]
    pub status: S,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<StoredTimestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<StoredTimestamp>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A listed medication.
pub type Medication = Record<MedicationStatus>;

/// A recipient organization's request for a medication.
pub type DonationRequest = Record<RequestStatus>;

/// Fields written by a status change.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate<S> {
    pub status: S,
    pub reason: Option<String>,
    pub tracking_number: Option<String>,
}

impl<S: Copy> Record<S> {
    /// Apply a status change and stamp `updatedAt`.
    ///
    /// The reason always reflects the latest change, so a missing reason
    /// clears an old one. A tracking number, once set, survives later status
    /// changes that do not carry one.
    pub fn apply(&mut self, update: &StatusUpdate<S>, at: DateTime<Utc>) {
        self.status = update.status;
        self.status_reason = update.reason.clone();
        if let Some(tracking) = &update.tracking_number {
            self.tracking_number = Some(tracking.clone());
        }
        self.updated_at = Some(StoredTimestamp::native(at));
    }

    /// Outward representation with normalized timestamps.
    pub fn view(&self, now: DateTime<Utc>) -> RecordView<S> {
        RecordView {
            id: self.id.clone(),
            donor_id: self.donor_id.clone().unwrap_or_default(),
            status: self.status,
            status_reason: self.status_reason.clone(),
            tracking_number: self.tracking_number.clone(),
            created_at: iso_or_now(self.created_at.as_ref(), now),
            updated_at: iso_or_now(self.updated_at.as_ref(), now),
            fields: self.fields.clone(),
        }
    }
}

impl<S> Owned for Record<S> {
    fn owner_id(&self) -> Option<&str> {
        self.donor_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// JSON shape returned by read endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView<S> {
    pub id: String,
    pub donor_id: String,
    pub status: S,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}
