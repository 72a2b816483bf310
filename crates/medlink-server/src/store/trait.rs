//! Document store trait definition.

use crate::domain::{
    DonationRequest, Medication, MedicationStatus, RequestStatus, StatusUpdate,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Store operation result.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Document {collection}/{id} not found")]
    NotFound { collection: &'static str, id: String },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
}

/// Document store backend.
///
/// Each update is a single write: the status fields and `updatedAt` change
/// together or not at all.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a medication by id.
    async fn medication(&self, id: &str) -> StoreResult<Option<Medication>>;

    /// Apply a status change to a medication.
    async fn update_medication_status(
        &self,
        id: &str,
        update: &StatusUpdate<MedicationStatus>,
        at: DateTime<Utc>,
    ) -> StoreResult<Medication>;

    /// Fetch a request by id.
    async fn request(&self, id: &str) -> StoreResult<Option<DonationRequest>>;

    /// Apply a status change to a request.
    async fn update_request_status(
        &self,
        id: &str,
        update: &StatusUpdate<RequestStatus>,
        at: DateTime<Utc>,
    ) -> StoreResult<DonationRequest>;
}
