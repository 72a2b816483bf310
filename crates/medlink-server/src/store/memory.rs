//! In-memory document store.

use super::r#trait::{DocumentStore, StoreError, StoreResult};
use crate::domain::{
    DonationRequest, Medication, MedicationStatus, Record, RequestStatus, StatusUpdate,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

const MEDICATIONS: &str = "medications";
const REQUESTS: &str = "requests";

/// Documents preloaded into a [`MemoryStore`], keyed by document id.
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub medications: HashMap<String, Medication>,
    #[serde(default)]
    pub requests: HashMap<String, DonationRequest>,
}

/// In-memory store backed by one concurrent map per collection.
#[derive(Default)]
pub struct MemoryStore {
    medications: DashMap<String, Medication>,
    requests: DashMap<String, DonationRequest>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given documents.
    pub fn from_seed(seed: SeedData) -> Self {
        let store = Self::new();
        for (id, medication) in seed.medications {
            store.insert_medication(id, medication);
        }
        for (id, request) in seed.requests {
            store.insert_request(id, request);
        }
        store
    }

    /// Create a store from a JSON seed file.
    pub async fn from_seed_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let seed: SeedData = serde_json::from_str(&raw)?;

        info!(
            path = %path.display(),
            medications = seed.medications.len(),
            requests = seed.requests.len(),
            "Seeded document store"
        );

        Ok(Self::from_seed(seed))
    }

    /// Insert or replace a medication; the map key wins over any `id` field.
    pub fn insert_medication(&self, id: impl Into<String>, mut medication: Medication) {
        let id = id.into();
        medication.id = id.clone();
        self.medications.insert(id, medication);
    }

    /// Insert or replace a request; the map key wins over any `id` field.
    pub fn insert_request(&self, id: impl Into<String>, mut request: DonationRequest) {
        let id = id.into();
        request.id = id.clone();
        self.requests.insert(id, request);
    }
}

fn fetch<S: Clone>(map: &DashMap<String, Record<S>>, id: &str) -> Option<Record<S>> {
    map.get(id).map(|entry| entry.value().clone())
}

// The entry guard holds the shard lock for the whole read-modify-write.
fn update<S: Copy>(
    map: &DashMap<String, Record<S>>,
    collection: &'static str,
    id: &str,
    update: &StatusUpdate<S>,
    at: DateTime<Utc>,
) -> StoreResult<Record<S>> {
    let mut entry = map.get_mut(id).ok_or_else(|| StoreError::NotFound {
        collection,
        id: id.to_string(),
    })?;

    entry.apply(update, at);
    debug!(collection, id, "Document status updated");

    Ok(entry.value().clone())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn medication(&self, id: &str) -> StoreResult<Option<Medication>> {
        Ok(fetch(&self.medications, id))
    }

    async fn update_medication_status(
        &self,
        id: &str,
        status: &StatusUpdate<MedicationStatus>,
        at: DateTime<Utc>,
    ) -> StoreResult<Medication> {
        update(&self.medications, MEDICATIONS, id, status, at)
    }

    async fn request(&self, id: &str) -> StoreResult<Option<DonationRequest>> {
        Ok(fetch(&self.requests, id))
    }

    async fn update_request_status(
        &self,
        id: &str,
        status: &StatusUpdate<RequestStatus>,
        at: DateTime<Utc>,
    ) -> StoreResult<DonationRequest> {
        update(&self.requests, REQUESTS, id, status, at)
    }
}
