//! Documents guarded by the ownership gate.

pub mod record;
pub mod status;
pub mod timestamp;

pub use record::{DonationRequest, Medication, Record, RecordView, StatusUpdate};
pub use status::{MedicationStatus, RequestStatus, StatusParseError};
pub use timestamp::{iso_or_now, StoredTimestamp};
