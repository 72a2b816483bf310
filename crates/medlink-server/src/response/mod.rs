//! Response types.

use serde::Serialize;

/// Acknowledgement returned by mutating endpoints: `{"success": true}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
