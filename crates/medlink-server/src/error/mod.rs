//! Error handling for the MedLink API server.

pub mod context;
pub mod response;
pub mod types;

pub use context::{ErrorContext, OptionExt};
pub use types::{ApiError, ApiResult};
