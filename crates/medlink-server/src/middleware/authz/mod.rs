//! Resource ownership authorization.

pub mod audit;
pub mod resource;

pub use audit::{log_authz, AuthzAuditEvent};
pub use resource::{
    authorize, check_resource_access, AccessPolicy, Decision, DenyReason, Owned, ResourceKind,
};
