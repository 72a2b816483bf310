//! Middleware for the MedLink API server.

pub mod auth;
pub mod authz;
pub mod session;

pub use auth::{Claims, JwtVerifier, Principal, Role, Session, SessionVerifier, VerifyError};
pub use authz::{authorize, check_resource_access, AccessPolicy, Decision, DenyReason, Owned, ResourceKind};
pub use session::{GateAction, PathClass, SessionGate, SessionGateLayer, SessionGateMiddleware};
