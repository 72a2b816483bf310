//! Resource-level authorization.

use super::audit::log_authz;
use crate::{error::ApiError, middleware::auth::types::Principal};

/// A document with an owning principal.
pub trait Owned {
    /// Identifier of the owning principal, if the document records one.
    fn owner_id(&self) -> Option<&str>;
}

/// Why access was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// Authenticated, but neither the owner nor an admin.
    Forbidden,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forbidden => "forbidden",
        }
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Ownership gate: the owner or an admin may act on the resource.
pub fn authorize<R: Owned + ?Sized>(principal: &Principal, resource: &R) -> Decision {
    let owns = resource.owner_id() == Some(principal.id.as_str());

    if owns || principal.is_admin() {
        Decision::Allowed
    } else {
        Decision::Denied(DenyReason::Forbidden)
    }
}

/// Policy for resource access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Owner or admin.
    OwnerOrAdmin,
    /// Any authenticated principal.
    Authenticated,
}

impl AccessPolicy {
    /// Policy for document reads, driven by `access.require_ownership_on_read`.
    pub fn for_reads(require_ownership: bool) -> Self {
        if require_ownership {
            Self::OwnerOrAdmin
        } else {
            Self::Authenticated
        }
    }

    pub fn check<R: Owned + ?Sized>(&self, principal: &Principal, resource: &R) -> Decision {
        match self {
            Self::OwnerOrAdmin => authorize(principal, resource),
            Self::Authenticated => Decision::Allowed,
        }
    }
}

/// Kinds of guarded documents, used for messages and audit records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Medication,
    Request,
}

impl ResourceKind {
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Medication => "medication",
            Self::Request => "request",
        }
    }

    /// Message for a missing document, e.g. "Medication not found".
    pub fn not_found_message(&self) -> String {
        match self {
            Self::Medication => "Medication not found".to_string(),
            Self::Request => "Request not found".to_string(),
        }
    }

    /// Message for a refused document. Never includes document contents.
    pub fn forbidden_message(&self) -> String {
        format!("You do not have access to this {}", self.noun())
    }
}

/// Apply a policy, audit the decision and map a denial to `Forbidden`.
pub fn check_resource_access<R: Owned + ?Sized>(
    principal: &Principal,
    resource: &R,
    kind: ResourceKind,
    resource_id: &str,
    policy: AccessPolicy,
) -> Result<(), ApiError> {
    let decision = policy.check(principal, resource);
    log_authz(principal, kind, resource_id, policy, decision);

    match decision {
        Decision::Allowed => Ok(()),
        Decision::Denied(_) => Err(ApiError::Forbidden(kind.forbidden_message())),
    }
}
