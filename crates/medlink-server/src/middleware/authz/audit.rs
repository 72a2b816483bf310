//! Authorization audit logging.

use super::resource::{AccessPolicy, Decision, ResourceKind};
use crate::middleware::auth::types::Principal;
use chrono::{DateTime, Utc};
use tracing::info;

/// Authorization audit event.
#[derive(Debug)]
pub struct AuthzAuditEvent {
    pub timestamp: DateTime<Utc>,
    pub principal_id: String,
    pub role: Option<&'static str>,
    pub resource: &'static str,
    pub resource_id: String,
    pub policy: String,
    pub granted: bool,
    pub reason: Option<&'static str>,
}

impl AuthzAuditEvent {
    pub fn new(
        principal: &Principal,
        kind: ResourceKind,
        resource_id: &str,
        policy: AccessPolicy,
        decision: Decision,
    ) -> Self {
        let reason = match decision {
            Decision::Allowed => None,
            Decision::Denied(reason) => Some(reason.as_str()),
        };

        Self {
            timestamp: Utc::now(),
            principal_id: principal.id.clone(),
            role: principal.role.map(|r| r.as_str()),
            resource: kind.noun(),
            resource_id: resource_id.to_string(),
            policy: format!("{policy:?}"),
            granted: decision.is_allowed(),
            reason,
        }
    }

    pub fn log(&self) {
        if self.granted {
            info!(
                event = "authz_granted",
                principal_id = %self.principal_id,
                role = ?self.role,
                resource = self.resource,
                resource_id = %self.resource_id,
                policy = %self.policy,
                "Authorization granted"
            );
        } else {
            info!(
                event = "authz_denied",
                principal_id = %self.principal_id,
                role = ?self.role,
                resource = self.resource,
                resource_id = %self.resource_id,
                policy = %self.policy,
                reason = ?self.reason,
                "Authorization denied"
            );
        }
    }
}

/// Log authorization decision.
pub fn log_authz(
    principal: &Principal,
    kind: ResourceKind,
    resource_id: &str,
    policy: AccessPolicy,
    decision: Decision,
) {
    AuthzAuditEvent::new(principal, kind, resource_id, policy, decision).log();
}
