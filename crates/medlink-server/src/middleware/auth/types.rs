//! Authentication types.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Session token claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal ID).
    pub sub: String,
    /// Principal email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role claim, if the identity authority assigned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Create claims valid for `expires_in` seconds from now.
    pub fn new(sub: impl Into<String>, role: Option<Role>, expires_in: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: sub.into(),
            email: None,
            role: role.map(|r| r.as_str().to_string()),
            iat: now,
            exp: now + expires_in,
        }
    }
}

/// Role claim values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Donor,
    Ngo,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Donor => "donor",
            Self::Ngo => "ngo",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "donor" => Ok(Self::Donor),
            "ngo" => Ok(Self::Ngo),
            "user" => Ok(Self::User),
            other => Err(other.to_string()),
        }
    }
}

/// Authenticated identity decoded from a verified session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl Principal {
    pub fn new(id: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            id: id.into(),
            email: None,
            role,
        }
    }

    /// Build from verified claims. Returns `None` when the subject is empty.
    ///
    /// An unrecognised role claim grants no role rather than rejecting the
    /// session.
    pub fn from_claims(claims: Claims) -> Option<Self> {
        if claims.sub.is_empty() {
            return None;
        }

        let role = claims.role.as_deref().and_then(|r| r.parse().ok());
        Some(Self {
            id: claims.sub,
            email: claims.email,
            role,
        })
    }

    /// Check if principal has the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}
