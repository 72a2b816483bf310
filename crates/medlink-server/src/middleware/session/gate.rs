//! Path classification and the session gate decision.
//!
//! The gate only looks at whether a session cookie is present. Verifying the
//! token is left to handlers that need the principal, so every request pays
//! for a string comparison and nothing more.

use crate::config::AccessConfig;
use url::form_urlencoded;

/// Classification of a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Requires a session.
    Protected,
    /// Must not be visited with a session.
    AuthOnly,
    /// No constraint.
    Public,
}

/// What the gate decided for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateAction {
    Allow,
    /// Send the visitor to sign in, remembering where they were going.
    RedirectToSignIn { next: Option<String> },
    /// Send an already signed-in visitor away from an auth page.
    RedirectToDefault { target: String },
}

/// Route access policy built from [`AccessConfig`].
#[derive(Debug, Clone)]
pub struct SessionGate {
    protected_prefixes: Vec<String>,
    auth_only_paths: Vec<String>,
    sign_in_path: String,
    default_landing_path: String,
}

impl SessionGate {
    /// Build the gate. The config is expected to have passed
    /// [`validate_access`](crate::config::validate_access).
    pub fn new(config: &AccessConfig) -> Self {
        Self {
            protected_prefixes: config.protected_path_prefixes.clone(),
            auth_only_paths: config.auth_only_paths.clone(),
            sign_in_path: config.sign_in_path.clone(),
            default_landing_path: config.default_landing_path.clone(),
        }
    }

    pub fn classify(&self, path: &str) -> PathClass {
        if self
            .protected_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
        {
            PathClass::Protected
        } else if self.auth_only_paths.iter().any(|auth| auth == path) {
            PathClass::AuthOnly
        } else {
            PathClass::Public
        }
    }

    /// Decide what happens to a request. Pure: equal inputs give equal outputs.
    pub fn decide(&self, path: &str, has_session: bool, requested_next: Option<&str>) -> GateAction {
        match (self.classify(path), has_session) {
            (PathClass::Protected, false) => {
                let next = requested_next
                    .map(str::to_string)
                    .or_else(|| (path != "/").then(|| path.to_string()));
                GateAction::RedirectToSignIn { next }
            }
            (PathClass::AuthOnly, true) => GateAction::RedirectToDefault {
                target: requested_next
                    .unwrap_or(&self.default_landing_path)
                    .to_string(),
            },
            _ => GateAction::Allow,
        }
    }

    /// `Location` for a redirect action; `None` for [`GateAction::Allow`].
    pub fn location(&self, action: &GateAction) -> Option<String> {
        match action {
            GateAction::Allow => None,
            GateAction::RedirectToSignIn { next: None } => Some(self.sign_in_path.clone()),
            GateAction::RedirectToSignIn { next: Some(next) } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("next", next)
                    .finish();
                Some(format!("{}?{}", self.sign_in_path, query))
            }
            GateAction::RedirectToDefault { target } => Some(encode_location(target)),
        }
    }
}

/// Canonical form of a request path, as a file server would resolve it.
///
/// Percent escapes are decoded, empty and `.` segments dropped and `..`
/// applied, so `/%64ashboard` and `/./dashboard//` both become `/dashboard`.
/// Classification must run on this form, never on the raw path.
pub fn canonical_path(raw: &str) -> String {
    let decoded = urlencoding::decode_binary(raw.as_bytes());
    let decoded = String::from_utf8_lossy(&decoded);

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    format!("/{}", segments.join("/"))
}

// Escape bytes that are not allowed verbatim in a `Location` header.
fn encode_location(target: &str) -> String {
    let mut encoded = String::with_capacity(target.len());
    for &byte in target.as_bytes() {
        let verbatim = byte.is_ascii_graphic()
            && !matches!(byte, b'"' | b'<' | b'>' | b'\\' | b'^' | b'`' | b'{' | b'|' | b'}');
        if verbatim {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

/// Accept a `next` destination only if it stays on this site.
///
/// Absolute URLs, protocol-relative `//host` values and backslash tricks are
/// dropped so a crafted link cannot bounce a visitor off-site after sign-in.
pub fn same_site_next(raw: &str) -> Option<&str> {
    let stays_local = raw.starts_with('/')
        && !raw.starts_with("//")
        && !raw.contains('\\')
        && !raw.chars().any(char::is_control);

    stays_local.then_some(raw)
}

/// Pull the `next` query parameter out of a raw query string.
pub fn requested_next(query: Option<&str>) -> Option<String> {
    let query = query?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "next")
        .map(|(_, value)| value.into_owned())
        .filter(|value| same_site_next(value).is_some())
}
