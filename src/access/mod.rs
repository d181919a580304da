// SPDX-License-Identifier: MPL-2.0
//! Role gate for request handlers.
//!
//! The gate is a pure predicate over a caller's role and an allowed role
//! set. A denial is returned as a structured [`Rejection`] carrying a
//! machine-readable reason and the HTTP status to answer with; the gate
//! itself never fails.
//!
//! ```
//! use edu_toast::access::{authorize, AccessDecision, DenyReason, Role};
//!
//! let allowed = [Role::Instructor, Role::Admin];
//!
//! assert!(authorize(Some(&Role::Admin), &allowed).is_allowed());
//!
//! match authorize(Some(&Role::Student), &allowed) {
//!     AccessDecision::Deny(rejection) => {
//!         assert_eq!(rejection.reason, DenyReason::Forbidden);
//!         assert_eq!(rejection.status_code(), 403);
//!     }
//!     AccessDecision::Allow => unreachable!(),
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagnostics::DiagnosticsHandle;

/// Role attached to an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Student,
    Instructor,
    Admin,
    /// A role the client does not know about; only matches itself.
    Other(String),
}

impl Role {
    /// Parses a role tag. Matching ignores ASCII case and surrounding whitespace.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let trimmed = tag.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "student" => Role::Student,
            "instructor" => Role::Instructor,
            "admin" => Role::Admin,
            _ => Role::Other(trimmed.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Role::Student => "student",
            Role::Instructor => "instructor",
            Role::Admin => "admin",
            Role::Other(tag) => tag,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable reason for a denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// No authenticated user on the request.
    Unauthenticated,
    /// Authenticated, but the role is not in the allowed set.
    Forbidden,
}

impl DenyReason {
    /// HTTP status code for this reason.
    #[must_use]
    pub fn status_code(self) -> u16 {
        match self {
            DenyReason::Unauthenticated => 401,
            DenyReason::Forbidden => 403,
        }
    }
}

/// Structured rejection returned to the client on deny.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    #[serde(rename = "error")]
    pub reason: DenyReason,
    pub message: String,
}

impl Rejection {
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.reason.status_code()
    }

    /// Serializes the rejection as the JSON response body.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Outcome of the role gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(Rejection),
}

impl AccessDecision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }

    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            AccessDecision::Allow => None,
            AccessDecision::Deny(rejection) => Some(rejection),
        }
    }
}

/// Returns whether `role` is one of `allowed`.
#[must_use]
pub fn is_allowed(role: &Role, allowed: &[Role]) -> bool {
    allowed.contains(role)
}

/// Decides whether a request from `user` (its role, if authenticated) may proceed.
#[must_use]
pub fn authorize(user: Option<&Role>, allowed: &[Role]) -> AccessDecision {
    match user {
        None => AccessDecision::Deny(Rejection {
            reason: DenyReason::Unauthenticated,
            message: "authentication required".to_string(),
        }),
        Some(role) if is_allowed(role, allowed) => AccessDecision::Allow,
        Some(role) => {
            tracing::debug!(%role, "role not permitted");
            AccessDecision::Deny(Rejection {
                reason: DenyReason::Forbidden,
                message: format!("role '{role}' is not permitted"),
            })
        }
    }
}

/// Same as [`authorize`], also recording denials to diagnostics.
#[must_use]
pub fn authorize_logged(
    user: Option<&Role>,
    allowed: &[Role],
    diagnostics: &DiagnosticsHandle,
) -> AccessDecision {
    let decision = authorize(user, allowed);
    if let Some(rejection) = decision.rejection() {
        diagnostics.log_access_denied(rejection.reason);
    }
    decision
}
