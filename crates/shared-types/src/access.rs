//! Authorization predicate and the route guard state machine.

use crate::models::{Profile, SessionSnapshot};
use crate::role::RoleSet;
use crate::routes;
use serde::{Deserialize, Serialize};

/// True iff a profile is present and its role is in `required`.
///
/// An absent profile never authorizes, even for an authenticated identity.
pub fn is_allowed(profile: Option<&Profile>, required: impl Into<RoleSet>) -> bool {
    let required = required.into();
    profile.is_some_and(|p| required.contains(p.role))
}

/// What a route demands of the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No session needed; the guard never runs.
    Public,
    /// Signed in with one of these roles.
    Roles(RoleSet),
}

/// Result of one guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardDecision {
    /// Session still resolving; show a neutral placeholder.
    Placeholder,
    /// Nobody signed in. `from` is the requested location, for post-login return.
    RedirectToLogin { from: String },
    /// Signed in but the role (or missing profile) does not qualify.
    RedirectToUnauthorized,
    Render,
}

impl GuardDecision {
    /// Path the guard navigates to, if any.
    pub fn redirect_path(&self) -> Option<String> {
        match self {
            GuardDecision::RedirectToLogin { from } => Some(routes::login_with_return(from)),
            GuardDecision::RedirectToUnauthorized => Some(routes::UNAUTHORIZED.to_string()),
            GuardDecision::Placeholder | GuardDecision::Render => None,
        }
    }
}

/// Decide what to do with a navigation to `requested` under `access`.
///
/// Loading wins over everything, then authentication, then role.
pub fn evaluate(session: &SessionSnapshot, access: &Access, requested: &str) -> GuardDecision {
    let required = match access {
        Access::Public => return GuardDecision::Render,
        Access::Roles(set) => *set,
    };

    if session.loading {
        return GuardDecision::Placeholder;
    }

    if session.identity.is_none() {
        return GuardDecision::RedirectToLogin {
            from: requested.to_string(),
        };
    }

    if !is_allowed(session.profile.as_ref(), required) {
        return GuardDecision::RedirectToUnauthorized;
    }

    GuardDecision::Render
}
