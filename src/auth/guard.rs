//! Access decisions for guarded views.
//!
//! A route is guarded by a [`RoutePolicy`]: the set of roles allowed to see
//! it. Anonymous visitors go to the login page; signed-in users without a
//! permitted role go home.

use super::session::{Role, UserSession};

/// Where a refused request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Home,
}

impl Redirect {
    pub fn path(&self) -> &'static str {
        match self {
            Redirect::Login => "/login",
            Redirect::Home => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(Redirect),
}

/// Roles permitted to render a view. `None` admits any signed-in role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutePolicy {
    permitted: Option<Vec<Role>>,
}

impl RoutePolicy {
    pub fn signed_in() -> Self {
        Self { permitted: None }
    }

    pub fn only(role: Role) -> Self {
        Self { permitted: Some(vec![role]) }
    }

    pub fn any_of(roles: &[Role]) -> Self {
        Self { permitted: Some(roles.to_vec()) }
    }

    /// Combine the single-role and role-list guard forms into one policy.
    /// When both are given, only roles satisfying both are permitted.
    pub fn from_parts(required: Option<Role>, allowed: Option<&[Role]>) -> Self {
        let permitted = match (required, allowed) {
            (None, None) => None,
            (Some(role), None) => Some(vec![role]),
            (None, Some(roles)) => Some(roles.to_vec()),
            (Some(role), Some(roles)) => {
                Some(roles.iter().copied().filter(|r| *r == role).collect())
            }
        };
        Self { permitted }
    }

    pub fn permits(&self, role: Role) -> bool {
        match &self.permitted {
            None => true,
            Some(roles) => roles.contains(&role),
        }
    }
}

pub fn decide(session: &UserSession, policy: &RoutePolicy) -> GuardDecision {
    match session.role() {
        None => GuardDecision::Redirect(Redirect::Login),
        Some(role) if policy.permits(role) => GuardDecision::Render,
        Some(_) => GuardDecision::Redirect(Redirect::Home),
    }
}

/// Guard check in the `(role?, allowedRoles?)` shape used by route tables.
pub fn check(session: &UserSession, required: Option<Role>, allowed: Option<&[Role]>) -> GuardDecision {
    decide(session, &RoutePolicy::from_parts(required, allowed))
}
