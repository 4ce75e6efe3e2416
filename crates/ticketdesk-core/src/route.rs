//! Route table and the navigation guard.
//!
//! Protected views (dashboard, ticket list, ticket detail) are only reachable
//! while the session is logged in. The guard keeps no state: every navigation
//! attempt is decided from the destination and the auth flag as they are at
//! that moment.

use crate::auth::AuthSession;
use crate::error::TicketError;
use crate::model::TicketId;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Which form the auth view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthMode {
    Login,
    Signup,
}

/// A navigable view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Route {
    Landing,
    Auth(AuthMode),
    Dashboard,
    Tickets,
    TicketDetail(TicketId),
}

impl Route {
    /// Where the guard sends logged-out visitors.
    pub const LOGIN: Self = Self::Auth(AuthMode::Login);

    /// Resolve a path such as `/tickets/7` to a route.
    pub fn parse(path: &str) -> Result<Self, TicketError> {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        let unknown = || TicketError::UnknownRoute(trimmed.to_string());

        match segments.as_slice() {
            [] => Ok(Self::Landing),
            ["auth", "login"] => Ok(Self::Auth(AuthMode::Login)),
            ["auth", "signup"] => Ok(Self::Auth(AuthMode::Signup)),
            ["dashboard"] => Ok(Self::Dashboard),
            ["tickets"] => Ok(Self::Tickets),
            ["tickets", id] => id
                .parse::<TicketId>()
                .map(Self::TicketDetail)
                .map_err(|_| unknown()),
            _ => Err(unknown()),
        }
    }

    /// Canonical path for this route.
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::Landing => "/".to_string(),
            Self::Auth(AuthMode::Login) => "/auth/login".to_string(),
            Self::Auth(AuthMode::Signup) => "/auth/signup".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Tickets => "/tickets".to_string(),
            Self::TicketDetail(id) => format!("/tickets/{id}"),
        }
    }

    /// The route's "requires authentication" marker.
    #[must_use]
    pub const fn requires_auth(self) -> bool {
        matches!(self, Self::Dashboard | Self::Tickets | Self::TicketDetail(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.path()
    }
}

/// The guard's two outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardState {
    Allowed,
    Redirected,
}

/// Allow unless the destination is protected and the session is logged out.
#[must_use]
pub const fn evaluate(requires_auth: bool, authenticated: bool) -> GuardState {
    if requires_auth && !authenticated {
        GuardState::Redirected
    } else {
        GuardState::Allowed
    }
}

/// Outcome of one navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum NavigationDecision {
    Allowed { to: Route },
    Redirected { from: Route, to: Route },
}

impl NavigationDecision {
    #[must_use]
    pub const fn state(&self) -> GuardState {
        match self {
            Self::Allowed { .. } => GuardState::Allowed,
            Self::Redirected { .. } => GuardState::Redirected,
        }
    }

    /// The route that ends up rendered.
    #[must_use]
    pub const fn destination(&self) -> Route {
        match self {
            Self::Allowed { to } | Self::Redirected { to, .. } => *to,
        }
    }

    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

/// Decide a navigation attempt to `destination` for the current session.
#[must_use]
pub fn guard(destination: Route, auth: &AuthSession) -> NavigationDecision {
    let decision = match evaluate(destination.requires_auth(), auth.is_authenticated()) {
        GuardState::Allowed => NavigationDecision::Allowed { to: destination },
        GuardState::Redirected => NavigationDecision::Redirected {
            from: destination,
            to: Route::LOGIN,
        },
    };
    debug!(to = %destination, outcome = ?decision.state(), "navigation guarded");
    decision
}
