//! Session authentication flag.
//!
//! This is a mock gate: `login` flips the flag without checking any
//! credential. Anything facing real users must put credential verification
//! in front of it.

use tracing::info;

/// Whether the current session is logged in. Starts logged out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthSession {
    authenticated: bool,
}

impl AuthSession {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            authenticated: false,
        }
    }

    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        self.authenticated
    }

    pub fn login(&mut self) {
        self.authenticated = true;
        info!("session logged in");
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
        info!("session logged out");
    }
}
