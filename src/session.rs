//! Session state: the signed-in identity, held in memory only.

use serde::{Deserialize, Serialize};

use crate::models::Role;

/// The authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub role: Role,
}

impl Session {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into().trim().to_string(),
            role,
        }
    }

    pub fn is_veterinarian(&self) -> bool {
        self.role == Role::Veterinarian
    }

    pub fn is_owner(&self) -> bool {
        self.role == Role::Owner
    }
}

/// Holder for the optional current session.
///
/// `login` overwrites unconditionally; credentials are checked by the
/// backend before a caller gets here.
#[derive(Debug, Default)]
pub struct SessionState {
    current: Option<Session>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    /// Returns `true` if the identity actually changed.
    pub fn login(&mut self, email: &str, role: Role) -> bool {
        let next = Session::new(email, role);
        let changed = self.current.as_ref() != Some(&next);
        tracing::info!(email = %next.email, role = %role, "Session started");
        self.current = Some(next);
        changed
    }

    /// Returns `true` if there was a session to clear.
    pub fn logout(&mut self) -> bool {
        match self.current.take() {
            Some(previous) => {
                tracing::info!(email = %previous.email, "Session ended");
                true
            }
            None => false,
        }
    }
}
