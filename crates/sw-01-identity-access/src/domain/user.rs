//! The primary (and only) device user.

use serde::{Deserialize, Serialize};
use shared_types::{SessionId, UserId};
use std::fmt;

/// A registered user. Only the encrypted form of the password is held.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    encrypted_password: String,
    session_id: Option<SessionId>,
}

impl User {
    pub fn new(id: UserId, encrypted_password: String) -> Self {
        Self {
            id,
            encrypted_password,
            session_id: None,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn encrypted_password(&self) -> &str {
        &self.encrypted_password
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session_id
    }

    pub fn update_password(&mut self, encrypted_password: String) {
        self.encrypted_password = encrypted_password;
    }

    /// Bind the user to the session issued by the gatekeeper.
    pub fn attach_session(&mut self, session_id: SessionId) {
        self.session_id = Some(session_id);
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("encrypted_password", &"<redacted>")
            .field("session_id", &self.session_id)
            .finish()
    }
}
