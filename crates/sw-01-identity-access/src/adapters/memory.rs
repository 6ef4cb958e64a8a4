//! In-memory repositories.
//!
//! Used by tests and by the runtime until a persistent store is plugged in.
//! Both can be switched offline to simulate a storage outage.

use crate::domain::gatekeeper::Gatekeeper;
use crate::domain::user::User;
use crate::ports::outbound::{GatekeeperRepository, UserRepository};
use parking_lot::RwLock;
use shared_crypto::constant_time_eq;
use shared_types::{GatekeeperId, RepositoryError, UserId};
use std::sync::atomic::{AtomicBool, Ordering};

fn check_online(offline: &AtomicBool, read: bool) -> Result<(), RepositoryError> {
    if !offline.load(Ordering::SeqCst) {
        return Ok(());
    }
    let reason = "store offline".to_string();
    Err(if read {
        RepositoryError::ReadFailed(reason)
    } else {
        RepositoryError::WriteFailed(reason)
    })
}

/// In-memory user store. The first saved user is the primary user.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
    offline: AtomicBool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn save(&self, user: &User) -> Result<(), RepositoryError> {
        check_online(&self.offline, false)?;
        let mut users = self.users.write();
        match users.iter_mut().find(|u| u.id() == user.id()) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        Ok(())
    }

    fn remove(&self, user: &User) -> Result<(), RepositoryError> {
        check_online(&self.offline, false)?;
        self.users.write().retain(|u| u.id() != user.id());
        Ok(())
    }

    fn primary_user(&self) -> Result<Option<User>, RepositoryError> {
        check_online(&self.offline, true)?;
        Ok(self.users.read().first().cloned())
    }

    fn find_by_encrypted_password(
        &self,
        encrypted_password: &str,
    ) -> Result<Option<User>, RepositoryError> {
        check_online(&self.offline, true)?;
        Ok(self
            .users
            .read()
            .iter()
            .find(|u| {
                constant_time_eq(u.encrypted_password().as_bytes(), encrypted_password.as_bytes())
            })
            .cloned())
    }

    fn next_id(&self) -> UserId {
        UserId::new()
    }
}

/// In-memory store for the single gatekeeper.
#[derive(Default)]
pub struct InMemoryGatekeeperRepository {
    gatekeeper: RwLock<Option<Gatekeeper>>,
    offline: AtomicBool,
}

impl InMemoryGatekeeperRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

impl GatekeeperRepository for InMemoryGatekeeperRepository {
    fn save(&self, gatekeeper: &Gatekeeper) -> Result<(), RepositoryError> {
        check_online(&self.offline, false)?;
        *self.gatekeeper.write() = Some(gatekeeper.clone());
        Ok(())
    }

    fn remove(&self, gatekeeper: &Gatekeeper) -> Result<(), RepositoryError> {
        check_online(&self.offline, false)?;
        let mut stored = self.gatekeeper.write();
        if stored.as_ref().map(Gatekeeper::id) == Some(gatekeeper.id()) {
            *stored = None;
        }
        Ok(())
    }

    fn gatekeeper(&self) -> Result<Option<Gatekeeper>, RepositoryError> {
        check_online(&self.offline, true)?;
        Ok(self.gatekeeper.read().clone())
    }

    fn next_id(&self) -> GatekeeperId {
        GatekeeperId::new()
    }
}
