//! # Outbound Ports (Driven Ports / SPI)
//!
//! Collaborators the identity service depends on. All calls are synchronous;
//! an adapter wrapping asynchronous hardware blocks until it has an answer.

use crate::domain::errors::{BiometricError, EncryptionError};
use crate::domain::gatekeeper::Gatekeeper;
use crate::domain::user::User;
use serde::{Deserialize, Serialize};
use shared_types::{GatekeeperId, RepositoryError, UserId};

/// Persistence of the primary user.
pub trait UserRepository: Send + Sync {
    fn save(&self, user: &User) -> Result<(), RepositoryError>;

    fn remove(&self, user: &User) -> Result<(), RepositoryError>;

    fn primary_user(&self) -> Result<Option<User>, RepositoryError>;

    /// Look a user up by the output of [`EncryptionService::encrypted`].
    fn find_by_encrypted_password(
        &self,
        encrypted_password: &str,
    ) -> Result<Option<User>, RepositoryError>;

    fn next_id(&self) -> UserId;
}

/// Persistence of the device's single gatekeeper.
pub trait GatekeeperRepository: Send + Sync {
    fn save(&self, gatekeeper: &Gatekeeper) -> Result<(), RepositoryError>;

    fn remove(&self, gatekeeper: &Gatekeeper) -> Result<(), RepositoryError>;

    fn gatekeeper(&self) -> Result<Option<Gatekeeper>, RepositoryError>;

    fn next_id(&self) -> GatekeeperId;
}

/// One-way, deterministic password encryption. Equal inputs must give equal
/// outputs so stored passwords can be compared.
pub trait EncryptionService: Send + Sync {
    fn encrypted(&self, plain_text: &str) -> Result<String, EncryptionError>;
}

/// Kind of biometric sensor on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BiometryKind {
    #[default]
    None,
    TouchId,
    FaceId,
}

/// Device biometric capability.
pub trait BiometricAuthenticationService: Send + Sync {
    fn is_available(&self) -> bool;

    fn biometry_kind(&self) -> BiometryKind;

    /// Enrol the app for biometric unlock.
    fn activate(&self) -> Result<(), BiometricError>;

    /// Prompt the user. `Ok(false)` means the match was rejected.
    fn authenticate(&self) -> Result<bool, BiometricError>;
}
