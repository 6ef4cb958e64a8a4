//! # Inbound Ports (Driving Ports / API)
//!
//! What the UI layer calls. The current time comes from the service's
//! injected `Clock`.

use crate::domain::errors::IdentityResult;
use crate::domain::gatekeeper::GatekeeperState;
use crate::domain::policy::AuthenticationPolicy;
use crate::ports::outbound::BiometryKind;
use shared_types::UserId;

/// Primary identity and access API.
pub trait IdentityApi: Send + Sync {
    /// Register the primary user and create a fresh gatekeeper.
    ///
    /// # Errors
    /// * `UserAlreadyRegistered` - a primary user exists
    /// * `Password` - the password breaks a format rule
    fn register_user(&self, password: &str) -> IdentityResult<UserId>;

    /// Authenticate with the master password.
    ///
    /// Returns `Ok(None)` when access is blocked (the password is not even
    /// checked) or when the password does not match.
    fn authenticate_user(&self, password: &str) -> IdentityResult<Option<UserId>>;

    /// Authenticate with the device's biometric sensor.
    ///
    /// A rejected match returns `Ok(None)` and is not counted as a failed
    /// attempt.
    fn authenticate_user_biometrically(&self) -> IdentityResult<Option<UserId>>;

    /// Whether the primary user holds the gatekeeper's active session.
    fn is_user_authenticated(&self) -> IdentityResult<bool>;

    /// Replace the master password.
    ///
    /// # Errors
    /// * `PrimaryUserNotFound` - nobody is registered
    /// * `Password` - the new password breaks a format rule
    fn update_primary_user_password(&self, new_password: &str) -> IdentityResult<()>;

    /// Extend the active session.
    fn renew_session(&self) -> IdentityResult<()>;

    /// End the active session.
    fn sign_out(&self) -> IdentityResult<()>;

    /// Current access state of the gatekeeper.
    fn access_state(&self) -> IdentityResult<GatekeeperState>;

    /// Apply a new policy to the existing gatekeeper.
    fn update_authentication_policy(&self, policy: AuthenticationPolicy) -> IdentityResult<()>;

    /// Remove the user and clear the gatekeeper's session and failure
    /// bookkeeping. The gatekeeper record itself is kept.
    fn reset_all(&self) -> IdentityResult<()>;

    fn is_biometry_available(&self) -> bool;

    fn biometry_kind(&self) -> BiometryKind;
}
