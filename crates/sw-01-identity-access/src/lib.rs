//! # Identity & Access Subsystem (SW-01)
//!
//! Guards the wallet behind a master password or biometrics, keeps the
//! user's session alive for a bounded time and blocks authentication after
//! repeated failures.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): policy, session, gatekeeper state machine, password rules
//! - **Ports Layer** (`ports/`): `IdentityApi` and the storage / encryption / biometric SPIs
//! - **Adapters Layer** (`adapters/`): in-memory repositories, HMAC encryption, scriptable biometrics
//! - **Service Layer** (`service.rs`): `IdentityService`, wiring domain logic to ports
//!
//! ## Security Notes
//!
//! - Passwords are only ever handled in encrypted form past validation
//! - Blocked attempts are refused before the password is looked at
//! - Storage and hardware failures propagate; they never count as a wrong password

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::{
    HmacEncryptionService, InMemoryGatekeeperRepository, InMemoryUserRepository,
    MockBiometricService,
};
pub use domain::errors::{
    BiometricError, EncryptionError, GatekeeperError, IdentityError, IdentityResult,
    PasswordError, PolicyError, SessionError,
};
pub use domain::gatekeeper::{Gatekeeper, GatekeeperState};
pub use domain::password::{validate_password, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
pub use domain::policy::{
    AuthenticationPolicy, DEFAULT_BLOCK_DURATION, DEFAULT_MAX_FAILED_ATTEMPTS,
    DEFAULT_SESSION_DURATION, MIN_SESSION_DURATION,
};
pub use domain::session::Session;
pub use domain::user::User;
pub use ports::inbound::IdentityApi;
pub use ports::outbound::{
    BiometricAuthenticationService, BiometryKind, EncryptionService, GatekeeperRepository,
    UserRepository,
};
pub use service::IdentityService;
