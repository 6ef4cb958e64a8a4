//! # Adapters Layer
//!
//! Implementations of the outbound ports.

mod biometric;
mod encryption;
mod memory;

pub use biometric::MockBiometricService;
pub use encryption::HmacEncryptionService;
pub use memory::{InMemoryGatekeeperRepository, InMemoryUserRepository};
