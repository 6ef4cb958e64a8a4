//! # Domain Layer
//!
//! Key derivation, signing and signature bounds. No I/O; key storage is
//! reached only through the `SecureKeyStore` port.

pub mod bounds;
pub mod derivation;
pub mod entities;
pub mod errors;
pub mod extension_code;
pub mod safe_creation;
pub mod signing;
