//! # Domain Layer
//!
//! Policy, session and gatekeeper state machine plus password rules.
//! Pure logic: time is always passed in, nothing here performs I/O.

pub mod errors;
pub mod gatekeeper;
pub mod password;
pub mod policy;
pub mod session;
pub mod user;
