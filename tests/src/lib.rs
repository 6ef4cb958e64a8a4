//! # Wallet Core Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── identity_flows.rs   # registration, lockout, sessions through the runtime container
//!     └── account_flows.rs    # derivation, signing, relay and extension payloads
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sw-tests
//! cargo test -p sw-tests integration::identity_flows
//! ```

pub mod integration;
