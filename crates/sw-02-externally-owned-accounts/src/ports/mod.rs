//! # Ports Layer
//!
//! - **Inbound (Driving)**: account API used by the wallet UI and the Safe flow
//! - **Outbound (Driven)**: secure key storage

pub mod inbound;
pub mod outbound;
