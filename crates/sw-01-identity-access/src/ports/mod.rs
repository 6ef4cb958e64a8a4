//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that the UI layer uses
//! - **Outbound (Driven)**: Storage, encryption and biometric collaborators

pub mod inbound;
pub mod outbound;
