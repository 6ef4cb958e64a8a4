//! # Wallet Runtime Library
//!
//! Exposes configuration, telemetry and the service container so the
//! bootstrap binary and the integration tests build the wallet the same way.

pub mod container;
pub mod telemetry;

pub use container::{load_config, ConfigError, RejectedOverride, WalletConfig, WalletContainer};
pub use telemetry::{init_tracing, TelemetryError};
