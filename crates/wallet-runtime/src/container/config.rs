//! # Wallet Configuration
//!
//! Unified configuration for the wallet services and runtime parameters.
//!
//! ## Security Requirements
//!
//! - `password_hmac_secret` MUST NOT be the default zero value in production
//! - All durations and limits have sane defaults with override capability
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SW_PASSWORD_HMAC_SECRET` | zero | 32-byte password HMAC secret (64 hex chars) |
//! | `SW_SESSION_DURATION_SECS` | `300` | Session length |
//! | `SW_MAX_FAILED_ATTEMPTS` | `5` | Failures before access is blocked |
//! | `SW_BLOCK_DURATION_SECS` | `15` | How long access stays blocked |
//! | `SW_NETWORK` | `mainnet` | Derivation network (`mainnet`, `testnet`, ...) |
//! | `SW_LOG_LEVEL` | `info` | Log level filter |
//! | `SW_JSON_LOGS` | `false` | JSON formatted logs |

use std::time::Duration;
use sw_01_identity_access::{
    AuthenticationPolicy, PolicyError, DEFAULT_BLOCK_DURATION, DEFAULT_MAX_FAILED_ATTEMPTS,
    DEFAULT_SESSION_DURATION,
};
use sw_02_externally_owned_accounts::Network;
use thiserror::Error;
use tracing::warn;

/// Complete wallet configuration.
#[derive(Debug, Clone, Default)]
pub struct WalletConfig {
    pub security: SecurityConfig,
    pub authentication: AuthenticationConfig,
    pub accounts: AccountsConfig,
    pub telemetry: TelemetryConfig,
}

impl WalletConfig {
    /// Validate configuration for production readiness.
    ///
    /// # Errors
    /// * `InsecurePasswordSecret` - the HMAC secret is the default zero value
    /// * `InvalidPolicy` - the authentication thresholds do not form a policy
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        if self.security.password_hmac_secret == [0u8; 32] {
            return Err(ConfigError::InsecurePasswordSecret);
        }
        self.authentication.policy()?;
        Ok(())
    }

    /// Apply `SW_*` overrides read through `lookup`.
    ///
    /// Malformed values leave the current setting untouched and are returned
    /// so the caller can log them once tracing is installed.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Vec<RejectedOverride>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut rejected = Vec::new();

        if let Some(secret_hex) = lookup("SW_PASSWORD_HMAC_SECRET") {
            let mut secret = [0u8; 32];
            match hex::decode_to_slice(secret_hex.trim(), &mut secret) {
                Ok(()) => self.security.password_hmac_secret = secret,
                Err(_) => rejected.push(RejectedOverride {
                    variable: "SW_PASSWORD_HMAC_SECRET",
                    value: "<redacted>".to_string(),
                }),
            }
        }

        if let Some(secs) = parse_var(&lookup, "SW_SESSION_DURATION_SECS", &mut rejected) {
            self.authentication.session_duration_secs = secs;
        }
        if let Some(attempts) = parse_var(&lookup, "SW_MAX_FAILED_ATTEMPTS", &mut rejected) {
            self.authentication.max_failed_attempts = attempts;
        }
        if let Some(secs) = parse_var(&lookup, "SW_BLOCK_DURATION_SECS", &mut rejected) {
            self.authentication.block_duration_secs = secs;
        }
        if let Some(network) = parse_var(&lookup, "SW_NETWORK", &mut rejected) {
            self.accounts.network = network;
        }
        rejected.extend(self.telemetry.apply_overrides(&lookup));
        rejected
    }
}

/// An `SW_*` variable whose value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedOverride {
    pub variable: &'static str,
    pub value: String,
}

impl RejectedOverride {
    /// Report the rejection. Call after `init_tracing`.
    pub fn log(&self) {
        warn!(
            variable = self.variable,
            value = %self.value,
            "Ignoring malformed configuration value"
        );
    }
}

fn parse_var<F, T>(
    lookup: &F,
    name: &'static str,
    rejected: &mut Vec<RejectedOverride>,
) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            rejected.push(RejectedOverride {
                variable: name,
                value: raw,
            });
            None
        }
    }
}

/// Load configuration from defaults and the process environment.
///
/// Nothing is logged here: tracing is configured from the result, so the
/// rejected overrides are handed back to be logged afterwards.
pub fn load_config() -> (WalletConfig, Vec<RejectedOverride>) {
    let mut config = WalletConfig::default();
    let rejected = config.apply_overrides(|name| std::env::var(name).ok());
    (config, rejected)
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "SECURITY VIOLATION: password HMAC secret is default zero value. \
         Set SW_PASSWORD_HMAC_SECRET environment variable."
    )]
    InsecurePasswordSecret,

    #[error("Invalid authentication policy: {0}")]
    InvalidPolicy(#[from] PolicyError),
}

/// Security configuration.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Secret keying the password HMAC (32 bytes).
    /// MUST NOT be default in production.
    pub password_hmac_secret: [u8; 32],
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            password_hmac_secret: [0u8; 32], // MUST be overridden in production
        }
    }
}

/// Gatekeeper thresholds.
#[derive(Debug, Clone)]
pub struct AuthenticationConfig {
    pub session_duration_secs: u64,
    pub max_failed_attempts: u32,
    pub block_duration_secs: u64,
}

impl AuthenticationConfig {
    pub fn policy(&self) -> Result<AuthenticationPolicy, PolicyError> {
        AuthenticationPolicy::new(
            Duration::from_secs(self.session_duration_secs),
            self.max_failed_attempts,
            Duration::from_secs(self.block_duration_secs),
        )
    }
}

impl Default for AuthenticationConfig {
    fn default() -> Self {
        Self {
            session_duration_secs: DEFAULT_SESSION_DURATION.as_secs(),
            max_failed_attempts: DEFAULT_MAX_FAILED_ATTEMPTS,
            block_duration_secs: DEFAULT_BLOCK_DURATION.as_secs(),
        }
    }
}

/// Account derivation configuration.
#[derive(Debug, Clone, Default)]
pub struct AccountsConfig {
    pub network: Network,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Log level filter (trace, debug, info, warn, error).
    pub log_level: String,
    pub json_logs: bool,
}

impl TelemetryConfig {
    /// Apply `SW_LOG_LEVEL` and `SW_JSON_LOGS`.
    pub fn apply_overrides<F>(&mut self, lookup: &F) -> Vec<RejectedOverride>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut rejected = Vec::new();
        if let Some(level) = lookup("SW_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(json) = parse_var(lookup, "SW_JSON_LOGS", &mut rejected) {
            self.json_logs = json;
        }
        rejected
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
