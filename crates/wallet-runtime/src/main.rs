//! # Wallet Runtime
//!
//! Bootstrap for the wallet core.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, then `SW_*` environment overrides)
//! 2. Install tracing, then log any rejected overrides
//! 3. Validate the password HMAC secret is not default
//! 4. Wire the identity-access and account services
//! 5. Create the gatekeeper and report readiness

use anyhow::{Context, Result};
use sw_01_identity_access::IdentityApi;
use sw_02_externally_owned_accounts::AccountApi;
use tracing::{info, warn};
use wallet_runtime::{init_tracing, load_config, WalletContainer};

fn main() -> Result<()> {
    let (config, rejected) = load_config();
    init_tracing(&config.telemetry).context("failed to initialize tracing")?;
    for rejection in &rejected {
        rejection.log();
    }

    if let Err(e) = config.validate_for_production() {
        warn!(error = %e, "Configuration is not production ready");
    }

    let container = WalletContainer::new(&config).context("failed to build wallet services")?;
    let access_state = container
        .prepare_access()
        .context("failed to prepare the gatekeeper")?;

    info!(
        network = %container.accounts.network(),
        biometry = ?container.identity.biometry_kind(),
        access_state = ?access_state,
        "Wallet core ready"
    );
    Ok(())
}
