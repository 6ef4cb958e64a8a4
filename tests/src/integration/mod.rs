//! Cross-crate scenarios, wired through `wallet_runtime::WalletContainer`.

pub mod account_flows;
pub mod identity_flows;
