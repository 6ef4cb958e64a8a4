//! # Key Derivation
//!
//! mnemonic → seed → BIP44 private key → compressed public key → address.
//!
//! Accounts live on `m/44'/<coin>'/0'/0/<index>` with coin type 60 on
//! mainnet and 1 on test networks. The seed uses an empty passphrase.

use crate::domain::entities::{Address, Mnemonic, PrivateKey, PublicKey};
use crate::domain::errors::{AccountError, AccountResult};
use bip32::{DerivationPath, XPrv};
use bip39::Language;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

/// Word count of every generated mnemonic.
pub const MNEMONIC_WORD_COUNT: usize = 12;

/// 128 bits of entropy encode a 12-word mnemonic.
const MNEMONIC_ENTROPY_BYTES: usize = 16;

/// Network whose BIP44 coin type is used for derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub fn coin_type(&self) -> u32 {
        match self {
            Network::Mainnet => 60,
            Network::Testnet => 1,
        }
    }

    /// `m/44'/<coin>'/0'/0/<index>`
    pub fn derivation_path(&self, index: u32) -> String {
        format!("m/44'/{}'/0'/0/{}", self.coin_type(), index)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" | "rinkeby" | "ropsten" | "kovan" => Ok(Network::Testnet),
            other => Err(format!("unknown network: {other}")),
        }
    }
}

/// Fresh 12-word English mnemonic from the OS random source.
pub fn generate_mnemonic() -> AccountResult<Mnemonic> {
    let mut entropy = Zeroizing::new([0u8; MNEMONIC_ENTROPY_BYTES]);
    rand::rngs::OsRng.fill_bytes(&mut entropy[..]);
    let mnemonic =
        bip39::Mnemonic::from_entropy(&entropy[..]).map_err(|_| AccountError::InvalidMnemonic)?;
    Ok(Mnemonic::new(
        mnemonic.words().map(str::to_string).collect(),
    ))
}

/// Parse and checksum-verify an English phrase.
pub fn parse_mnemonic(phrase: &str) -> AccountResult<Mnemonic> {
    let mnemonic = bip39::Mnemonic::parse_in_normalized(Language::English, phrase)
        .map_err(|_| AccountError::InvalidMnemonic)?;
    Ok(Mnemonic::new(
        mnemonic.words().map(str::to_string).collect(),
    ))
}

/// Private key of the first account (index 0).
pub fn derive_private_key(mnemonic: &Mnemonic, network: Network) -> AccountResult<PrivateKey> {
    derive_private_key_at(mnemonic, network, 0)
}

/// Private key at `index` on the network's BIP44 path.
pub fn derive_private_key_at(
    mnemonic: &Mnemonic,
    network: Network,
    index: u32,
) -> AccountResult<PrivateKey> {
    let phrase = mnemonic.phrase();
    let parsed = bip39::Mnemonic::parse_in_normalized(Language::English, phrase.as_str())
        .map_err(|_| AccountError::InvalidMnemonic)?;
    let seed = Zeroizing::new(parsed.to_seed(""));

    let path = DerivationPath::from_str(&network.derivation_path(index))
        .map_err(|_| AccountError::InvalidPrivateKey)?;
    let xprv = XPrv::derive_from_path(&seed[..], &path)
        .map_err(|_| AccountError::InvalidPrivateKey)?;
    let bytes = Zeroizing::new(xprv.to_bytes());
    PrivateKey::from_bytes(*bytes)
}

/// Compressed public key of `private_key`.
pub fn derive_public_key(private_key: &PrivateKey) -> AccountResult<PublicKey> {
    Ok(PublicKey::from_inner(private_key.key_pair()?.public_key()))
}

/// Last 20 bytes of keccak256 over the uncompressed point (without 0x04).
pub fn derive_address(public_key: &PublicKey) -> AccountResult<Address> {
    public_key
        .inner()
        .ethereum_address()
        .map(Address::from_bytes)
        .map_err(|_| AccountError::InvalidPublicKey)
}
