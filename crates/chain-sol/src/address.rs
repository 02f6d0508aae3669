//! Solana address parsing and formatting.
//!
//! An address is a Base58 string that decodes to exactly 32 bytes. Wallet
//! addresses are Ed25519 public keys; program-derived addresses are SHA-256
//! outputs that are deliberately off the curve (see [`crate::pda`]).

use crate::error::SolError;

/// Raw 32-byte Solana address.
pub type Pubkey = [u8; 32];

/// Decode a Base58 address string into its 32 raw bytes.
///
/// Surrounding whitespace is ignored; anything that is not Base58 or does
/// not decode to exactly 32 bytes is rejected.
pub fn parse_pubkey(address: &str) -> Result<Pubkey, SolError> {
    let bytes = bs58::decode(address.trim())
        .into_vec()
        .map_err(|e| SolError::InvalidAddress(format!("base58 decode failed: {e}")))?;

    bytes.try_into().map_err(|v: Vec<u8>| {
        SolError::InvalidAddress(format!("expected 32 bytes, got {}", v.len()))
    })
}

/// Encode 32 raw bytes as a Base58 address string.
pub fn pubkey_to_string(pubkey: &Pubkey) -> String {
    bs58::encode(pubkey).into_string()
}
