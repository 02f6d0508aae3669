//! Ed25519 signing keypair in the Solana CLI layout.
//!
//! The Solana CLI stores a keypair as 64 bytes: the 32-byte secret seed
//! followed by the 32-byte public key.

use ed25519_dalek::{Signer, SigningKey};
use zeroize::Zeroize;

use crate::address::{pubkey_to_string, Pubkey};
use crate::error::SolError;

/// A signing keypair. The secret is wiped on drop by `ed25519-dalek`.
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Build a keypair from a 32-byte secret seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Build a keypair from the 64-byte `secret || public` layout.
    ///
    /// Fails if the length is wrong or the public half does not belong to
    /// the secret half.
    pub fn from_keypair_bytes(bytes: &[u8]) -> Result<Self, SolError> {
        let mut raw: [u8; 64] = bytes.try_into().map_err(|_| {
            SolError::InvalidKeypair(format!("expected 64 bytes, got {}", bytes.len()))
        })?;

        let result = SigningKey::from_keypair_bytes(&raw)
            .map_err(|_| SolError::InvalidKeypair("public key does not match secret key".into()));
        raw.zeroize();

        Ok(Self {
            signing_key: result?,
        })
    }

    pub fn pubkey(&self) -> Pubkey {
        self.signing_key.verifying_key().to_bytes()
    }

    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair")
            .field("pubkey", &pubkey_to_string(&self.pubkey()))
            .finish_non_exhaustive()
    }
}
