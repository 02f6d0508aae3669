//! Seeds and program-derived addresses of the Syrup program.

use chain_sol::{find_program_address, pubkey_to_string, Pubkey};
use log::debug;
use rand::RngCore;
use rand_core::OsRng;

use crate::error::SyrupError;

pub const LENDER_SEED: &str = "lender";
pub const LOCKED_SHARES_SEED: &str = "locked_shares";

/// An 8-byte nonce used as a PDA seed.
///
/// Derivation never generates one: callers that need two derivations to
/// agree must pass the same nonce to both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nonce([u8; 8]);

impl Nonce {
    /// Draw a fresh nonce from the OS RNG.
    pub fn generate() -> Self {
        let mut value = [0u8; 8];
        OsRng.fill_bytes(&mut value);
        Self(value)
    }

    pub fn from_bytes(value: [u8; 8]) -> Self {
        Self(value)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

/// One PDA seed and its byte encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    /// UTF-8 bytes of the string.
    Str(String),
    /// The 32 raw address bytes.
    Address(Pubkey),
    /// Bytes taken verbatim.
    Bytes(Vec<u8>),
    /// The 8 raw nonce bytes.
    Nonce(Nonce),
}

impl Seed {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Seed::Str(s) => s.as_bytes(),
            Seed::Address(address) => address,
            Seed::Bytes(bytes) => bytes,
            Seed::Nonce(nonce) => nonce.as_bytes(),
        }
    }
}

impl From<&str> for Seed {
    fn from(s: &str) -> Self {
        Seed::Str(s.to_owned())
    }
}

impl From<Pubkey> for Seed {
    fn from(address: Pubkey) -> Self {
        Seed::Address(address)
    }
}

impl From<Nonce> for Seed {
    fn from(nonce: Nonce) -> Self {
        Seed::Nonce(nonce)
    }
}

/// A program-derived address and its bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedAddress {
    pub address: Pubkey,
    pub bump: u8,
}

/// Derive the PDA of `seeds` under `program_id`.
pub fn derive_address(seeds: &[Seed], program_id: &Pubkey) -> Result<DerivedAddress, SyrupError> {
    let raw: Vec<&[u8]> = seeds.iter().map(Seed::as_bytes).collect();
    let (address, bump) = find_program_address(&raw, program_id)?;
    Ok(DerivedAddress { address, bump })
}

/// The lender record of `owner` in `pool`: seeds `["lender", pool, owner]`.
pub fn find_lender_address(
    pool: &Pubkey,
    owner: &Pubkey,
    syrup_program: &Pubkey,
) -> Result<DerivedAddress, SyrupError> {
    let lender = derive_address(
        &[LENDER_SEED.into(), (*pool).into(), (*owner).into()],
        syrup_program,
    )?;
    debug!(
        "lender for pool {} owner {}: {} (bump {})",
        pubkey_to_string(pool),
        pubkey_to_string(owner),
        pubkey_to_string(&lender.address),
        lender.bump
    );
    Ok(lender)
}

/// The locked-shares account of a lender: seeds `["locked_shares", lender]`.
pub fn find_locked_shares_address(
    lender: &Pubkey,
    syrup_program: &Pubkey,
) -> Result<DerivedAddress, SyrupError> {
    derive_address(&[LOCKED_SHARES_SEED.into(), (*lender).into()], syrup_program)
}
