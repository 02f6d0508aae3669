//! Program Derived Address (PDA) derivation.
//!
//! A PDA is `SHA-256(seed_0 || ... || seed_n || bump || program_id || "ProgramDerivedAddress")`
//! for the highest bump (255 down to 0) whose hash is NOT a valid Ed25519
//! point, so no private key can ever sign for it.

use sha2::{Digest, Sha256};

use crate::address::Pubkey;
use crate::error::SolError;

/// Maximum length of a single seed in bytes.
pub const MAX_SEED_LEN: usize = 32;

/// Maximum number of seeds, including the bump.
pub const MAX_SEEDS: usize = 16;

const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Find the canonical PDA and its bump for `seeds` under `program_id`.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), SolError> {
    check_seeds(seeds)?;

    for bump in (0u8..=255).rev() {
        if let Some(address) = hash_off_curve(seeds, bump, program_id) {
            return Ok((address, bump));
        }
    }

    Err(SolError::AddressDerivationExhausted)
}

/// Recompute a PDA for a known bump.
///
/// Returns `None` when the candidate lands on the curve (not a valid PDA).
pub fn create_program_address(
    seeds: &[&[u8]],
    bump: u8,
    program_id: &Pubkey,
) -> Result<Option<Pubkey>, SolError> {
    check_seeds(seeds)?;
    Ok(hash_off_curve(seeds, bump, program_id))
}

/// Check if 32 bytes decompress to a valid Ed25519 curve point.
pub fn is_on_curve(bytes: &Pubkey) -> bool {
    curve25519_dalek::edwards::CompressedEdwardsY(*bytes)
        .decompress()
        .is_some()
}

fn check_seeds(seeds: &[&[u8]]) -> Result<(), SolError> {
    // One slot is reserved for the bump.
    if seeds.len() >= MAX_SEEDS {
        return Err(SolError::InvalidSeed(format!(
            "{} seeds given, at most {} allowed",
            seeds.len(),
            MAX_SEEDS - 1
        )));
    }
    if let Some((index, seed)) = seeds
        .iter()
        .enumerate()
        .find(|(_, seed)| seed.len() > MAX_SEED_LEN)
    {
        return Err(SolError::InvalidSeed(format!(
            "seed {index} is {} bytes, at most {MAX_SEED_LEN} allowed",
            seed.len()
        )));
    }
    Ok(())
}

fn hash_off_curve(seeds: &[&[u8]], bump: u8, program_id: &Pubkey) -> Option<Pubkey> {
    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update([bump]);
    hasher.update(program_id);
    hasher.update(PDA_MARKER);

    let hash: Pubkey = hasher.finalize().into();
    (!is_on_curve(&hash)).then_some(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{parse_pubkey, pubkey_to_string};

    #[test]
    fn derivation_is_deterministic() {
        let program = [0x33u8; 32];
        let a = find_program_address(&[b"lender", &[0x11; 32], &[0x22; 32]], &program).unwrap();
        let b = find_program_address(&[b"lender", &[0x11; 32], &[0x22; 32]], &program).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn derived_address_is_off_curve() {
        let (address, _) = find_program_address(&[b"vault"], &[0x01; 32]).unwrap();
        assert!(!is_on_curve(&address));
    }

    #[test]
    fn known_lender_vector() {
        let (lender, bump) =
            find_program_address(&[b"lender", &[0x11; 32], &[0x22; 32]], &[0x33; 32]).unwrap();
        assert_eq!(
            pubkey_to_string(&lender),
            "9FTV5eVcj9GueB8WHijoBbdXHoF3nKMH4NUjR5c78T5s"
        );
        assert_eq!(bump, 254);
    }

    #[test]
    fn create_matches_find_for_canonical_bump() {
        let seeds: &[&[u8]] = &[b"locked_shares", &[0x44; 32]];
        let program = [0x55u8; 32];
        let (address, bump) = find_program_address(seeds, &program).unwrap();
        assert_eq!(
            create_program_address(seeds, bump, &program).unwrap(),
            Some(address)
        );
    }

    #[test]
    fn seed_order_matters() {
        let program = [0x09u8; 32];
        let (ab, _) = find_program_address(&[&[0x01; 32], &[0x02; 32]], &program).unwrap();
        let (ba, _) = find_program_address(&[&[0x02; 32], &[0x01; 32]], &program).unwrap();
        assert_ne!(ab, ba);
    }

    #[test]
    fn different_programs_give_different_addresses() {
        let (a, _) = find_program_address(&[b"lender"], &[0x01; 32]).unwrap();
        let (b, _) = find_program_address(&[b"lender"], &[0x02; 32]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn oversized_seed_is_rejected() {
        let long = [0u8; 33];
        let err = find_program_address(&[&long], &[0x01; 32]).unwrap_err();
        assert!(matches!(err, SolError::InvalidSeed(_)));
    }

    #[test]
    fn too_many_seeds_are_rejected() {
        let seed: &[u8] = b"s";
        let seeds = vec![seed; MAX_SEEDS];
        let err = find_program_address(&seeds, &[0x01; 32]).unwrap_err();
        assert!(matches!(err, SolError::InvalidSeed(_)));
    }

    #[test]
    fn fifteen_seeds_are_accepted() {
        let seed: &[u8] = b"s";
        let seeds = vec![seed; MAX_SEEDS - 1];
        assert!(find_program_address(&seeds, &[0x01; 32]).is_ok());
    }

    #[test]
    fn is_on_curve_accepts_basepoint() {
        let mut basepoint = [0x66u8; 32];
        basepoint[0] = 0x58;
        assert!(is_on_curve(&basepoint));
    }

    #[test]
    fn is_on_curve_rejects_off_curve_bytes() {
        assert!(!is_on_curve(&[0x02; 32]));
    }

    #[test]
    fn wallet_keys_are_on_curve() {
        let key = parse_pubkey("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA").unwrap();
        assert!(is_on_curve(&key));
    }
}
