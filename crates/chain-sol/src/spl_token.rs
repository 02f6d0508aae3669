//! SPL Token program ids and associated token account (ATA) derivation.

use crate::address::Pubkey;
use crate::error::SolError;
use crate::pda::find_program_address;

/// SPL Token Program ID: `TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA`
pub const TOKEN_PROGRAM_ID: Pubkey = [
    0x06, 0xdd, 0xf6, 0xe1, 0xd7, 0x65, 0xa1, 0x93, 0xd9, 0xcb, 0xe1, 0x46, 0xce, 0xeb, 0x79,
    0xac, 0x1c, 0xb4, 0x85, 0xed, 0x5f, 0x5b, 0x37, 0x91, 0x3a, 0x8c, 0xf5, 0x85, 0x7e, 0xff,
    0x00, 0xa9,
];

/// Associated Token Account Program ID: `ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL`
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey = [
    0x8c, 0x97, 0x25, 0x8f, 0x4e, 0x24, 0x89, 0xf1, 0xbb, 0x3d, 0x10, 0x29, 0x14, 0x8e, 0x0d,
    0x83, 0x0b, 0x5a, 0x13, 0x99, 0xda, 0xff, 0x10, 0x84, 0x04, 0x8e, 0x7b, 0xd8, 0xdb, 0xe9,
    0xf8, 0x59,
];

/// Derive the associated token account of `owner` for `mint`.
///
/// Seeds are `[owner, token_program_id, mint]` under the associated token
/// program. Pure address math: whether the account exists on chain is a
/// separate question.
pub fn derive_associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Result<Pubkey, SolError> {
    find_program_address(
        &[owner.as_ref(), &TOKEN_PROGRAM_ID, mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .map(|(address, _bump)| address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{parse_pubkey, pubkey_to_string};
    use crate::pda::is_on_curve;

    #[test]
    fn token_program_id_matches_base58() {
        assert_eq!(
            pubkey_to_string(&TOKEN_PROGRAM_ID),
            "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
        );
    }

    #[test]
    fn associated_token_program_id_matches_base58() {
        assert_eq!(
            pubkey_to_string(&ASSOCIATED_TOKEN_PROGRAM_ID),
            "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL"
        );
    }

    #[test]
    fn ata_is_off_curve() {
        let ata = derive_associated_token_address(&[0xAA; 32], &[0xBB; 32]).unwrap();
        assert!(!is_on_curve(&ata));
    }

    #[test]
    fn ata_is_deterministic() {
        let a = derive_associated_token_address(&[0x11; 32], &[0x22; 32]).unwrap();
        let b = derive_associated_token_address(&[0x11; 32], &[0x22; 32]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn owner_and_mint_are_not_interchangeable() {
        let a = derive_associated_token_address(&[0x11; 32], &[0x22; 32]).unwrap();
        let b = derive_associated_token_address(&[0x22; 32], &[0x11; 32]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn known_usdc_ata_vector() {
        let usdc_mint = parse_pubkey("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v").unwrap();
        let ata = derive_associated_token_address(&[0x42; 32], &usdc_mint).unwrap();
        assert_eq!(
            pubkey_to_string(&ata),
            "4pw5VSwn2Sec4SjMhbUSBcVjS51rG34Ho1WuHQgxqVd2"
        );
    }
}
