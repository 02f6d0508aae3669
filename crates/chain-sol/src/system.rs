//! Built-in program and sysvar addresses.

use crate::address::Pubkey;

/// System Program: `11111111111111111111111111111111`
pub const SYSTEM_PROGRAM_ID: Pubkey = [0u8; 32];

/// Rent sysvar: `SysvarRent111111111111111111111111111111111`
pub const SYSVAR_RENT_ID: Pubkey = [
    0x06, 0xa7, 0xd5, 0x17, 0x19, 0x2c, 0x5c, 0x51, 0x21, 0x8c, 0xc9, 0x4c, 0x3d, 0x4a, 0xf1,
    0x7f, 0x58, 0xda, 0xee, 0x08, 0x9b, 0xa1, 0xfd, 0x44, 0xe3, 0xdb, 0xd9, 0x8a, 0x00, 0x00,
    0x00, 0x00,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::pubkey_to_string;

    #[test]
    fn rent_sysvar_matches_base58() {
        assert_eq!(
            pubkey_to_string(&SYSVAR_RENT_ID),
            "SysvarRent111111111111111111111111111111111"
        );
    }

    #[test]
    fn system_program_is_all_zeros() {
        assert_eq!(
            pubkey_to_string(&SYSTEM_PROGRAM_ID),
            "11111111111111111111111111111111"
        );
    }
}
