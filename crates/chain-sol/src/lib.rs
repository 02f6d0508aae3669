//! Solana primitives for the syrup client.
//!
//! Address parsing, program-derived-address search, associated token
//! account derivation, and legacy transaction compilation and signing,
//! implemented directly on `ed25519-dalek`, `curve25519-dalek`, `sha2` and
//! `bs58` rather than through `solana-sdk`.

pub mod address;
pub mod error;
pub mod keypair;
pub mod pda;
pub mod spl_token;
pub mod system;
pub mod transaction;

pub use address::{parse_pubkey, pubkey_to_string, Pubkey};
pub use error::SolError;
pub use keypair::Keypair;
pub use pda::{create_program_address, find_program_address, is_on_curve};
pub use spl_token::{derive_associated_token_address, ASSOCIATED_TOKEN_PROGRAM_ID, TOKEN_PROGRAM_ID};
pub use system::{SYSTEM_PROGRAM_ID, SYSVAR_RENT_ID};
pub use transaction::{
    compile_transaction, encode_compact_u16, serialize_message, sign_transaction,
    CompiledInstruction, SignedTransaction, SolAccountMeta, SolInstruction, SolTransaction,
};
