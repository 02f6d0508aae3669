//! Loading Solana CLI keypair files.

use std::path::{Path, PathBuf};

use chain_sol::Keypair;
use zeroize::Zeroize;

use crate::error::SyrupError;

/// Where `solana-keygen` writes the default keypair, relative to `$HOME`.
pub const DEFAULT_KEYPAIR_PATH: &str = ".config/solana/id.json";

/// `$HOME/.config/solana/id.json`.
pub fn default_keypair_path() -> Result<PathBuf, SyrupError> {
    let home = std::env::var_os("HOME")
        .ok_or_else(|| SyrupError::Keypair("HOME is not set; pass --keypair".into()))?;
    Ok(PathBuf::from(home).join(DEFAULT_KEYPAIR_PATH))
}

/// Read a keypair file: a JSON array of 64 byte values.
pub fn load_keypair(path: &Path) -> Result<Keypair, SyrupError> {
    let mut contents = std::fs::read_to_string(path)
        .map_err(|e| SyrupError::Keypair(format!("failed to read {}: {e}", path.display())))?;

    let parsed: Result<Vec<u8>, _> = serde_json::from_str(&contents);
    contents.zeroize();

    let mut bytes = parsed.map_err(|e| {
        SyrupError::Keypair(format!("{} is not a JSON byte array: {e}", path.display()))
    })?;

    let keypair = Keypair::from_keypair_bytes(&bytes);
    bytes.zeroize();

    keypair.map_err(|e| SyrupError::Keypair(format!("{}: {e}", path.display())))
}
