//! Instruction builders for the `syrup-cpi-demo` wrapper program.
//!
//! The wrapper is an Anchor program, so instruction data is an 8-byte
//! discriminator (`sha256("global:<method>")[..8]`) followed by the
//! little-endian arguments. Account order follows the wrapper's
//! `Accounts` structs; the program rejects any other order.

use chain_sol::{
    derive_associated_token_address, parse_pubkey, pubkey_to_string, Pubkey, SolAccountMeta,
    SolInstruction, ASSOCIATED_TOKEN_PROGRAM_ID, SYSTEM_PROGRAM_ID, SYSVAR_RENT_ID,
    TOKEN_PROGRAM_ID,
};
use log::debug;
use sha2::{Digest, Sha256};

use crate::error::SyrupError;
use crate::seeds::{find_lender_address, find_locked_shares_address};

/// Wrapper method that initialises a lender. The deployed program spells it
/// this way.
pub const DEPOSIT_INIT_METHOD: &str = "sryup_deposit_init";

/// Wrapper method that deposits base units into a pool.
pub const DEPOSIT_METHOD: &str = "syrup_deposit";

/// Anchor's instruction discriminator for `method`.
pub fn instruction_discriminator(method: &str) -> [u8; 8] {
    let hash = Sha256::digest(format!("global:{method}").as_bytes());
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash[..8]);
    discriminator
}

/// Parse a required address argument.
///
/// Absent, non-Base58 and wrong-length values are all reported as
/// [`SyrupError::MissingRequiredAddress`] for `role`.
pub fn require_address(role: &'static str, value: Option<&str>) -> Result<Pubkey, SyrupError> {
    value
        .and_then(|v| parse_pubkey(v).ok())
        .ok_or(SyrupError::MissingRequiredAddress { role })
}

/// Ordered accounts of one instruction, each tagged with its role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountSet(Vec<(&'static str, SolAccountMeta)>);

impl AccountSet {
    fn with(mut self, role: &'static str, meta: SolAccountMeta) -> Self {
        self.0.push((role, meta));
        self
    }

    pub fn roles(&self) -> Vec<&'static str> {
        self.0.iter().map(|(role, _)| *role).collect()
    }

    pub fn get(&self, role: &str) -> Option<&SolAccountMeta> {
        self.0.iter().find(|(r, _)| *r == role).map(|(_, meta)| meta)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_metas(self) -> Vec<SolAccountMeta> {
        self.0.into_iter().map(|(_, meta)| meta).collect()
    }

    fn log(&self, method: &str) {
        for (index, (role, meta)) in self.0.iter().enumerate() {
            debug!(
                "{method} account {index:>2} {role:<24} {} signer={} writable={}",
                pubkey_to_string(&meta.pubkey),
                meta.is_signer,
                meta.is_writable
            );
        }
    }
}

/// Accounts of `sryup_deposit_init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositInitAccounts {
    pub payer: Pubkey,
    pub owner: Pubkey,
    pub pool: Pubkey,
    pub shares_mint: Pubkey,
    pub lender: Pubkey,
    pub locked_shares: Pubkey,
    pub lender_shares: Pubkey,
    pub syrup: Pubkey,
}

impl DepositInitAccounts {
    /// Resolve the derived accounts for `owner` joining `pool`.
    pub fn resolve(
        payer: Pubkey,
        owner: Pubkey,
        pool: Pubkey,
        shares_mint: Pubkey,
        syrup: Pubkey,
    ) -> Result<Self, SyrupError> {
        let lender_shares = derive_associated_token_address(&owner, &shares_mint)?;
        let lender = find_lender_address(&pool, &owner, &syrup)?.address;
        let locked_shares = find_locked_shares_address(&lender, &syrup)?.address;

        Ok(Self {
            payer,
            owner,
            pool,
            shares_mint,
            lender,
            locked_shares,
            lender_shares,
            syrup,
        })
    }

    pub fn account_set(&self) -> AccountSet {
        AccountSet::default()
            .with("payer", SolAccountMeta::writable(self.payer, true))
            .with("owner", SolAccountMeta::readonly(self.owner, false))
            .with("pool", SolAccountMeta::readonly(self.pool, false))
            .with("shares_mint", SolAccountMeta::writable(self.shares_mint, false))
            .with("lender", SolAccountMeta::writable(self.lender, false))
            .with("locked_shares", SolAccountMeta::writable(self.locked_shares, false))
            .with("lender_shares", SolAccountMeta::writable(self.lender_shares, false))
            .with("system_program", SolAccountMeta::readonly(SYSTEM_PROGRAM_ID, false))
            .with("token_program", SolAccountMeta::readonly(TOKEN_PROGRAM_ID, false))
            .with(
                "associated_token_program",
                SolAccountMeta::readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            )
            .with("rent", SolAccountMeta::readonly(SYSVAR_RENT_ID, false))
            .with("syrup", SolAccountMeta::readonly(self.syrup, false))
    }

    /// The wrapper instruction; it takes no arguments.
    pub fn instruction(&self, program_id: Pubkey) -> SolInstruction {
        let accounts = self.account_set();
        accounts.log(DEPOSIT_INIT_METHOD);

        SolInstruction {
            program_id,
            accounts: accounts.into_metas(),
            data: instruction_discriminator(DEPOSIT_INIT_METHOD).to_vec(),
        }
    }
}

/// Accounts of `syrup_deposit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositAccounts {
    pub lender: Pubkey,
    pub lender_user: Pubkey,
    pub pool: Pubkey,
    pub globals: Pubkey,
    pub pool_locker: Pubkey,
    pub base_mint: Pubkey,
    pub shares_mint: Pubkey,
    pub locked_shares: Pubkey,
    pub lender_shares: Pubkey,
    pub lender_locker: Pubkey,
    pub syrup: Pubkey,
}

impl DepositAccounts {
    /// Resolve the derived accounts for `lender_user` depositing into `pool`.
    ///
    /// The lender derivation is shared with [`DepositInitAccounts::resolve`],
    /// so both phases land on the same lender record.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve(
        pool: Pubkey,
        shares_mint: Pubkey,
        base_mint: Pubkey,
        pool_locker: Pubkey,
        lender_locker: Pubkey,
        lender_user: Pubkey,
        globals: Pubkey,
        syrup: Pubkey,
    ) -> Result<Self, SyrupError> {
        let lender_shares = derive_associated_token_address(&lender_user, &shares_mint)?;
        let lender = find_lender_address(&pool, &lender_user, &syrup)?.address;
        let locked_shares = find_locked_shares_address(&lender, &syrup)?.address;

        Ok(Self {
            lender,
            lender_user,
            pool,
            globals,
            pool_locker,
            base_mint,
            shares_mint,
            locked_shares,
            lender_shares,
            lender_locker,
            syrup,
        })
    }

    pub fn account_set(&self) -> AccountSet {
        AccountSet::default()
            .with("lender", SolAccountMeta::writable(self.lender, false))
            .with("lender_user", SolAccountMeta::readonly(self.lender_user, true))
            .with("pool", SolAccountMeta::writable(self.pool, false))
            .with("globals", SolAccountMeta::readonly(self.globals, false))
            .with("pool_locker", SolAccountMeta::writable(self.pool_locker, false))
            .with("base_mint", SolAccountMeta::readonly(self.base_mint, false))
            .with("shares_mint", SolAccountMeta::writable(self.shares_mint, false))
            .with("locked_shares", SolAccountMeta::writable(self.locked_shares, false))
            .with("lender_shares", SolAccountMeta::writable(self.lender_shares, false))
            .with("lender_locker", SolAccountMeta::writable(self.lender_locker, false))
            .with("system_program", SolAccountMeta::readonly(SYSTEM_PROGRAM_ID, false))
            .with("token_program", SolAccountMeta::readonly(TOKEN_PROGRAM_ID, false))
            .with("rent", SolAccountMeta::readonly(SYSVAR_RENT_ID, false))
            .with("syrup", SolAccountMeta::readonly(self.syrup, false))
    }

    /// The wrapper instruction carrying `amount` base units.
    pub fn instruction(&self, program_id: Pubkey, amount: u64) -> Result<SolInstruction, SyrupError> {
        if amount == 0 {
            return Err(SyrupError::InvalidAmount(
                "deposit amount must be greater than zero".into(),
            ));
        }

        let accounts = self.account_set();
        accounts.log(DEPOSIT_METHOD);

        let mut data = Vec::with_capacity(16);
        data.extend_from_slice(&instruction_discriminator(DEPOSIT_METHOD));
        data.extend_from_slice(&amount.to_le_bytes());

        Ok(SolInstruction {
            program_id,
            accounts: accounts.into_metas(),
            data,
        })
    }
}
