//! The two CLI operations, end to end: parse, derive, assemble, submit.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chain_sol::{
    compile_transaction, derive_associated_token_address, pubkey_to_string, sign_transaction,
    Pubkey, SolInstruction,
};
use log::{info, warn};

use crate::amount::parse_base_amount;
use crate::client::ChainClient;
use crate::context::SyrupContext;
use crate::error::SyrupError;
use crate::instruction::{require_address, DepositAccounts, DepositInitAccounts};

/// Raw arguments of `syrup-deposit-init`.
#[derive(Debug, Clone, Default)]
pub struct DepositInitArgs {
    pub owner: Option<String>,
    pub pool: Option<String>,
    pub pool_shares_mint: Option<String>,
}

/// Raw arguments of `syrup-deposit`.
#[derive(Debug, Clone, Default)]
pub struct DepositArgs {
    pub amount: Option<String>,
    pub globals: Option<String>,
    pub pool: Option<String>,
    pub pool_shares_mint: Option<String>,
    pub pool_base_mint: Option<String>,
    pub pool_locker: Option<String>,
    pub lender_user: Option<String>,
}

/// Result of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Submitted { signature: String },
    /// Signed but not sent; `transaction` is the base64 wire form.
    DryRun { signature: String, transaction: String },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Submitted { signature } => write!(f, "{signature}"),
            Outcome::DryRun {
                signature,
                transaction,
            } => write!(f, "{signature}\n{transaction}"),
        }
    }
}

/// Initialise the signer-paid lender account of `owner` in `pool`.
pub async fn syrup_deposit_init<C: ChainClient>(
    ctx: &SyrupContext<C>,
    args: &DepositInitArgs,
) -> Result<Outcome, SyrupError> {
    let owner = require_address("owner", args.owner.as_deref())?;
    let pool = require_address("pool", args.pool.as_deref())?;
    let shares_mint = require_address("pool-shares-mint", args.pool_shares_mint.as_deref())?;

    let accounts =
        DepositInitAccounts::resolve(ctx.payer(), owner, pool, shares_mint, ctx.syrup_program)?;
    info!(
        "initialising lender {} for owner {}",
        pubkey_to_string(&accounts.lender),
        pubkey_to_string(&owner)
    );

    submit(ctx, &[accounts.instruction(ctx.program_id)]).await
}

/// Deposit `amount` of the pool base asset on behalf of `lender_user`.
///
/// The lender user's base-mint token account must already exist; it is
/// never created here.
pub async fn syrup_deposit<C: ChainClient>(
    ctx: &SyrupContext<C>,
    args: &DepositArgs,
) -> Result<Outcome, SyrupError> {
    let globals = require_address("globals", args.globals.as_deref())?;
    let pool = require_address("pool", args.pool.as_deref())?;
    let shares_mint = require_address("pool-shares-mint", args.pool_shares_mint.as_deref())?;
    let base_mint = require_address("pool-base-mint", args.pool_base_mint.as_deref())?;
    let pool_locker = require_address("pool-locker", args.pool_locker.as_deref())?;
    let lender_user = require_address("lender-user", args.lender_user.as_deref())?;

    let amount = args
        .amount
        .as_deref()
        .ok_or_else(|| SyrupError::InvalidAmount("no amount given".into()))
        .and_then(parse_base_amount)?;

    let lender_locker = ensure_associated_token_account(&ctx.client, &base_mint, &lender_user).await?;

    let accounts = DepositAccounts::resolve(
        pool,
        shares_mint,
        base_mint,
        pool_locker,
        lender_locker,
        lender_user,
        globals,
        ctx.syrup_program,
    )?;
    info!(
        "depositing {amount} base units into pool {} from {}",
        pubkey_to_string(&pool),
        pubkey_to_string(&lender_locker)
    );

    submit(ctx, &[accounts.instruction(ctx.program_id, amount)?]).await
}

/// The associated token account of `owner` for `mint`, if it exists.
pub async fn ensure_associated_token_account<C: ChainClient>(
    client: &C,
    mint: &Pubkey,
    owner: &Pubkey,
) -> Result<Pubkey, SyrupError> {
    let address = derive_associated_token_address(owner, mint)?;
    if !client.account_exists(&address).await? {
        let address = pubkey_to_string(&address);
        warn!("associated token account {address} not found");
        return Err(SyrupError::AtaNotFound { address });
    }
    Ok(address)
}

async fn submit<C: ChainClient>(
    ctx: &SyrupContext<C>,
    instructions: &[SolInstruction],
) -> Result<Outcome, SyrupError> {
    let blockhash = ctx.client.latest_blockhash().await?;
    let tx = compile_transaction(instructions, &ctx.payer(), &blockhash)?;
    let signed = sign_transaction(&tx, &[&ctx.signer])?;

    if ctx.dry_run {
        info!("dry run, not sending {}", signed.signature_string());
        return Ok(Outcome::DryRun {
            signature: signed.signature_string(),
            transaction: STANDARD.encode(signed.to_wire()),
        });
    }

    let signature = ctx.client.send_transaction(&signed.to_wire()).await?;
    Ok(Outcome::Submitted { signature })
}
