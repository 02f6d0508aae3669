use anyhow::{Context as _, Result};
use clap::Parser;
use log::{debug, info};
use syrup_client::cli::{Cli, Command};
use syrup_client::keypair::load_keypair;
use syrup_client::{
    syrup_deposit, syrup_deposit_init, ClientConfig, DepositArgs, DepositInitArgs, RpcClient,
    SyrupContext,
};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Cli { global, command } = Cli::parse();
    let config = ClientConfig::from_args(&global)?;
    debug!("{config}");

    let signer = load_keypair(&config.keypair_path)?;
    let url = config.cluster.rpc_url()?;
    info!("using {} ({url})", config.cluster);
    let client = RpcClient::new(url, config.commitment)?;

    let ctx = SyrupContext::new(config.syrup_program, config.program_id, signer, client)
        .with_dry_run(config.dry_run);

    let outcome = match command {
        Command::SyrupDepositInit {
            owner,
            pool,
            pool_shares_mint,
        } => syrup_deposit_init(
            &ctx,
            &DepositInitArgs {
                owner,
                pool,
                pool_shares_mint,
            },
        )
        .await
        .context("syrup-deposit-init failed")?,
        Command::SyrupDeposit {
            amount,
            globals,
            pool,
            pool_shares_mint,
            pool_base_mint,
            pool_locker,
            lender_user,
        } => syrup_deposit(
            &ctx,
            &DepositArgs {
                amount,
                globals,
                pool,
                pool_shares_mint,
                pool_base_mint,
                pool_locker,
                lender_user,
            },
        )
        .await
        .context("syrup-deposit failed")?,
    };

    println!("{outcome}");
    Ok(())
}
