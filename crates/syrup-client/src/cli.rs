use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::client::Commitment;

/// Deposit into Syrup pools through the syrup-cpi-demo program.
#[derive(Parser, Debug, Clone)]
#[command(name = "syrup-cpi-demo", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// The Syrup program address on the network
    #[arg(short = 'S', long, global = true, env = "SYRUP_ADDRESS")]
    pub syrup_address: Option<String>,

    /// Keypair file that pays for and signs transactions [default: ~/.config/solana/id.json]
    #[arg(short, long, global = true, env = "SOLANA_KEYPAIR")]
    pub keypair: Option<PathBuf>,

    /// Cluster name (mainnet-beta, testnet, devnet, localnet) or RPC URL [default: devnet]
    #[arg(short, long, global = true, env = "SOLANA_CLUSTER")]
    pub cluster: Option<String>,

    /// The syrup-cpi-demo program address
    #[arg(long, global = true, env = "SYRUP_CPI_DEMO_PROGRAM_ID")]
    pub program_id: Option<String>,

    /// Commitment for queries and preflight
    #[arg(long, global = true, value_enum, default_value_t = Commitment::Confirmed)]
    pub commitment: Commitment,

    /// Print the signed transaction instead of sending it
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Initialise a lender account
    SyrupDepositInit {
        /// Owner of the lender account
        #[arg(short, long)]
        owner: Option<String>,
        /// The pool to deposit into
        #[arg(short, long)]
        pool: Option<String>,
        /// Mint issuing pool shares in proportion to deposits
        #[arg(short = 's', long)]
        pool_shares_mint: Option<String>,
    },
    /// Deposit into a pool
    SyrupDeposit {
        /// Amount of the base asset (USDC) to deposit, e.g. 12.5
        #[arg(short, long)]
        amount: Option<String>,
        /// The Syrup globals account
        #[arg(short, long)]
        globals: Option<String>,
        /// The pool to deposit into
        #[arg(short, long)]
        pool: Option<String>,
        /// Mint issuing pool shares in proportion to deposits
        #[arg(short = 's', long)]
        pool_shares_mint: Option<String>,
        /// Mint of the pool's underlying asset
        #[arg(short = 'b', long)]
        pool_base_mint: Option<String>,
        /// Pool token account receiving the liquidity
        #[arg(short = 'l', long)]
        pool_locker: Option<String>,
        /// Wallet that signs the deposit
        #[arg(short = 'u', long)]
        lender_user: Option<String>,
    },
}
