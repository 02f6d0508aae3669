//! Client for the `syrup-cpi-demo` program.
//!
//! Derives the Syrup lender accounts, assembles the wrapper program's
//! `sryup_deposit_init` and `syrup_deposit` instructions, and submits them
//! over JSON-RPC.

pub mod amount;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod instruction;
pub mod keypair;
pub mod seeds;

pub use client::{ChainClient, Commitment, RpcClient};
pub use commands::{syrup_deposit, syrup_deposit_init, DepositArgs, DepositInitArgs, Outcome};
pub use config::{ClientConfig, Cluster};
pub use context::SyrupContext;
pub use error::SyrupError;
