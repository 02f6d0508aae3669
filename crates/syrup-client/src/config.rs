use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chain_sol::{pubkey_to_string, Pubkey};
use url::Url;

use crate::cli::GlobalArgs;
use crate::client::Commitment;
use crate::error::SyrupError;
use crate::instruction::require_address;
use crate::keypair::default_keypair_path;

/// The deployed `syrup-cpi-demo` wrapper program.
pub const DEFAULT_PROGRAM_ID: &str = "C91qJNgXsa9CVosYJAJmxbGQAcsL7UTY7sbzpBJH7gG5";

/// A Solana cluster, by name or explicit RPC URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cluster {
    MainnetBeta,
    Testnet,
    #[default]
    Devnet,
    Localnet,
    Custom(Url),
}

impl Cluster {
    pub fn rpc_url(&self) -> Result<Url, SyrupError> {
        let url = match self {
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Localnet => "http://127.0.0.1:8899",
            Cluster::Custom(url) => return Ok(url.clone()),
        };
        Url::parse(url).map_err(|e| SyrupError::Config(format!("bad cluster URL {url}: {e}")))
    }
}

impl FromStr for Cluster {
    type Err = SyrupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mainnet-beta" | "mainnet" => Ok(Cluster::MainnetBeta),
            "testnet" => Ok(Cluster::Testnet),
            "devnet" => Ok(Cluster::Devnet),
            "localnet" | "localhost" => Ok(Cluster::Localnet),
            other if other.starts_with("http://") || other.starts_with("https://") => {
                Url::parse(other)
                    .map(Cluster::Custom)
                    .map_err(|e| SyrupError::Config(format!("invalid RPC URL `{other}`: {e}")))
            }
            other => Err(SyrupError::Config(format!(
                "unknown cluster `{other}`; expected mainnet-beta, testnet, devnet, localnet or an RPC URL"
            ))),
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cluster::MainnetBeta => write!(f, "mainnet-beta"),
            Cluster::Testnet => write!(f, "testnet"),
            Cluster::Devnet => write!(f, "devnet"),
            Cluster::Localnet => write!(f, "localnet"),
            Cluster::Custom(url) => write!(f, "{url}"),
        }
    }
}

/// Settings shared by every command, resolved from flags and environment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub syrup_program: Pubkey,
    pub program_id: Pubkey,
    pub keypair_path: PathBuf,
    pub cluster: Cluster,
    pub commitment: Commitment,
    pub dry_run: bool,
}

impl ClientConfig {
    pub fn from_args(args: &GlobalArgs) -> Result<Self, SyrupError> {
        let syrup_program = require_address("syrup-address", args.syrup_address.as_deref())?;
        let program_id = require_address(
            "program-id",
            Some(args.program_id.as_deref().unwrap_or(DEFAULT_PROGRAM_ID)),
        )?;
        let keypair_path = match &args.keypair {
            Some(path) => path.clone(),
            None => default_keypair_path()?,
        };
        let cluster = match &args.cluster {
            Some(name) => name.parse()?,
            None => Cluster::default(),
        };

        Ok(Self {
            syrup_program,
            program_id,
            keypair_path,
            cluster,
            commitment: args.commitment,
            dry_run: args.dry_run,
        })
    }
}

impl fmt::Display for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "syrup={} program={} cluster={} commitment={} keypair={}",
            pubkey_to_string(&self.syrup_program),
            pubkey_to_string(&self.program_id),
            self.cluster,
            self.commitment.as_str(),
            self.keypair_path.display()
        )
    }
}
