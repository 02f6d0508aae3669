use chain_sol::{Keypair, Pubkey};

use crate::client::ChainClient;

/// What both commands run against: program ids, the signer and the cluster.
pub struct SyrupContext<C> {
    /// The Syrup program; derived addresses belong to it.
    pub syrup_program: Pubkey,
    /// The wrapper program that receives the instructions.
    pub program_id: Pubkey,
    pub signer: Keypair,
    pub client: C,
    pub dry_run: bool,
}

impl<C: ChainClient> SyrupContext<C> {
    pub fn new(syrup_program: Pubkey, program_id: Pubkey, signer: Keypair, client: C) -> Self {
        Self {
            syrup_program,
            program_id,
            signer,
            client,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn payer(&self) -> Pubkey {
        self.signer.pubkey()
    }
}
