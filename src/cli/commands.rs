use crate::core::Amount;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pko-chain")]
pub struct Opt {
    #[arg(long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(name = "startnode", about = "Start a ledger node serving requests")]
    StartNode {
        #[arg(long, help = "Address to listen on")]
        addr: Option<String>,
        #[arg(long, help = "Leading zero hex characters required of block hashes")]
        difficulty: Option<u32>,
    },
    #[command(name = "submit", about = "Submit a transaction to a running node")]
    Submit {
        #[arg(help = "Sender identifier")]
        sender: String,
        #[arg(help = "Receiver identifier")]
        receiver: String,
        #[arg(help = "Amount to transfer")]
        amount: Amount,
        #[arg(long, default_value_t = Amount::ZERO, help = "Commission fee paid to the miner")]
        fee: Amount,
        #[arg(long, help = "Node address")]
        addr: Option<String>,
    },
    #[command(name = "mine", about = "Ask a running node to mine the pending transactions")]
    Mine {
        #[arg(help = "Address credited with the block reward and fees")]
        miner: Option<String>,
        #[arg(long, help = "Node address")]
        addr: Option<String>,
    },
    #[command(name = "printchain", about = "Print all blocks of a running node")]
    Printchain {
        #[arg(long, help = "Print the raw JSON chain instead of the block view")]
        json: bool,
        #[arg(long, help = "Node address")]
        addr: Option<String>,
    },
    #[command(name = "demo", about = "Mine a few blocks locally and print the chain")]
    Demo {
        #[arg(long, default_value_t = 3, help = "Number of blocks to mine after genesis")]
        blocks: u64,
        #[arg(long, help = "Leading zero hex characters required of block hashes")]
        difficulty: Option<u32>,
        #[arg(long, default_value = "Miner1", help = "Address credited with block rewards")]
        miner: String,
    },
}
