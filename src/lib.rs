//! # PKO Chain - a single-node proof-of-work ledger
//!
//! Transactions are pooled in a mempool, batched into blocks, committed with
//! a Merkle root and sealed by a mined hash. Everything runs in one process
//! with one writer; there is no peer-to-peer layer and no persistence.
//!
//! ## How the code is organized
//! - `core/`: transactions, Merkle tree, proof-of-work, blocks and the chain
//! - `storage/`: the mempool of pending transactions
//! - `network/`: JSON-over-TCP request handling in front of one ledger
//! - `config/`: defaults, TOML file and environment settings
//! - `cli/`: command-line parsing and the chain printout
//! - `utils/`: hashing and clock helpers
//!
//! ## Where to start
//! `core/blockchain.rs` holds the block-append protocol: coinbase issuance,
//! fee accounting, Merkle commitment, mining and the mempool drain.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod network;
pub mod storage;
pub mod utils;

// Re-export commonly used types for convenience
pub use cli::{Command, Opt};
pub use config::Config;
pub use core::{
    Amount, Block, BlockSnapshot, Blockchain, MerkleProof, MerkleTree, ProofOfWork, Transaction,
};
pub use error::{BlockchainError, Result};
pub use network::{send_request, Request, Response, Server};
pub use storage::Mempool;
pub use utils::{current_timestamp, sha256_digest, sha256_hex};
