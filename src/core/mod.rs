//! Core ledger functionality
//!
//! This module contains the fundamental ledger components: transactions,
//! the Merkle commitment over a block's batch, proof-of-work mining, blocks
//! and the blockchain that ties them together.

pub mod amount;
pub mod block;
pub mod blockchain;
pub mod merkle;
pub mod monetary;
pub mod proof_of_work;
pub mod transaction;

pub use amount::Amount;
pub use block::{Block, BlockSnapshot, SNAPSHOT_VERSION};
pub use blockchain::{Blockchain, GENESIS_MERKLE_ROOT, GENESIS_PREVIOUS_HASH};
pub use merkle::{MerkleProof, MerkleTree, ProofElement};
pub use monetary::{BLOCK_REWARD, COINBASE_SENDER, CURRENCY_TICKER, DEFAULT_DIFFICULTY, MAX_DIFFICULTY};
pub use proof_of_work::ProofOfWork;
pub use transaction::Transaction;
