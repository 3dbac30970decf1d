use crate::core::ProofOfWork;
use crate::error::Result;
use crate::utils::current_timestamp;
use log::info;
use serde::{Deserialize, Serialize};

/// Version tag carried by every [`BlockSnapshot`]
pub const SNAPSHOT_VERSION: u32 = 1;

/// A mined block.
///
/// Blocks only exist in their mined state: construction captures the
/// timestamp once, runs the nonce search against it, and freezes the
/// result. There are no setters.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    index: u64,
    pre_block_hash: String,
    merkle_root: String,
    timestamp: f64,
    difficulty: u32,
    nonce: u64,
    hash: String,
}

/// Read-only projection of a block for external reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSnapshot {
    pub version: u32,
    pub index: u64,
    pub previous_hash: String,
    pub merkle_root: String,
    pub timestamp: f64,
    pub difficulty: u32,
    pub nonce: u64,
    pub hash: String,
}

impl Block {
    /// Mine a block stamped with the current time. Blocks the caller until a
    /// satisfying nonce is found.
    pub fn new_block(
        index: u64,
        pre_block_hash: String,
        merkle_root: String,
        difficulty: u32,
    ) -> Result<Block> {
        let timestamp = current_timestamp()?;
        Ok(Self::new_block_at(
            index,
            pre_block_hash,
            merkle_root,
            timestamp,
            difficulty,
        ))
    }

    /// Mine a block with a caller-supplied timestamp.
    pub fn new_block_at(
        index: u64,
        pre_block_hash: String,
        merkle_root: String,
        timestamp: f64,
        difficulty: u32,
    ) -> Block {
        let mut block = Block {
            index,
            pre_block_hash,
            merkle_root,
            timestamp,
            difficulty,
            nonce: 0,
            hash: String::new(),
        };

        info!("Mining block #{index} with difficulty {difficulty}");
        let (nonce, hash) = ProofOfWork::new_proof_of_work(&block).run();
        block.nonce = nonce;
        block.hash = hash;
        info!("Block mined! Nonce: {}, Hash: {}", block.nonce, block.hash);

        block
    }

    pub fn get_index(&self) -> u64 {
        self.index
    }

    pub fn get_pre_block_hash(&self) -> &str {
        self.pre_block_hash.as_str()
    }

    pub fn get_merkle_root(&self) -> &str {
        self.merkle_root.as_str()
    }

    pub fn get_timestamp(&self) -> f64 {
        self.timestamp
    }

    pub fn get_difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn get_nonce(&self) -> u64 {
        self.nonce
    }

    pub fn get_hash(&self) -> &str {
        self.hash.as_str()
    }

    pub fn snapshot(&self) -> BlockSnapshot {
        BlockSnapshot {
            version: SNAPSHOT_VERSION,
            index: self.index,
            previous_hash: self.pre_block_hash.clone(),
            merkle_root: self.merkle_root.clone(),
            timestamp: self.timestamp,
            difficulty: self.difficulty,
            nonce: self.nonce,
            hash: self.hash.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_hash(&self, hash: &str) -> Block {
        Block {
            hash: hash.to_string(),
            ..self.clone()
        }
    }
}

impl From<&Block> for BlockSnapshot {
    fn from(block: &Block) -> Self {
        block.snapshot()
    }
}
