// This is the ledger itself: the chain of mined blocks plus the mempool of
// transactions waiting for the next one. It lives entirely in memory and has
// a single writer; anything that shares it across threads has to wrap the
// whole struct in one lock so a block commit is observed all at once.

use crate::config::Config;
use crate::core::monetary::{coinbase_reward, BLOCK_REWARD, DEFAULT_DIFFICULTY, MAX_DIFFICULTY};
use crate::core::{Amount, Block, BlockSnapshot, MerkleTree, ProofOfWork, Transaction};
use crate::error::{BlockchainError, Result};
use crate::storage::Mempool;
use log::info;

/// Previous-hash marker of the genesis block
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Merkle-root marker of the genesis block, which commits no transactions
pub const GENESIS_MERKLE_ROOT: &str = "Genesis Block";

#[derive(Debug, Clone)]
pub struct Blockchain {
    chain: Vec<Block>, // index 0 is genesis, append-only
    mempool: Mempool,
    difficulty: u32,
    block_reward: Amount,
}

impl Blockchain {
    // A fresh ledger with the standard difficulty and reward
    pub fn new() -> Result<Blockchain> {
        Self::with_config(DEFAULT_DIFFICULTY, BLOCK_REWARD)
    }

    pub fn from_config(config: &Config) -> Result<Blockchain> {
        Self::with_config(config.difficulty, config.block_reward)
    }

    // Genesis is mined like every other block, so startup pays one full search
    pub fn with_config(difficulty: u32, block_reward: Amount) -> Result<Blockchain> {
        if difficulty > MAX_DIFFICULTY {
            return Err(BlockchainError::Config(format!(
                "Difficulty {difficulty} exceeds the maximum of {MAX_DIFFICULTY}"
            )));
        }

        info!("Creating genesis block (difficulty: {difficulty})");
        let genesis = Self::genesis(difficulty)?;

        Ok(Blockchain {
            chain: vec![genesis],
            mempool: Mempool::new(),
            difficulty,
            block_reward,
        })
    }

    fn genesis(difficulty: u32) -> Result<Block> {
        Block::new_block(
            0,
            GENESIS_PREVIOUS_HASH.to_string(),
            GENESIS_MERKLE_ROOT.to_string(),
            difficulty,
        )
    }

    pub fn submit_transaction(&mut self, transaction: Transaction) -> String {
        let message = self.mempool.add(transaction);
        info!("{message}");
        message
    }

    pub fn mempool(&self) -> &Mempool {
        &self.mempool
    }

    // Commit everything in the mempool into a new block paying `miner_address`.
    //
    // The coinbase goes first, then the pooled transactions in submission
    // order. Nothing is changed until the block has been mined, so a failure
    // leaves both the chain and the mempool exactly as they were.
    pub fn append_block(&mut self, miner_address: &str) -> Result<(Block, Vec<String>)> {
        let total_fees = self.mempool.total_fees();
        let reward = coinbase_reward(self.block_reward, total_fees);

        let mut batch = Vec::with_capacity(self.mempool.len() + 1);
        batch.push(Transaction::new_coinbase_tx(miner_address, reward));
        batch.extend_from_slice(self.mempool.pending());

        let merkle_tree = MerkleTree::new(&batch)?;
        let previous_hash = self.tip().get_hash().to_string();
        let index = self.chain.len() as u64;

        info!(
            "Mining block #{index} with {} transactions ({total_fees} PKO in fees, reward {reward} PKO to {miner_address})",
            batch.len()
        );

        let block = Block::new_block(
            index,
            previous_hash,
            merkle_tree.root().to_string(),
            self.difficulty,
        )?;

        self.chain.push(block.clone());
        self.mempool.take();

        info!("Successfully appended block #{index}: {}", block.get_hash());

        let transactions = batch.iter().map(Transaction::canonical).collect();
        Ok((block, transactions))
    }

    pub fn chain_view(&self) -> Vec<BlockSnapshot> {
        self.chain.iter().map(Block::snapshot).collect()
    }

    pub fn blocks(&self) -> &[Block] {
        self.chain.as_slice()
    }

    pub fn tip(&self) -> &Block {
        // the chain is created with genesis and never shrinks
        &self.chain[self.chain.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn get_difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn get_block_reward(&self) -> Amount {
        self.block_reward
    }

    /// Re-check every block: proof-of-work, index sequence and hash linkage.
    pub fn validate(&self) -> Result<()> {
        for (i, block) in self.chain.iter().enumerate() {
            if block.get_index() != i as u64 {
                return Err(BlockchainError::InvalidBlock(format!(
                    "Block at position {i} carries index {}",
                    block.get_index()
                )));
            }

            if !ProofOfWork::validate(block) {
                return Err(BlockchainError::InvalidBlock(format!(
                    "Block #{i} has an invalid proof-of-work"
                )));
            }

            let expected_previous = match i {
                0 => GENESIS_PREVIOUS_HASH,
                _ => self.chain[i - 1].get_hash(),
            };
            if block.get_pre_block_hash() != expected_previous {
                return Err(BlockchainError::InvalidBlock(format!(
                    "Block #{i} does not link to its predecessor"
                )));
            }
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    #[cfg(test)]
    pub(crate) fn replace_block(&mut self, position: usize, block: Block) {
        self.chain[position] = block;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_chain() -> Blockchain {
        Blockchain::with_config(1, BLOCK_REWARD).unwrap()
    }

    #[test]
    fn test_genesis_block() {
        let chain = test_chain();
        assert_eq!(chain.len(), 1);

        let genesis = chain.tip();
        assert_eq!(genesis.get_index(), 0);
        assert_eq!(genesis.get_pre_block_hash(), "0");
        assert_eq!(genesis.get_merkle_root(), "Genesis Block");
        assert!(ProofOfWork::validate(genesis));
    }

    #[test]
    fn test_default_chain_uses_difficulty_four() {
        let chain = Blockchain::new().unwrap();
        assert_eq!(chain.get_difficulty(), 4);
        assert!(chain.tip().get_hash().starts_with("0000"));
    }

    #[test]
    fn test_difficulty_above_maximum_is_rejected() {
        let result = Blockchain::with_config(MAX_DIFFICULTY + 1, BLOCK_REWARD);
        assert!(matches!(result, Err(BlockchainError::Config(_))));
    }

    #[test]
    fn test_coinbase_collects_fees() {
        let mut chain = test_chain();
        chain.submit_transaction(Transaction::new("A", "B", 10, 2));
        chain.submit_transaction(Transaction::new("B", "C", 4, 3));

        let (_, transactions) = chain.append_block("M").unwrap();
        assert_eq!(transactions[0], "Network -> M: 6 PKO, Commission Fee: 0 PKO");
        assert_eq!(transactions[1], "A -> B: 10 PKO, Commission Fee: 2 PKO");
        assert_eq!(transactions[2], "B -> C: 4 PKO, Commission Fee: 3 PKO");
    }

    #[test]
    fn test_fractional_fees_summing_to_whole_keep_float_form() {
        let mut chain = Blockchain::with_config(0, BLOCK_REWARD).unwrap();
        chain.submit_transaction(Transaction::new("A", "B", 1, 0.5));
        chain.submit_transaction(Transaction::new("B", "C", 1, 0.5));

        let (block, transactions) = chain.append_block("M").unwrap();
        assert_eq!(transactions[0], "Network -> M: 2.0 PKO, Commission Fee: 0 PKO");

        let coinbase = Transaction::new_coinbase_tx("M", Amount::Float(2.0));
        let batch = vec![
            coinbase,
            Transaction::new("A", "B", 1, 0.5),
            Transaction::new("B", "C", 1, 0.5),
        ];
        assert_eq!(block.get_merkle_root(), MerkleTree::new(&batch).unwrap().root());
    }

    #[test]
    fn test_empty_mempool_still_mines_coinbase() {
        let mut chain = test_chain();
        let (block, transactions) = chain.append_block("M").unwrap();

        assert_eq!(transactions, vec!["Network -> M: 1 PKO, Commission Fee: 0 PKO"]);
        let coinbase = Transaction::new_coinbase_tx("M", Amount::Int(1));
        assert_eq!(block.get_merkle_root(), coinbase.hash());
    }

    #[test]
    fn test_merkle_root_commits_batch() {
        let mut chain = test_chain();
        let tx = Transaction::new("A", "B", 1, 0.5);
        chain.submit_transaction(tx.clone());

        let (block, _) = chain.append_block("M").unwrap();
        let batch = vec![Transaction::new_coinbase_tx("M", Amount::Float(1.5)), tx];
        assert_eq!(block.get_merkle_root(), MerkleTree::new(&batch).unwrap().root());
    }

    #[test]
    fn test_mempool_drained_after_append() {
        let mut chain = test_chain();
        chain.submit_transaction(Transaction::without_fee("A", "B", 1));
        assert_eq!(chain.mempool().len(), 1);

        chain.append_block("M").unwrap();
        assert!(chain.mempool().is_empty());
    }

    #[test]
    fn test_chain_links_and_indices() {
        let mut chain = test_chain();
        for i in 0..4i64 {
            chain.submit_transaction(Transaction::new("A", "B", i, 1));
            chain.append_block("M").unwrap();
        }

        let blocks = chain.blocks();
        assert_eq!(blocks.len(), 5);
        for i in 1..blocks.len() {
            assert_eq!(blocks[i].get_index(), i as u64);
            assert_eq!(blocks[i].get_pre_block_hash(), blocks[i - 1].get_hash());
        }
        assert!(chain.is_valid());
    }

    #[test]
    fn test_validate_detects_broken_link() {
        let mut chain = test_chain();
        chain.append_block("M").unwrap();
        chain.append_block("M").unwrap();

        let orphan = Block::new_block(2, "not-the-parent".to_string(), "root".to_string(), 1).unwrap();
        chain.replace_block(2, orphan);
        assert!(!chain.is_valid());
    }

    #[test]
    fn test_validate_detects_forged_hash() {
        let mut chain = test_chain();
        chain.append_block("M").unwrap();

        let forged = chain.blocks()[1].with_hash(&"0".repeat(64));
        chain.replace_block(1, forged);
        assert!(matches!(chain.validate(), Err(BlockchainError::InvalidBlock(_))));
    }

    #[test]
    fn test_chain_view_matches_blocks() {
        let mut chain = test_chain();
        chain.append_block("M").unwrap();

        let view = chain.chain_view();
        assert_eq!(view.len(), 2);
        assert_eq!(view[1].previous_hash, view[0].hash);
        assert_eq!(view[1].hash, chain.tip().get_hash());
    }

    #[test]
    fn test_configured_reward() {
        let mut chain = Blockchain::with_config(1, Amount::Int(50)).unwrap();
        assert_eq!(chain.get_block_reward(), Amount::Int(50));
        chain.submit_transaction(Transaction::new("A", "B", 1, 0.5));
        let (_, transactions) = chain.append_block("M").unwrap();
        assert_eq!(transactions[0], "Network -> M: 50.5 PKO, Commission Fee: 0 PKO");
    }
}
