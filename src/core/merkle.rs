use crate::core::Transaction;
use crate::error::{BlockchainError, Result};
use crate::utils::sha256_hex;
use serde::{Deserialize, Serialize};

/// Merkle tree over a batch of transactions
///
/// Hashes are lowercase hex strings. A parent is the SHA-256 of its two
/// children's hex strings concatenated as text, not of their raw digest
/// bytes. Any level with an odd number of hashes (above the root) gets its
/// last hash duplicated before pairing. Both rules are part of the root's
/// definition and must not change.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// Every level from the leaves up to the root, odd levels already padded
    levels: Vec<Vec<String>>,
    leaf_count: usize,
}

/// Merkle proof for transaction inclusion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// Leaf hash being proven
    pub transaction_hash: String,
    /// Root the proof resolves to
    pub merkle_root: String,
    /// Sibling hashes from the leaf level upwards
    pub proof_path: Vec<ProofElement>,
    /// Index of the transaction in the batch
    pub transaction_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofElement {
    /// Sibling hash
    pub hash: String,
    /// Direction: true if sibling is on the right, false if on the left
    pub is_right: bool,
}

impl MerkleTree {
    /// Build the tree over `transactions` in order.
    pub fn new(transactions: &[Transaction]) -> Result<Self> {
        let leaves = transactions.iter().map(Self::hash_leaf).collect();
        Self::from_hashes(leaves)
    }

    /// Build the tree over precomputed leaf hashes.
    pub fn from_hashes(leaves: Vec<String>) -> Result<Self> {
        if leaves.is_empty() {
            return Err(BlockchainError::EmptyBatch);
        }

        let leaf_count = leaves.len();
        Ok(MerkleTree {
            levels: Self::build_levels(leaves),
            leaf_count,
        })
    }

    /// Leaf digest: SHA-256 of the transaction's canonical string
    pub fn hash_leaf(transaction: &Transaction) -> String {
        transaction.hash()
    }

    /// Parent digest: SHA-256 of `left ++ right` as hex text
    pub fn hash_pair(left: &str, right: &str) -> String {
        let mut combined = String::with_capacity(left.len() + right.len());
        combined.push_str(left);
        combined.push_str(right);
        sha256_hex(&combined)
    }

    /// Reduce one level of hashes to the root without keeping the tree.
    pub fn reduce(level: Vec<String>) -> Result<String> {
        Self::from_hashes(level).map(|tree| tree.root().to_string())
    }

    pub fn root(&self) -> &str {
        // build_levels always ends with a single-element level
        self.levels
            .last()
            .and_then(|level| level.first())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of pairing rounds between the leaves and the root
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Generate an inclusion proof for the leaf at `transaction_index`.
    pub fn generate_proof(&self, transaction_index: usize) -> Result<MerkleProof> {
        if transaction_index >= self.leaf_count {
            return Err(BlockchainError::InvalidBlock(format!(
                "Transaction index {} out of bounds (max: {})",
                transaction_index,
                self.leaf_count - 1
            )));
        }

        let mut proof_path = Vec::with_capacity(self.depth());
        let mut index = transaction_index;
        for level in &self.levels[..self.depth()] {
            let sibling = index ^ 1;
            proof_path.push(ProofElement {
                hash: level[sibling].clone(),
                is_right: index % 2 == 0,
            });
            index /= 2;
        }

        Ok(MerkleProof {
            transaction_hash: self.levels[0][transaction_index].clone(),
            merkle_root: self.root().to_string(),
            proof_path,
            transaction_index,
        })
    }

    /// Check that `proof` folds up to its claimed root.
    pub fn verify_proof(proof: &MerkleProof) -> bool {
        let mut current_hash = proof.transaction_hash.clone();

        for element in &proof.proof_path {
            current_hash = if element.is_right {
                Self::hash_pair(&current_hash, &element.hash)
            } else {
                Self::hash_pair(&element.hash, &current_hash)
            };
        }

        current_hash == proof.merkle_root
    }

    /// Level-by-level reduction; callers guarantee `current` is non-empty.
    fn build_levels(mut current: Vec<String>) -> Vec<Vec<String>> {
        let mut levels = Vec::new();

        while current.len() > 1 {
            if current.len() % 2 != 0 {
                if let Some(last) = current.last().cloned() {
                    current.push(last);
                }
            }

            let next_level = current
                .chunks_exact(2)
                .map(|pair| Self::hash_pair(&pair[0], &pair[1]))
                .collect();

            levels.push(current);
            current = next_level;
        }

        levels.push(current);
        levels
    }
}
