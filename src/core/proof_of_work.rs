use crate::core::Block;
use crate::utils::sha256_hex;
use log::debug;

/// Brute-force nonce search over a block's header fields.
///
/// A hash satisfies the target when its first `difficulty` hex characters
/// are all `'0'`. The search starts at nonce 0 and has no upper bound.
pub struct ProofOfWork<'a> {
    block: &'a Block,
    difficulty: u32,
}

impl<'a> ProofOfWork<'a> {
    pub fn new_proof_of_work(block: &'a Block) -> ProofOfWork<'a> {
        ProofOfWork {
            block,
            difficulty: block.get_difficulty(),
        }
    }

    /// Validate proof-of-work for a block: the stored hash must both
    /// recompute from the stored fields and meet the difficulty target.
    pub fn validate(block: &Block) -> bool {
        let pow = ProofOfWork::new_proof_of_work(block);
        let hash = sha256_hex(&pow.prepare_data(block.get_nonce()));
        hash == block.get_hash() && Self::meets_difficulty(&hash, pow.difficulty)
    }

    /// Whether `hash` starts with `difficulty` zero hex characters
    pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
        let difficulty = difficulty as usize;
        hash.len() >= difficulty && hash.bytes().take(difficulty).all(|b| b == b'0')
    }

    /// Hashing input: index, previous hash, merkle root, timestamp and nonce
    /// concatenated as text.
    pub fn prepare_data(&self, nonce: u64) -> String {
        format!(
            "{}{}{}{}{}",
            self.block.get_index(),
            self.block.get_pre_block_hash(),
            self.block.get_merkle_root(),
            self.block.get_timestamp(),
            nonce
        )
    }

    /// Search nonces from 0 upwards until one satisfies the target.
    pub fn run(&self) -> (u64, String) {
        let mut nonce = 0;
        loop {
            let hash = sha256_hex(&self.prepare_data(nonce));
            if Self::meets_difficulty(&hash, self.difficulty) {
                debug!("Nonce {nonce} satisfies difficulty {}", self.difficulty);
                return (nonce, hash);
            }
            nonce += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_block(difficulty: u32) -> Block {
        Block::new_block_at(1, "prev".to_string(), "root".to_string(), 1_700_000_000.5, difficulty)
    }

    #[test]
    fn test_prepare_data_layout() {
        let block = create_test_block(1);
        let pow = ProofOfWork::new_proof_of_work(&block);
        assert_eq!(pow.prepare_data(42), "1prevroot1700000000.542");
    }

    #[test]
    fn test_prepare_data_consistency() {
        let block = create_test_block(2);
        let pow = ProofOfWork::new_proof_of_work(&block);

        assert_eq!(pow.prepare_data(12345), pow.prepare_data(12345));
        assert_ne!(pow.prepare_data(12345), pow.prepare_data(54321));
    }

    #[test]
    fn test_proof_of_work_validation_valid_block() {
        let block = create_test_block(2);
        assert!(block.get_hash().starts_with("00"));
        assert!(ProofOfWork::validate(&block));
    }

    #[test]
    fn test_run_finds_first_satisfying_nonce() {
        let block = create_test_block(1);
        let pow = ProofOfWork::new_proof_of_work(&block);
        let (nonce, hash) = pow.run();

        for earlier in 0..nonce {
            let candidate = sha256_hex(&pow.prepare_data(earlier));
            assert!(!candidate.starts_with('0'));
        }
        assert_eq!(hash, sha256_hex(&pow.prepare_data(nonce)));
    }

    #[test]
    fn test_zero_difficulty_accepts_nonce_zero() {
        let block = create_test_block(0);
        assert_eq!(block.get_nonce(), 0);
        assert!(ProofOfWork::validate(&block));
    }

    #[test]
    fn test_meets_difficulty() {
        assert!(ProofOfWork::meets_difficulty("000abc", 3));
        assert!(!ProofOfWork::meets_difficulty("00abc", 3));
        assert!(ProofOfWork::meets_difficulty("abc", 0));
        assert!(!ProofOfWork::meets_difficulty("00", 3));
    }
}
