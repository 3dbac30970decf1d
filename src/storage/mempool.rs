use crate::core::monetary::total_fees;
use crate::core::{Amount, Transaction};
use log::debug;

/// Ordered staging list of transactions waiting for the next block.
///
/// Insertion order is preserved and is the order transactions are committed
/// in. There is no capacity limit and no deduplication. The pool is owned by
/// the [`Blockchain`](crate::core::Blockchain), which drains it exactly once
/// per committed block.
#[derive(Debug, Clone, Default)]
pub struct Mempool {
    transactions: Vec<Transaction>,
}

impl Mempool {
    pub fn new() -> Mempool {
        Mempool {
            transactions: Vec::new(),
        }
    }

    /// Append `tx` and return a human-readable acknowledgment.
    pub fn add(&mut self, tx: Transaction) -> String {
        let message = format!("Transaction added: {tx}");
        debug!("Mempool accepted: {tx}");
        self.transactions.push(tx);
        message
    }

    pub fn pending(&self) -> &[Transaction] {
        self.transactions.as_slice()
    }

    pub fn total_fees(&self) -> Amount {
        total_fees(&self.transactions)
    }

    /// Remove and return every pending transaction, leaving the pool empty.
    pub fn take(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.transactions)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
