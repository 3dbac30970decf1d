//! Ledger monetary constants
//!
//! Amounts are plain PKO values with no smaller unit. See [`Amount`] for
//! how integer and fractional values are kept apart.

use crate::core::{Amount, Transaction};

/// Ticker used in the canonical transaction string
pub const CURRENCY_TICKER: &str = "PKO";

/// Base reward paid to the miner of every non-genesis block
pub const BLOCK_REWARD: Amount = Amount::Int(1);

/// Sender identifier used by coinbase transactions
pub const COINBASE_SENDER: &str = "Network";

/// Difficulty used for every block, genesis included, unless configured otherwise
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Upper bound on configurable difficulty. Mining is synchronous and
/// expected work grows as 16^difficulty, so anything above this would
/// block callers for an impractical amount of time.
pub const MAX_DIFFICULTY: u32 = 8;

/// Sum of the fees of the given transactions
pub fn total_fees<'a, I>(transactions: I) -> Amount
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions.into_iter().map(|tx| tx.get_fee()).sum()
}

/// Coinbase payout for a block that collected `fees`
pub fn coinbase_reward(block_reward: Amount, fees: Amount) -> Amount {
    block_reward + fees
}
