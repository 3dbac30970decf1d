// A transaction is just a value record: who pays whom, how much, and what fee
// the miner collects for including it. Its Display output is the canonical
// form that every hash in the ledger is computed from, so the format string
// below must never change.

use crate::core::monetary::{COINBASE_SENDER, CURRENCY_TICKER};
use crate::core::Amount;
use crate::utils::sha256_hex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    sender: String,
    receiver: String,
    amount: Amount,
    #[serde(default)]
    fee: Amount,
}

impl Transaction {
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: impl Into<Amount>,
        fee: impl Into<Amount>,
    ) -> Self {
        Transaction {
            sender: sender.into(),
            receiver: receiver.into(),
            amount: amount.into(),
            fee: fee.into(),
        }
    }

    /// A transfer that pays no commission fee
    pub fn without_fee(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: impl Into<Amount>,
    ) -> Self {
        Self::new(sender, receiver, amount, Amount::ZERO)
    }

    /// The synthetic transaction that credits the miner with `reward`
    pub fn new_coinbase_tx(miner_address: &str, reward: Amount) -> Self {
        Self::without_fee(COINBASE_SENDER, miner_address, reward)
    }

    pub fn get_sender(&self) -> &str {
        self.sender.as_str()
    }

    pub fn get_receiver(&self) -> &str {
        self.receiver.as_str()
    }

    pub fn get_amount(&self) -> Amount {
        self.amount
    }

    pub fn get_fee(&self) -> Amount {
        self.fee
    }

    /// Canonical string form, the sole hashing input for this transaction
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    /// Lowercase hex SHA-256 of the canonical form
    pub fn hash(&self) -> String {
        sha256_hex(&self.canonical())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}: {} {CURRENCY_TICKER}, Commission Fee: {} {CURRENCY_TICKER}",
            self.sender, self.receiver, self.amount, self.fee
        )
    }
}
