use crate::core::{Amount, BlockSnapshot};
use serde::{Deserialize, Serialize};

/// Requests accepted by the node.
///
/// Fields are optional on the wire so that a request with missing values
/// still decodes and can be answered with an error instead of dropping the
/// connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    SubmitTransaction {
        sender: Option<String>,
        receiver: Option<String>,
        amount: Option<Amount>,
        fee: Option<Amount>,
    },
    Mine {
        miner: Option<String>,
    },
    GetChain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    TransactionAdded {
        message: String,
    },
    BlockMined {
        message: String,
        index: u64,
        transactions: Vec<String>,
        previous_hash: String,
        hash: String,
        nonce: u64,
        merkle_root: String,
    },
    Chain {
        chain: Vec<BlockSnapshot>,
        length: usize,
    },
    Error {
        message: String,
    },
}

impl Request {
    pub fn submit(
        sender: &str,
        receiver: &str,
        amount: impl Into<Amount>,
        fee: impl Into<Amount>,
    ) -> Request {
        Request::SubmitTransaction {
            sender: Some(sender.to_string()),
            receiver: Some(receiver.to_string()),
            amount: Some(amount.into()),
            fee: Some(fee.into()),
        }
    }

    pub fn mine(miner: &str) -> Request {
        Request::Mine {
            miner: Some(miner.to_string()),
        }
    }
}

impl Response {
    pub fn error(message: impl Into<String>) -> Response {
        Response::Error {
            message: message.into(),
        }
    }
}
