//! Error handling for the ledger
//!
//! The core itself only fails on caller precondition violations (an empty
//! Merkle batch) or a broken system clock. Everything else here belongs to
//! the adapters around it: configuration, the TCP request layer and the CLI.

use std::fmt;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, BlockchainError>;

/// Error types for ledger operations
#[derive(Debug, Clone, PartialEq)]
pub enum BlockchainError {
    /// Block construction or validation errors
    InvalidBlock(String),
    /// A Merkle tree was requested over zero transactions
    EmptyBatch,
    /// Configuration errors
    Config(String),
    /// Serialization/deserialization errors
    Serialization(String),
    /// File I/O errors
    Io(String),
    /// Request layer communication errors
    Network(String),
    /// System clock errors
    Clock(String),
}

impl fmt::Display for BlockchainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockchainError::InvalidBlock(msg) => write!(f, "Invalid block: {msg}"),
            BlockchainError::EmptyBatch => {
                write!(f, "Cannot build a Merkle tree from an empty transaction batch")
            }
            BlockchainError::Config(msg) => write!(f, "Configuration error: {msg}"),
            BlockchainError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            BlockchainError::Io(msg) => write!(f, "I/O error: {msg}"),
            BlockchainError::Network(msg) => write!(f, "Network error: {msg}"),
            BlockchainError::Clock(msg) => write!(f, "Clock error: {msg}"),
        }
    }
}

impl std::error::Error for BlockchainError {}

impl From<std::io::Error> for BlockchainError {
    fn from(err: std::io::Error) -> Self {
        BlockchainError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BlockchainError {
    fn from(err: serde_json::Error) -> Self {
        BlockchainError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for BlockchainError {
    fn from(err: toml::de::Error) -> Self {
        BlockchainError::Config(err.to_string())
    }
}
