//! Transaction staging
//!
//! Holds transactions that have been submitted but not yet committed to a
//! block. Nothing here touches disk; the ledger lives in process memory.

pub mod mempool;

pub use mempool::Mempool;
