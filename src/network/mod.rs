//! Request handling
//!
//! A thin JSON-over-TCP layer exposing the three ledger operations:
//! submitting a transaction, mining a block and reading the chain.

pub mod client;
pub mod message;
pub mod server;

pub use client::send_request;
pub use message::{Request, Response};
pub use server::Server;
