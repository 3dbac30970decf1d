use crate::error::{BlockchainError, Result};
use crate::network::{Request, Response};
use serde_json::Deserializer;
use std::io::Write;
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;

const TCP_WRITE_TIMEOUT: u64 = 5000;

/// Send one request to the node at `addr` and wait for its response.
///
/// There is no read timeout: a mine request blocks until the node has found
/// a nonce.
pub fn send_request(addr: &str, request: &Request) -> Result<Response> {
    let socket_addr = addr
        .parse::<SocketAddr>()
        .map_err(|e| BlockchainError::Network(format!("Failed to parse address {addr}: {e}")))?;

    let mut stream =
        TcpStream::connect_timeout(&socket_addr, Duration::from_millis(TCP_WRITE_TIMEOUT))
            .map_err(|e| BlockchainError::Network(format!("Failed to connect to {addr}: {e}")))?;

    stream
        .set_write_timeout(Some(Duration::from_millis(TCP_WRITE_TIMEOUT)))
        .map_err(|e| BlockchainError::Network(format!("Failed to set write timeout: {e}")))?;

    serde_json::to_writer(&mut stream, request)
        .map_err(|e| BlockchainError::Network(format!("Failed to send request: {e}")))?;
    stream.flush()?;
    stream.shutdown(Shutdown::Write)?;

    let response = Deserializer::from_reader(&stream)
        .into_iter::<Response>()
        .next()
        .ok_or_else(|| BlockchainError::Network(format!("{addr} closed without responding")))?
        .map_err(|e| BlockchainError::Network(format!("Failed to read response: {e}")))?;
    Ok(response)
}
