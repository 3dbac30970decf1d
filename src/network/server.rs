use crate::core::{Blockchain, Transaction};
use crate::error::{BlockchainError, Result};
use crate::network::{Request, Response};
use log::{debug, error, info, warn};
use serde_json::Deserializer;
use std::io::{BufReader, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const TCP_READ_TIMEOUT: u64 = 60;

/// Request-handling layer in front of a single ledger.
///
/// Each connection gets its own thread. The ledger sits behind one mutex, so
/// a mine request holds it from fee summation through mempool drain and no
/// other request can observe a half-committed block.
pub struct Server {
    blockchain: Arc<Mutex<Blockchain>>,
}

impl Server {
    pub fn new(blockchain: Blockchain) -> Self {
        Self {
            blockchain: Arc::new(Mutex::new(blockchain)),
        }
    }

    /// Shared handle to the ledger this server fronts
    pub fn blockchain(&self) -> Arc<Mutex<Blockchain>> {
        Arc::clone(&self.blockchain)
    }

    /// Bind to `addr` and serve until the listener fails.
    pub fn run(&self, addr: &str) -> Result<()> {
        let listener = TcpListener::bind(addr)
            .map_err(|e| BlockchainError::Network(format!("Failed to bind to {addr}: {e}")))?;

        info!("Server listening on {addr}");
        self.serve(listener);
        Ok(())
    }

    /// Accept connections on an already bound listener.
    pub fn serve(&self, listener: TcpListener) {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let peer_addr = match stream.peer_addr() {
                        Ok(addr) => addr,
                        Err(e) => {
                            error!("Failed to get peer address: {e}");
                            continue;
                        }
                    };

                    let blockchain = Arc::clone(&self.blockchain);
                    thread::spawn(move || {
                        if let Err(e) = Self::handle_connection(&blockchain, stream, peer_addr) {
                            error!("Error handling connection from {peer_addr}: {e}");
                        }
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {e}");
                }
            }
        }
    }

    fn handle_connection(
        blockchain: &Mutex<Blockchain>,
        mut stream: TcpStream,
        peer_addr: SocketAddr,
    ) -> Result<()> {
        stream
            .set_read_timeout(Some(Duration::from_secs(TCP_READ_TIMEOUT)))
            .map_err(|e| BlockchainError::Network(format!("Failed to set read timeout: {e}")))?;

        let reader = BufReader::new(stream.try_clone()?);
        let requests = Deserializer::from_reader(reader).into_iter::<Request>();

        for request in requests {
            let response = match request {
                Ok(request) => {
                    info!("Received request from {peer_addr}: {request:?}");
                    Self::process_request(blockchain, request)
                }
                Err(e) => {
                    if let Some(response) = Self::decode_failure_response(&e) {
                        warn!("Malformed request from {peer_addr}: {e}");
                        Self::write_response(&mut stream, &response)?;
                    } else {
                        debug!("Connection from {peer_addr} closed: {e}");
                    }
                    break;
                }
            };
            Self::write_response(&mut stream, &response)?;
        }

        let _ = stream.shutdown(Shutdown::Both);
        Ok(())
    }

    /// Reply owed to the peer when a request fails to decode.
    ///
    /// Read failures (an idle timeout, a reset) end the connection silently;
    /// only bytes that do not form a request get a `Malformed request` reply.
    fn decode_failure_response(e: &serde_json::Error) -> Option<Response> {
        if e.is_io() {
            None
        } else {
            Some(Response::error(format!("Malformed request: {e}")))
        }
    }

    fn write_response(stream: &mut TcpStream, response: &Response) -> Result<()> {
        serde_json::to_writer(&mut *stream, response)
            .map_err(|e| BlockchainError::Network(format!("Failed to send response: {e}")))?;
        stream.write_all(b"\n")?;
        stream.flush()?;
        Ok(())
    }

    /// Validate a request at the boundary and apply it to the ledger.
    pub fn process_request(blockchain: &Mutex<Blockchain>, request: Request) -> Response {
        match request {
            Request::SubmitTransaction {
                sender,
                receiver,
                amount,
                fee,
            } => {
                let (Some(sender), Some(receiver), Some(amount)) = (sender, receiver, amount)
                else {
                    return Response::error("Missing values");
                };
                let transaction = Transaction::new(sender, receiver, amount, fee.unwrap_or_default());

                match blockchain.lock() {
                    Ok(mut chain) => Response::TransactionAdded {
                        message: chain.submit_transaction(transaction),
                    },
                    Err(_) => Self::lock_failure(),
                }
            }
            Request::Mine { miner } => {
                let Some(miner) = miner else {
                    return Response::error("Miner address is required");
                };

                let result = match blockchain.lock() {
                    Ok(mut chain) => chain.append_block(&miner),
                    Err(_) => return Self::lock_failure(),
                };

                match result {
                    Ok((block, transactions)) => Response::BlockMined {
                        message: "New block mined".to_string(),
                        index: block.get_index(),
                        transactions,
                        previous_hash: block.get_pre_block_hash().to_string(),
                        hash: block.get_hash().to_string(),
                        nonce: block.get_nonce(),
                        merkle_root: block.get_merkle_root().to_string(),
                    },
                    Err(e) => {
                        error!("Mining failed: {e}");
                        Response::error(e.to_string())
                    }
                }
            }
            Request::GetChain => match blockchain.lock() {
                Ok(chain) => Response::Chain {
                    chain: chain.chain_view(),
                    length: chain.len(),
                },
                Err(_) => Self::lock_failure(),
            },
        }
    }

    fn lock_failure() -> Response {
        error!("Failed to acquire lock on the blockchain");
        Response::error("Ledger unavailable")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Amount, BLOCK_REWARD};
    use std::io::{self, Read};

    fn create_test_ledger() -> Mutex<Blockchain> {
        Mutex::new(Blockchain::with_config(1, BLOCK_REWARD).unwrap())
    }

    #[test]
    fn test_submit_transaction() {
        let ledger = create_test_ledger();
        let response = Server::process_request(&ledger, Request::submit("A", "B", 5, 1));

        assert_eq!(
            response,
            Response::TransactionAdded {
                message: "Transaction added: A -> B: 5 PKO, Commission Fee: 1 PKO".to_string()
            }
        );
        assert_eq!(ledger.lock().unwrap().mempool().len(), 1);
    }

    #[test]
    fn test_submit_without_fee_defaults_to_zero() {
        let ledger = create_test_ledger();
        let request = Request::SubmitTransaction {
            sender: Some("A".to_string()),
            receiver: Some("B".to_string()),
            amount: Some(Amount::Int(2)),
            fee: None,
        };
        Server::process_request(&ledger, request);
        assert_eq!(ledger.lock().unwrap().mempool().pending()[0].get_fee(), Amount::ZERO);
    }

    /// Reader that behaves like an idle socket hitting its read timeout
    struct IdlePeer;

    impl Read for IdlePeer {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(
                io::ErrorKind::WouldBlock,
                "Resource temporarily unavailable",
            ))
        }
    }

    #[test]
    fn test_read_failure_gets_no_reply() {
        let timed_out = serde_json::from_reader::<_, Request>(IdlePeer).unwrap_err();
        assert!(timed_out.is_io());
        assert_eq!(Server::decode_failure_response(&timed_out), None);

        let garbage = serde_json::from_str::<Request>("{not json").unwrap_err();
        let Some(Response::Error { message }) = Server::decode_failure_response(&garbage) else {
            panic!("expected an error reply for undecodable bytes");
        };
        assert!(message.starts_with("Malformed request"));
    }

    #[test]
    fn test_garbage_on_the_socket_gets_malformed_reply() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = Server::new(Blockchain::with_config(1, BLOCK_REWARD).unwrap());
        thread::spawn(move || server.serve(listener));

        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(b"{not json}").unwrap();
        stream.shutdown(Shutdown::Write).unwrap();

        let mut reply = String::new();
        stream.read_to_string(&mut reply).unwrap();
        let response: Response = serde_json::from_str(reply.trim()).unwrap();
        assert!(matches!(response, Response::Error { message } if message.starts_with("Malformed request")));
    }

    #[test]
    fn test_missing_values_never_reach_the_core() {
        let ledger = create_test_ledger();
        let request = Request::SubmitTransaction {
            sender: Some("A".to_string()),
            receiver: None,
            amount: Some(Amount::Int(2)),
            fee: None,
        };

        assert_eq!(
            Server::process_request(&ledger, request),
            Response::error("Missing values")
        );
        assert!(ledger.lock().unwrap().mempool().is_empty());
    }

    #[test]
    fn test_mine_requires_miner() {
        let ledger = create_test_ledger();
        let response = Server::process_request(&ledger, Request::Mine { miner: None });
        assert_eq!(response, Response::error("Miner address is required"));
        assert_eq!(ledger.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_mine_and_query_chain() {
        let ledger = create_test_ledger();
        Server::process_request(&ledger, Request::submit("A", "B", 5, 1));

        let response = Server::process_request(&ledger, Request::mine("Miner1"));
        let Response::BlockMined {
            index,
            transactions,
            hash,
            ..
        } = response
        else {
            panic!("expected a mined block, got {response:?}");
        };
        assert_eq!(index, 1);
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0], "Network -> Miner1: 2 PKO, Commission Fee: 0 PKO");

        let Response::Chain { chain, length } = Server::process_request(&ledger, Request::GetChain)
        else {
            panic!("expected the chain");
        };
        assert_eq!(length, 2);
        assert_eq!(chain[1].hash, hash);
    }
}
