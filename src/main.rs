// Entry point for the ledger node and its client commands
use clap::Parser;
use log::{error, info, LevelFilter};
use pko_chain::cli::render_chain;
use pko_chain::{send_request, Blockchain, Command, Config, Opt, Request, Response, Server, Transaction};
use std::process;

fn main() {
    // Info by default, RUST_LOG can still narrow or widen it
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let opt = Opt::parse();

    if let Err(e) = run_command(opt) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run_command(opt: Opt) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load(opt.config.as_deref())?;

    match opt.command {
        Command::StartNode { addr, difficulty } => {
            if let Some(addr) = addr {
                config.node_addr = addr;
            }
            if let Some(difficulty) = difficulty {
                config.difficulty = difficulty;
            }
            config.validate()?;

            // The node owns exactly one ledger; the server shares it between connections
            let blockchain = Blockchain::from_config(&config)?;
            info!("Genesis block: {}", blockchain.tip().get_hash());
            info!(
                "Difficulty {}, block reward {} PKO",
                blockchain.get_difficulty(),
                blockchain.get_block_reward()
            );
            Server::new(blockchain).run(&config.node_addr)?;
        }
        Command::Submit {
            sender,
            receiver,
            amount,
            fee,
            addr,
        } => {
            let addr = addr.unwrap_or(config.node_addr);
            let response = send_request(&addr, &Request::submit(&sender, &receiver, amount, fee))?;
            print_response(response)?;
        }
        Command::Mine { miner, addr } => {
            let miner = miner
                .or(config.miner_address)
                .ok_or("Miner address is required (argument or PKO_MINER_ADDRESS)")?;
            let addr = addr.unwrap_or(config.node_addr);
            let response = send_request(&addr, &Request::mine(&miner))?;
            print_response(response)?;
        }
        Command::Printchain { json, addr } => {
            let addr = addr.unwrap_or(config.node_addr);
            match send_request(&addr, &Request::GetChain)? {
                Response::Chain { chain, length } => {
                    if json {
                        let body = serde_json::json!({ "chain": chain, "length": length });
                        println!("{}", serde_json::to_string_pretty(&body)?);
                    } else {
                        print!("{}", render_chain(&chain));
                        println!("Length: {length}");
                    }
                }
                other => print_response(other)?,
            }
        }
        Command::Demo {
            blocks,
            difficulty,
            miner,
        } => {
            if let Some(difficulty) = difficulty {
                config.difficulty = difficulty;
            }
            config.validate()?;

            let mut blockchain = Blockchain::from_config(&config)?;
            for round in 1..=blocks {
                let amount = round as i64 * 10;
                blockchain.submit_transaction(Transaction::new("Alice", "Bob", amount, 1));
                blockchain.submit_transaction(Transaction::new("Bob", "Carol", amount / 2, 2));

                let (block, transactions) = blockchain.append_block(&miner)?;
                println!("Mined block #{} ({})", block.get_index(), block.get_hash());
                for tx in transactions {
                    println!("  - {tx}");
                }
            }

            println!();
            print!("{}", render_chain(&blockchain.chain_view()));
            println!("Chain valid: {}", blockchain.is_valid());
        }
    }
    Ok(())
}

fn print_response(response: Response) -> Result<(), Box<dyn std::error::Error>> {
    match response {
        Response::Error { message } => Err(message.into()),
        other => {
            println!("{}", serde_json::to_string_pretty(&other)?);
            Ok(())
        }
    }
}
