use crate::core::monetary::{BLOCK_REWARD, DEFAULT_DIFFICULTY, MAX_DIFFICULTY};
use crate::core::Amount;
use crate::error::{BlockchainError, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

static DEFAULT_NODE_ADDR: &str = "127.0.0.1:5000";

const NODE_ADDRESS_KEY: &str = "PKO_NODE_ADDRESS";
const DIFFICULTY_KEY: &str = "PKO_DIFFICULTY";
const BLOCK_REWARD_KEY: &str = "PKO_BLOCK_REWARD";
const MINING_ADDRESS_KEY: &str = "PKO_MINER_ADDRESS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the request server binds to and clients connect to
    pub node_addr: String,
    /// Leading zero hex characters required of every block hash
    pub difficulty: u32,
    /// Base coinbase reward, before fees
    pub block_reward: Amount,
    /// Default miner address for the `mine` command
    pub miner_address: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            node_addr: String::from(DEFAULT_NODE_ADDR),
            difficulty: DEFAULT_DIFFICULTY,
            block_reward: BLOCK_REWARD,
            miner_address: None,
        }
    }
}

impl Config {
    /// Defaults, then the TOML file at `path` if given, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let mut config = match path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                let contents = fs::read_to_string(path).map_err(|e| {
                    BlockchainError::Config(format!("Failed to read {}: {e}", path.display()))
                })?;
                Self::from_toml_str(&contents)?
            }
            None => Config::default(),
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Config> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `PKO_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(NODE_ADDRESS_KEY) {
            self.node_addr = addr;
        }

        if let Some(value) = lookup(DIFFICULTY_KEY) {
            self.difficulty = value.trim().parse().map_err(|e| {
                BlockchainError::Config(format!("{DIFFICULTY_KEY}={value} is not a valid difficulty: {e}"))
            })?;
        }

        if let Some(value) = lookup(BLOCK_REWARD_KEY) {
            self.block_reward = value.trim().parse().map_err(|e| {
                BlockchainError::Config(format!("{BLOCK_REWARD_KEY}={value} is not a valid reward: {e}"))
            })?;
        }

        if let Some(addr) = lookup(MINING_ADDRESS_KEY) {
            self.miner_address = Some(addr);
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.difficulty > MAX_DIFFICULTY {
            return Err(BlockchainError::Config(format!(
                "difficulty {} exceeds the maximum of {MAX_DIFFICULTY}",
                self.difficulty
            )));
        }

        if !self.block_reward.is_finite() || self.block_reward.is_negative() {
            return Err(BlockchainError::Config(format!(
                "block reward must be a non-negative number, got {}",
                self.block_reward
            )));
        }

        if self.node_addr.trim().is_empty() {
            return Err(BlockchainError::Config("node address is empty".to_string()));
        }

        Ok(())
    }
}
