// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration module - loads settings from environment variables.

use std::fs;
use std::time::Duration;

use crate::error::ConfigError;
use crate::portfolio::tokens::KnownToken;
use crate::rpc::RpcConfig;

pub const DEFAULT_RPC_URL: &str = "https://testnet-rpc.monad.xyz";
pub const DEFAULT_IPFS_GATEWAY: &str = "https://ipfs.io/ipfs";

/// Settings consumed by [`crate::PortfolioAssembler`].
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// Blocks scanned below the current height for Transfer events.
    pub lookback_blocks: u64,
    /// Largest block span requested in a single `eth_getLogs` call.
    pub log_chunk_blocks: u64,
    /// NFTs enumerated per contract.
    pub max_nfts_per_contract: usize,
    /// In-flight requests per fan-out stage.
    pub max_concurrency: usize,
    /// Budget for one whole assembly.
    pub request_timeout: Duration,
    pub ipfs_gateway: String,
    pub native_price_usd: Option<f64>,
    pub known_tokens: Vec<KnownToken>,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            lookback_blocks: 10_000,
            log_chunk_blocks: 1_000,
            max_nfts_per_contract: 10,
            max_concurrency: 8,
            request_timeout: Duration::from_secs(30),
            ipfs_gateway: DEFAULT_IPFS_GATEWAY.to_string(),
            native_price_usd: None,
            known_tokens: Vec::new(),
        }
    }
}

/// Main configuration for the CLI.
#[derive(Debug, Clone)]
pub struct Config {
    // RPC
    pub rpc_url: String,
    pub chain_id: u64,

    pub assembler: AssemblerConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = AssemblerConfig::default();

        let known_tokens = match std::env::var("KNOWN_TOKENS_FILE") {
            Ok(path) => load_known_tokens(&path)?,
            Err(_) => Vec::new(),
        };

        Ok(Self {
            // RPC
            rpc_url: env_var_or("MONAD_RPC_URL", DEFAULT_RPC_URL),
            chain_id: env_var_or("CHAIN_ID", "10143").parse().unwrap_or(10143),

            assembler: AssemblerConfig {
                lookback_blocks: env_var_or("LOOKBACK_BLOCKS", "10000")
                    .parse()
                    .unwrap_or(defaults.lookback_blocks),
                log_chunk_blocks: env_var_or("LOG_CHUNK_BLOCKS", "1000")
                    .parse()
                    .ok()
                    .filter(|n| *n > 0)
                    .unwrap_or(defaults.log_chunk_blocks),
                max_nfts_per_contract: env_var_or("MAX_NFTS_PER_CONTRACT", "10")
                    .parse()
                    .unwrap_or(defaults.max_nfts_per_contract),
                max_concurrency: env_var_or("MAX_CONCURRENCY", "8")
                    .parse()
                    .ok()
                    .filter(|n| *n > 0)
                    .unwrap_or(defaults.max_concurrency),
                request_timeout: env_var_or("REQUEST_TIMEOUT_SECS", "30")
                    .parse()
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.request_timeout),
                ipfs_gateway: env_var_or("IPFS_GATEWAY", DEFAULT_IPFS_GATEWAY),
                native_price_usd: std::env::var("NATIVE_PRICE_USD")
                    .ok()
                    .and_then(|v| v.parse().ok()),
                known_tokens,
            },
        })
    }

    pub fn rpc(&self) -> RpcConfig {
        RpcConfig {
            rpc_url: self.rpc_url.clone(),
            chain_id: self.chain_id,
        }
    }
}

/// Parse a JSON array of [`KnownToken`] entries.
pub fn parse_known_tokens(json: &str) -> Result<Vec<KnownToken>, serde_json::Error> {
    serde_json::from_str(json)
}

fn load_known_tokens(path: &str) -> Result<Vec<KnownToken>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::KnownTokens {
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    parse_known_tokens(&content).map_err(|e| ConfigError::KnownTokens {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

fn env_var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
