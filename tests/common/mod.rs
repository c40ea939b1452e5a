// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory chain and metadata doubles for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{keccak256, Address, Bytes, U256};
use alloy::sol_types::SolValue;
use async_trait::async_trait;
use monadfolio::error::{ChainError, MetadataError};
use monadfolio::portfolio::TRANSFER_TOPIC;
use monadfolio::{ChainDataClient, LogQuery, LogRecord, MetadataFetcher};

type Handler = Arc<dyn Fn(&[u8]) -> Result<Bytes, ChainError> + Send + Sync>;

pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

pub fn encoded<T: SolValue>(value: T) -> Bytes {
    Bytes::from(value.abi_encode())
}

fn reverted() -> Result<Bytes, ChainError> {
    Err(ChainError::Reverted("execution reverted".into()))
}

/// Word `n` (0-based) of the call arguments, after the selector.
pub fn arg_u256(input: &[u8], n: usize) -> U256 {
    let start = 4 + n * 32;
    U256::from_be_slice(&input[start..start + 32])
}

#[derive(Clone)]
pub struct MockChainClient {
    balance: Result<U256, ChainError>,
    tx_count: Result<u64, ChainError>,
    block_number: Result<u64, ChainError>,
    logs: Vec<(u64, LogRecord)>,
    handlers: HashMap<(Address, [u8; 4]), Handler>,
    delay: Option<Duration>,
    requests: Arc<AtomicUsize>,
    balance_reads: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
    calls: Arc<Mutex<Vec<(Address, [u8; 4])>>>,
}

impl Default for MockChainClient {
    fn default() -> Self {
        Self {
            balance: Ok(U256::ZERO),
            tx_count: Ok(0),
            block_number: Ok(100_000),
            logs: Vec::new(),
            handlers: HashMap::new(),
            delay: None,
            requests: Arc::new(AtomicUsize::new(0)),
            balance_reads: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockChainClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(mut self, wei: U256) -> Self {
        self.balance = Ok(wei);
        self
    }

    pub fn failing_balance(mut self) -> Self {
        self.balance = Err(ChainError::Transport("connection refused".into()));
        self
    }

    pub fn with_tx_count(mut self, count: u64) -> Self {
        self.tx_count = Ok(count);
        self
    }

    pub fn failing_tx_count(mut self) -> Self {
        self.tx_count = Err(ChainError::Transport("connection reset".into()));
        self
    }

    pub fn with_block_number(mut self, height: u64) -> Self {
        self.block_number = Ok(height);
        self
    }

    pub fn unreachable(mut self) -> Self {
        let err = ChainError::Transport("connection refused".into());
        self.balance = Err(err.clone());
        self.tx_count = Err(err.clone());
        self.block_number = Err(err);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// A `Transfer(from, to, value)` log emitted by `contract` at `block`.
    pub fn with_transfer(mut self, block: u64, contract: Address, from: Address, to: Address) -> Self {
        self.logs.push((
            block,
            LogRecord {
                address: contract,
                topics: vec![TRANSFER_TOPIC, from.into_word(), to.into_word()],
                data: encoded(U256::from(1u64)),
            },
        ));
        self
    }

    pub fn respond(self, contract: Address, signature: &str, output: Bytes) -> Self {
        self.respond_with(contract, signature, move |_| Ok(output.clone()))
    }

    pub fn respond_with<F>(mut self, contract: Address, signature: &str, handler: F) -> Self
    where
        F: Fn(&[u8]) -> Result<Bytes, ChainError> + Send + Sync + 'static,
    {
        self.handlers
            .insert((contract, selector(signature)), Arc::new(handler));
        self
    }

    pub fn revert(self, contract: Address, signature: &str) -> Self {
        self.respond_with(contract, signature, |_| reverted())
    }

    /// ERC-20 without ERC-165, holding `balance` for every account.
    pub fn with_erc20(self, contract: Address, symbol: &str, name: &str, decimals: u8, balance: U256) -> Self {
        self.respond(contract, "totalSupply()", encoded(U256::from(10u64).pow(U256::from(30u64))))
            .respond(contract, "decimals()", encoded(U256::from(decimals)))
            .respond(contract, "symbol()", encoded(symbol.to_string()))
            .respond(contract, "name()", encoded(name.to_string()))
            .respond(contract, "balanceOf(address)", encoded(balance))
    }

    /// Enumerable ERC-721 where the wallet owns `count` tokens with ids
    /// `index + 1` and URIs `ipfs://<cid>/<id>.json`.
    pub fn with_erc721(self, contract: Address, name: &str, count: u64, cid: &str) -> Self {
        let cid = cid.to_string();
        self.respond(contract, "supportsInterface(bytes4)", encoded(true))
            .respond(contract, "name()", encoded(name.to_string()))
            .respond(contract, "balanceOf(address)", encoded(U256::from(count)))
            .respond_with(contract, "tokenOfOwnerByIndex(address,uint256)", |input| {
                Ok(encoded(arg_u256(input, 1) + U256::from(1u64)))
            })
            .respond_with(contract, "tokenURI(uint256)", move |input| {
                Ok(encoded(format!("ipfs://{}/{}.json", cid, arg_u256(input, 0))))
            })
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn balance_reads(&self) -> usize {
        self.balance_reads.load(Ordering::SeqCst)
    }

    /// Most requests that were ever outstanding at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls_to(&self, contract: Address, signature: &str) -> usize {
        let wanted = (contract, selector(signature));
        self.calls.lock().unwrap().iter().filter(|c| **c == wanted).count()
    }

    async fn tick(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

fn matches(query: &LogQuery, block: u64, log: &LogRecord) -> bool {
    if block < query.from_block || block > query.to_block {
        return false;
    }
    if let Some(address) = query.address {
        if log.address != address {
            return false;
        }
    }
    query
        .topics
        .iter()
        .enumerate()
        .all(|(i, topic)| topic.map_or(true, |t| log.topics.get(i) == Some(&t)))
}

#[async_trait]
impl ChainDataClient for MockChainClient {
    async fn get_balance(&self, _address: Address) -> Result<U256, ChainError> {
        self.balance_reads.fetch_add(1, Ordering::SeqCst);
        self.tick().await;
        self.balance.clone()
    }

    async fn get_transaction_count(&self, _address: Address) -> Result<u64, ChainError> {
        self.tick().await;
        self.tx_count.clone()
    }

    async fn get_block_number(&self) -> Result<u64, ChainError> {
        self.tick().await;
        self.block_number.clone()
    }

    async fn get_logs(&self, query: &LogQuery) -> Result<Vec<LogRecord>, ChainError> {
        self.tick().await;
        Ok(self
            .logs
            .iter()
            .filter(|(block, log)| matches(query, *block, log))
            .map(|(_, log)| log.clone())
            .collect())
    }

    async fn call(&self, to: Address, calldata: Bytes) -> Result<Bytes, ChainError> {
        self.tick().await;
        if calldata.len() < 4 {
            return reverted();
        }
        let key = (to, [calldata[0], calldata[1], calldata[2], calldata[3]]);
        self.calls.lock().unwrap().push(key);

        match self.handlers.get(&key) {
            Some(handler) => handler(&calldata),
            None => reverted(),
        }
    }
}

#[derive(Clone, Default)]
pub struct MockMetadataFetcher {
    documents: HashMap<String, serde_json::Value>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl MockMetadataFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: &str, document: serde_json::Value) -> Self {
        self.documents.insert(url.to_string(), document);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataFetcher for MockMetadataFetcher {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, MetadataError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| MetadataError::Status {
                status: 404,
                url: url.to_string(),
            })
    }
}
