// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only chain access used by the portfolio assembler.

use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::sol_types::SolCall;
use async_trait::async_trait;

use crate::error::ChainError;

/// Log filter over an inclusive block range.
///
/// `topics[0]` is the event signature; `None` at any position matches anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    pub address: Option<Address>,
    pub topics: [Option<B256>; 3],
    pub from_block: u64,
    pub to_block: u64,
}

impl LogQuery {
    pub fn new(event_signature: B256, from_block: u64, to_block: u64) -> Self {
        Self {
            address: None,
            topics: [Some(event_signature), None, None],
            from_block,
            to_block,
        }
    }

    pub fn topic1(mut self, topic: B256) -> Self {
        self.topics[1] = Some(topic);
        self
    }

    pub fn topic2(mut self, topic: B256) -> Self {
        self.topics[2] = Some(topic);
        self
    }
}

/// A log entry as returned by `eth_getLogs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
}

/// Capability set the assembler needs from a chain endpoint.
///
/// `call` takes ABI-encoded calldata and returns the raw return data, failing
/// with [`ChainError::Reverted`] when the contract rejects the call.
#[async_trait]
pub trait ChainDataClient: Send + Sync {
    async fn get_balance(&self, address: Address) -> Result<U256, ChainError>;

    async fn get_transaction_count(&self, address: Address) -> Result<u64, ChainError>;

    async fn get_block_number(&self) -> Result<u64, ChainError>;

    async fn get_logs(&self, query: &LogQuery) -> Result<Vec<LogRecord>, ChainError>;

    async fn call(&self, to: Address, calldata: Bytes) -> Result<Bytes, ChainError>;
}

/// Encode `call`, send it to `to` and decode the return value.
pub async fn read_contract<C, T>(client: &C, to: Address, call: T) -> Result<T::Return, ChainError>
where
    C: ChainDataClient + ?Sized,
    T: SolCall + Send,
{
    let calldata = Bytes::from(call.abi_encode());
    let output = client.call(to, calldata).await?;

    T::abi_decode_returns(&output).map_err(|e| ChainError::decode(T::SIGNATURE, e))
}
