// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Provider setup and the alloy-backed [`ChainDataClient`].

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, U256},
    providers::{Provider, ProviderBuilder},
    rpc::types::{Filter, TransactionRequest},
    transports::{http::reqwest::Url, TransportError},
};
use async_trait::async_trait;
use tracing::debug;

use super::client::{ChainDataClient, LogQuery, LogRecord};
use crate::error::{ChainError, ConfigError};

/// Configuration for RPC connection.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    pub rpc_url: String,
    pub chain_id: u64,
}

/// Create a read-only client for the configured endpoint.
pub fn create_client(
    config: &RpcConfig,
) -> Result<RpcChainClient<impl Provider + Clone>, ConfigError> {
    let url: Url = config.rpc_url.parse().map_err(|e| ConfigError::RpcUrl {
        url: config.rpc_url.clone(),
        reason: format!("{e}"),
    })?;

    let provider = ProviderBuilder::new().connect_http(url);

    debug!("Created HTTP provider for chain {}", config.chain_id);

    Ok(RpcChainClient::new(provider))
}

/// [`ChainDataClient`] over any alloy provider.
#[derive(Debug, Clone)]
pub struct RpcChainClient<P> {
    provider: P,
}

impl<P: Provider + Clone> RpcChainClient<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

fn transport_error(e: TransportError) -> ChainError {
    ChainError::Transport(e.to_string())
}

// A JSON-RPC error response to eth_call means the EVM rejected the call.
fn call_error(e: TransportError) -> ChainError {
    match e.as_error_resp() {
        Some(payload) => ChainError::Reverted(payload.message.to_string()),
        None => ChainError::Transport(e.to_string()),
    }
}

fn to_filter(query: &LogQuery) -> Filter {
    let mut filter = Filter::new()
        .from_block(query.from_block)
        .to_block(query.to_block);

    if let Some(address) = query.address {
        filter = filter.address(address);
    }
    if let Some(signature) = query.topics[0] {
        filter = filter.event_signature(signature);
    }
    if let Some(topic) = query.topics[1] {
        filter = filter.topic1(topic);
    }
    if let Some(topic) = query.topics[2] {
        filter = filter.topic2(topic);
    }

    filter
}

#[async_trait]
impl<P: Provider + Clone> ChainDataClient for RpcChainClient<P> {
    async fn get_balance(&self, address: Address) -> Result<U256, ChainError> {
        self.provider
            .get_balance(address)
            .await
            .map_err(transport_error)
    }

    async fn get_transaction_count(&self, address: Address) -> Result<u64, ChainError> {
        self.provider
            .get_transaction_count(address)
            .await
            .map_err(transport_error)
    }

    async fn get_block_number(&self) -> Result<u64, ChainError> {
        self.provider.get_block_number().await.map_err(transport_error)
    }

    async fn get_logs(&self, query: &LogQuery) -> Result<Vec<LogRecord>, ChainError> {
        let logs = self
            .provider
            .get_logs(&to_filter(query))
            .await
            .map_err(transport_error)?;

        Ok(logs
            .into_iter()
            .map(|log| LogRecord {
                address: log.inner.address,
                topics: log.inner.data.topics().to_vec(),
                data: log.inner.data.data.clone(),
            })
            .collect())
    }

    async fn call(&self, to: Address, calldata: Bytes) -> Result<Bytes, ChainError> {
        let tx = TransactionRequest::default()
            .with_to(to)
            .with_input(calldata);

        self.provider.call(tx).await.map_err(call_error)
    }
}
