// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Caps the number of requests in flight against one endpoint.

use alloy::primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use tokio::sync::{Semaphore, SemaphorePermit};

use super::client::{ChainDataClient, LogQuery, LogRecord};
use crate::error::ChainError;

/// [`ChainDataClient`] that holds a semaphore permit for the duration of
/// every request it forwards.
pub struct LimitedClient<C> {
    inner: C,
    permits: Semaphore,
}

impl<C: ChainDataClient> LimitedClient<C> {
    pub fn new(inner: C, max_in_flight: usize) -> Self {
        Self {
            inner,
            permits: Semaphore::new(max_in_flight.max(1)),
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    async fn permit(&self) -> Result<SemaphorePermit<'_>, ChainError> {
        self.permits
            .acquire()
            .await
            .map_err(|e| ChainError::Transport(format!("request limiter closed: {e}")))
    }
}

#[async_trait]
impl<C: ChainDataClient> ChainDataClient for LimitedClient<C> {
    async fn get_balance(&self, address: Address) -> Result<U256, ChainError> {
        let _permit = self.permit().await?;
        self.inner.get_balance(address).await
    }

    async fn get_transaction_count(&self, address: Address) -> Result<u64, ChainError> {
        let _permit = self.permit().await?;
        self.inner.get_transaction_count(address).await
    }

    async fn get_block_number(&self) -> Result<u64, ChainError> {
        let _permit = self.permit().await?;
        self.inner.get_block_number().await
    }

    async fn get_logs(&self, query: &LogQuery) -> Result<Vec<LogRecord>, ChainError> {
        let _permit = self.permit().await?;
        self.inner.get_logs(query).await
    }

    async fn call(&self, to: Address, calldata: Bytes) -> Result<Bytes, ChainError> {
        let _permit = self.permit().await?;
        self.inner.call(to, calldata).await
    }
}
