// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! RPC module for reading Monad chain state.

mod client;
mod limiter;
mod provider;

pub use client::{read_contract, ChainDataClient, LogQuery, LogRecord};
pub use limiter::LimitedClient;
pub use provider::{create_client, RpcChainClient, RpcConfig};
