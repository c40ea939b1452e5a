// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Monadfolio - wallet portfolio snapshots for the Monad network.
//!
//! [`PortfolioAssembler`] discovers tokens and NFTs held by an address from
//! recent Transfer logs and reads their balances over JSON-RPC.

pub mod badges;
pub mod config;
pub mod error;
pub mod portfolio;
pub mod rpc;
pub mod validators;

pub use badges::{evaluate_badges, Badge};
pub use config::{AssemblerConfig, Config};
pub use error::{ChainError, ConfigError, MetadataError};
pub use portfolio::{
    AccountActivityStats, FungibleAssetBalance, HttpMetadataFetcher, KnownToken,
    MetadataFetcher, NonFungibleAssetHolding, PortfolioAssembler, PortfolioSnapshot,
    WalletAddress,
};
pub use rpc::{
    create_client, ChainDataClient, LimitedClient, LogQuery, LogRecord, RpcChainClient, RpcConfig,
};
