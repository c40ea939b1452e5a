// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Portfolio discovery and assembly.

pub mod assembler;
pub mod discovery;
pub mod fungible;
pub mod metadata;
pub mod nft;
pub mod stats;
pub mod tokens;
pub mod types;

pub use assembler::PortfolioAssembler;
pub use discovery::{discover_token_contracts, Discovery, TRANSFER_TOPIC};
pub use metadata::{HttpMetadataFetcher, MetadataFetcher};
pub use stats::{fetch_account, fetch_account_stats};
pub use tokens::KnownToken;
pub use types::{
    AccountActivityStats, FungibleAssetBalance, NonFungibleAssetHolding, PortfolioSnapshot,
    WalletAddress,
};
